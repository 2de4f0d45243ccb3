//! Headless renderer: bucket JSON in, SVG chart out.
//!
//! Usage: `render_svg <buckets.json> [out.svg] [width] [height]`
//!
//! Preferences come from the viewer's preferences file when one exists.
//! Without an output path the SVG is written to stdout.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use pingsmoke::chart::{ChartEngine, ChartOptions};
use pingsmoke::export::render_svg;
use pingsmoke::loader::load_buckets;
use pingsmoke::settings::{ChartPreferences, JsonPreferenceStore, MemoryPreferenceStore};
use pingsmoke::state::DEFAULT_CHART_WIDTH;

fn parse_dimension(arg: Option<String>, name: &str) -> Result<Option<f64>> {
    match arg {
        None => Ok(None),
        Some(text) => {
            let value: f64 = text
                .parse()
                .with_context(|| format!("Invalid {}: {}", name, text))?;
            if !(value.is_finite() && value > 0.0) {
                bail!("{} must be positive, got {}", name, text);
            }
            Ok(Some(value))
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next().map(PathBuf::from) else {
        bail!("Usage: render_svg <buckets.json> [out.svg] [width] [height]");
    };
    let output = args.next().filter(|a| a != "-").map(PathBuf::from);
    let width = parse_dimension(args.next(), "width")?;
    let height = parse_dimension(args.next(), "height")?;

    let buckets = load_buckets(&input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let prefs = match JsonPreferenceStore::open_default() {
        Ok(store) => ChartPreferences::load_from(&store),
        Err(_) => ChartPreferences::load_from(&MemoryPreferenceStore::new()),
    };

    let defaults = ChartOptions::default();
    let options = ChartOptions {
        width: Some(width.unwrap_or(DEFAULT_CHART_WIDTH)),
        height: height.unwrap_or(defaults.height),
        ..defaults
    };

    let mut engine = ChartEngine::new(options, prefs);
    engine.set_data(&buckets);
    let svg = render_svg(engine.render());

    match output {
        Some(path) => {
            std::fs::write(&path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{}", svg),
    }
    engine.dispose();
    Ok(())
}
