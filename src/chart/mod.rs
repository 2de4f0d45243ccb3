//! The smoke-chart rendering engine.
//!
//! The engine turns prepared latency buckets into a layered [`Scene`]:
//!
//! - [`scale`] - time and value scales shared by all layers
//! - [`density`] - smoke bars with four density encodings
//! - [`packet_loss`] - merged loss-severity background regions
//! - [`stat_lines`] - smoothed median/min/max/avg lines
//! - [`axes`], [`stats_panel`], [`legend`] - chart chrome
//! - [`tooltip`], [`brush`] - pointer inspection and zoom selection
//! - [`engine`] - the orchestrator tying it together
//!
//! Scenes are backend-neutral; the egui viewer and the SVG exporter both
//! consume them.

pub mod axes;
pub mod brush;
pub mod curve;
pub mod density;
pub mod engine;
pub mod events;
pub mod legend;
pub mod packet_loss;
pub mod scale;
pub mod scene;
pub mod stat_lines;
pub mod stats_panel;
pub mod tooltip;

pub use brush::ZoomRange;
pub use density::DensityMode;
pub use engine::{ChartEngine, ChartLayout, ChartOptions, RenderFrame};
pub use events::{EventSource, Subscription};
pub use scene::{LayerKind, Scene};
