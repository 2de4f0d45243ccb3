//! Tests for preference persistence

use crate::common::temp_path;
use pingsmoke::chart::DensityMode;
use pingsmoke::settings::{
    ChartPreferences, JsonPreferenceStore, MemoryPreferenceStore, PreferenceKey, PreferenceStore,
};
use serde_json::json;

#[test]
fn test_bad_values_fall_back_per_key() {
    let mut store = MemoryPreferenceStore::new();
    store.set("show_min", json!(true)).unwrap();
    store.set("show_median", json!("yes")).unwrap();
    store.set("density_mode", json!("sparkles")).unwrap();
    store.set("clip_to_p99", json!(true)).unwrap();

    let prefs = ChartPreferences::load_from(&store);
    let defaults = ChartPreferences::default();
    assert!(prefs.show_min);
    assert!(prefs.clip_to_p99);
    assert_eq!(prefs.show_median, defaults.show_median);
    assert_eq!(prefs.density_mode, defaults.density_mode);
}

#[test]
fn test_empty_store_gives_defaults() {
    let store = MemoryPreferenceStore::new();
    assert_eq!(ChartPreferences::load_from(&store), ChartPreferences::default());
}

#[test]
fn test_memory_round_trip() {
    let prefs = ChartPreferences {
        show_max: true,
        show_stats: false,
        density_mode: DensityMode::HistogramBand,
        ..Default::default()
    };
    let mut store = MemoryPreferenceStore::new();
    prefs.save_to(&mut store).unwrap();

    assert_eq!(store.get("density_mode"), Some(json!("histogram_band")));
    assert_eq!(ChartPreferences::load_from(&store), prefs);
}

#[test]
fn test_single_key_save() {
    let mut prefs = ChartPreferences::default();
    let mut store = MemoryPreferenceStore::new();
    prefs.show_avg = true;
    prefs.save_key(PreferenceKey::ShowAvg, &mut store).unwrap();

    assert_eq!(store.get("show_avg"), Some(json!(true)));
    assert_eq!(store.get("show_min"), None);
}

#[test]
fn test_json_store_persists_across_opens() {
    let path = temp_path("prefs-persist.json");
    let _ = std::fs::remove_file(&path);

    let prefs = ChartPreferences {
        clip_to_p99: true,
        show_packet_loss: false,
        density_mode: DensityMode::Gradient,
        ..Default::default()
    };
    {
        let mut store = JsonPreferenceStore::open(&path);
        prefs.save_to(&mut store).unwrap();
    }

    let reopened = JsonPreferenceStore::open(&path);
    assert_eq!(reopened.path(), path.as_path());
    assert_eq!(ChartPreferences::load_from(&reopened), prefs);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_corrupt_file_opens_empty() {
    let path = temp_path("prefs-corrupt.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = JsonPreferenceStore::open(&path);
    assert_eq!(store.get("show_median"), None);
    assert_eq!(ChartPreferences::load_from(&store), ChartPreferences::default());

    let _ = std::fs::remove_file(&path);
}
