//! pingsmoke - latency smoke-chart rendering engine and viewer
//!
//! This library turns bucketed ping-latency data into a layered "smoke"
//! chart: min-max bars shaded by latency density, packet-loss regions,
//! smoothed summary lines, axes, a stats panel and a legend, plus hover
//! inspection and drag-to-zoom.
//!
//! ## Module Structure
//!
//! - [`state`] - Core data types and constants
//! - [`analysis`] - Bucket preparation, interval estimation, statistics
//! - [`chart`] - The rendering engine producing backend-neutral scenes
//! - [`settings`] - Chart preferences and their persistence
//! - [`loader`] - Bucket file loading
//! - [`demo`] - Synthetic demo series
//! - [`export`] - SVG export of rendered scenes
//! - [`app`] - Main application state and eframe::App implementation
//! - [`ui`] - User interface components
//!   - `chart` - Interactive chart widget
//!   - `controls` - Toolbar and preference toggles
//!   - `painter` - Scene painting with egui
//!   - `toast` - Toast notification system

pub mod analysis;
pub mod app;
pub mod chart;
pub mod demo;
pub mod export;
pub mod loader;
pub mod settings;
pub mod state;
pub mod ui;
