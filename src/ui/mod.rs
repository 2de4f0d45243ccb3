//! UI rendering modules for the pingsmoke viewer.
//!
//! - `chart` - Interactive chart widget (hover tooltip, brush zoom)
//! - `controls` - Toolbar and preference toggles
//! - `painter` - Paints engine scenes with egui
//! - `toast` - Toast notification system

pub mod chart;
pub mod controls;
pub mod painter;
pub mod toast;
