//! Engine tests
//!
//! Tests for:
//! - Bucket preparation and packet loss
//! - Interval estimation and gap segmentation
//! - Time and value scales
//! - Density strategies
//! - Packet-loss region merging
//! - Stat lines and median markers
//! - Tooltip, brush and resize interaction
//! - Preference loading and persistence
//! - SVG export

pub mod density_tests;
pub mod export_tests;
pub mod interaction_tests;
pub mod packet_loss_tests;
pub mod prepare_tests;
pub mod scale_tests;
pub mod segment_tests;
pub mod settings_tests;
pub mod stat_lines_tests;
