//! pingsmoke - latency smoke-chart viewer
//!
//! Opens a bucket JSON file given on the command line (or through the file
//! picker) and renders it as an interactive smoke chart. Without a file the
//! viewer starts with a synthetic demo series.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use pingsmoke::app::PingSmokeApp;

/// Set the macOS application name for the dock
#[cfg(target_os = "macos")]
fn set_macos_app_name() {
    use objc2::{class, msg_send};
    use objc2_foundation::NSString;

    unsafe {
        let app_name = NSString::from_str("PingSmoke");
        let process_info_class = class!(NSProcessInfo);
        let process_info: *mut objc2::runtime::AnyObject =
            msg_send![process_info_class, processInfo];
        let _: () = msg_send![process_info, setProcessName: &*app_name];
    }
}

#[cfg(not(target_os = "macos"))]
fn set_macos_app_name() {}

fn main() -> eframe::Result<()> {
    // Set macOS app name before anything else
    set_macos_app_name();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let initial_file = std::env::args_os().nth(1).map(std::path::PathBuf::from);

    // Configure native options
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 720.0])
            .with_min_inner_size([800.0, 480.0])
            .with_title("PingSmoke - Latency Viewer")
            .with_app_id("PingSmoke")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "PingSmoke",
        native_options,
        Box::new(|cc| Ok(Box::new(PingSmokeApp::new(cc, initial_file)))),
    )
}
