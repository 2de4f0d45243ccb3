//! Main application state and the eframe::App implementation.

use eframe::egui;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use crate::chart::{ChartEngine, ChartOptions, EventSource, Subscription, ZoomRange};
use crate::demo::generate_buckets;
use crate::loader::load_buckets;
use crate::settings::{ChartPreferences, JsonPreferenceStore, MemoryPreferenceStore, PreferenceStore};
use crate::state::{RawBucket, ToastType};

/// Buckets in the demo series
const DEMO_BUCKETS: usize = 360;
/// Spacing of the demo series (one minute)
const DEMO_INTERVAL_MS: i64 = 60_000;

/// Result from background file loading
enum LoadResult {
    Success { name: String, buckets: Vec<RawBucket> },
    Error(String),
}

/// Main application state
pub struct PingSmokeApp {
    /// Chart engine, shared with the resize subscription
    pub(crate) engine: Rc<RefCell<ChartEngine>>,
    /// Container width notifications feeding the engine
    pub(crate) resize_events: EventSource<f64>,
    /// Every bucket of the current source, unfiltered
    buckets: Vec<RawBucket>,
    /// Name shown in the top bar
    pub(crate) source_name: String,
    /// Applied zoom ranges, innermost last
    pub(crate) zoom_stack: Vec<ZoomRange>,
    /// Zoom selection emitted by the engine, applied on the next frame
    pending_zoom: Rc<RefCell<Option<ZoomRange>>>,
    _zoom_subscription: Subscription,
    // === Preferences ===
    pub(crate) prefs: ChartPreferences,
    pub(crate) store: Box<dyn PreferenceStore>,
    // === Feedback ===
    /// Toast messages for user feedback
    pub(crate) toast_message: Option<(String, std::time::Instant, ToastType)>,
    /// Channel for receiving loaded files from background thread
    load_receiver: Option<Receiver<LoadResult>>,
    /// File currently being loaded
    pub(crate) loading: Option<String>,
    /// Track dropped files to prevent duplicates
    last_drop_time: Option<std::time::Instant>,
}

impl PingSmokeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, initial_file: Option<PathBuf>) -> Self {
        let store: Box<dyn PreferenceStore> = match JsonPreferenceStore::open_default() {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!("Preferences will not persist: {}", e);
                Box::new(MemoryPreferenceStore::new())
            }
        };
        let prefs = ChartPreferences::load_from(store.as_ref());

        let engine = Rc::new(RefCell::new(ChartEngine::new(ChartOptions::default(), prefs)));
        let resize_events = EventSource::new();
        ChartEngine::observe_resize(&engine, &resize_events);

        let pending_zoom = Rc::new(RefCell::new(None));
        let sink = pending_zoom.clone();
        let zoom_subscription = engine.borrow().on_zoom(move |range: &ZoomRange| {
            *sink.borrow_mut() = Some(*range);
        });

        let mut app = Self {
            engine,
            resize_events,
            buckets: Vec::new(),
            source_name: String::new(),
            zoom_stack: Vec::new(),
            pending_zoom,
            _zoom_subscription: zoom_subscription,
            prefs,
            store,
            toast_message: None,
            load_receiver: None,
            loading: None,
            last_drop_time: None,
        };

        match initial_file {
            Some(path) => app.start_loading_file(path),
            None => app.load_demo(),
        }
        app
    }

    /// Replace the data with the synthetic demo series ending now
    pub(crate) fn load_demo(&mut self) {
        let now = chrono::Utc::now().timestamp_millis();
        let start = now - DEMO_BUCKETS as i64 * DEMO_INTERVAL_MS;
        let start = start - start.rem_euclid(DEMO_INTERVAL_MS);
        self.set_source("Demo data", generate_buckets(start, DEMO_BUCKETS, DEMO_INTERVAL_MS));
    }

    fn set_source(&mut self, name: &str, buckets: Vec<RawBucket>) {
        self.source_name = name.to_string();
        self.buckets = buckets;
        self.zoom_stack.clear();
        self.apply_view();
    }

    /// Push the buckets inside the current zoom range to the engine
    fn apply_view(&mut self) {
        let mut engine = self.engine.borrow_mut();
        match self.zoom_stack.last() {
            Some(range) => {
                let visible: Vec<RawBucket> = self
                    .buckets
                    .iter()
                    .filter(|b| range.contains(b.start))
                    .cloned()
                    .collect();
                engine.set_data(&visible);
            }
            None => engine.set_data(&self.buckets),
        }
    }

    /// Start loading a file in the background
    pub(crate) fn start_loading_file(&mut self, path: PathBuf) {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        self.loading = Some(filename.clone());

        let (sender, receiver): (Sender<LoadResult>, Receiver<LoadResult>) = channel();
        self.load_receiver = Some(receiver);

        // Spawn background thread for loading
        thread::spawn(move || {
            let result = match load_buckets(&path) {
                Ok(buckets) => LoadResult::Success {
                    name: filename,
                    buckets,
                },
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = sender.send(result);
        });
    }

    /// Check for completed background loads
    fn check_loading_complete(&mut self) {
        let Some(receiver) = &self.load_receiver else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        match result {
            LoadResult::Success { name, buckets } => {
                let count = buckets.len();
                self.set_source(&name, buckets);
                self.show_toast(&format!("Loaded {} buckets", count), ToastType::Success);
            }
            LoadResult::Error(e) => {
                tracing::warn!("{}", e);
                self.show_toast(&e, ToastType::Error);
                if self.buckets.is_empty() {
                    self.load_demo();
                }
            }
        }
        self.load_receiver = None;
        self.loading = None;
    }

    /// Apply a zoom selection emitted by the chart
    fn apply_pending_zoom(&mut self) {
        let pending = self.pending_zoom.borrow_mut().take();
        if let Some(range) = pending {
            self.zoom_stack.push(range);
            self.apply_view();
        }
    }

    /// Step back out of the innermost zoom
    pub(crate) fn zoom_out(&mut self) {
        if self.zoom_stack.pop().is_some() {
            self.apply_view();
        }
    }

    pub(crate) fn reset_zoom(&mut self) {
        if !self.zoom_stack.is_empty() {
            self.zoom_stack.clear();
            self.apply_view();
        }
    }

    /// Show a toast message
    pub(crate) fn show_toast(&mut self, message: &str, toast_type: ToastType) {
        self.toast_message = Some((message.to_string(), std::time::Instant::now(), toast_type));
    }

    /// Open a file picker for a bucket file
    pub(crate) fn open_file_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Bucket JSON", &["json"])
            .pick_file()
        {
            self.start_loading_file(path);
        }
    }

    /// Handle file drops
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        // Don't accept drops while loading
        if self.loading.is_some() {
            return;
        }

        // Debounce file drops
        if let Some(last_drop) = self.last_drop_time {
            if last_drop.elapsed().as_secs() < 2 {
                return;
            }
        }

        let dropped: Option<PathBuf> = ctx.input(|i| i.raw.dropped_files.iter().find_map(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.last_drop_time = Some(std::time::Instant::now());
            self.start_loading_file(path);
        }
    }
}

impl Drop for PingSmokeApp {
    fn drop(&mut self) {
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            engine.dispose();
        }
    }
}

impl eframe::App for PingSmokeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background loads
        self.check_loading_complete();

        // Handle file drops
        self.handle_dropped_files(ctx);

        // Zoom selections from the last frame
        self.apply_pending_zoom();

        // Apply dark theme
        ctx.set_visuals(egui::Visuals::dark());

        // Request repaint while loading (for spinner animation)
        if self.loading.is_some() {
            ctx.request_repaint();
        }

        // Toast notifications
        self.render_toast(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_toolbar(ui);
            ui.add_space(4.0);
        });

        egui::SidePanel::left("controls_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                self.render_controls(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_chart(ui);
        });
    }
}
