//! Toolbar and the preferences side panel.

use eframe::egui;
use strum::IntoEnumIterator;

use crate::app::PingSmokeApp;
use crate::chart::density::DensityMode;
use crate::settings::PreferenceKey;
use crate::state::ToastType;

impl PingSmokeApp {
    /// Top bar: source, file actions and zoom controls
    pub fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Open…").clicked() {
                self.open_file_dialog();
            }
            if ui.button("Demo data").clicked() {
                self.load_demo();
            }
            ui.separator();

            match &self.loading {
                Some(name) => {
                    ui.spinner();
                    ui.label(format!("Loading {}", name));
                }
                None => {
                    ui.label(egui::RichText::new(&self.source_name).strong());
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let zoomed = !self.zoom_stack.is_empty();
                if ui
                    .add_enabled(zoomed, egui::Button::new("Reset zoom"))
                    .clicked()
                {
                    self.reset_zoom();
                }
                if ui.add_enabled(zoomed, egui::Button::new("Zoom out")).clicked() {
                    self.zoom_out();
                }
                if zoomed {
                    ui.label(format!("Zoom level {}", self.zoom_stack.len()));
                }
            });
        });
    }

    /// Preference toggles; every change is written back to the store
    pub fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Display");
        ui.add_space(6.0);

        let mut changed = Vec::new();
        for key in PreferenceKey::iter().filter(|k| k.is_flag()) {
            if let Some(flag) = self.prefs.flag_mut(key) {
                if ui.checkbox(flag, key.label()).changed() {
                    changed.push(key);
                }
            }
        }

        ui.add_space(8.0);
        ui.label(PreferenceKey::DensityMode.label());
        let before = self.prefs.density_mode;
        egui::ComboBox::from_id_salt("density_mode")
            .selected_text(self.prefs.density_mode.label())
            .show_ui(ui, |ui| {
                for mode in DensityMode::iter() {
                    ui.selectable_value(&mut self.prefs.density_mode, mode, mode.label());
                }
            });
        if self.prefs.density_mode != before {
            changed.push(PreferenceKey::DensityMode);
        }

        if !changed.is_empty() {
            self.engine.borrow_mut().set_preferences(self.prefs);
            for key in changed {
                if let Err(e) = self.prefs.save_key(key, self.store.as_mut()) {
                    tracing::warn!("Failed to save preference {}: {}", key, e);
                    self.show_toast(&format!("Could not save preferences: {}", e), ToastType::Warning);
                }
            }
        }

        ui.add_space(12.0);
        ui.separator();
        ui.label(
            egui::RichText::new("Drag across the chart to zoom, double-click to zoom out.")
                .small()
                .weak(),
        );
    }
}
