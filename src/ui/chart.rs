//! Interactive chart widget: paints the engine's scene and routes pointer
//! hover to the tooltip and drags to the brush.

use eframe::egui;

use crate::app::PingSmokeApp;
use crate::chart::scene::Pos;
use crate::state::TOOLTIP_THROTTLE_MS;
use crate::ui::painter::paint_scene;

/// The chart never gets shorter than this
const MIN_CHART_HEIGHT: f64 = 260.0;

impl PingSmokeApp {
    /// Render the chart into the remaining space of `ui`
    pub fn render_chart(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();

        // Width goes through the resize subscription, height is an option
        self.resize_events.emit(&(available.x as f64));

        let mut engine = self.engine.borrow_mut();
        let mut options = *engine.options();
        options.height = (available.y as f64).max(MIN_CHART_HEIGHT);
        engine.set_options(options);
        engine.render_if_needed();

        let size = engine.size();
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(size.width as f32, size.height as f32),
            egui::Sense::click_and_drag(),
        );
        let painter = ui.painter_at(rect);
        paint_scene(&painter, rect.min, engine.scene());

        let to_chart = |p: egui::Pos2| Pos::new((p.x - rect.min.x) as f64, (p.y - rect.min.y) as f64);

        // Brush
        if response.drag_started() {
            if let Some(p) = response.interact_pointer_pos() {
                engine.brush_start(to_chart(p).x);
            }
        } else if response.dragged() {
            if let Some(p) = response.interact_pointer_pos() {
                engine.brush_drag(to_chart(p).x);
            }
        }
        if response.drag_stopped() {
            match response.interact_pointer_pos() {
                Some(p) => {
                    engine.brush_end(to_chart(p).x);
                    ui.ctx().request_repaint();
                }
                None => engine.brush_cancel(),
            }
        }

        // Tooltip
        match response.hover_pos() {
            Some(p) => {
                let now_ms = (ui.input(|i| i.time) * 1000.0) as u64;
                if !engine.pointer_move(now_ms, to_chart(p)) {
                    // Throttled; look again once the window has passed
                    ui.ctx()
                        .request_repaint_after(std::time::Duration::from_millis(TOOLTIP_THROTTLE_MS));
                }
            }
            None => engine.pointer_leave(),
        }

        paint_scene(&painter, rect.min, &engine.overlay());

        if response.double_clicked() {
            drop(engine);
            self.zoom_out();
        }
    }
}
