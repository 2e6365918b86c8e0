//! Status badge component

use egui::{Response, Rounding, Ui, Vec2};

use crate::core::RunState;
use crate::ui::theme::Theme;

pub struct StatusBadge;

impl StatusBadge {
    /// Render a pill showing the core run state
    pub fn show(ui: &mut Ui, state: RunState) -> Response {
        let color = Theme::status_color(state);
        let (rect, response) = ui.allocate_exact_size(Vec2::new(90.0, 26.0), egui::Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();

            painter.rect_filled(rect, Rounding::same(13.0), color.linear_multiply(0.15));
            painter.rect_stroke(
                rect,
                Rounding::same(13.0),
                egui::Stroke::new(1.0, color.linear_multiply(0.3)),
            );

            let dot_center = rect.left_center() + Vec2::new(14.0, 0.0);
            if state.is_running() {
                painter.circle_filled(dot_center, 6.0, color.linear_multiply(0.3));
            }
            painter.circle_filled(dot_center, 4.0, color);

            painter.text(
                rect.center() + Vec2::new(8.0, 0.0),
                egui::Align2::CENTER_CENTER,
                state.label(),
                egui::FontId::proportional(12.0),
                color,
            );
        }

        response
    }
}
