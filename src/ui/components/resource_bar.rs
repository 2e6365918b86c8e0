//! Usage bar component

use egui::{Color32, Rect, Response, Rounding, Ui, Vec2};

use crate::ui::theme::Theme;

pub struct ResourceBar;

impl ResourceBar {
    /// Render a horizontal bar, `value` in 0.0 - 1.0
    pub fn horizontal(ui: &mut Ui, value: f32, width: f32) -> Response {
        let height = 20.0;
        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(width, height), egui::Sense::hover());

        if ui.is_rect_visible(rect) {
            let visuals = ui.visuals();
            let painter = ui.painter();
            let clamped_value = value.clamp(0.0, 1.0);

            painter.rect_filled(rect, Rounding::same(4.0), visuals.faint_bg_color);
            painter.rect_stroke(rect, Rounding::same(4.0), visuals.widgets.noninteractive.bg_stroke);

            let fill_width = rect.width() * clamped_value;
            if fill_width > 0.0 {
                let fill_rect = Rect::from_min_size(rect.min, Vec2::new(fill_width, height));
                painter.rect_filled(
                    fill_rect,
                    Rounding::same(4.0),
                    Self::color_for_value(clamped_value),
                );
            }
        }

        response.on_hover_text(format!("{:.0}%", value * 100.0))
    }

    /// Accent up to half, then blend through warning into error
    fn color_for_value(value: f32) -> Color32 {
        if value < 0.5 {
            Theme::PRIMARY_DARK
        } else if value < 0.75 {
            let t = (value - 0.5) / 0.25;
            Self::lerp_color(Theme::PRIMARY_DARK, Theme::WARNING, t)
        } else {
            let t = (value - 0.75) / 0.25;
            Self::lerp_color(Theme::WARNING, Theme::ERROR, t.min(1.0))
        }
    }

    fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
        let t = t.clamp(0.0, 1.0);
        Color32::from_rgba_unmultiplied(
            (a.r() as f32 + (b.r() as f32 - a.r() as f32) * t) as u8,
            (a.g() as f32 + (b.g() as f32 - a.g() as f32) * t) as u8,
            (a.b() as f32 + (b.b() as f32 - a.b() as f32) * t) as u8,
            (a.a() as f32 + (b.a() as f32 - a.a() as f32) * t) as u8,
        )
    }
}
