//! Console panel - Scrolling log output

use egui::Ui;

use crate::core::DisplaySurface;
use crate::ui::theme::Theme;

pub fn render(ui: &mut Ui, surface: &mut DisplaySurface) {
    let scroll_to_latest = surface.take_scroll_request();
    let text = ui.visuals().text_color();

    Theme::console_frame(ui.visuals())
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for entry in surface.log().entries() {
                        ui.label(
                            egui::RichText::new(entry.to_string())
                                .monospace()
                                .color(text),
                        );
                    }

                    if scroll_to_latest {
                        ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                    }
                });
        });
}
