//! Status panel - Current CPU, memory and temperature readings

use egui::Ui;

use crate::core::{DisplaySurface, RunState};
use crate::ui::components::{ResourceBar, StatusBadge};
use crate::ui::theme::Theme;

const BAR_WIDTH: f32 = 300.0;

pub fn render(ui: &mut Ui, surface: &DisplaySurface, state: RunState) {
    let reading = surface.reading();
    let text = ui.visuals().text_color();

    Theme::card_frame(ui.visuals())
        .inner_margin(egui::Margin::same(14.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("System Status")
                        .size(16.0)
                        .strong()
                        .color(text),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    StatusBadge::show(ui, state);
                });
            });
            ui.add_space(6.0);

            ui.label(egui::RichText::new(surface.cpu_label()).color(text));
            ResourceBar::horizontal(ui, reading.cpu_fraction(), BAR_WIDTH);
            ui.add_space(4.0);

            ui.label(egui::RichText::new(surface.memory_label()).color(text));
            ResourceBar::horizontal(ui, reading.memory_fraction(), BAR_WIDTH);
            ui.add_space(4.0);

            ui.label(egui::RichText::new(surface.temperature_label()).color(text));
        });
}
