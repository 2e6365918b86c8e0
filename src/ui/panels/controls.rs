//! Control panel - Start, stop and diagnostics buttons

use egui::Ui;

use crate::ui::theme::{Icons, Theme};

/// A command issued from the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    RunDiagnostics,
}

/// Render the buttons. Returns the command clicked this frame, if any.
pub fn render(ui: &mut Ui) -> Option<Command> {
    let mut command = None;

    Theme::card_frame(ui.visuals())
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                let buttons = [
                    (Command::Start, Icons::PLAY, "Start Core"),
                    (Command::Stop, Icons::STOP, "Stop Core"),
                    (Command::RunDiagnostics, Icons::DIAGNOSTICS, "Run Diagnostics"),
                ];
                for (cmd, icon, label) in buttons {
                    let button = egui::Button::new(
                        egui::RichText::new(format!("{} {}", icon, label)).strong(),
                    )
                    .min_size(egui::vec2(140.0, 36.0));

                    if ui.add(button).clicked() {
                        command = Some(cmd);
                    }
                    ui.add_space(4.0);
                }
            });
        });

    command
}
