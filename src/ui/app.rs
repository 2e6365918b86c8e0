//! Main application UI

use std::time::Duration;

use egui::{CentralPanel, Context, TopBottomPanel};
use tracing::{debug, info};

use super::panels::{self, controls::Command};
use super::theme::{Icons, Theme};
use crate::core::{DisplaySurface, Settings, Simulation};

/// Main application struct
pub struct QuantumCoreApp {
    /// Core state machine and background timers
    simulation: Simulation,
    /// Values and log shown on screen
    surface: DisplaySurface,
    /// First frame flag
    first_frame: bool,
}

impl QuantumCoreApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: &Settings,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        Theme::apply(&cc.egui_ctx, settings.theme);

        let repaint_ctx = cc.egui_ctx.clone();
        let simulation =
            Simulation::new(runtime, settings).with_waker(move || repaint_ctx.request_repaint());

        Self {
            simulation,
            surface: DisplaySurface::new(),
            first_frame: true,
        }
    }

    fn handle_command(&mut self, command: Command) {
        debug!(?command, "Command issued");
        match command {
            Command::Start => {
                self.simulation.start(&mut self.surface);
            }
            Command::Stop => {
                self.simulation.stop(&mut self.surface);
            }
            Command::RunDiagnostics => {
                self.simulation.run_diagnostics(&mut self.surface);
            }
        }
    }

    /// Render the header bar
    fn render_header(&mut self, ctx: &Context) {
        let visuals = ctx.style().visuals.clone();

        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(visuals.panel_fill)
                    .inner_margin(egui::Margin::symmetric(20.0, 14.0)),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{} Quantum Core Control System",
                            Icons::CORE
                        ))
                        .size(22.0)
                        .strong()
                        .color(Theme::accent(&visuals)),
                    );
                });
            });
    }

    /// Render status, controls and console
    fn render_main_content(&mut self, ctx: &Context) {
        let mut command = None;

        CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(ctx.style().visuals.panel_fill)
                    .inner_margin(egui::Margin::same(20.0)),
            )
            .show(ctx, |ui| {
                panels::status::render(ui, &self.surface, self.simulation.run_state());
                ui.add_space(10.0);
                command = panels::controls::render(ui);
                ui.add_space(10.0);
                panels::console::render(ui, &mut self.surface);
            });

        if let Some(command) = command {
            self.handle_command(command);
        }
    }
}

impl eframe::App for QuantumCoreApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            self.first_frame = false;
            info!("First frame rendered");
        }

        // Background events are only ever applied here, on the UI thread
        self.simulation.drain(&mut self.surface);

        // Fallback in case a wake-up is missed
        ctx.request_repaint_after(Duration::from_millis(250));

        self.render_header(ctx);
        self.render_main_content(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!(state = self.simulation.run_state().label(), "Application exiting");
    }
}
