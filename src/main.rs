//! Quantum Core - Control console for a simulated quantum core
//!
//! A single-window desktop dashboard that shows simulated CPU, memory and temperature
//! readings on a fixed cadence, with start/stop/diagnostics controls and a log console.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod core;
mod ui;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::settings::MIN_WINDOW_SIZE;
use crate::core::Settings;
use crate::ui::QuantumCoreApp;

/// Application name constant
pub const APP_NAME: &str = "Quantum Core";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Window title
const WINDOW_TITLE: &str = "Quantum Supercomputer Interface";

fn main() -> Result<()> {
    // Settings pick the log level, so logging comes up right after
    let loaded = Settings::load();
    let settings = match &loaded {
        Ok(settings) => settings.clone(),
        Err(_) => Settings::default(),
    };

    init_logging(&settings);
    info!("{} v{} starting...", APP_NAME, APP_VERSION);

    if let Err(e) = &loaded {
        warn!("Using default settings: {}", e);
    }

    // Hosts the tick loop and diagnostics timers; must outlive the window
    let runtime = crate::core::build_runtime().context("Failed to start simulation runtime")?;
    let handle = runtime.handle().clone();

    let (width, height) = settings.window_size;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_min_inner_size([MIN_WINDOW_SIZE.0 as f32, MIN_WINDOW_SIZE.1 as f32])
            .with_icon(load_app_icon()),
        ..Default::default()
    };

    info!("Starting GUI...");
    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |cc| Ok(Box::new(QuantumCoreApp::new(cc, &settings, handle)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    runtime.shutdown_background();
    info!("{} shutting down", APP_NAME);
    Ok(())
}

/// Initialize the logging system
fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load the application icon
fn load_app_icon() -> egui::IconData {
    // Cyan core with a fading halo
    let size = 64;
    let mut rgba = vec![0u8; size * size * 4];

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let cx = x as f32 - size as f32 / 2.0;
            let cy = y as f32 - size as f32 / 2.0;
            let dist = (cx * cx + cy * cy).sqrt();
            let radius = size as f32 / 2.0 - 2.0;

            if dist < radius {
                let t = dist / radius;
                rgba[idx] = 0; // R
                rgba[idx + 1] = (255.0 - t * 90.0) as u8; // G
                rgba[idx + 2] = (204.0 - t * 60.0) as u8; // B
                rgba[idx + 3] = (255.0 * (1.0 - t * t * 0.6)) as u8; // A
            }
        }
    }

    egui::IconData {
        rgba,
        width: size as u32,
        height: size as u32,
    }
}
