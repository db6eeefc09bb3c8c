//! Device Risk - Medical Device Recall Severity Client
//!
//! Desktop front end that suggests device details from a reference CSV and
//! asks a remote prediction service for the recall severity class.

mod data;
mod form;
mod gui;
mod history;
mod prediction;
mod settings;

use eframe::egui;
use gui::DeviceRiskApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    // Initialize logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = settings::load_settings();
    if settings::settings_path().is_some_and(|path| !path.exists()) {
        if let Err(e) = settings::save_settings(&settings) {
            tracing::warn!("Could not write default settings: {}", e);
        }
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Device Risk"),
        ..Default::default()
    };

    eframe::run_native(
        "Device Risk",
        options,
        Box::new(move |cc| Ok(Box::new(DeviceRiskApp::new(cc, settings)))),
    )
}
