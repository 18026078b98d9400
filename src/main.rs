//! Charla - Chat client for the Manu assistant
//!
//! Main entry point for the application.

use anyhow::Result;
use charla::chat::{ChatConfig, ChatPipeline};
use charla::ui::CharlaApp;
use eframe::egui;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charla=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Charla");

    let config = ChatConfig::default();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    // The pipeline worker owns the HTTP calls; the UI talks to it over channels
    let pipeline = ChatPipeline::new(config.clone());
    let command_tx = pipeline.command_sender();
    let event_rx = pipeline.event_receiver();
    pipeline.start_worker()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("Manu"),
        ..Default::default()
    };

    eframe::run_native(
        "Manu",
        options,
        Box::new(move |cc| Ok(Box::new(CharlaApp::new(cc, &config, command_tx, event_rx)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {}", e))
}
