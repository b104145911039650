mod backend_bridge;
mod config;
mod controller;
mod media;
mod ui;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::commands::BackendCommand;
use config::{load_settings, CliArgs};
use controller::events::UiEvent;
use ui::RecipeSwipeApp;

fn main() -> anyhow::Result<()> {
    let cli = CliArgs::parse();
    let settings = load_settings(&cli).context("failed to load settings")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!(
        api_base_url = %settings.api_base_url,
        initial_batch_size = settings.initial_batch_size,
        swipe_threshold_px = settings.swipe_threshold_px,
        "starting recipe swipe"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    let backend = backend_bridge::runtime::launch(&settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Recipe Swipe")
            .with_inner_size([520.0, 760.0])
            .with_min_inner_size([360.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Recipe Swipe",
        options,
        Box::new(move |_cc| Ok(Box::new(RecipeSwipeApp::new(&settings, cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow::anyhow!("ui event loop failed: {err}"))?;

    if backend.join().is_err() {
        tracing::warn!("backend worker panicked during shutdown");
    }
    Ok(())
}
