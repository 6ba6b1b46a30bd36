mod backend_bridge;
mod controller;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use client_core::{build_store, load_settings, ResolutionRepository, StoreBackend, StoreSettings};
use crossbeam_channel::{bounded, unbounded};
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::app::{RadarApp, APP_TITLE};

const UI_EVENT_QUEUE_CAPACITY: usize = 2048;

#[derive(Debug, Parser)]
#[command(name = "desktop_gui", about = "Resolution Radar desktop board")]
struct Args {
    /// Settings file to read instead of the default lookup.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    store_url: Option<String>,
    #[arg(long)]
    api_key: Option<String>,
    /// Keep resolutions in memory for this run only.
    #[arg(long)]
    memory: bool,
}

impl Args {
    fn apply(&self, settings: &mut StoreSettings) {
        if let Some(url) = &self.store_url {
            settings.store_url = url.clone();
            settings.backend = StoreBackend::Remote;
        }
        if let Some(key) = &self.api_key {
            settings.api_key = Some(key.clone());
        }
        if self.memory {
            settings.backend = StoreBackend::Memory;
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref());
    args.apply(&mut settings);
    tracing::info!(backend = ?settings.backend, store_url = %settings.store_url, "starting desktop board");

    let store = build_store(&settings).context("failed to configure collection store")?;
    let repository = ResolutionRepository::new(store);

    let (cmd_tx, cmd_rx) = unbounded::<BackendCommand>();
    let (ui_tx, ui_rx) = bounded::<UiEvent>(UI_EVENT_QUEUE_CAPACITY);
    backend_bridge::runtime::launch(repository, cmd_rx, ui_tx)
        .context("failed to spawn backend worker thread")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1180.0, 800.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(RadarApp::new(cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop ui exited with error: {err}"))
}
