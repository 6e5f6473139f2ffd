//! LockMint: a desktop page for locking LP tokens against a tiered hero-NFT pool

use eframe::egui;
use lockmint_adapters::StakeConfig;

mod app;
mod bridge;
mod state;
mod ui;

fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting LockMint");

    let config = StakeConfig::from_env()?;
    let bridge = bridge::StakeBridge::new(&config)?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("LockMint")
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "LockMint",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::App::new(cc, config, bridge)))),
    )
    .map_err(|e| eyre::eyre!("window loop failed: {e}"))
}
