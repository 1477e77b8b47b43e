use anyhow::{anyhow, Result};
use eframe::egui::{self, Vec2};

use crate::config::AppConfig;
use crate::timeline::Catalog;
use crate::ui::app::ChroniclesApp;
use crate::ui::icons::create_app_icon;

mod ambient;
mod anim;
mod carousel;
mod config;
mod crossfade;
mod logging;
mod preload;
mod theme;
mod timeline;
mod ui;

fn main() -> Result<()> {
    let (config, config_error) = AppConfig::load_or_default();
    // Held until exit so buffered file logs are flushed.
    let _log_guard = logging::init(&config);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "using default configuration");
    }

    let catalog = Catalog::embedded()?;
    let first = catalog.first().accent;
    let last = catalog.last().accent;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("AIGC Chronicles")
            .with_inner_size(Vec2::new(config.window_width, config.window_height))
            .with_min_inner_size(Vec2::new(720.0, 560.0))
            .with_icon(create_app_icon(
                [first.r(), first.g(), first.b()],
                [last.r(), last.g(), last.b()],
            )),
        centered: true,
        default_theme: eframe::Theme::Dark,
        follow_system_theme: false,
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        vsync: true,
        ..Default::default()
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");
    eframe::run_native(
        "AIGC Chronicles",
        options,
        Box::new(move |cc| Box::new(ChroniclesApp::new(cc, catalog, &config))),
    )
    .map_err(|e| anyhow!("failed to start the window: {e}"))
}
