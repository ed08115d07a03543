mod app;
mod data;
mod settings;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use app::LaptopSelectorApp;
use clap::Parser;
use eframe::egui;
use settings::Settings;
use state::AppState;

/// Find a laptop by budget, intended use and specs.
#[derive(Debug, Parser)]
#[command(name = "laptop-selector", version, about)]
struct Cli {
    /// Listings CSV to open at start-up.
    #[arg(default_value = "latest_laptops.csv")]
    data: PathBuf,

    /// JSON settings file.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Override the currency conversion rate.
    #[arg(long)]
    conversion_rate: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut settings = Settings::load_or_default(cli.settings.as_deref())?;
    if let Some(rate) = cli.conversion_rate {
        settings.conversion_rate = rate;
        settings.validate()?;
    }

    let mut state = AppState::new(settings);
    if cli.data.exists() {
        // A bad start-up file is shown in the UI, not fatal.
        let _ = state.open(&cli.data);
    } else {
        log::info!("{} not found; use File → Open…", cli.data.display());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Smart Laptop Selector",
        options,
        Box::new(|_cc| Ok(Box::new(LaptopSelectorApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running UI: {e}"))
}
