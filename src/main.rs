mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use eframe::egui;

use app::DashboardApp;
use config::DashboardConfig;
use data::loader::DataSource;
use data::prepare::prepare_with_limit;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON settings file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive dashboard (default)
    View,
    /// Write the six charts as SVG files
    Export {
        /// Output directory (defaults to the configured export_dir)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Read this CSV instead of downloading the dataset
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = DashboardConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::View) {
        Commands::View => run_dashboard(config),
        Commands::Export { out, input } => {
            let source = input.map(DataSource::File).unwrap_or_else(|| config.source());
            let out = out.unwrap_or_else(|| config.export_dir.clone());
            export(&config, &source, out)
        }
    }
}

fn run_dashboard(config: DashboardConfig) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "COVID-19 Dashboard",
        options,
        Box::new(|cc| {
            // Image loaders fetch and decode the flag icons.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(DashboardApp::new(cc, config)))
        }),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}

fn export(config: &DashboardConfig, source: &DataSource, out: PathBuf) -> Result<()> {
    let rows = source
        .load()
        .with_context(|| format!("loading dataset from {source}"))?;
    let dataset = prepare_with_limit(&rows, config.top_n);
    log::info!(
        "{} valid rows, {} dropped",
        dataset.len(),
        dataset.dropped
    );

    for path in chart::svg::export_all(&dataset.top, &out)? {
        println!("{}", path.display());
    }
    Ok(())
}
