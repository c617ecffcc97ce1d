mod app;
mod data;
mod error;
mod processing;
mod state;
mod ui;

use std::path::PathBuf;

use app::GlassPlotApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Extra catalog files may be given on the command line.
    let catalog_paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    tracing::info!(
        "Starting GlassPlot v{} with {} extra catalog(s)",
        env!("CARGO_PKG_VERSION"),
        catalog_paths.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("GlassPlot")
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GlassPlot",
        options,
        Box::new(|cc| Ok(Box::new(GlassPlotApp::new(cc, catalog_paths)))),
    )
}
