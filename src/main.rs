//! ShopLens - E-Commerce Review Dashboard
//!
//! Joins order items, reviews and products from CSV, then shows category
//! purchase counts, product rating vs frequency and filterable tables.

mod charts;
mod config;
mod dashboard;
mod data;
mod export;
mod gui;
mod stats;
#[cfg(test)]
mod test_support;

use anyhow::Context;
use config::DashboardConfig;
use dashboard::Dashboard;
use data::DataLoader;
use eframe::egui;
use gui::DashboardApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::load().context("loading dashboard config")?;
    let tables =
        DataLoader::load_sources(&config.sources).context("loading input CSV files")?;
    let dashboard = Dashboard::build(&tables).context("building dashboard")?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("ShopLens"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "ShopLens",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, dashboard, config)))),
    )
    .map_err(|e| anyhow::anyhow!("UI failed: {}", e))
}
