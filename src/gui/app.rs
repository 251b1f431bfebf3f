//! ShopLens Main Application
//! Main window with control panel and dashboard page.

use crate::charts::ChartRenderer;
use crate::config::DashboardConfig;
use crate::dashboard::{Dashboard, DashboardView};
use crate::export::{CsvExporter, ExportCache, CSV_MIME};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;

/// Size of the exported PNG charts.
const PNG_SIZE: (u32, u32) = (1200, 800);

/// Main application window.
pub struct DashboardApp {
    dashboard: Dashboard,
    config: DashboardConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    view: Option<DashboardView>,
    export_cache: ExportCache,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dashboard: Dashboard,
        config: DashboardConfig,
    ) -> Self {
        let selection = dashboard.default_selection(config.default_min_rating);
        let control_panel = ControlPanel::new(
            selection,
            dashboard.categories.clone(),
            dashboard.joined.height(),
        );

        let mut app = Self {
            chart_viewer: ChartViewer::new(config.preview_rows),
            dashboard,
            config,
            control_panel,
            view: None,
            export_cache: ExportCache::new(),
        };
        app.refresh_view();
        app
    }

    /// Re-evaluate the filtered tables for the current widget values.
    fn refresh_view(&mut self) {
        match DashboardView::evaluate(&self.dashboard, &self.control_panel.selection) {
            Ok(view) => self.view = Some(view),
            Err(e) => {
                log::error!("Failed to filter data: {}", e);
                self.control_panel
                    .set_status(&format!("Error: filter failed: {}", e));
                self.view = None;
            }
        }
    }

    /// Handle CSV download of the rating-filtered table
    fn handle_download_csv(&mut self) {
        let Some(view) = &self.view else {
            self.control_panel.set_status("No data to export");
            return;
        };

        let bytes = match self.export_cache.get_or_convert(&view.by_rating) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("CSV conversion failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
                return;
            }
        };

        // Ask user for output location
        let output_path = match rfd::FileDialog::new()
            .add_filter(format!("CSV ({})", CSV_MIME), &["csv"])
            .set_file_name(&self.config.export_file_name)
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match CsvExporter::write_file(&output_path, &bytes) {
            Ok(()) => {
                log::info!(
                    "Exported {} rows to {} ({} conversions so far)",
                    view.by_rating.height(),
                    output_path.display(),
                    self.export_cache.conversions()
                );
                self.control_panel.set_status(&format!(
                    "Saved {} rows to {}",
                    view.by_rating.height(),
                    output_path.display()
                ));
            }
            Err(e) => {
                log::error!("{}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Handle PNG export of both charts into a chosen folder
    fn handle_save_charts(&mut self) {
        let Some(folder) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        let bar_path = folder.join("category_counts.png");
        let scatter_path = folder.join("rating_vs_frequency.png");

        let result = ChartRenderer::render_category_bar(
            &self.dashboard.category_counts,
            &bar_path,
            PNG_SIZE,
        )
        .and_then(|()| {
            ChartRenderer::render_rating_scatter(&self.dashboard.products, &scatter_path, PNG_SIZE)
        });

        match result {
            Ok(()) => self
                .control_panel
                .set_status(&format!("Saved charts to {}", folder.display())),
            Err(e) => {
                log::error!("Chart export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::SelectionChanged => self.refresh_view(),
                        ControlPanelAction::DownloadCsv => self.handle_download_csv(),
                        ControlPanelAction::SaveCharts => self.handle_save_charts(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - dashboard page
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer
                .show(ui, &self.dashboard, self.view.as_ref());
        });
    }
}
