//! Chart Viewer Widget
//! Central scrollable page: charts, statistics and filtered table previews.

use crate::charts::ChartPlotter;
use crate::dashboard::{Dashboard, DashboardView};
use egui::{RichText, ScrollArea};

const TITLE: &str = "E-Commerce Data Analysis Dashboard";
const DESCRIPTION: &str = "An interactive dashboard analysing an e-commerce dataset, \
focused on product purchases and customer ratings.";

const SECTION_SPACING: f32 = 18.0;

/// Central panel showing every dashboard section top to bottom.
pub struct ChartViewer {
    pub preview_rows: usize,
}

impl ChartViewer {
    pub fn new(preview_rows: usize) -> Self {
        Self { preview_rows }
    }

    pub fn show(&self, ui: &mut egui::Ui, dashboard: &Dashboard, view: Option<&DashboardView>) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new(TITLE).size(26.0).strong());
                ui.label(DESCRIPTION);
                ui.add_space(SECTION_SPACING);

                Self::subheader(ui, "Purchases by Product Category");
                if dashboard.category_counts.is_empty() {
                    ui.label(RichText::new("No Data").size(16.0));
                } else {
                    ChartPlotter::draw_category_chart(ui, &dashboard.category_counts);
                }
                ui.add_space(SECTION_SPACING);

                Self::subheader(ui, "Product Rating vs Purchase Frequency");
                ChartPlotter::draw_rating_scatter(ui, &dashboard.products);
                ui.add_space(SECTION_SPACING);

                Self::subheader(ui, "Descriptive Statistics");
                ChartPlotter::draw_summary_table(ui, &dashboard.summaries);
                ui.add_space(SECTION_SPACING);

                let Some(view) = view else {
                    return;
                };

                let category = view.selection.category.as_deref().unwrap_or("-");
                ui.label(format!("Showing data for category: {}", category));
                ChartPlotter::draw_frame_preview(
                    ui,
                    "category_preview",
                    &view.by_category,
                    self.preview_rows,
                );
                ui.add_space(SECTION_SPACING);

                ui.label(format!(
                    "Showing products with rating >= {}",
                    view.selection.min_rating
                ));
                ChartPlotter::draw_frame_preview(
                    ui,
                    "rating_preview",
                    &view.by_rating,
                    self.preview_rows,
                );
            });
    }

    fn subheader(ui: &mut egui::Ui, text: &str) {
        ui.label(RichText::new(text).size(18.0).strong());
        ui.add_space(6.0);
    }
}
