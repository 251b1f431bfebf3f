//! Chart Plotter Module
//! Interactive category bars, rating scatter and tables using egui_plot.

use crate::stats::{CategoryCount, ColumnSummary, ProductAnalysis};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};
use polars::prelude::*;

pub const BAR_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const POINT_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red

/// Axis labels longer than this are shortened.
const MAX_LABEL_CHARS: usize = 14;

/// Creates the dashboard visualizations using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Shorten a category name for the x-axis.
    pub fn axis_label(label: &str) -> String {
        if label.chars().count() <= MAX_LABEL_CHARS {
            label.to_string()
        } else {
            let head: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
            format!("{}…", head)
        }
    }

    /// Draw purchases per category. Full names show on hover.
    pub fn draw_category_chart(ui: &mut egui::Ui, counts: &[CategoryCount]) {
        let x_labels: Vec<String> = counts.iter().map(|c| Self::axis_label(c.label())).collect();

        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Bar::new(i as f64, c.count as f64)
                    .name(c.label())
                    .width(0.7)
                    .fill(BAR_COLOR)
            })
            .collect();

        Plot::new("category_counts")
            .height(320.0)
            .allow_scroll(false)
            .x_axis_label("Product Category")
            .y_axis_label("Purchases")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                    return String::new();
                }
                x_labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name("Purchases"));
            });
    }

    /// Draw average rating (x) against purchase frequency (y), one point per product.
    pub fn draw_rating_scatter(ui: &mut egui::Ui, products: &[ProductAnalysis]) {
        let points: PlotPoints = products
            .iter()
            .filter(|p| !p.average_rating.is_nan())
            .map(|p| [p.average_rating, p.frequency as f64])
            .collect();

        Plot::new("rating_vs_frequency")
            .height(320.0)
            .allow_scroll(false)
            .x_axis_label("Average Rating")
            .y_axis_label("Purchase Frequency")
            .include_x(1.0)
            .include_x(5.0)
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(points)
                        .radius(3.0)
                        .color(POINT_COLOR.gamma_multiply(0.7))
                        .name("Products"),
                );
            });
    }

    /// Draw the descriptive statistics table: one row per statistic, one column per field.
    pub fn draw_summary_table(ui: &mut egui::Ui, summaries: &[ColumnSummary]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("summary_table")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("");
                        for summary in summaries {
                            ui.label(RichText::new(&summary.column).strong().size(11.0));
                        }
                        ui.end_row();

                        let rows: Vec<[f64; 8]> = summaries.iter().map(|s| s.values()).collect();
                        for (i, name) in ColumnSummary::ROWS.iter().enumerate() {
                            ui.label(RichText::new(*name).strong().size(11.0));
                            for values in &rows {
                                ui.label(RichText::new(Self::format_stat(values[i])).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    fn format_stat(value: f64) -> String {
        if value.is_nan() {
            "NaN".to_string()
        } else {
            format!("{:.3}", value)
        }
    }

    /// Draw the first rows of a table as a grid. Nulls show as empty cells.
    pub fn draw_frame_preview(ui: &mut egui::Ui, id: &str, df: &DataFrame, max_rows: usize) {
        let preview = df.head(Some(max_rows));

        egui::ScrollArea::horizontal().id_salt(id).show(ui, |ui| {
            egui::Grid::new(format!("{id}_grid"))
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for column in preview.get_columns() {
                        ui.label(RichText::new(column.name().as_str()).strong().size(11.0));
                    }
                    ui.end_row();

                    for row in 0..preview.height() {
                        for column in preview.get_columns() {
                            ui.label(RichText::new(Self::cell_text(column, row)).size(11.0));
                        }
                        ui.end_row();
                    }
                });
        });
    }

    fn cell_text(column: &Column, row: usize) -> String {
        match column.get(row) {
            Ok(AnyValue::Null) | Err(_) => String::new(),
            Ok(value) => value.to_string().trim_matches('"').to_string(),
        }
    }
}
