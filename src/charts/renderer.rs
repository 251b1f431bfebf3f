//! Static Chart Renderer
//! Writes the category bar chart and the rating/frequency scatter as PNG files.
//!
//! Layout follows the on-screen charts:
//! 1. Category bars, most purchased first, labels rotated under the axis
//! 2. One point per product: average rating (x) vs purchase frequency (y)

use crate::stats::{CategoryCount, ProductAnalysis};
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

const BAR_COLOR: RGBColor = RGBColor(52, 152, 219);
const POINT_COLOR: RGBColor = RGBColor(231, 76, 60);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to draw")]
    Empty,
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

impl RenderError {
    fn draw(e: impl std::fmt::Display) -> Self {
        RenderError::Draw(e.to_string())
    }
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Bar chart of purchases per category.
    pub fn render_category_bar(
        counts: &[CategoryCount],
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        if counts.is_empty() {
            return Err(RenderError::Empty);
        }

        let labels: Vec<&str> = counts.iter().map(|c| c.label()).collect();
        let max_count = counts.iter().map(|c| c.count).max().unwrap_or(0) as u32;
        let y_max = max_count + max_count / 10 + 1;

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(RenderError::draw)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Purchases by Product Category", ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(160)
            .y_label_area_size(60)
            .build_cartesian_2d((0..counts.len()).into_segmented(), 0u32..y_max)
            .map_err(RenderError::draw)?;

        let label_style = ("sans-serif", 12)
            .into_font()
            .transform(FontTransform::Rotate90);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(counts.len())
            .x_label_style(label_style)
            .x_label_formatter(&|v: &SegmentValue<usize>| match v {
                SegmentValue::CenterOf(i) => {
                    labels.get(*i).map(|s| s.to_string()).unwrap_or_default()
                }
                _ => String::new(),
            })
            .x_desc("Product Category")
            .y_desc("Purchases")
            .draw()
            .map_err(RenderError::draw)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR_COLOR.filled())
                    .margin(4)
                    .data(counts.iter().enumerate().map(|(i, c)| (i, c.count as u32))),
            )
            .map_err(RenderError::draw)?;

        root.present().map_err(RenderError::draw)?;
        log::info!("Rendered category chart to {}", path.display());
        Ok(())
    }

    /// Scatter of average rating against purchase frequency.
    pub fn render_rating_scatter(
        products: &[ProductAnalysis],
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        if products.is_empty() {
            return Err(RenderError::Empty);
        }

        let max_frequency = products.iter().map(|p| p.frequency).max().unwrap_or(0) as f64;

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(RenderError::draw)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Product Rating vs Purchase Frequency", ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(0.5f64..5.5f64, 0f64..(max_frequency * 1.1 + 1.0))
            .map_err(RenderError::draw)?;

        chart
            .configure_mesh()
            .x_desc("Average Rating")
            .y_desc("Purchase Frequency")
            .draw()
            .map_err(RenderError::draw)?;

        chart
            .draw_series(
                products
                    .iter()
                    .filter(|p| !p.average_rating.is_nan())
                    .map(|p| {
                        Circle::new(
                            (p.average_rating, p.frequency as f64),
                            3,
                            POINT_COLOR.mix(0.6).filled(),
                        )
                    }),
            )
            .map_err(RenderError::draw)?;

        root.present().map_err(RenderError::draw)?;
        log::info!("Rendered rating scatter to {}", path.display());
        Ok(())
    }
}
