//! Control Panel Widget
//! Left side panel with the category selector, rating slider and export buttons.

use crate::config::{MAX_RATING, MIN_RATING};
use crate::dashboard::Selection;
use egui::{Color32, ComboBox, RichText};

/// Left side control panel with filter widgets and export actions.
pub struct ControlPanel {
    pub selection: Selection,
    pub categories: Vec<String>,
    pub row_count: usize,
    pub status: String,
}

impl ControlPanel {
    pub fn new(selection: Selection, categories: Vec<String>, row_count: usize) -> Self {
        Self {
            selection,
            categories,
            row_count,
            status: "Ready".to_string(),
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🛒 ShopLens")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new(format!("{} reviewed order items", self.row_count))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Category Section =====
        ui.label(RichText::new("📦 Product Category").size(14.0).strong());
        ui.add_space(5.0);

        let selected_text = self.selection.category.clone().unwrap_or_default();
        ComboBox::from_id_salt("category")
            .width(250.0)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for category in &self.categories {
                    let is_selected = self.selection.category.as_deref() == Some(category.as_str());
                    if ui.selectable_label(is_selected, category).clicked() && !is_selected {
                        self.selection.category = Some(category.clone());
                        action = ControlPanelAction::SelectionChanged;
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Rating Section =====
        ui.label(RichText::new("⭐ Minimum Product Rating").size(14.0).strong());
        ui.add_space(5.0);

        let slider = egui::Slider::new(&mut self.selection.min_rating, MIN_RATING..=MAX_RATING)
            .integer()
            .text("stars");
        if ui.add(slider).changed() {
            action = ControlPanelAction::SelectionChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let csv_button = egui::Button::new(RichText::new("⬇ Download Data as CSV").size(14.0))
                .min_size(egui::vec2(200.0, 32.0));
            if ui.add(csv_button).clicked() {
                action = ControlPanelAction::DownloadCsv;
            }

            ui.add_space(8.0);

            let png_button = egui::Button::new(RichText::new("🖼 Save Charts as PNG").size(14.0))
                .min_size(egui::vec2(200.0, 32.0));
            if ui.add(png_button).clicked() {
                action = ControlPanelAction::SaveCharts;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Saved") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
    DownloadCsv,
    SaveCharts,
}
