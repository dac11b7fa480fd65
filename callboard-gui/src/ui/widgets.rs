//! Shared UI pieces for the dashboard cards and the edit modal.

use eframe::egui;

pub(crate) const CARD_FILL: egui::Color32 = egui::Color32::from_rgb(30, 41, 59);
pub(crate) const CARD_STROKE: egui::Color32 = egui::Color32::from_rgb(51, 65, 85);
pub(crate) const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(148, 163, 184);
pub(crate) const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(248, 113, 113);

/// Rounded panel that hosts one chart.
pub(crate) fn card<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::none()
        .fill(CARD_FILL)
        .stroke(egui::Stroke::new(1.0, CARD_STROKE))
        .rounding(16.0)
        .inner_margin(24.0)
        .show(ui, add_contents)
        .inner
}

pub(crate) fn card_title(ui: &mut egui::Ui, title: &str, size: f32) {
    ui.label(
        egui::RichText::new(title)
            .strong()
            .size(size)
            .color(egui::Color32::from_rgb(241, 245, 249)),
    );
    ui.add_space(12.0);
}

/// Full-width button that can be greyed out while a request is running.
pub(crate) fn wide_button(
    ui: &mut egui::Ui,
    enabled: bool,
    label: impl Into<egui::WidgetText>,
) -> egui::Response {
    let size = egui::vec2(ui.available_width(), 36.0);
    ui.add_enabled_ui(enabled, |ui| ui.add_sized(size, egui::Button::new(label)))
        .inner
}
