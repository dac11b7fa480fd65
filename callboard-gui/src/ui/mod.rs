use crate::charts::{agent_performance_chart, call_volume_chart, sentiment_donut};
use crate::export::ExportFormat;
use crate::DashboardApp;
use eframe::egui;

mod edit_modal;
mod widgets;

use widgets::{card, card_title, TEXT_MUTED};

pub(crate) fn dashboard_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = egui::Color32::from_rgb(15, 23, 42);
    visuals.window_fill = egui::Color32::from_rgb(30, 41, 59);
    visuals.extreme_bg_color = egui::Color32::from_rgb(15, 23, 42);
    visuals
}

impl DashboardApp {
    pub(crate) fn render_dashboard(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(16.0);
                    ui.label(
                        egui::RichText::new("Voice Agent Analytics")
                            .size(36.0)
                            .strong()
                            .color(crate::charts::palette_color(0)),
                    );
                    ui.label(
                        egui::RichText::new(
                            "Real-time performance metrics and call volume visualization.",
                        )
                        .size(16.0)
                        .color(TEXT_MUTED),
                    );
                    ui.add_space(24.0);
                });

                self.render_call_volume_card(ui);
                ui.add_space(24.0);

                let surface = &self.surface;
                ui.columns(2, |columns| {
                    card(&mut columns[0], |ui| {
                        card_title(ui, "Sentiment Distribution", 18.0);
                        sentiment_donut(ui, surface.sentiment(), 220.0);
                    });
                    card(&mut columns[1], |ui| {
                        card_title(ui, "Agent Performance (Avg Handle Time)", 18.0);
                        agent_performance_chart(ui, surface, 250.0);
                    });
                });
            });
        });
    }

    fn render_call_volume_card(&mut self, ui: &mut egui::Ui) {
        let mut open_edit = false;
        let mut export = None;
        let exporting = self.export.is_waiting();
        card(ui, |ui| {
            ui.horizontal(|ui| {
                card_title(ui, "Hourly Call Volume", 22.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.button("Overwrite Data").clicked() {
                        open_edit = true;
                    }
                    ui.add_enabled_ui(!exporting, |ui| {
                        ui.menu_button("Export", |ui| {
                            for format in [ExportFormat::Png, ExportFormat::Svg] {
                                if ui.button(format.label()).clicked() {
                                    export = Some(format);
                                    ui.close_menu();
                                }
                            }
                        });
                    });
                });
            });
            call_volume_chart(ui, &self.surface, 300.0);
        });
        if open_edit {
            self.open_edit();
        }
        if let Some(format) = export {
            self.start_export(format);
        }
    }
}
