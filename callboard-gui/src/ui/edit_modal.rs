//! The "Customize Data" modal: email, optional overwrite confirmation, value.

use super::widgets::{wide_button, ERROR_TEXT, TEXT_MUTED};
use crate::DashboardApp;
use callboard_core::format::format_number_value;
use callboard_core::EditStep;
use eframe::egui;

enum ModalAction {
    SubmitIdentity,
    ConfirmOverwrite,
    SubmitValue,
    Close,
}

const WARNING_TEXT: egui::Color32 = egui::Color32::from_rgb(254, 240, 138);

impl DashboardApp {
    pub(crate) fn render_edit_modal(&mut self, ctx: &egui::Context) {
        let waiting = self.edit.is_waiting();
        let Some(session) = self.edit.session.as_mut() else {
            return;
        };

        egui::Area::new(egui::Id::new("edit_modal_backdrop"))
            .order(egui::Order::Middle)
            .fixed_pos(egui::Pos2::ZERO)
            .show(ctx, |ui| {
                let screen = ctx.screen_rect();
                ui.allocate_rect(screen, egui::Sense::click());
                ui.painter()
                    .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(128));
            });

        let mut open = true;
        let mut action = None;
        egui::Window::new("Customize Data")
            .open(&mut open)
            .order(egui::Order::Foreground)
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.spacing_mut().item_spacing.y = 12.0;
                match session.step() {
                    EditStep::CollectIdentity => {
                        ui.label(
                            egui::RichText::new(
                                "Please enter your email to load or save your custom preferences.",
                            )
                            .color(TEXT_MUTED),
                        );
                        let field = ui.add_enabled(
                            !waiting,
                            egui::TextEdit::singleline(&mut session.email)
                                .hint_text("name@example.com")
                                .desired_width(f32::INFINITY),
                        );
                        let entered =
                            field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        let label = if waiting { "Checking..." } else { "Continue" };
                        if (wide_button(ui, !waiting, label).clicked() || entered) && !waiting {
                            action = Some(ModalAction::SubmitIdentity);
                        }
                    }
                    EditStep::ConfirmOverwrite => {
                        let previous = session
                            .previous_remote_value()
                            .map(format_number_value)
                            .unwrap_or_default();
                        egui::Frame::none()
                            .fill(egui::Color32::from_rgba_unmultiplied(234, 179, 8, 26))
                            .stroke(egui::Stroke::new(
                                1.0,
                                egui::Color32::from_rgba_unmultiplied(234, 179, 8, 51),
                            ))
                            .rounding(8.0)
                            .inner_margin(12.0)
                            .show(ui, |ui| {
                                ui.label(
                                    egui::RichText::new(format!(
                                        "We found a previous value: {previous}"
                                    ))
                                    .color(WARNING_TEXT),
                                );
                            });
                        ui.label(
                            egui::RichText::new(
                                "Would you like to overwrite it with a new value?",
                            )
                            .color(TEXT_MUTED),
                        );
                        ui.columns(2, |columns| {
                            if wide_button(&mut columns[0], true, "Yes, Overwrite").clicked() {
                                action = Some(ModalAction::ConfirmOverwrite);
                            }
                            if wide_button(&mut columns[1], true, "Cancel").clicked() {
                                action = Some(ModalAction::Close);
                            }
                        });
                    }
                    EditStep::CollectValue => {
                        ui.label(
                            egui::RichText::new(format!(
                                "Set new value for {}",
                                session.setting_key()
                            ))
                            .color(TEXT_MUTED),
                        );
                        let field = ui.add_enabled(
                            !waiting,
                            egui::TextEdit::singleline(&mut session.candidate_value)
                                .desired_width(f32::INFINITY),
                        );
                        let entered =
                            field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        let label = if waiting { "Saving..." } else { "Save Changes" };
                        if (wide_button(ui, !waiting, label).clicked() || entered) && !waiting {
                            action = Some(ModalAction::SubmitValue);
                        }
                    }
                }
                if let Some(message) = session.error_message() {
                    ui.label(egui::RichText::new(message).color(ERROR_TEXT).small());
                }
            });

        if !open {
            action = Some(ModalAction::Close);
        }
        match action {
            Some(ModalAction::SubmitIdentity) => self.submit_identity(),
            Some(ModalAction::ConfirmOverwrite) => self.confirm_overwrite(),
            Some(ModalAction::SubmitValue) => self.submit_value(),
            Some(ModalAction::Close) => self.close_edit(),
            None => {}
        }
    }
}
