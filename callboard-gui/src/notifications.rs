use crate::DashboardApp;
use eframe::egui;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NotificationLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
pub(crate) struct Notification {
    pub(crate) level: NotificationLevel,
    pub(crate) title: String,
    pub(crate) message: String,
    pub(crate) created_at: Instant,
}

pub(crate) struct NotificationHandler {
    notifications: Vec<Notification>,
}

impl NotificationHandler {
    pub(crate) fn new() -> Self {
        Self {
            notifications: Vec::new(),
        }
    }

    fn push(&mut self, level: NotificationLevel, title: &str, message: &str) {
        self.notifications.push(Notification {
            level,
            title: title.to_string(),
            message: message.to_string(),
            created_at: Instant::now(),
        });
    }

    pub(crate) fn show_info(&mut self, title: &str, message: &str) {
        self.push(NotificationLevel::Info, title, message);
    }

    pub(crate) fn show_warning(&mut self, title: &str, message: &str) {
        self.push(NotificationLevel::Warning, title, message);
    }

    pub(crate) fn get_recent_notifications(&self) -> Vec<&Notification> {
        self.notifications.iter().rev().take(5).collect()
    }

    pub(crate) fn cleanup_old_notifications(&mut self, max_age_secs: f32) {
        let now = Instant::now();
        self.notifications
            .retain(|n| now.duration_since(n.created_at).as_secs_f32() < max_age_secs);
    }
}

impl DashboardApp {
    /// Stacks the most recent toasts in the bottom-right corner.
    pub(crate) fn render_notifications(&self, ctx: &egui::Context) {
        let recent = self.notifications.get_recent_notifications();
        if recent.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("notifications"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                for notification in recent {
                    let accent = match notification.level {
                        NotificationLevel::Info => egui::Color32::from_rgb(56, 189, 248),
                        NotificationLevel::Warning => egui::Color32::from_rgb(250, 204, 21),
                    };
                    egui::Frame::popup(ui.style())
                        .stroke(egui::Stroke::new(1.0, accent))
                        .show(ui, |ui| {
                            ui.set_max_width(320.0);
                            ui.label(
                                egui::RichText::new(&notification.title)
                                    .strong()
                                    .color(accent),
                            );
                            ui.label(&notification.message);
                        });
                    ui.add_space(6.0);
                }
            });
    }
}
