use callboard_core::{ChartSurface, Settings};
use eframe::egui;
use prefstore::{PreferenceStore, StoreFactory};
use std::sync::Arc;
use std::time::Duration;

mod charts;
mod export;
mod notifications;
mod remote;
mod state;
mod ui;

use notifications::NotificationHandler;
use state::{EditModalState, ExportState};

#[derive(Debug, Clone)]
pub struct GuiConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            title: "Voice Agent Analytics".to_string(),
            width: 1280.0,
            height: 900.0,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum GuiError {
    #[error("gui error: {0}")]
    Gui(String),
}

/// Builds the store and chart surface described by `settings` and runs the
/// dashboard until the window is closed.
pub fn run_gui(config: GuiConfig, settings: &Settings) -> Result<(), GuiError> {
    let surface = ChartSurface::seeded()
        .with_slot_index(settings.dashboard.slot_index)
        .map_err(|err| GuiError::Gui(err.to_string()))?;
    let store = StoreFactory::create(&settings.store_config())
        .map_err(|err| GuiError::Gui(err.to_string()))?;
    log::info!(
        "starting dashboard with {} store, editable slot '{}'",
        store.kind().as_str(),
        surface.slot_label()
    );
    run_gui_with_store(config, surface, store)
}

/// Runs the dashboard over an already constructed surface and store.
pub fn run_gui_with_store(
    config: GuiConfig,
    surface: ChartSurface,
    store: Arc<dyn PreferenceStore>,
) -> Result<(), GuiError> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([config.width, config.height]),
        ..Default::default()
    };

    eframe::run_native(
        &config.title,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(ui::dashboard_visuals());
            Ok(Box::new(DashboardApp::new(surface, store)))
        }),
    )
    .map_err(|err| GuiError::Gui(err.to_string()))
}

pub(crate) struct DashboardApp {
    surface: ChartSurface,
    store: Arc<dyn PreferenceStore>,
    notifications: NotificationHandler,
    edit: EditModalState,
    export: ExportState,
}

impl DashboardApp {
    pub(crate) fn new(surface: ChartSurface, store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            surface,
            store,
            notifications: NotificationHandler::new(),
            edit: EditModalState::default(),
            export: ExportState::default(),
        }
    }

    pub(crate) fn show_info(&mut self, title: &str, message: &str) {
        self.notifications.show_info(title, message);
    }

    pub(crate) fn show_warning(&mut self, title: &str, message: &str) {
        self.notifications.show_warning(title, message);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_remote();
        self.poll_export_dialog();
        self.notifications.cleanup_old_notifications(6.0);

        if self.edit.is_waiting() || self.export.is_waiting() {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else if !self.notifications.get_recent_notifications().is_empty() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && self.edit.is_open() {
            self.close_edit();
        }

        self.render_dashboard(ctx);
        self.render_edit_modal(ctx);
        self.render_notifications(ctx);
    }
}
