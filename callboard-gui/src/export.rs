//! Saving the hourly call volume chart to an image file.

use crate::DashboardApp;
use callboard_core::charts::volume_axis_bounds;
use callboard_core::model::{palette_rgb, TimeSeriesPoint};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, TryRecvError};

const EXPORT_WIDTH: u32 = 1600;
const EXPORT_HEIGHT: u32 = 900;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
}

impl ExportFormat {
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG image",
            ExportFormat::Svg => "SVG image",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }
}

/// Appends the format's extension when the chosen path has none.
pub fn with_default_extension(path: PathBuf, format: ExportFormat) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(format.extension())
    }
}

pub fn export_call_volume(
    points: &[TimeSeriesPoint],
    slot_index: usize,
    path: &Path,
    format: ExportFormat,
) -> Result<(), String> {
    if points.is_empty() {
        return Err("No data points to export.".to_string());
    }
    match format {
        ExportFormat::Png => {
            let root =
                BitMapBackend::new(path, (EXPORT_WIDTH, EXPORT_HEIGHT)).into_drawing_area();
            draw_call_volume(root, points, slot_index)
        }
        ExportFormat::Svg => {
            let root = SVGBackend::new(path, (EXPORT_WIDTH, EXPORT_HEIGHT)).into_drawing_area();
            draw_call_volume(root, points, slot_index)
        }
    }
}

fn draw_call_volume<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    points: &[TimeSeriesPoint],
    slot_index: usize,
) -> Result<(), String>
where
    DB::ErrorType: 'static,
{
    let bg_color = RGBColor(15, 23, 42);
    let text_color = RGBColor(226, 232, 240);
    let axis_color = RGBColor(71, 85, 105);
    let (r, g, b) = palette_rgb(0);
    let line_color = RGBColor(r, g, b);

    root.fill(&bg_color).map_err(|e| e.to_string())?;

    let min_value = points.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let max_value = points
        .iter()
        .map(|p| p.value)
        .fold(f64::NEG_INFINITY, f64::max);
    let (y_min, y_max) = volume_axis_bounds(min_value, max_value);
    let last_x = (points.len().saturating_sub(1) as f64).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .margin(24)
        .caption(
            "Hourly Call Volume",
            ("sans-serif", 28).into_font().color(&text_color),
        )
        .set_label_area_size(LabelAreaPosition::Left, 48)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(0f64..last_x, y_min..y_max)
        .map_err(|e| e.to_string())?;

    let label_for = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        points
            .get(idx as usize)
            .map(|p| p.time_label.clone())
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .x_labels(points.len())
        .x_label_formatter(&label_for)
        .label_style(("sans-serif", 16).into_font().color(&text_color))
        .axis_style(&axis_color)
        .light_line_style(&bg_color)
        .bold_line_style(&axis_color)
        .draw()
        .map_err(|e| e.to_string())?;

    let data: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(idx, p)| (idx as f64, p.value))
        .collect();
    chart
        .draw_series(
            AreaSeries::new(data.iter().copied(), y_min, line_color.mix(0.3))
                .border_style(line_color.stroke_width(3)),
        )
        .map_err(|e| e.to_string())?;

    if let Some(&(x, y)) = data.get(slot_index) {
        chart
            .draw_series(std::iter::once(Circle::new((x, y), 6, line_color.filled())))
            .map_err(|e| e.to_string())?;
    }

    root.present().map_err(|e| e.to_string())?;
    Ok(())
}

impl DashboardApp {
    pub(crate) fn start_export(&mut self, format: ExportFormat) {
        if self.export.is_waiting() {
            return;
        }
        let (tx, rx) = mpsc::channel();
        self.export.format = format;
        self.export.dialog_rx = Some(rx);

        let extension = format.extension();
        let filter_name = extension.to_uppercase();
        let default_name = format!("call_volume.{extension}");
        std::thread::spawn(move || {
            let file = rfd::FileDialog::new()
                .add_filter(filter_name, &[extension])
                .set_file_name(default_name)
                .save_file();
            let _ = tx.send(file);
        });
    }

    pub(crate) fn poll_export_dialog(&mut self) {
        let Some(rx) = self.export.dialog_rx.as_ref() else {
            return;
        };
        let picked = match rx.try_recv() {
            Ok(picked) => picked,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => None,
        };
        self.export.dialog_rx = None;

        let Some(path) = picked else {
            return;
        };
        let format = self.export.format;
        let path = with_default_extension(path, format);
        match export_call_volume(
            self.surface.points(),
            self.surface.slot_index(),
            &path,
            format,
        ) {
            Ok(()) => {
                log::info!("exported call volume chart to {}", path.display());
                self.show_info("Export", &format!("Saved {}", path.display()));
            }
            Err(err) => {
                log::error!("chart export to {} failed: {err}", path.display());
                self.show_warning("Export failed", &err);
            }
        }
    }
}
