//! Dashboard chart renderers. Each one reads the surface as it is this frame;
//! nothing is cached between frames.

use callboard_core::format::format_number_value;
use callboard_core::model::{palette_rgb, TimeSeriesPoint};
use egui::Color32;
use egui_plot::GridMark;
use std::ops::RangeInclusive;

mod area;
mod bar;
mod pie;

pub(crate) use area::call_volume_chart;
pub(crate) use bar::agent_performance_chart;
pub(crate) use pie::sentiment_donut;

pub(crate) const AXIS_COLOR: Color32 = Color32::from_rgb(148, 163, 184);
pub(crate) const SLOT_HIGHLIGHT: Color32 = Color32::from_rgb(244, 114, 182);

pub(crate) fn palette_color(idx: usize) -> Color32 {
    let (r, g, b) = palette_rgb(idx);
    Color32::from_rgb(r, g, b)
}

/// Axis formatter that prints the time label under each whole-number mark.
pub(crate) fn time_label_formatter(
    labels: Vec<String>,
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let rounded = mark.value.round();
        if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        labels.get(rounded as usize).cloned().unwrap_or_default()
    }
}

/// Hover text: "<time>\ncalls: <value>" for the nearest sample.
pub(crate) fn hover_text(points: &[TimeSeriesPoint], x: f64) -> String {
    let idx = x.round().max(0.0) as usize;
    match points.get(idx) {
        Some(point) => format!(
            "{}\ncalls: {}",
            point.time_label,
            format_number_value(point.value)
        ),
        None => String::new(),
    }
}
