//! Renderer-independent chart geometry.
//!
//! Angles are in degrees, counter-clockwise from the positive x axis, the way
//! the sentiment donut has always been laid out.

use crate::model::SentimentSlice;

pub const DONUT_INNER_RADIUS: f32 = 60.0;
pub const DONUT_OUTER_RADIUS: f32 = 80.0;
pub const DONUT_PADDING_DEG: f32 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub fraction: f64,
    pub start_deg: f32,
    pub sweep_deg: f32,
}

impl PieSlice {
    pub fn end_deg(&self) -> f32 {
        self.start_deg + self.sweep_deg
    }
}

/// Lays out a full donut with `padding_deg` of gap after every non-empty slice.
///
/// Slices with a non-positive value keep their place in the output with a zero
/// sweep so callers can still index colors by position.
pub fn pie_slices(slices: &[SentimentSlice], padding_deg: f32) -> Vec<PieSlice> {
    let total: f64 = slices.iter().map(|s| s.value.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let visible = slices.iter().filter(|s| s.value > 0.0).count();
    let padding = padding_deg.max(0.0);
    let available = (360.0 - padding * visible as f32).max(0.0);

    let mut cursor = 0.0_f32;
    slices
        .iter()
        .map(|slice| {
            let fraction = slice.value.max(0.0) / total;
            let sweep = (fraction as f32) * available;
            let out = PieSlice {
                label: slice.name.clone(),
                value: slice.value,
                fraction,
                start_deg: cursor,
                sweep_deg: sweep,
            };
            if slice.value > 0.0 {
                cursor += sweep + padding;
            }
            out
        })
        .collect()
}

/// Y-axis bounds for the volume charts: always includes zero and leaves a
/// little headroom above the tallest point.
pub fn volume_axis_bounds(min: f64, max: f64) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let low = min.min(0.0);
    let high = max.max(0.0);
    let headroom = ((high - low) * 0.1).max(1.0);
    (low, high + headroom)
}
