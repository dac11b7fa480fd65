use super::{palette_color, AXIS_COLOR};
use callboard_core::charts::{
    pie_slices, PieSlice, DONUT_INNER_RADIUS, DONUT_OUTER_RADIUS, DONUT_PADDING_DEG,
};
use callboard_core::format::format_number_value;
use callboard_core::model::SentimentSlice;
use egui::{Color32, Pos2, Sense, Shape, Stroke};

/// Degrees covered by one polygon of a ring segment.
const SEGMENT_STEP_DEG: f32 = 3.0;

fn ring_point(center: Pos2, radius: f32, deg: f32) -> Pos2 {
    let rad = deg.to_radians();
    // Screen y grows downwards; angles run counter-clockwise.
    Pos2::new(center.x + radius * rad.cos(), center.y - radius * rad.sin())
}

fn paint_slice(painter: &egui::Painter, center: Pos2, slice: &PieSlice, color: Color32) {
    if slice.sweep_deg <= 0.0 {
        return;
    }
    let steps = (slice.sweep_deg / SEGMENT_STEP_DEG).ceil().max(1.0) as usize;
    let step = slice.sweep_deg / steps as f32;
    for i in 0..steps {
        let a0 = slice.start_deg + step * i as f32;
        let a1 = a0 + step;
        let quad = vec![
            ring_point(center, DONUT_OUTER_RADIUS, a0),
            ring_point(center, DONUT_OUTER_RADIUS, a1),
            ring_point(center, DONUT_INNER_RADIUS, a1),
            ring_point(center, DONUT_INNER_RADIUS, a0),
        ];
        painter.add(Shape::convex_polygon(quad, color, Stroke::NONE));
    }
}

fn slice_at(slices: &[PieSlice], center: Pos2, pointer: Pos2) -> Option<&PieSlice> {
    let offset = pointer - center;
    let distance = offset.length();
    if !(DONUT_INNER_RADIUS..=DONUT_OUTER_RADIUS).contains(&distance) {
        return None;
    }
    let deg = (-offset.y).atan2(offset.x).to_degrees().rem_euclid(360.0);
    slices
        .iter()
        .find(|slice| slice.sweep_deg > 0.0 && deg >= slice.start_deg && deg <= slice.end_deg())
}

pub(crate) fn sentiment_donut(ui: &mut egui::Ui, sentiment: &[SentimentSlice], height: f32) {
    let slices = pie_slices(sentiment, DONUT_PADDING_DEG);
    let width = ui.available_width();
    let (response, painter) = ui.allocate_painter(egui::vec2(width, height), Sense::hover());
    let center = response.rect.center();

    for (idx, slice) in slices.iter().enumerate() {
        paint_slice(&painter, center, slice, palette_color(idx));
    }

    let hovered = response
        .hover_pos()
        .and_then(|pointer| slice_at(&slices, center, pointer))
        .map(|slice| format!("{}: {}", slice.label, format_number_value(slice.value)));
    if let Some(text) = hovered {
        response.on_hover_text(text);
    }

    ui.horizontal(|ui| {
        let legend_width: f32 = sentiment.len() as f32 * 96.0;
        ui.add_space(((ui.available_width() - legend_width) * 0.5).max(0.0));
        for (idx, entry) in sentiment.iter().enumerate() {
            let (dot, dot_painter) = ui.allocate_painter(egui::vec2(12.0, 12.0), Sense::hover());
            dot_painter.circle_filled(dot.rect.center(), 6.0, palette_color(idx));
            ui.label(egui::RichText::new(&entry.name).color(AXIS_COLOR));
            ui.add_space(16.0);
        }
    });
}
