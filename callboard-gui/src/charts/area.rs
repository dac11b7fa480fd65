use super::{hover_text, palette_color, time_label_formatter, SLOT_HIGHLIGHT};
use callboard_core::charts::volume_axis_bounds;
use callboard_core::ChartSurface;
use egui_plot::{Line, Plot, PlotBounds, PlotPoints, Points};

pub(crate) fn call_volume_chart(ui: &mut egui::Ui, surface: &ChartSurface, height: f32) {
    let points = surface.points().to_vec();
    let labels: Vec<String> = points.iter().map(|p| p.time_label.clone()).collect();
    let (min_value, max_value) = surface.value_range();
    let (y_min, y_max) = volume_axis_bounds(min_value, max_value);
    let last_x = points.len().saturating_sub(1) as f64;
    let sky = palette_color(0);

    let line_points: PlotPoints = points
        .iter()
        .enumerate()
        .map(|(idx, point)| [idx as f64, point.value])
        .collect();
    let slot = surface.slot();
    let slot_marker = Points::new(vec![[surface.slot_index() as f64, slot.value]])
        .radius(5.0)
        .color(SLOT_HIGHLIGHT)
        .name(surface.slot_label());

    let hover_points = points;
    Plot::new("call_volume")
        .height(height)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid(true)
        .x_axis_formatter(time_label_formatter(labels))
        .label_formatter(move |_name, value| hover_text(&hover_points, value.x))
        .y_axis_label("calls")
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(line_points)
                    .color(sky)
                    .fill(0.0)
                    .width(2.0)
                    .name("calls"),
            );
            plot_ui.points(slot_marker);
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [-0.3, y_min],
                [last_x + 0.3, y_max],
            ));
        });
}
