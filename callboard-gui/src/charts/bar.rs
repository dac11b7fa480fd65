use super::{hover_text, palette_color, time_label_formatter};
use callboard_core::charts::volume_axis_bounds;
use callboard_core::ChartSurface;
use egui_plot::{Bar, BarChart, Plot, PlotBounds};

/// Per-hour bars over the same series as the area chart.
pub(crate) fn agent_performance_chart(ui: &mut egui::Ui, surface: &ChartSurface, height: f32) {
    let points = surface.points().to_vec();
    let labels: Vec<String> = points.iter().map(|p| p.time_label.clone()).collect();
    let (min_value, max_value) = surface.value_range();
    let (y_min, y_max) = volume_axis_bounds(min_value, max_value);
    let last_x = points.len().saturating_sub(1) as f64;

    let bars: Vec<Bar> = points
        .iter()
        .enumerate()
        .map(|(idx, point)| Bar::new(idx as f64, point.value).width(0.6).name(&point.time_label))
        .collect();
    let chart = BarChart::new(bars).color(palette_color(1)).name("calls");

    let hover_points = points;
    Plot::new("agent_performance")
        .height(height)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid([false, true])
        .x_axis_formatter(time_label_formatter(labels))
        .label_formatter(move |_name, value| hover_text(&hover_points, value.x))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [-0.5, y_min],
                [last_x + 0.5, y_max],
            ));
        });
}
