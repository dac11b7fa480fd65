use callboard_core::format::format_number_value;
use callboard_core::ChartSurface;

pub fn print_info(message: &str) {
    println!("[Callboard][INFO] {message}");
}

pub fn print_warning(message: &str) {
    eprintln!("[Callboard][WARN] {message}");
}

pub fn print_error(message: &str) {
    eprintln!("[Callboard][ERROR]: {message}");
}

/// One line per hour; the editable slot is marked with `*`.
pub fn print_series(surface: &ChartSurface) {
    for (idx, point) in surface.points().iter().enumerate() {
        let marker = if idx == surface.slot_index() { "*" } else { " " };
        println!(
            "{marker} {}\t{}",
            point.time_label,
            format_number_value(point.value)
        );
    }
}
