/// Formats a value for axis labels, tooltips and the CLI table.
///
/// Whole numbers print without decimals, anything else with up to two.
pub fn format_number_value(value: f64) -> String {
    let text = if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    };
    // Small negatives round away to a signed zero.
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}
