/// Format a number the way it appears in mapping keys and generated Lua: integral values have no
/// fractional part, everything else uses the shortest representation that round-trips.
///
/// Magnitudes of `1e21` and above or below `1e-6` switch to exponent form with an explicit sign
/// (`1e+21`, `1.5e-7`), matching how mapping documents authored in JavaScript key such values.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.0
        return "0".to_string();
    }

    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{value:e}");
        return match exp.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => exp,
        };
    }

    value.to_string()
}
