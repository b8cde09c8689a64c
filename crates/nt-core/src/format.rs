//! Human readable sizes for throughput and count measures.

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const BIT_UNITS: [&str; 5] = ["b", "Kb", "Mb", "Gb", "Tb"];
const COUNT_UNITS: [&str; 5] = ["", "K", "M", "B", "T"];

fn scaled(value: f64, base: f64, units: &[&str; 5], hide_unit: bool) -> String {
    // Exponent clamps to the unit table; sub-unit values stay in the base unit
    let exponent = if value > 0.0 {
        (value.ln() / base.ln()).floor().clamp(0.0, (units.len() - 1) as f64) as usize
    } else {
        0
    };
    let number = format!("{:.1}", value / base.powi(exponent as i32));
    let unit = units[exponent];
    if hide_unit || unit.is_empty() {
        number
    } else {
        format!("{number} {unit}")
    }
}

/// Format a byte count, e.g. `1536.0` -> `"1.5 KB"`.
pub fn bytes_to_size(bytes: f64, hide_unit: bool) -> String {
    if bytes == 0.0 {
        return if hide_unit { "0".into() } else { "0 B".into() };
    }
    scaled(bytes, 1024.0, &BYTE_UNITS, hide_unit)
}

/// Format a bit rate/count, e.g. `3.0 * 1024.0 * 1024.0` -> `"3.0 Mb"`.
pub fn bits_to_size(bits: f64, hide_unit: bool) -> String {
    if bits == 0.0 {
        return if hide_unit { "0".into() } else { "0 b".into() };
    }
    scaled(bits, 1024.0, &BIT_UNITS, hide_unit)
}

/// Format a plain count with decimal suffixes, e.g. `25_000.0` -> `"25.0 K"`.
pub fn int_to_size(num: f64, hide_unit: bool) -> String {
    if num == 0.0 {
        return "0".into();
    }
    scaled(num, 1000.0, &COUNT_UNITS, hide_unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values() {
        assert_eq!(bytes_to_size(0.0, false), "0 B");
        assert_eq!(bits_to_size(0.0, false), "0 b");
        assert_eq!(bits_to_size(0.0, true), "0");
        assert_eq!(int_to_size(0.0, false), "0");
    }

    #[test]
    fn base_unit_values() {
        assert_eq!(bytes_to_size(512.0, false), "512.0 B");
        assert_eq!(int_to_size(18.0, false), "18.0");
        assert_eq!(bits_to_size(0.5, false), "0.5 b");
    }

    #[test]
    fn scaled_values() {
        assert_eq!(bytes_to_size(1536.0, false), "1.5 KB");
        assert_eq!(bits_to_size(3.0 * 1024.0 * 1024.0, false), "3.0 Mb");
        assert_eq!(int_to_size(25_000.0, false), "25.0 K");
        assert_eq!(int_to_size(2_500_000_000.0, false), "2.5 B");
    }

    #[test]
    fn hidden_units() {
        assert_eq!(bytes_to_size(1536.0, true), "1.5");
        assert_eq!(bits_to_size(2048.0, true), "2.0");
    }

    #[test]
    fn huge_values_stay_in_largest_unit() {
        let tb = 1024.0_f64.powi(4);
        assert_eq!(bytes_to_size(tb * 2048.0, false), "2048.0 TB");
    }
}
