// src/services/format.rs
use crate::models::DisplayUnit;

/// Billions with one decimal, switching to trillions at 1000.
pub fn format_billions(value: f64) -> String {
    if value.abs() >= 1000.0 {
        format!("{:.1}T", value / 1000.0)
    } else {
        format!("{:.1}B", value)
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Summary card value, e.g. `-$1.6T` or `+0.41%`.
pub fn format_headline(value: f64, unit: DisplayUnit) -> String {
    let sign = if value >= 0.0 { '+' } else { '-' };
    match unit {
        DisplayUnit::Billions => format!("{}${}", sign, format_billions(value.abs())),
        DisplayUnit::PctPayroll | DisplayUnit::PctGdp => {
            format!("{}{}", sign, format_percentage(value.abs()))
        }
    }
}

/// Comparison table cell, always in billions.
pub fn format_signed_currency(value: f64) -> String {
    let sign = if value >= 0.0 { '+' } else { '-' };
    format!("{}${:.1}B", sign, value.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billions_switch_to_trillions() {
        assert_eq!(format_billions(102.84), "102.8B");
        assert_eq!(format_billions(1600.0), "1.6T");
        assert_eq!(format_billions(-1600.0), "-1.6T");
    }

    #[test]
    fn headlines_carry_sign_and_unit() {
        assert_eq!(format_headline(-1600.0, DisplayUnit::Billions), "-$1.6T");
        assert_eq!(format_headline(66.3, DisplayUnit::Billions), "+$66.3B");
        assert_eq!(format_headline(-1.0244, DisplayUnit::PctPayroll), "-1.02%");
        assert_eq!(format_headline(0.0, DisplayUnit::PctGdp), "+0.00%");
    }

    #[test]
    fn comparison_cells() {
        assert_eq!(format_signed_currency(-1400.0), "-$1400.0B");
        assert_eq!(format_signed_currency(66.3), "+$66.3B");
    }
}
