use stride_core::models::value::{MeasurementValue, NT_TOKEN};
use stride_norms::tables::NormativeRange;

/// Display string for a resolved normative range. Advisory text wins over
/// numeric bounds; an empty range renders as a dash.
pub fn format_normative_range(range: &NormativeRange) -> String {
    if let Some(text) = &range.text {
        return text.clone();
    }
    match (range.min, range.max) {
        (Some(min), Some(max)) => format!("{}-{}", fmt_number(min), fmt_number(max)),
        (Some(min), None) => format!("≥ {}", fmt_number(min)),
        (None, Some(max)) => format!("≤ {}", fmt_number(max)),
        (None, None) => "-".to_string(),
    }
}

/// Display string for a recorded value. NT renders as the literal `NT` —
/// a deliberate clinical outcome, distinct from the dash used for data
/// that was never there.
pub fn format_value(value: &MeasurementValue) -> String {
    match value {
        MeasurementValue::NotTested => NT_TOKEN.to_string(),
        MeasurementValue::Number(v) => fmt_number(*v),
        MeasurementValue::Walk { distance, protocol } => {
            format!("{} ({})", fmt_number(*distance), protocol.label())
        }
        MeasurementValue::Weighted { reps, weight } => {
            format!("{} ({})", fmt_number(*reps), weight.label())
        }
    }
}

/// Like `format_value`, with a dash for a value that is absent entirely.
pub fn format_optional_value(value: Option<&MeasurementValue>) -> String {
    match value {
        Some(v) => format_value(v),
        None => "-".to_string(),
    }
}

/// Integral readings print without a fractional part.
fn fmt_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_supersedes_numeric_bounds() {
        let range = NormativeRange::at_least(1200.0).with_text("< 1200 ms");
        assert_eq!(format_normative_range(&range), "< 1200 ms");
    }

    #[test]
    fn range_shapes_format_in_precedence_order() {
        assert_eq!(
            format_normative_range(&NormativeRange::between(18.5, 29.9)),
            "18.5-29.9"
        );
        assert_eq!(format_normative_range(&NormativeRange::at_least(80.0)), "≥ 80");
        assert_eq!(format_normative_range(&NormativeRange::at_most(9.0)), "≤ 9");
        assert_eq!(format_normative_range(&NormativeRange::empty()), "-");
    }

    #[test]
    fn nt_formats_as_nt_never_dash() {
        assert_eq!(format_value(&MeasurementValue::NotTested), "NT");
        assert_eq!(format_optional_value(Some(&MeasurementValue::NotTested)), "NT");
    }

    #[test]
    fn absent_value_formats_as_dash() {
        assert_eq!(format_optional_value(None), "-");
    }

    #[test]
    fn numbers_drop_trailing_zero_fraction() {
        assert_eq!(format_value(&MeasurementValue::Number(12.0)), "12");
        assert_eq!(format_value(&MeasurementValue::Number(9.8)), "9.8");
        assert_eq!(format_value(&MeasurementValue::Number(-4.0)), "-4");
    }

    #[test]
    fn compound_values_carry_their_variant() {
        use stride_core::models::value::{CurlWeight, WalkProtocol};
        let walk = MeasurementValue::Walk {
            distance: 462.0,
            protocol: WalkProtocol::SixMinute,
        };
        assert_eq!(format_value(&walk), "462 (6 min)");

        let curl = MeasurementValue::Weighted {
            reps: 14.0,
            weight: CurlWeight::Lb5,
        };
        assert_eq!(format_value(&curl), "14 (5 lb)");
    }
}
