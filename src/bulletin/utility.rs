use anyhow::{Result, bail};

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Formats a value with exactly two decimal digits.
///
/// A value lying exactly halfway between two cents rounds to the even one,
/// so `12.125` gives `"12.12"`.
pub fn fixed2(value: f64) -> String {
    format!("{value:.2}")
}

/// Formats `value` to two decimals and reads the result back, so the number
/// used in later arithmetic is exactly the one that gets displayed.
///
/// # Errors
///
/// Fails on non-finite input.
pub fn rounded2(value: f64) -> Result<(String, f64)> {
    if !value.is_finite() {
        bail!("cannot format non-finite average {value}");
    }
    let text = fixed2(value);
    let parsed: f64 = text.parse()?;
    Ok((text, parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[12.0, 15.0, 9.0]), 12.0);
    }

    #[test]
    fn test_fixed2_pads_and_rounds() {
        assert_eq!(fixed2(12.0), "12.00");
        assert_eq!(fixed2(13.456), "13.46");
        assert_eq!(fixed2(14.0 / 3.0), "4.67");
    }

    #[test]
    fn test_fixed2_exact_ties_round_to_even() {
        assert_eq!(fixed2(mean(&[12.25, 12.0])), "12.12");
        assert_eq!(fixed2(0.125), "0.12");
        assert_eq!(fixed2(0.375), "0.38");
        // Not a tie in binary: 1.005 is stored just below.
        assert_eq!(fixed2(1.005), "1.00");
    }

    #[test]
    fn test_rounded2_round_trips() {
        let (text, value) = rounded2(15.999).unwrap();
        assert_eq!(text, "16.00");
        assert_eq!(value, 16.0);
        assert!(rounded2(f64::NAN).is_err());
        assert!(rounded2(f64::INFINITY).is_err());
    }
}
