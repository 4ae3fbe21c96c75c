//! Summary statistics used for fit diagnostics.

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Ratio of predicted to observed spread around the observed mean:
///
/// ```text
/// Σ (ŷ_i - ȳ)² / Σ (y_i - ȳ)²
/// ```
///
/// This is *not* the conventional coefficient of determination, which puts
/// `Σ (y_i - ŷ_i)²` in the numerator. A perfect fit scores `1.0` under both.
///
/// Returns `None` when the inputs are empty, differ in length, or the observed
/// values have zero spread.
pub fn quality_score(observed: &[f64], predicted: &[f64]) -> Option<f64> {
    if observed.len() != predicted.len() {
        return None;
    }
    let y_bar = mean(observed)?;

    let total: f64 = observed.iter().map(|y| (y - y_bar).powi(2)).sum();
    let explained: f64 = predicted.iter().map(|y_hat| (y_hat - y_bar).powi(2)).sum();

    if !(total > 0.0 && total.is_finite() && explained.is_finite()) {
        return None;
    }
    Some(explained / total)
}

/// Sum of squared differences between two equally long series.
pub fn sum_squared_error(observed: &[f64], predicted: &[f64]) -> f64 {
    observed
        .iter()
        .zip(predicted.iter())
        .map(|(y, y_hat)| (y - y_hat).powi(2))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_uses_predicted_deviation_in_numerator() {
        let y = [0.0, 1.0, 2.0, 3.0];
        let y_hat = [0.5, 1.0, 2.0, 2.5];
        // ȳ = 1.5; total = 2.25 + 0.25 + 0.25 + 2.25 = 5.0
        // explained = 1.0 + 0.25 + 0.25 + 1.0 = 2.5
        let q = quality_score(&y, &y_hat).unwrap();
        assert!((q - 0.5).abs() < 1e-12);

        // The conventional R² would be 1 - 0.5/5.0 = 0.9.
        let r2 = 1.0 - sum_squared_error(&y, &y_hat) / 5.0;
        assert!((r2 - 0.9).abs() < 1e-12);
    }

    #[test]
    fn quality_can_exceed_one() {
        let y = [0.0, 1.0];
        let y_hat = [-1.0, 2.0];
        let q = quality_score(&y, &y_hat).unwrap();
        assert!((q - 4.0).abs() < 1e-12);
    }

    #[test]
    fn quality_undefined_without_spread() {
        assert_eq!(quality_score(&[0.5, 0.5], &[0.4, 0.6]), None);
        assert_eq!(quality_score(&[], &[]), None);
        assert_eq!(quality_score(&[0.1, 0.2], &[0.1]), None);
    }
}
