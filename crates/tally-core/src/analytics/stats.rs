//! Statistical primitives
//!
//! Empty and constant inputs yield 0 rather than NaN so callers never need
//! to special-case them.

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by N); 0 for an empty slice
pub fn standard_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Standard deviations `value` lies from the mean of `values`; 0 for a flat series
pub fn z_score(value: f64, values: &[f64]) -> f64 {
    let std = standard_deviation(values);
    if std == 0.0 {
        return 0.0;
    }
    (value - mean(values)) / std
}

/// Z-scores for every value against the whole slice, computed in one pass
pub(crate) fn z_scores(values: &[f64]) -> Vec<f64> {
    let avg = mean(values);
    let std = standard_deviation(values);
    values
        .iter()
        .map(|v| if std == 0.0 { 0.0 } else { (v - avg) / std })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0, 6.0]), 4.0);
    }

    #[test]
    fn test_standard_deviation_population() {
        assert_eq!(standard_deviation(&[]), 0.0);
        assert_eq!(standard_deviation(&[42.0]), 0.0);
        // Population stddev of 2,4,4,4,5,5,7,9 is exactly 2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((standard_deviation(&values) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_z_score() {
        assert_eq!(z_score(7.0, &[7.0]), 0.0);
        assert_eq!(z_score(10.0, &[5.0, 5.0, 5.0]), 0.0);
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((z_score(9.0, &values) - 2.0).abs() < 1e-12);
        assert!((z_score(3.0, &values) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_z_scores_match_z_score() {
        let values = [10.0, 20.0, 35.0, 90.0];
        let batch = z_scores(&values);
        for (v, z) in values.iter().zip(&batch) {
            assert!((z_score(*v, &values) - z).abs() < 1e-12);
        }
        assert_eq!(z_scores(&[3.0, 3.0]), vec![0.0, 0.0]);
    }
}
