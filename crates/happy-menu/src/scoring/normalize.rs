use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// What to do when a column has zero range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Substitute 0.0 (1.0 when inverted) and keep going.
    #[default]
    Neutral,
    /// Refuse to normalize.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scaling {
    /// Higher raw value maps closer to 1.
    Direct,
    /// Lower raw value maps closer to 1.
    Inverted,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizationError {
    #[error("column '{column}' has zero variance (every value is {value}); cannot min-max normalize")]
    Degenerate { column: String, value: f64 },
}

/// Observed min and max, ignoring NaN cells. `None` when nothing is present.
pub fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|value| !value.is_nan())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

/// Min-max rescales `values` into [0, 1] using bounds of this slice only.
///
/// NaN cells stay NaN. A zero-range column is resolved by `policy`.
pub fn normalize(
    column: &str,
    values: &[f64],
    scaling: Scaling,
    policy: DegeneratePolicy,
) -> Result<Vec<f64>, NormalizationError> {
    let Some((min, max)) = bounds(values) else {
        return Ok(values.to_vec());
    };

    let range = max - min;
    if range == 0.0 {
        match policy {
            DegeneratePolicy::Strict => {
                return Err(NormalizationError::Degenerate {
                    column: column.to_string(),
                    value: min,
                })
            }
            DegeneratePolicy::Neutral => {
                warn!(column, value = min, "zero-range column normalized to neutral value");
                let neutral = match scaling {
                    Scaling::Direct => 0.0,
                    Scaling::Inverted => 1.0,
                };
                return Ok(values
                    .iter()
                    .map(|value| if value.is_nan() { *value } else { neutral })
                    .collect());
            }
        }
    }

    Ok(values
        .iter()
        .map(|value| {
            let scaled = (value - min) / range;
            match scaling {
                Scaling::Direct => scaled,
                Scaling::Inverted => 1.0 - scaled,
            }
        })
        .collect())
}

/// Z-scores with population standard deviation. Zero deviation maps to 0.0.
pub fn standardize(values: &[f64]) -> Vec<f64> {
    let present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if present.is_empty() {
        return values.to_vec();
    }

    let n = present.len() as f64;
    let mean = present.iter().sum::<f64>() / n;
    let variance = present
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / n;
    let stddev = variance.sqrt();
    let scale = if stddev == 0.0 { 1.0 } else { stddev };

    values.iter().map(|value| (value - mean) / scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_maps_min_to_zero_and_max_to_one() {
        let normalized =
            normalize("protein", &[5.0, 10.0, 20.0], Scaling::Direct, DegeneratePolicy::Strict)
                .expect("non-degenerate");
        assert_eq!(normalized[0], 0.0);
        assert_eq!(normalized[2], 1.0);
        assert!((normalized[1] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn inverted_maps_min_to_one_and_max_to_zero() {
        let normalized = normalize(
            "sodium",
            &[400.0, 800.0, 1200.0],
            Scaling::Inverted,
            DegeneratePolicy::Neutral,
        )
        .expect("non-degenerate");
        assert_eq!(normalized, vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn values_stay_within_unit_interval() {
        let values = [3.2, -1.0, 7.5, 0.0, 7.5, 2.25];
        for scaling in [Scaling::Direct, Scaling::Inverted] {
            let normalized = normalize("mixed", &values, scaling, DegeneratePolicy::Strict)
                .expect("non-degenerate");
            assert!(normalized.iter().all(|value| (0.0..=1.0).contains(value)));
        }
    }

    #[test]
    fn nan_cells_are_ignored_for_bounds() {
        let normalized = normalize(
            "sugars",
            &[2.0, f64::NAN, 4.0],
            Scaling::Direct,
            DegeneratePolicy::Strict,
        )
        .expect("non-degenerate");
        assert_eq!(normalized[0], 0.0);
        assert!(normalized[1].is_nan());
        assert_eq!(normalized[2], 1.0);
    }

    #[test]
    fn degenerate_column_uses_neutral_value() {
        let direct = normalize("trans fat", &[0.0, 0.0], Scaling::Direct, DegeneratePolicy::Neutral)
            .expect("neutral fallback");
        assert_eq!(direct, vec![0.0, 0.0]);

        let inverted =
            normalize("trans fat", &[0.0, 0.0], Scaling::Inverted, DegeneratePolicy::Neutral)
                .expect("neutral fallback");
        assert_eq!(inverted, vec![1.0, 1.0]);
    }

    #[test]
    fn degenerate_column_fails_under_strict_policy() {
        let error = normalize("trans fat", &[0.2, 0.2], Scaling::Direct, DegeneratePolicy::Strict)
            .expect_err("degenerate");
        assert_eq!(
            error,
            NormalizationError::Degenerate {
                column: "trans fat".to_string(),
                value: 0.2
            }
        );
    }

    #[test]
    fn empty_column_normalizes_to_empty() {
        let normalized = normalize("empty", &[], Scaling::Direct, DegeneratePolicy::Strict)
            .expect("empty is fine");
        assert!(normalized.is_empty());
    }

    #[test]
    fn standardize_centers_and_scales() {
        let z = standardize(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let mean: f64 = z.iter().sum::<f64>() / z.len() as f64;
        assert!(mean.abs() < 1e-12);
        assert!((z[4] - 2.0_f64.sqrt()).abs() < 1e-12);

        assert_eq!(standardize(&[3.0, 3.0]), vec![0.0, 0.0]);
    }
}
