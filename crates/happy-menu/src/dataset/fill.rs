use serde::{Deserialize, Serialize};

/// Statistic used to replace missing cells of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStrategy {
    Median,
    Mean,
    Zero,
}

impl FillStrategy {
    /// Statistic over the non-missing values, `None` when there are none.
    pub fn statistic(self, values: &[f64]) -> Option<f64> {
        match self {
            FillStrategy::Zero => Some(0.0),
            FillStrategy::Mean => mean(values),
            FillStrategy::Median => median(values),
        }
    }
}

/// Replaces NaN cells in place, returning how many were filled.
pub fn fill_missing(values: &mut [f64], strategy: FillStrategy) -> usize {
    let Some(replacement) = strategy.statistic(values) else {
        return 0;
    };

    let mut filled = 0;
    for value in values.iter_mut().filter(|value| value.is_nan()) {
        *value = replacement;
        filled += 1;
    }
    filled
}

pub fn mean(values: &[f64]) -> Option<f64> {
    let present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if present.is_empty() {
        return None;
    }
    Some(present.iter().sum::<f64>() / present.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    let mut present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(f64::total_cmp);

    let mid = present.len() / 2;
    if present.len() % 2 == 0 {
        Some((present[mid - 1] + present[mid]) / 2.0)
    } else {
        Some(present[mid])
    }
}
