//! Sort-and-slice plus keyword and threshold filtering over scored rows.

use crate::dataset::{MenuItem, Nutrient};
use crate::features::keywords::contains_any;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Orders two keys; NaN always sorts after every number.
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => match self {
                SortDirection::Ascending => a.total_cmp(&b),
                SortDirection::Descending => b.total_cmp(&a),
            },
        }
    }
}

/// Stable sort by `key`, truncated to `top_n` rows when given.
pub fn rank<T, F>(
    mut rows: Vec<T>,
    key: F,
    direction: SortDirection,
    top_n: Option<usize>,
) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    rows.sort_by(|a, b| direction.compare(key(a), key(b)));
    if let Some(limit) = top_n {
        rows.truncate(limit);
    }
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordMode {
    /// Drop rows whose text contains any keyword.
    Exclude,
    /// Keep only rows whose text contains any keyword.
    Require,
}

pub fn filter_by_keywords<T, F>(
    rows: Vec<T>,
    text: F,
    keywords: &[&str],
    mode: KeywordMode,
) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    rows.into_iter()
        .filter(|row| {
            let hit = contains_any(text(row), keywords);
            match mode {
                KeywordMode::Exclude => !hit,
                KeywordMode::Require => hit,
            }
        })
        .collect()
}

/// `nutrient <= max`. Missing values fail the check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientCeiling {
    pub nutrient: Nutrient,
    pub max: f64,
}

impl NutrientCeiling {
    pub const fn new(nutrient: Nutrient, max: f64) -> Self {
        Self { nutrient, max }
    }

    pub fn admits(&self, item: &MenuItem) -> bool {
        item.get(self.nutrient) <= self.max
    }
}

/// True when every ceiling admits the item.
pub fn within_ceilings(item: &MenuItem, ceilings: &[NutrientCeiling]) -> bool {
    ceilings.iter().all(|ceiling| ceiling.admits(item))
}
