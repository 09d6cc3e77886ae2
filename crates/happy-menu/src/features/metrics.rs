use crate::dataset::{median, MenuItem, Nutrient};
use serde::{Deserialize, Serialize};

/// Share of total fat that is neither saturated nor trans. Fat-free items count as 1.
pub fn healthy_fat_ratio(item: &MenuItem) -> f64 {
    let total = item.get(Nutrient::TotalFat);
    if total > 0.0 {
        (total - item.get(Nutrient::SatFat) - item.get(Nutrient::TransFat)) / total
    } else {
        1.0
    }
}

/// Share of carbohydrate that is not sugar. Carb-free items count as 1.
pub fn complex_carb_ratio(item: &MenuItem) -> f64 {
    let carbs = item.get(Nutrient::TotalCarbohydrate);
    if carbs > 0.0 {
        (carbs - item.get(Nutrient::TotalSugars)) / carbs
    } else {
        1.0
    }
}

/// Grams from a serving size such as `"168 g"`; NaN when the leading token is not a number.
pub fn parse_serving_weight(serving_size: &str) -> f64 {
    serving_size
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Serving weights for a set of rows, with unparseable sizes replaced by the median.
pub fn serving_weights(items: &[&MenuItem]) -> Vec<f64> {
    let mut weights: Vec<f64> = items
        .iter()
        .map(|item| parse_serving_weight(&item.serving_size))
        .collect();
    if let Some(fallback) = median(&weights) {
        for weight in weights.iter_mut().filter(|weight| weight.is_nan()) {
            *weight = fallback;
        }
    }
    weights
}

/// kCal per gram of serving.
pub fn energy_density(item: &MenuItem, serving_weight: f64) -> f64 {
    item.get(Nutrient::Energy) / serving_weight
}

/// Carbohydrate minus twice the sugars.
pub fn carb_quality_score(item: &MenuItem) -> f64 {
    item.get(Nutrient::TotalCarbohydrate) - item.get(Nutrient::TotalSugars) * 2.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarbType {
    High,
    Moderate,
    Low,
}

impl CarbType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
        }
    }
}

/// Low-sugar, protein-balanced carbs are high quality; sugary, carb-heavy items are low.
pub fn carb_type(item: &MenuItem) -> CarbType {
    let sugars = item.get(Nutrient::TotalSugars);
    let carb_to_protein =
        item.get(Nutrient::TotalCarbohydrate) / item.get(Nutrient::Protein).max(1.0);

    if sugars < 2.0 && carb_to_protein < 3.0 {
        CarbType::High
    } else if sugars > 5.0 && carb_to_protein > 5.0 {
        CarbType::Low
    } else {
        CarbType::Moderate
    }
}
