use super::formula::{Formula, Term};
use crate::dataset::Nutrient;
use crate::input::{normalize_token, InvalidUserInput};
use crate::ranking::{NutrientCeiling, SortDirection};
use serde::{Deserialize, Serialize};

/// Sugar and carbohydrate ceilings a diabetes-friendly item must meet.
pub const DIABETES_CEILINGS: [NutrientCeiling; 2] = [
    NutrientCeiling::new(Nutrient::TotalSugars, 5.0),
    NutrientCeiling::new(Nutrient::TotalCarbohydrate, 20.0),
];

pub static WEIGHTED_DIABETES: Formula = Formula {
    name: "diabetes_score",
    terms: &[
        Term::direct(Nutrient::TotalSugars, 0.5),
        Term::direct(Nutrient::TotalCarbohydrate, 0.5),
        Term::direct(Nutrient::Protein, -0.3),
    ],
    direction: SortDirection::Ascending,
};

pub static FIBER_ADJUSTED_DIABETES: Formula = Formula {
    name: "diabetes_score",
    terms: &[
        Term::direct(Nutrient::TotalSugars, 0.4),
        Term::direct(Nutrient::TotalCarbohydrate, 0.4),
        Term::direct(Nutrient::Protein, -0.2),
        Term::direct(Nutrient::DietaryFiber, -0.2),
    ],
    direction: SortDirection::Ascending,
};

pub static PCOS: Formula = Formula {
    name: "pcos_score",
    terms: &[
        Term::direct(Nutrient::TotalSugars, 0.4),
        Term::direct(Nutrient::TotalCarbohydrate, 0.3),
        Term::direct(Nutrient::Protein, -0.2),
        Term::direct(Nutrient::DietaryFiber, -0.1),
    ],
    direction: SortDirection::Ascending,
};

/// Whether threshold filters run before or after scoring. Filtering first
/// narrows the normalization bounds to the surviving rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOrder {
    FilterThenScore,
    ScoreThenFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiabetesModel {
    #[default]
    Weighted,
    FiberAdjusted,
}

impl DiabetesModel {
    pub const TOKENS: [&'static str; 2] = ["weighted", "fiber_adjusted"];

    pub fn formula(self) -> &'static Formula {
        match self {
            Self::Weighted => &WEIGHTED_DIABETES,
            Self::FiberAdjusted => &FIBER_ADJUSTED_DIABETES,
        }
    }

    pub const fn order(self) -> FilterOrder {
        match self {
            Self::Weighted => FilterOrder::FilterThenScore,
            Self::FiberAdjusted => FilterOrder::ScoreThenFilter,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, InvalidUserInput> {
        match normalize_token(raw).as_str() {
            "weighted" => Ok(Self::Weighted),
            "fiber_adjusted" => Ok(Self::FiberAdjusted),
            _ => Err(InvalidUserInput::unknown("diabetes model", raw, &Self::TOKENS)),
        }
    }
}
