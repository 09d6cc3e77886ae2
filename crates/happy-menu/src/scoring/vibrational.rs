use super::formula::{Flag, Formula, Metric, Term};
use super::normalize::Scaling;
use crate::dataset::Nutrient;
use crate::input::{normalize_token, InvalidUserInput};
use crate::ranking::SortDirection;
use serde::{Deserialize, Serialize};

/// Six-term composite over macro and micro nutrients plus the vegetarian flag.
pub static CLASSIC: Formula = Formula {
    name: "vibrational_score",
    terms: &[
        Term::direct(Nutrient::Protein, 0.15),
        Term::inverted(Nutrient::TransFat, 0.10),
        Term::inverted(Nutrient::AddedSugars, 0.10),
        Term::inverted(Nutrient::Sodium, 0.10),
        Term::inverted(Nutrient::SatFat, 0.08),
        Term::flag(Flag::Vegetarian, 0.08),
    ],
    direction: SortDirection::Descending,
};

/// Classic terms extended with fat quality, energy density, carb quality,
/// cholesterol and a processed-food penalty.
pub static ENHANCED: Formula = Formula {
    name: "vibrational_score",
    terms: &[
        Term::direct(Nutrient::Protein, 0.15),
        Term::inverted(Nutrient::TransFat, 0.10),
        Term::inverted(Nutrient::AddedSugars, 0.10),
        Term::inverted(Nutrient::Sodium, 0.10),
        Term::inverted(Nutrient::SatFat, 0.08),
        Term::flag(Flag::Vegetarian, 0.08),
        Term::normalized(Metric::HealthyFatRatio, Scaling::Direct, 0.07),
        Term::normalized(Metric::EnergyDensity, Scaling::Inverted, 0.08),
        Term::normalized(Metric::ComplexCarbRatio, Scaling::Direct, 0.10),
        Term::inverted(Nutrient::Cholesterol, 0.10),
        Term::flag(Flag::Processed, -0.08),
    ],
    direction: SortDirection::Descending,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VibrationalModel {
    Classic,
    #[default]
    Enhanced,
}

impl VibrationalModel {
    pub const TOKENS: [&'static str; 2] = ["classic", "enhanced"];

    pub fn formula(self) -> &'static Formula {
        match self {
            Self::Classic => &CLASSIC,
            Self::Enhanced => &ENHANCED,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, InvalidUserInput> {
        match normalize_token(raw).as_str() {
            "classic" => Ok(Self::Classic),
            "enhanced" => Ok(Self::Enhanced),
            _ => Err(InvalidUserInput::unknown("model", raw, &Self::TOKENS)),
        }
    }
}
