use super::keywords::{contains_any, DAIRY, NON_VEG, PROCESSED};
use crate::input::{normalize_token, InvalidUserInput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryCategory {
    NonVeg,
    Veg,
    Vegan,
}

impl DietaryCategory {
    pub const TOKENS: [&'static str; 3] = ["veg", "non-veg", "vegan"];

    pub const fn label(self) -> &'static str {
        match self {
            Self::NonVeg => "Non-Veg",
            Self::Veg => "Veg",
            Self::Vegan => "Vegan",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, InvalidUserInput> {
        match normalize_token(raw).as_str() {
            "veg" => Ok(Self::Veg),
            "non-veg" => Ok(Self::NonVeg),
            "vegan" => Ok(Self::Vegan),
            _ => Err(InvalidUserInput::unknown("category", raw, &Self::TOKENS)),
        }
    }

    /// Same classification with vegan folded into veg.
    pub const fn two_way(self) -> Self {
        match self {
            Self::NonVeg => Self::NonVeg,
            Self::Veg | Self::Vegan => Self::Veg,
        }
    }
}

/// How finely items are bucketed when a user picks a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryScheme {
    /// Veg, Non-Veg and Vegan are distinct.
    ThreeWay,
    /// Only Veg and Non-Veg; vegan items count as veg.
    TwoWay,
}

impl CategoryScheme {
    pub fn categorize(self, name: &str) -> DietaryCategory {
        let category = classify_dietary(name);
        match self {
            Self::ThreeWay => category,
            Self::TwoWay => category.two_way(),
        }
    }

    /// Validates a user choice against the categories this scheme produces.
    pub fn parse_choice(self, raw: &str) -> Result<DietaryCategory, InvalidUserInput> {
        let accepted: &[&'static str] = match self {
            Self::ThreeWay => &DietaryCategory::TOKENS,
            Self::TwoWay => &["veg", "non-veg"],
        };
        let choice = DietaryCategory::parse(raw)
            .map_err(|_| InvalidUserInput::unknown("category", raw, accepted))?;
        if self == Self::TwoWay && choice == DietaryCategory::Vegan {
            return Err(InvalidUserInput::unknown("category", raw, accepted));
        }
        Ok(choice)
    }
}

/// Non-veg keywords are checked before dairy keywords; the order decides
/// items like "Chicken Cheese Burger".
pub fn classify_dietary(name: &str) -> DietaryCategory {
    if contains_any(name, NON_VEG) {
        return DietaryCategory::NonVeg;
    }
    if contains_any(name, DAIRY) {
        return DietaryCategory::Veg;
    }
    DietaryCategory::Vegan
}

pub fn is_vegetarian(name: &str) -> bool {
    classify_dietary(name) != DietaryCategory::NonVeg
}

pub fn classify_processed(name: &str) -> bool {
    contains_any(name, PROCESSED)
}
