use serde::{Deserialize, Serialize};

pub const MENU_CATEGORY: &str = "Menu Category";
pub const MENU_ITEMS: &str = "Menu Items";
pub const PER_SERVE_SIZE: &str = "Per Serve Size";
pub const DIET_LABEL: &str = "Veg/Non-Veg";

/// Numeric nutrition columns of the menu export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Energy,
    Protein,
    TotalFat,
    SatFat,
    TransFat,
    Cholesterol,
    TotalCarbohydrate,
    TotalSugars,
    AddedSugars,
    Sodium,
    DietaryFiber,
    Omega3,
}

impl Nutrient {
    pub const COUNT: usize = 12;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::Energy,
            Self::Protein,
            Self::TotalFat,
            Self::SatFat,
            Self::TransFat,
            Self::Cholesterol,
            Self::TotalCarbohydrate,
            Self::TotalSugars,
            Self::AddedSugars,
            Self::Sodium,
            Self::DietaryFiber,
            Self::Omega3,
        ]
    }

    /// Exact header string in the export.
    pub const fn header(self) -> &'static str {
        match self {
            Self::Energy => "Energy (kCal)",
            Self::Protein => "Protein (g)",
            Self::TotalFat => "Total fat (g)",
            Self::SatFat => "Sat Fat (g)",
            Self::TransFat => "Trans fat (g)",
            Self::Cholesterol => "Cholesterols (mg)",
            Self::TotalCarbohydrate => "Total carbohydrate (g)",
            Self::TotalSugars => "Total Sugars (g)",
            Self::AddedSugars => "Added Sugars (g)",
            Self::Sodium => "Sodium (mg)",
            Self::DietaryFiber => "Dietary Fiber (g)",
            Self::Omega3 => "Omega-3 (g)",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// A header the loader can be asked to insist on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Category,
    Name,
    ServingSize,
    DietLabel,
    Nutrient(Nutrient),
}

impl Column {
    pub const fn header(self) -> &'static str {
        match self {
            Self::Category => MENU_CATEGORY,
            Self::Name => MENU_ITEMS,
            Self::ServingSize => PER_SERVE_SIZE,
            Self::DietLabel => DIET_LABEL,
            Self::Nutrient(nutrient) => nutrient.header(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_matches_index() {
        for (position, nutrient) in Nutrient::ordered().into_iter().enumerate() {
            assert_eq!(nutrient.index(), position);
        }
    }
}
