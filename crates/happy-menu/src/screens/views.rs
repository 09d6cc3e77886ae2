use crate::dataset::{MenuItem, Nutrient};
use crate::features::{metrics, CarbType, DietaryCategory, TextureClass};
use serde::Serialize;

/// Identity columns every screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSummary {
    pub position: usize,
    pub menu_item: String,
    pub menu_category: String,
}

impl From<&MenuItem> for ItemSummary {
    fn from(item: &MenuItem) -> Self {
        Self {
            position: item.position,
            menu_item: item.name.clone(),
            menu_category: item.category.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VibrationalRow {
    #[serde(flatten)]
    pub item: ItemSummary,
    pub is_vegetarian: bool,
    pub vibrational_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextureRow {
    #[serde(flatten)]
    pub item: ItemSummary,
    pub texture: TextureClass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodRow {
    #[serde(flatten)]
    pub item: ItemSummary,
    pub category: DietaryCategory,
    pub carb_type: CarbType,
    pub carb_quality_score: f64,
    pub energy_kcal: f64,
    pub protein_g: f64,
    pub total_carbohydrate_g: f64,
    pub total_sugars_g: f64,
    pub score: f64,
}

impl MoodRow {
    pub fn new(item: &MenuItem, category: DietaryCategory, carb_type: CarbType, score: f64) -> Self {
        Self {
            item: ItemSummary::from(item),
            category,
            carb_type,
            carb_quality_score: metrics::carb_quality_score(item),
            energy_kcal: item.get(Nutrient::Energy),
            protein_g: item.get(Nutrient::Protein),
            total_carbohydrate_g: item.get(Nutrient::TotalCarbohydrate),
            total_sugars_g: item.get(Nutrient::TotalSugars),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealRow {
    #[serde(flatten)]
    pub item: ItemSummary,
    pub meal_type: DietaryCategory,
    /// Opaque group label from the cluster assigner.
    pub cluster: usize,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionRow {
    #[serde(flatten)]
    pub item: ItemSummary,
    pub energy_kcal: f64,
    pub total_sugars_g: f64,
    pub total_carbohydrate_g: f64,
    pub protein_g: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl ConditionRow {
    pub fn new(item: &MenuItem, score: Option<f64>) -> Self {
        Self {
            item: ItemSummary::from(item),
            energy_kcal: item.get(Nutrient::Energy),
            total_sugars_g: item.get(Nutrient::TotalSugars),
            total_carbohydrate_g: item.get(Nutrient::TotalCarbohydrate),
            protein_g: item.get(Nutrient::Protein),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_flatten_identity_columns() {
        let mut item = MenuItem::new(3, "Veg Pizza McPuff").with(Nutrient::Energy, 228.21);
        item.category = "Regular Menu".to_string();
        let row = ConditionRow::new(&item, None);

        let value = serde_json::to_value(&row).expect("serializes");
        assert_eq!(value["position"], json!(3));
        assert_eq!(value["menu_item"], json!("Veg Pizza McPuff"));
        assert_eq!(value["energy_kcal"], json!(228.21));
        // missing cells serialize as null and absent scores are omitted
        assert_eq!(value["protein_g"], json!(null));
        assert!(value.get("score").is_none());
    }
}
