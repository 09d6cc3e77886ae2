use super::merge_columns;
use super::views::{ItemSummary, MealRow};
use crate::dataset::{
    Column, FillStrategy, LoadOptions, MenuDataset, MenuItem, Nutrient, DIET_LABEL,
};
use crate::error::AppError;
use crate::features::{CategoryScheme, DietaryCategory};
use crate::ranking::rank;
use crate::scoring::cluster::{goal_profiles, standardized_points};
use crate::scoring::{BodyGoal, ClusterAssigner, DegeneratePolicy, ScoringFrame};
use serde::Serialize;
use tracing::{debug, info};

pub const TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyReport {
    pub feeling: BodyGoal,
    pub meal_type: DietaryCategory,
    pub items: Vec<MealRow>,
}

pub fn load_options() -> LoadOptions {
    LoadOptions::requiring(merge_columns(
        [Column::Category, Column::Name]
            .into_iter()
            .chain(BodyGoal::required_columns()),
    ))
    .fill(Nutrient::Sodium, FillStrategy::Mean)
}

/// Veg or Non-Veg, preferring the export's own label when it carries one.
pub fn meal_type(item: &MenuItem, use_label: bool) -> DietaryCategory {
    if use_label {
        if let Some(category) = item
            .diet_label
            .as_deref()
            .and_then(|label| DietaryCategory::parse(label).ok())
        {
            return category.two_way();
        }
    }
    CategoryScheme::TwoWay.categorize(&item.name)
}

/// Scores and groups the whole table, then keeps the best rows of one meal type.
pub fn recommend_meals(
    dataset: &MenuDataset,
    goal: BodyGoal,
    meal: DietaryCategory,
    assigner: &dyn ClusterAssigner,
    policy: DegeneratePolicy,
) -> Result<BodyReport, AppError> {
    let frame = ScoringFrame::over(dataset.items(), policy);
    let profiles = goal_profiles(&frame)?;
    let labels = assigner.assign(&standardized_points(&profiles));
    debug!(rows = labels.len(), "cluster labels assigned");

    let use_label = dataset.has_column(DIET_LABEL);
    let slot = goal.slot();

    let candidates: Vec<MealRow> = dataset
        .items()
        .iter()
        .zip(profiles.iter().zip(&labels))
        .filter(|(item, _)| meal_type(item, use_label) == meal)
        .map(|(item, (profile, cluster))| MealRow {
            item: ItemSummary::from(item),
            meal_type: meal,
            cluster: *cluster,
            score: profile[slot],
        })
        .collect();

    let items = rank(candidates, |row| row.score, goal.formula().direction, Some(TOP_N));
    info!(
        feeling = goal.label(),
        meal_type = meal.label(),
        matches = items.len(),
        "meal recommendations ranked"
    );

    Ok(BodyReport {
        feeling: goal,
        meal_type: meal,
        items,
    })
}
