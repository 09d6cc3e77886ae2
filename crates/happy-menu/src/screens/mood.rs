use super::merge_columns;
use super::views::MoodRow;
use crate::dataset::{Column, LoadOptions, MenuDataset, MenuItem, Nutrient};
use crate::error::AppError;
use crate::features::{metrics, CategoryScheme, DietaryCategory};
use crate::scoring::{
    rank_scored, DegeneratePolicy, MoodBucket, MoodModel, MoodRating, ScoringFrame,
};
use serde::Serialize;
use tracing::info;

pub const TOP_N: usize = 3;

/// A validated mood lookup together with the edition that answers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodRequest {
    pub rating: MoodRating,
    pub category: DietaryCategory,
    pub model: MoodModel,
    pub scheme: CategoryScheme,
}

impl MoodRequest {
    /// Carb-quality scoring over Veg, Non-Veg and Vegan.
    pub fn console(rating: MoodRating, category: DietaryCategory) -> Self {
        Self {
            rating,
            category,
            model: MoodModel::CarbQuality,
            scheme: CategoryScheme::ThreeWay,
        }
    }

    /// Bucketed scoring over Veg and Non-Veg.
    pub fn dashboard(rating: MoodRating, category: DietaryCategory) -> Self {
        Self {
            rating,
            category,
            model: MoodModel::Bucketed,
            scheme: CategoryScheme::TwoWay,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodReport {
    pub rating: MoodRating,
    pub mood_label: &'static str,
    pub bucket: MoodBucket,
    pub category: DietaryCategory,
    pub model: MoodModel,
    pub items: Vec<MoodRow>,
}

pub fn load_options(request: &MoodRequest) -> LoadOptions {
    let displayed = [
        Column::Category,
        Column::Name,
        Column::Nutrient(Nutrient::Energy),
        Column::Nutrient(Nutrient::Protein),
        Column::Nutrient(Nutrient::TotalCarbohydrate),
        Column::Nutrient(Nutrient::TotalSugars),
    ];
    LoadOptions::requiring(merge_columns(
        displayed
            .into_iter()
            .chain(request.model.formula(request.rating).prerequisites()),
    ))
}

/// Filters to the chosen category, scores the survivors and keeps the best three.
pub fn recommend(
    dataset: &MenuDataset,
    request: &MoodRequest,
    policy: DegeneratePolicy,
) -> Result<MoodReport, AppError> {
    let candidates: Vec<&MenuItem> = dataset
        .items()
        .iter()
        .filter(|item| request.scheme.categorize(&item.name) == request.category)
        .collect();

    let frame = ScoringFrame::new(candidates, policy);
    let scores = request.model.score(&frame, request.rating)?;
    let formula = request.model.formula(request.rating);
    let ranked = rank_scored(frame.attach(scores), formula.direction, TOP_N);

    info!(
        rating = request.rating.value(),
        category = request.category.label(),
        candidates = frame.len(),
        "mood recommendations ranked"
    );

    Ok(MoodReport {
        rating: request.rating,
        mood_label: request.rating.label(),
        bucket: request.rating.bucket(),
        category: request.category,
        model: request.model,
        items: ranked
            .into_iter()
            .map(|row| {
                MoodRow::new(
                    row.item,
                    request.category,
                    metrics::carb_type(row.item),
                    row.score,
                )
            })
            .collect(),
    })
}
