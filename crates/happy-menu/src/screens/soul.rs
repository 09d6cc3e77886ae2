use super::merge_columns;
use super::views::{ItemSummary, VibrationalRow};
use crate::dataset::{Column, FillStrategy, LoadOptions, MenuDataset, Nutrient};
use crate::error::AppError;
use crate::features::is_vegetarian;
use crate::ranking::SortDirection;
use crate::scoring::{rank_scored, DegeneratePolicy, Scored, ScoringFrame, VibrationalModel};
use serde::Serialize;
use tracing::info;

pub const TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoulReport {
    pub model: VibrationalModel,
    /// Highest-scoring vegetarian items.
    pub top_vegetarian: Vec<VibrationalRow>,
    /// Lowest-scoring items across the whole menu.
    pub lowest: Vec<VibrationalRow>,
}

pub fn load_options(model: VibrationalModel) -> LoadOptions {
    let required = merge_columns(
        [Column::Category, Column::Name]
            .into_iter()
            .chain(model.formula().prerequisites()),
    );
    LoadOptions::requiring(required).fill(Nutrient::Sodium, FillStrategy::Median)
}

/// Scores the full table, then splits out the vegetarian leaders and the
/// overall tail. Bounds come from the whole table in both lists.
pub fn vibrations(
    dataset: &MenuDataset,
    model: VibrationalModel,
    policy: DegeneratePolicy,
) -> Result<SoulReport, AppError> {
    let frame = ScoringFrame::over(dataset.items(), policy);
    let scored = frame.score(model.formula())?;

    let vegetarian: Vec<Scored<'_>> = scored
        .iter()
        .copied()
        .filter(|row| is_vegetarian(&row.item.name))
        .collect();
    let top_vegetarian = rank_scored(vegetarian, SortDirection::Descending, TOP_N);
    let lowest = rank_scored(scored, SortDirection::Ascending, TOP_N);

    info!(
        ?model,
        rows = dataset.len(),
        vegetarian = top_vegetarian.len(),
        "vibrational scores computed"
    );

    Ok(SoulReport {
        model,
        top_vegetarian: top_vegetarian.into_iter().map(to_row).collect(),
        lowest: lowest.into_iter().map(to_row).collect(),
    })
}

fn to_row(scored: Scored<'_>) -> VibrationalRow {
    VibrationalRow {
        item: ItemSummary::from(scored.item),
        is_vegetarian: is_vegetarian(&scored.item.name),
        vibrational_score: scored.score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::MenuItem;

    fn item(position: usize, name: &str, protein: f64, sodium: f64) -> MenuItem {
        MenuItem::new(position, name)
            .with(Nutrient::Protein, protein)
            .with(Nutrient::TransFat, 0.1)
            .with(Nutrient::AddedSugars, 1.0)
            .with(Nutrient::Sodium, sodium)
            .with(Nutrient::SatFat, 2.0)
    }

    #[test]
    fn vegetarian_list_excludes_meat_and_lowest_spans_everything() {
        let dataset = MenuDataset::from_items(vec![
            item(0, "Chicken Maharaja Mac", 30.0, 1500.0),
            item(1, "McAloo Tikki Burger", 8.0, 500.0),
            item(2, "Fries (Small)", 2.0, 100.0),
            item(3, "Piri Piri Spice Mix", 0.0, 1800.0),
        ]);
        let report = vibrations(&dataset, VibrationalModel::Classic, DegeneratePolicy::Neutral)
            .expect("report");

        assert!(report
            .top_vegetarian
            .iter()
            .all(|row| row.is_vegetarian));
        assert_eq!(report.top_vegetarian.len(), 3);
        assert_eq!(report.lowest.len(), 4);
        assert_eq!(report.lowest[0].item.menu_item, "Piri Piri Spice Mix");

        let scores: Vec<f64> = report
            .top_vegetarian
            .iter()
            .map(|row| row.vibrational_score)
            .collect();
        assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn load_options_follow_model_prerequisites() {
        let classic = load_options(VibrationalModel::Classic);
        assert!(!classic.required.contains(&Column::ServingSize));
        let enhanced = load_options(VibrationalModel::Enhanced);
        assert!(enhanced.required.contains(&Column::ServingSize));
        assert_eq!(enhanced.fill, vec![(Nutrient::Sodium, FillStrategy::Median)]);
    }
}
