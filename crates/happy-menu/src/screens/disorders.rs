use super::merge_columns;
use super::views::ConditionRow;
use crate::dataset::{Column, FillStrategy, LoadOptions, MenuDataset, MenuItem, Nutrient};
use crate::error::AppError;
use crate::features::keywords::{GLUTEN, LACTOSE, NUTS, SHELLFISH, SOY};
use crate::input::{normalize_token, InvalidUserInput};
use crate::ranking::{filter_by_keywords, rank, within_ceilings, KeywordMode, SortDirection};
use crate::scoring::disorders::PCOS;
use crate::scoring::{
    rank_scored, DegeneratePolicy, DiabetesModel, FilterOrder, Formula, Scored, ScoringFrame,
    DIABETES_CEILINGS,
};
use serde::Serialize;
use tracing::info;

pub const TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Allergen {
    Nuts,
    Soy,
    Shellfish,
}

impl Allergen {
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Nuts => NUTS,
            Self::Soy => SOY,
            Self::Shellfish => SHELLFISH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Diabetes,
    Pcos,
    LactoseIntolerance,
    GlutenIntolerance,
    Allergy(Allergen),
}

impl Condition {
    pub const TOKENS: [&'static str; 7] = [
        "diabetes",
        "pcos",
        "lactose_intolerance",
        "gluten_intolerance",
        "nut_allergy",
        "soy_allergy",
        "shellfish_allergy",
    ];

    pub fn parse(raw: &str) -> Result<Self, InvalidUserInput> {
        match normalize_token(raw).as_str() {
            "diabetes" => Ok(Self::Diabetes),
            "pcos" => Ok(Self::Pcos),
            "lactose_intolerance" => Ok(Self::LactoseIntolerance),
            "gluten_intolerance" => Ok(Self::GlutenIntolerance),
            "nut_allergy" => Ok(Self::Allergy(Allergen::Nuts)),
            "soy_allergy" => Ok(Self::Allergy(Allergen::Soy)),
            "shellfish_allergy" => Ok(Self::Allergy(Allergen::Shellfish)),
            _ => Err(InvalidUserInput::unknown("condition", raw, &Self::TOKENS)),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes",
            Self::Pcos => "PCOS",
            Self::LactoseIntolerance => "Lactose Intolerance",
            Self::GlutenIntolerance => "Gluten Intolerance",
            Self::Allergy(Allergen::Nuts) => "Nut Allergy",
            Self::Allergy(Allergen::Soy) => "Soy Allergy",
            Self::Allergy(Allergen::Shellfish) => "Shellfish Allergy",
        }
    }

    /// Name keywords that rule an item out, for conditions screened by name.
    pub const fn excluded_keywords(self) -> Option<&'static [&'static str]> {
        match self {
            Self::LactoseIntolerance => Some(LACTOSE),
            Self::GlutenIntolerance => Some(GLUTEN),
            Self::Allergy(allergen) => Some(allergen.keywords()),
            Self::Diabetes | Self::Pcos => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisorderReport {
    pub condition: Condition,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diabetes_model: Option<DiabetesModel>,
    pub items: Vec<ConditionRow>,
}

pub fn load_options(condition: Condition, model: DiabetesModel) -> LoadOptions {
    let base = [Column::Category, Column::Name];
    match condition {
        Condition::Diabetes => {
            let options = LoadOptions::requiring(merge_columns(
                base.into_iter().chain(model.formula().prerequisites()),
            ));
            match model {
                DiabetesModel::Weighted => options,
                DiabetesModel::FiberAdjusted => {
                    options.fill(Nutrient::DietaryFiber, FillStrategy::Zero)
                }
            }
        }
        Condition::Pcos => {
            LoadOptions::requiring(merge_columns(base.into_iter().chain(PCOS.prerequisites())))
                .fill(Nutrient::DietaryFiber, FillStrategy::Zero)
        }
        _ => LoadOptions::requiring(
            base.into_iter()
                .chain([Column::Nutrient(Nutrient::Energy)]),
        ),
    }
}

pub fn recommend(
    dataset: &MenuDataset,
    condition: Condition,
    model: DiabetesModel,
    policy: DegeneratePolicy,
) -> Result<DisorderReport, AppError> {
    let items = match condition {
        Condition::Diabetes => diabetes(dataset, model, policy)?,
        Condition::Pcos => {
            let frame =
                ScoringFrame::over(dataset.items(), policy).exempting(dataset.synthesized());
            scored_rows(rank_scored(frame.score(&PCOS)?, PCOS.direction, TOP_N))
        }
        _ => {
            let keywords = condition.excluded_keywords().unwrap_or_default();
            let safe = filter_by_keywords(
                dataset.items().iter().collect::<Vec<&MenuItem>>(),
                |item| item.name.as_str(),
                keywords,
                KeywordMode::Exclude,
            );
            rank(
                safe,
                |item| item.get(Nutrient::Energy),
                SortDirection::Ascending,
                Some(TOP_N),
            )
            .into_iter()
            .map(|item| ConditionRow::new(item, None))
            .collect()
        }
    };

    info!(
        condition = condition.label(),
        matches = items.len(),
        "condition recommendations ranked"
    );

    Ok(DisorderReport {
        condition,
        label: condition.label(),
        diabetes_model: (condition == Condition::Diabetes).then_some(model),
        items,
    })
}

fn diabetes(
    dataset: &MenuDataset,
    model: DiabetesModel,
    policy: DegeneratePolicy,
) -> Result<Vec<ConditionRow>, AppError> {
    let formula: &Formula = model.formula();
    let scored: Vec<Scored<'_>> = match model.order() {
        FilterOrder::FilterThenScore => {
            let eligible: Vec<&MenuItem> = dataset
                .items()
                .iter()
                .filter(|item| within_ceilings(item, &DIABETES_CEILINGS))
                .collect();
            ScoringFrame::new(eligible, policy)
                .exempting(dataset.synthesized())
                .score(formula)?
        }
        FilterOrder::ScoreThenFilter => ScoringFrame::over(dataset.items(), policy)
            .exempting(dataset.synthesized())
            .score(formula)?
            .into_iter()
            .filter(|row| within_ceilings(row.item, &DIABETES_CEILINGS))
            .collect(),
    };
    Ok(scored_rows(rank_scored(scored, formula.direction, TOP_N)))
}

fn scored_rows(scored: Vec<Scored<'_>>) -> Vec<ConditionRow> {
    scored
        .into_iter()
        .map(|row| ConditionRow::new(row.item, Some(row.score)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(position: usize, name: &str, sugars: f64, carbs: f64, protein: f64) -> MenuItem {
        MenuItem::new(position, name)
            .with(Nutrient::Energy, 100.0 + position as f64 * 50.0)
            .with(Nutrient::TotalSugars, sugars)
            .with(Nutrient::TotalCarbohydrate, carbs)
            .with(Nutrient::Protein, protein)
            .with(Nutrient::DietaryFiber, position as f64)
    }

    fn dataset() -> MenuDataset {
        MenuDataset::from_items(vec![
            item(0, "Soft Serve Cone", 8.0, 18.0, 3.0),
            item(1, "Chicken Nuggets", 0.0, 12.0, 15.0),
            item(2, "Hash Brown", 0.5, 15.0, 1.5),
            item(3, "Cheese Slice", 1.0, 2.0, 4.0),
            item(4, "McVeggie Burger", 6.0, 45.0, 10.0),
            item(5, "Peanut Butter Shake", 30.0, 60.0, 8.0),
        ])
    }

    #[test]
    fn diabetes_excludes_rows_over_the_ceilings() {
        for model in [DiabetesModel::Weighted, DiabetesModel::FiberAdjusted] {
            let report = recommend(&dataset(), Condition::Diabetes, model, DegeneratePolicy::Neutral)
                .expect("report");
            assert_eq!(report.items.len(), 3);
            assert!(report
                .items
                .iter()
                .all(|row| row.total_sugars_g <= 5.0 && row.total_carbohydrate_g <= 20.0));
        }
    }

    #[test]
    fn weighted_diabetes_normalizes_over_eligible_rows_only() {
        let report = recommend(
            &dataset(),
            Condition::Diabetes,
            DiabetesModel::Weighted,
            DegeneratePolicy::Strict,
        )
        .expect("report");
        assert_eq!(report.items[0].item.menu_item, "Chicken Nuggets");
        // nuggets: sugar 0, carbs (12-2)/13, protein 1 over the three eligible rows
        let expected = 0.5 * (10.0 / 13.0) - 0.3;
        assert!((report.items[0].score.expect("scored") - expected).abs() < 1e-12);
        assert_eq!(report.diabetes_model, Some(DiabetesModel::Weighted));
    }

    #[test]
    fn keyword_conditions_sort_by_energy() {
        let report = recommend(
            &dataset(),
            Condition::LactoseIntolerance,
            DiabetesModel::default(),
            DegeneratePolicy::Neutral,
        )
        .expect("report");
        let names: Vec<&str> = report
            .items
            .iter()
            .map(|row| row.item.menu_item.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Soft Serve Cone", "Chicken Nuggets", "Hash Brown", "McVeggie Burger"]
        );
        assert!(report.items.iter().all(|row| row.score.is_none()));
        assert_eq!(report.diabetes_model, None);

        let nuts = recommend(
            &dataset(),
            Condition::Allergy(Allergen::Nuts),
            DiabetesModel::default(),
            DegeneratePolicy::Neutral,
        )
        .expect("report");
        assert_eq!(nuts.items.len(), 5);
    }

    #[test]
    fn pcos_scores_every_row_ascending() {
        let report = recommend(
            &dataset(),
            Condition::Pcos,
            DiabetesModel::default(),
            DegeneratePolicy::Neutral,
        )
        .expect("report");
        assert_eq!(report.items.len(), 6);
        let scores: Vec<f64> = report
            .items
            .iter()
            .filter_map(|row| row.score)
            .collect();
        assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn strict_scoring_runs_on_an_export_without_fiber() {
        let csv = "Menu Category,Menu Items,Protein (g),Total carbohydrate (g),Total Sugars (g),Energy (kCal)\n\
Regular Menu,Chicken Nuggets,15,12,0,270\n\
Regular Menu,Hash Brown,1.5,15,0.5,140\n\
Regular Menu,Cheese Slice,4,2,1,60\n\
McCafe Menu,Iced Coffee,3,30,25,200\n";
        let cases = [
            (Condition::Diabetes, DiabetesModel::FiberAdjusted, 3),
            (Condition::Pcos, DiabetesModel::default(), 4),
        ];
        for (condition, model, expected) in cases {
            let dataset = MenuDataset::from_reader(csv.as_bytes(), &load_options(condition, model))
                .expect("loads");
            assert_eq!(dataset.synthesized(), &[Nutrient::DietaryFiber]);

            let report =
                recommend(&dataset, condition, model, DegeneratePolicy::Strict).expect("report");
            assert_eq!(report.items.len(), expected);
            assert!(report.items.iter().all(|row| row.score.is_some()));
        }
    }

    #[test]
    fn parse_condition_tokens() {
        assert_eq!(Condition::parse("PCOS"), Ok(Condition::Pcos));
        assert_eq!(
            Condition::parse(" shellfish_allergy "),
            Ok(Condition::Allergy(Allergen::Shellfish))
        );
        assert!(Condition::parse("lactose intolerance").is_err());
    }

    #[test]
    fn fiber_is_zero_filled_where_it_is_scored() {
        let pcos = load_options(Condition::Pcos, DiabetesModel::Weighted);
        assert_eq!(pcos.fill, vec![(Nutrient::DietaryFiber, FillStrategy::Zero)]);
        let weighted = load_options(Condition::Diabetes, DiabetesModel::Weighted);
        assert!(weighted.fill.is_empty());
    }
}
