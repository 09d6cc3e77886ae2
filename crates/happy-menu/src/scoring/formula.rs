use super::normalize::{normalize, DegeneratePolicy, NormalizationError, Scaling};
use crate::dataset::{Column, MenuItem, Nutrient};
use crate::features::{classify_processed, is_vegetarian, metrics, CarbType};
use crate::ranking::{rank, SortDirection};
use std::cell::OnceCell;
use tracing::debug;

/// A per-row number a term can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Nutrient(Nutrient),
    HealthyFatRatio,
    EnergyDensity,
    ComplexCarbRatio,
}

impl Metric {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nutrient(nutrient) => nutrient.header(),
            Self::HealthyFatRatio => "Healthy Fat Ratio",
            Self::EnergyDensity => "Energy Density",
            Self::ComplexCarbRatio => "Complex Carb Ratio",
        }
    }

    fn columns(self) -> Vec<Column> {
        match self {
            // optional columns; loaders zero-fill them instead
            Self::Nutrient(Nutrient::DietaryFiber | Nutrient::Omega3) => Vec::new(),
            Self::Nutrient(nutrient) => vec![Column::Nutrient(nutrient)],
            Self::HealthyFatRatio => vec![
                Column::Nutrient(Nutrient::TotalFat),
                Column::Nutrient(Nutrient::SatFat),
                Column::Nutrient(Nutrient::TransFat),
            ],
            Self::EnergyDensity => vec![Column::Nutrient(Nutrient::Energy), Column::ServingSize],
            Self::ComplexCarbRatio => vec![
                Column::Nutrient(Nutrient::TotalCarbohydrate),
                Column::Nutrient(Nutrient::TotalSugars),
            ],
        }
    }
}

/// A per-row 0/1 indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Vegetarian,
    Processed,
    HighQualityCarb,
    LowQualityCarb,
    HasOmega3,
}

impl Flag {
    fn holds(self, item: &MenuItem) -> bool {
        match self {
            Self::Vegetarian => is_vegetarian(&item.name),
            Self::Processed => classify_processed(&item.name),
            Self::HighQualityCarb => metrics::carb_type(item) == CarbType::High,
            Self::LowQualityCarb => metrics::carb_type(item) == CarbType::Low,
            Self::HasOmega3 => item.get(Nutrient::Omega3) > 0.0,
        }
    }

    fn columns(self) -> Vec<Column> {
        match self {
            Self::Vegetarian | Self::Processed => vec![Column::Name],
            Self::HighQualityCarb | Self::LowQualityCarb => vec![
                Column::Nutrient(Nutrient::TotalCarbohydrate),
                Column::Nutrient(Nutrient::TotalSugars),
                Column::Nutrient(Nutrient::Protein),
            ],
            // an absent omega-3 column never sets the flag
            Self::HasOmega3 => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Min-max rescaled over the rows being scored.
    Normalized(Metric, Scaling),
    Raw(Metric),
    Flag(Flag),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub feature: Feature,
    pub weight: f64,
}

impl Term {
    pub const fn direct(nutrient: Nutrient, weight: f64) -> Self {
        Self::normalized(Metric::Nutrient(nutrient), Scaling::Direct, weight)
    }

    pub const fn inverted(nutrient: Nutrient, weight: f64) -> Self {
        Self::normalized(Metric::Nutrient(nutrient), Scaling::Inverted, weight)
    }

    pub const fn normalized(metric: Metric, scaling: Scaling, weight: f64) -> Self {
        Self {
            feature: Feature::Normalized(metric, scaling),
            weight,
        }
    }

    pub const fn raw(nutrient: Nutrient, weight: f64) -> Self {
        Self {
            feature: Feature::Raw(Metric::Nutrient(nutrient)),
            weight,
        }
    }

    pub const fn flag(flag: Flag, weight: f64) -> Self {
        Self {
            feature: Feature::Flag(flag),
            weight,
        }
    }
}

/// A named linear combination of features with its preferred ordering.
#[derive(Debug, PartialEq)]
pub struct Formula {
    pub name: &'static str,
    pub terms: &'static [Term],
    pub direction: SortDirection,
}

impl Formula {
    /// Headers a table must carry before this formula can be evaluated.
    pub fn prerequisites(&self) -> Vec<Column> {
        let mut columns: Vec<Column> = Vec::new();
        for term in self.terms {
            let needed = match term.feature {
                Feature::Normalized(metric, _) | Feature::Raw(metric) => metric.columns(),
                Feature::Flag(flag) => flag.columns(),
            };
            for column in needed {
                if !columns.contains(&column) {
                    columns.push(column);
                }
            }
        }
        columns
    }
}

/// A row paired with the score it earned in one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored<'a> {
    pub item: &'a MenuItem,
    pub score: f64,
}

/// The rows present at scoring time. Normalized features take their
/// bounds from exactly these rows.
#[derive(Debug)]
pub struct ScoringFrame<'a> {
    rows: Vec<&'a MenuItem>,
    policy: DegeneratePolicy,
    exempt: Vec<Nutrient>,
    serving_weights: OnceCell<Vec<f64>>,
}

impl<'a> ScoringFrame<'a> {
    pub fn new(rows: Vec<&'a MenuItem>, policy: DegeneratePolicy) -> Self {
        Self {
            rows,
            policy,
            exempt: Vec::new(),
            serving_weights: OnceCell::new(),
        }
    }

    /// Nutrients that always normalize under the neutral policy, such as
    /// columns a fill produced because the export lacked them.
    pub fn exempting(mut self, nutrients: &[Nutrient]) -> Self {
        self.exempt.extend_from_slice(nutrients);
        self
    }

    pub fn over(items: &'a [MenuItem], policy: DegeneratePolicy) -> Self {
        Self::new(items.iter().collect(), policy)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn metric(&self, metric: Metric) -> Vec<f64> {
        match metric {
            Metric::Nutrient(nutrient) => self.rows.iter().map(|item| item.get(nutrient)).collect(),
            Metric::HealthyFatRatio => self
                .rows
                .iter()
                .map(|item| metrics::healthy_fat_ratio(item))
                .collect(),
            Metric::ComplexCarbRatio => self
                .rows
                .iter()
                .map(|item| metrics::complex_carb_ratio(item))
                .collect(),
            Metric::EnergyDensity => {
                let weights = self
                    .serving_weights
                    .get_or_init(|| metrics::serving_weights(&self.rows));
                self.rows
                    .iter()
                    .zip(weights)
                    .map(|(item, weight)| metrics::energy_density(item, *weight))
                    .collect()
            }
        }
    }

    pub fn feature(&self, feature: Feature) -> Result<Vec<f64>, NormalizationError> {
        match feature {
            Feature::Normalized(metric, scaling) => {
                let policy = match metric {
                    Metric::Nutrient(nutrient) if self.exempt.contains(&nutrient) => {
                        DegeneratePolicy::Neutral
                    }
                    _ => self.policy,
                };
                normalize(metric.label(), &self.metric(metric), scaling, policy)
            }
            Feature::Raw(metric) => Ok(self.metric(metric)),
            Feature::Flag(flag) => Ok(self
                .rows
                .iter()
                .map(|item| if flag.holds(item) { 1.0 } else { 0.0 })
                .collect()),
        }
    }

    /// One score per row, in row order. Sums are neither clipped nor rescaled.
    pub fn evaluate(&self, formula: &Formula) -> Result<Vec<f64>, NormalizationError> {
        debug!(formula = formula.name, rows = self.rows.len(), "evaluating formula");
        let mut scores = vec![0.0; self.rows.len()];
        for term in formula.terms {
            let values = self.feature(term.feature)?;
            for (score, value) in scores.iter_mut().zip(values) {
                *score += term.weight * value;
            }
        }
        Ok(scores)
    }

    /// Pairs rows with externally computed scores.
    pub fn attach(&self, scores: Vec<f64>) -> Vec<Scored<'a>> {
        self.rows
            .iter()
            .zip(scores)
            .map(|(item, score)| Scored { item, score })
            .collect()
    }

    pub fn score(&self, formula: &Formula) -> Result<Vec<Scored<'a>>, NormalizationError> {
        Ok(self.attach(self.evaluate(formula)?))
    }
}

/// Orders scored rows the way the formula prefers and keeps the first `top_n`.
pub fn rank_scored<'a>(
    scored: Vec<Scored<'a>>,
    direction: SortDirection,
    top_n: usize,
) -> Vec<Scored<'a>> {
    rank(scored, |row| row.score, direction, Some(top_n))
}

#[cfg(test)]
mod tests {
    use super::*;

    static SAMPLE: Formula = Formula {
        name: "sample",
        terms: &[
            Term::direct(Nutrient::Protein, 0.5),
            Term::inverted(Nutrient::Sodium, 0.25),
            Term::flag(Flag::Vegetarian, 1.0),
        ],
        direction: SortDirection::Descending,
    };

    fn rows() -> Vec<MenuItem> {
        vec![
            MenuItem::new(0, "Veg Wrap")
                .with(Nutrient::Protein, 10.0)
                .with(Nutrient::Sodium, 200.0),
            MenuItem::new(1, "Chicken Wrap")
                .with(Nutrient::Protein, 20.0)
                .with(Nutrient::Sodium, 600.0),
            MenuItem::new(2, "Fries")
                .with(Nutrient::Protein, 0.0)
                .with(Nutrient::Sodium, 400.0),
        ]
    }

    #[test]
    fn evaluate_sums_weighted_features() {
        let items = rows();
        let frame = ScoringFrame::over(&items, DegeneratePolicy::Strict);
        let scores = frame.evaluate(&SAMPLE).expect("scores");

        assert!((scores[0] - (0.5 * 0.5 + 0.25 * 1.0 + 1.0)).abs() < 1e-12);
        assert!((scores[1] - 0.5).abs() < 1e-12);
        assert!((scores[2] - (0.25 * 0.5 + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn bounds_come_from_rows_in_the_frame() {
        let items = rows();
        let subset: Vec<&MenuItem> = items.iter().skip(1).collect();
        let frame = ScoringFrame::new(subset, DegeneratePolicy::Strict);
        let protein = frame
            .feature(Feature::Normalized(
                Metric::Nutrient(Nutrient::Protein),
                Scaling::Direct,
            ))
            .expect("normalizes");
        assert_eq!(protein, vec![1.0, 0.0]);
    }

    #[test]
    fn strict_policy_surfaces_degenerate_columns() {
        let items = vec![
            MenuItem::new(0, "a").with(Nutrient::Protein, 3.0),
            MenuItem::new(1, "b").with(Nutrient::Protein, 3.0),
        ];
        let frame = ScoringFrame::over(&items, DegeneratePolicy::Strict);
        let error = frame.evaluate(&SAMPLE).expect_err("degenerate protein");
        assert!(matches!(error, NormalizationError::Degenerate { ref column, .. } if column == "Protein (g)"));
    }

    #[test]
    fn exempt_nutrients_fall_back_to_neutral() {
        let items = vec![
            MenuItem::new(0, "a")
                .with(Nutrient::Protein, 3.0)
                .with(Nutrient::DietaryFiber, 0.0),
            MenuItem::new(1, "b")
                .with(Nutrient::Protein, 6.0)
                .with(Nutrient::DietaryFiber, 0.0),
        ];
        let fiber = Feature::Normalized(Metric::Nutrient(Nutrient::DietaryFiber), Scaling::Direct);

        let strict = ScoringFrame::over(&items, DegeneratePolicy::Strict);
        assert!(strict.feature(fiber).is_err());

        let exempted = ScoringFrame::over(&items, DegeneratePolicy::Strict)
            .exempting(&[Nutrient::DietaryFiber]);
        assert_eq!(exempted.feature(fiber).expect("neutral"), vec![0.0, 0.0]);
    }

    #[test]
    fn prerequisites_are_deduplicated_in_term_order() {
        assert_eq!(
            SAMPLE.prerequisites(),
            vec![
                Column::Nutrient(Nutrient::Protein),
                Column::Nutrient(Nutrient::Sodium),
                Column::Name,
            ]
        );
    }

    #[test]
    fn rank_scored_uses_direction() {
        let items = rows();
        let frame = ScoringFrame::over(&items, DegeneratePolicy::Strict);
        let scored = frame.score(&SAMPLE).expect("scores");
        let top = rank_scored(scored, SAMPLE.direction, 2);
        let names: Vec<&str> = top.iter().map(|row| row.item.name.as_str()).collect();
        assert_eq!(names, vec!["Veg Wrap", "Fries"]);
    }
}
