//! Body-goal scores and the grouping step that labels rows by their score profile.

use super::formula::{Formula, ScoringFrame, Term};
use super::normalize::{standardize, NormalizationError};
use crate::dataset::{Column, Nutrient};
use crate::input::{normalize_token, InvalidUserInput};
use crate::ranking::SortDirection;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub static ENERGETIC: Formula = Formula {
    name: "energetic_score",
    terms: &[
        Term::direct(Nutrient::TotalCarbohydrate, 0.5),
        Term::direct(Nutrient::Protein, 0.5),
    ],
    direction: SortDirection::Descending,
};

pub static LEAN: Formula = Formula {
    name: "lean_score",
    terms: &[
        Term::direct(Nutrient::Protein, 0.6),
        Term::direct(Nutrient::TotalFat, -0.4),
    ],
    direction: SortDirection::Descending,
};

pub static SATIATED: Formula = Formula {
    name: "satiated_score",
    terms: &[
        Term::direct(Nutrient::Protein, 0.5),
        Term::direct(Nutrient::TotalFat, 0.5),
    ],
    direction: SortDirection::Descending,
};

pub static AVOID_BLOATING: Formula = Formula {
    name: "avoid_bloating_score",
    terms: &[
        Term::direct(Nutrient::Sodium, -0.5),
        Term::direct(Nutrient::TotalCarbohydrate, -0.3),
        Term::direct(Nutrient::AddedSugars, -0.2),
    ],
    direction: SortDirection::Descending,
};

/// How a diner wants to feel after the meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyGoal {
    Energetic,
    Lean,
    Satiated,
    AvoidBloating,
}

impl BodyGoal {
    pub const ALL: [Self; 4] = [
        Self::Energetic,
        Self::Lean,
        Self::Satiated,
        Self::AvoidBloating,
    ];

    pub const TOKENS: [&'static str; 4] = ["energetic", "lean", "satiated", "avoid_bloating"];

    pub fn formula(self) -> &'static Formula {
        match self {
            Self::Energetic => &ENERGETIC,
            Self::Lean => &LEAN,
            Self::Satiated => &SATIATED,
            Self::AvoidBloating => &AVOID_BLOATING,
        }
    }

    /// Position of this goal in `ALL` and in every score profile.
    pub const fn slot(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Energetic => "Energetic",
            Self::Lean => "Lean",
            Self::Satiated => "Satiated",
            Self::AvoidBloating => "Avoid Bloating",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, InvalidUserInput> {
        match normalize_token(raw).as_str() {
            "energetic" => Ok(Self::Energetic),
            "lean" => Ok(Self::Lean),
            "satiated" => Ok(Self::Satiated),
            "avoid_bloating" => Ok(Self::AvoidBloating),
            _ => Err(InvalidUserInput::unknown("feeling", raw, &Self::TOKENS)),
        }
    }

    /// The eight nutrient columns the goal scores are built from.
    pub fn required_columns() -> Vec<Column> {
        [
            Nutrient::Energy,
            Nutrient::Protein,
            Nutrient::TotalFat,
            Nutrient::SatFat,
            Nutrient::TotalCarbohydrate,
            Nutrient::TotalSugars,
            Nutrient::AddedSugars,
            Nutrient::Sodium,
        ]
        .into_iter()
        .map(Column::Nutrient)
        .collect()
    }
}

/// All four goal scores for every row in the frame, in `BodyGoal::ALL` order.
pub fn goal_profiles(frame: &ScoringFrame<'_>) -> Result<Vec<[f64; 4]>, NormalizationError> {
    let mut profiles = vec![[0.0; 4]; frame.len()];
    for (slot, goal) in BodyGoal::ALL.into_iter().enumerate() {
        let scores = frame.evaluate(goal.formula())?;
        for (profile, score) in profiles.iter_mut().zip(scores) {
            profile[slot] = score;
        }
    }
    Ok(profiles)
}

/// Standardizes each goal column and replaces NaN with 0 so every row
/// can be placed.
pub fn standardized_points(profiles: &[[f64; 4]]) -> Vec<Vec<f64>> {
    let mut points = vec![Vec::with_capacity(4); profiles.len()];
    for slot in 0..4 {
        let column: Vec<f64> = profiles.iter().map(|profile| profile[slot]).collect();
        for (point, value) in points.iter_mut().zip(standardize(&column)) {
            point.push(if value.is_nan() { 0.0 } else { value });
        }
    }
    points
}

/// Assigns each point an opaque group label.
pub trait ClusterAssigner: Send + Sync {
    fn assign(&self, points: &[Vec<f64>]) -> Vec<usize>;
}

/// Deterministic Lloyd's k-means with farthest-point seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KMeans {
    pub clusters: usize,
    pub max_iterations: usize,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            clusters: 4,
            max_iterations: 50,
        }
    }
}

impl KMeans {
    /// First point, then repeatedly the point farthest from every chosen centroid.
    fn seed(&self, points: &[Vec<f64>], k: usize) -> Vec<Vec<f64>> {
        let mut centroids = vec![points[0].clone()];
        while centroids.len() < k {
            let mut best = 0;
            let mut best_distance = f64::NEG_INFINITY;
            for (index, point) in points.iter().enumerate() {
                let nearest = centroids
                    .iter()
                    .map(|centroid| squared_distance(point, centroid))
                    .fold(f64::INFINITY, f64::min);
                if nearest > best_distance {
                    best = index;
                    best_distance = nearest;
                }
            }
            centroids.push(points[best].clone());
        }
        centroids
    }
}

impl ClusterAssigner for KMeans {
    fn assign(&self, points: &[Vec<f64>]) -> Vec<usize> {
        let k = self.clusters.min(points.len());
        if k == 0 {
            return Vec::new();
        }

        let dimension = points[0].len();
        let mut centroids = self.seed(points, k);
        let mut labels = vec![usize::MAX; points.len()];

        for iteration in 0..self.max_iterations {
            let mut changed = false;
            for (label, point) in labels.iter_mut().zip(points) {
                let nearest = nearest_centroid(point, &centroids);
                if *label != nearest {
                    *label = nearest;
                    changed = true;
                }
            }
            if !changed {
                debug!(iteration, clusters = k, "k-means converged");
                break;
            }

            let mut sums = vec![vec![0.0; dimension]; k];
            let mut counts = vec![0usize; k];
            for (label, point) in labels.iter().zip(points) {
                counts[*label] += 1;
                for (sum, value) in sums[*label].iter_mut().zip(point) {
                    *sum += value;
                }
            }
            for ((centroid, sum), count) in centroids.iter_mut().zip(sums).zip(counts) {
                // empty clusters keep their previous centroid
                if count > 0 {
                    *centroid = sum.into_iter().map(|total| total / count as f64).collect();
                }
            }
        }

        labels
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

fn nearest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = squared_distance(point, centroid);
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::MenuItem;
    use crate::scoring::DegeneratePolicy;

    #[test]
    fn kmeans_separates_obvious_groups() {
        let points = vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![10.0, 10.0],
            vec![10.1, 9.9],
            vec![0.0, 0.2],
        ];
        let labels = KMeans {
            clusters: 2,
            max_iterations: 50,
        }
        .assign(&points);

        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[0], labels[4]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn kmeans_is_deterministic_and_caps_clusters() {
        let points = vec![vec![1.0], vec![2.0], vec![9.0]];
        let assigner = KMeans::default();
        let first = assigner.assign(&points);
        assert_eq!(first, assigner.assign(&points));

        let mut distinct = first.clone();
        distinct.sort_unstable();
        distinct.dedup();
        assert_eq!(distinct.len(), 3);
        assert!(assigner.assign(&[]).is_empty());
    }

    #[test]
    fn goal_profiles_follow_min_max_scaling() {
        let items = vec![
            MenuItem::new(0, "a")
                .with(Nutrient::Protein, 0.0)
                .with(Nutrient::TotalFat, 10.0)
                .with(Nutrient::TotalCarbohydrate, 40.0)
                .with(Nutrient::AddedSugars, 0.0)
                .with(Nutrient::Sodium, 100.0),
            MenuItem::new(1, "b")
                .with(Nutrient::Protein, 20.0)
                .with(Nutrient::TotalFat, 0.0)
                .with(Nutrient::TotalCarbohydrate, 0.0)
                .with(Nutrient::AddedSugars, 5.0)
                .with(Nutrient::Sodium, 300.0),
        ];
        let frame = ScoringFrame::over(&items, DegeneratePolicy::Strict);
        let profiles = goal_profiles(&frame).expect("profiles");

        let close = |actual: &[f64], expected: &[f64]| {
            actual
                .iter()
                .zip(expected)
                .all(|(a, e)| (a - e).abs() < 1e-9)
        };
        assert!(close(&profiles[0], &[0.5, -0.4, 0.5, -0.3]));
        assert!(close(&profiles[1], &[0.5, 0.6, 0.5, -0.7]));

        let points = standardized_points(&profiles);
        assert!(close(&points[0], &[0.0, -1.0, 0.0, 1.0]));
        assert!(close(&points[1], &[0.0, 1.0, 0.0, -1.0]));
    }

    #[test]
    fn parse_goal_tokens() {
        assert_eq!(BodyGoal::parse("Avoid_Bloating"), Ok(BodyGoal::AvoidBloating));
        assert!(BodyGoal::parse("sleepy").is_err());
        assert_eq!(BodyGoal::required_columns().len(), 8);
        for (position, goal) in BodyGoal::ALL.into_iter().enumerate() {
            assert_eq!(goal.slot(), position);
        }
    }
}
