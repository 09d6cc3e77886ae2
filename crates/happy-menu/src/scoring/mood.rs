use super::formula::{Flag, Formula, ScoringFrame, Term};
use super::normalize::NormalizationError;
use crate::dataset::Nutrient;
use crate::input::{parse_in_range, InvalidUserInput};
use crate::ranking::SortDirection;
use serde::{Deserialize, Serialize};

/// Self-reported mood on a 1-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MoodRating(u8);

impl MoodRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    const LABELS: [&'static str; 10] = [
        "Sad",
        "Down",
        "Meh",
        "Neutral",
        "Slightly Happy",
        "Happy",
        "Very Happy",
        "Excited",
        "Super Excited",
        "Extremely Happy",
    ];

    pub fn new(value: u8) -> Result<Self, InvalidUserInput> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidUserInput::OutOfRange {
                field: "mood rating",
                value: value.to_string(),
                min: i64::from(Self::MIN),
                max: i64::from(Self::MAX),
            })
        }
    }

    pub fn parse(raw: &str) -> Result<Self, InvalidUserInput> {
        let value = parse_in_range(
            "mood rating",
            raw,
            i64::from(Self::MIN),
            i64::from(Self::MAX),
        )?;
        // parse_in_range keeps the value within 1..=10
        Ok(Self(value as u8))
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn bucket(self) -> MoodBucket {
        match self.0 {
            0..=3 => MoodBucket::Low,
            4..=6 => MoodBucket::Neutral,
            _ => MoodBucket::High,
        }
    }

    pub const fn label(self) -> &'static str {
        Self::LABELS[(self.0 - Self::MIN) as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodBucket {
    /// Ratings 1-3.
    Low,
    /// Ratings 4-6.
    Neutral,
    /// Ratings 7-10.
    High,
}

/// Rewards complex carbs, protein and omega-3; penalizes refined carbs.
pub static CARB_QUALITY: Formula = Formula {
    name: "mood_support_score",
    terms: &[
        Term::flag(Flag::HighQualityCarb, 3.0),
        Term::flag(Flag::LowQualityCarb, -3.0),
        Term::raw(Nutrient::Protein, 0.2),
        Term::flag(Flag::HasOmega3, 4.0),
    ],
    direction: SortDirection::Descending,
};

/// Multiplier applied to the carb-quality score when mood is low.
pub const LOW_MOOD_BOOST: f64 = 1.5;

pub static COMFORT: Formula = Formula {
    name: "weighted_score",
    terms: &[
        Term::raw(Nutrient::Protein, 0.4),
        Term::raw(Nutrient::TotalFat, 0.5),
        Term::raw(Nutrient::TotalSugars, -0.3),
    ],
    direction: SortDirection::Descending,
};

pub static BALANCED: Formula = Formula {
    name: "weighted_score",
    terms: &[
        Term::raw(Nutrient::Protein, 0.3),
        Term::raw(Nutrient::TotalCarbohydrate, 0.4),
        Term::raw(Nutrient::TotalSugars, -0.2),
    ],
    direction: SortDirection::Descending,
};

pub static ENERGY_BOOST: Formula = Formula {
    name: "weighted_score",
    terms: &[
        Term::raw(Nutrient::TotalCarbohydrate, 0.5),
        Term::raw(Nutrient::Protein, 0.3),
        Term::raw(Nutrient::TotalFat, -0.2),
    ],
    direction: SortDirection::Descending,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodModel {
    /// Carb-quality rules with a low-mood multiplier.
    CarbQuality,
    /// One raw-nutrient formula per mood bucket.
    Bucketed,
}

impl MoodModel {
    pub fn formula(self, rating: MoodRating) -> &'static Formula {
        match (self, rating.bucket()) {
            (Self::CarbQuality, _) => &CARB_QUALITY,
            (Self::Bucketed, MoodBucket::Low) => &COMFORT,
            (Self::Bucketed, MoodBucket::Neutral) => &BALANCED,
            (Self::Bucketed, MoodBucket::High) => &ENERGY_BOOST,
        }
    }

    pub fn score(
        self,
        frame: &ScoringFrame<'_>,
        rating: MoodRating,
    ) -> Result<Vec<f64>, NormalizationError> {
        let mut scores = frame.evaluate(self.formula(rating))?;
        if self == Self::CarbQuality && rating.bucket() == MoodBucket::Low {
            for score in &mut scores {
                *score *= LOW_MOOD_BOOST;
            }
        }
        Ok(scores)
    }
}
