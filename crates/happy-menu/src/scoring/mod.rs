//! Composite scores: min-max normalization plus fixed-weight formulas, one
//! closed set of editions per screen.

pub mod cluster;
pub mod disorders;
mod formula;
pub mod mood;
mod normalize;
pub mod vibrational;

pub use cluster::{BodyGoal, ClusterAssigner, KMeans};
pub use disorders::{DiabetesModel, FilterOrder, DIABETES_CEILINGS};
pub use formula::{rank_scored, Feature, Flag, Formula, Metric, Scored, ScoringFrame, Term};
pub use mood::{MoodBucket, MoodModel, MoodRating};
pub use normalize::{bounds, normalize, standardize, DegeneratePolicy, NormalizationError, Scaling};
pub use vibrational::VibrationalModel;
