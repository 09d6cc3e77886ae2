//! Row-wise tags derived from item names and nutrient cells.

mod dietary;
pub mod keywords;
pub mod metrics;
mod texture;

pub use dietary::{
    classify_dietary, classify_processed, is_vegetarian, CategoryScheme, DietaryCategory,
};
pub use metrics::CarbType;
pub use texture::{classify_texture, TextureClass, TextureModel};
