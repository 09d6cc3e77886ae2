//! Keyword lexicons. All entries are lowercase substrings matched against
//! lowercased item names. Order matters where a list is scanned first-match.

pub const NON_VEG: &[&str] = &[
    "chicken",
    "beef",
    "mutton",
    "fish",
    "prawn",
    "egg",
    "sausage",
    "bacon",
    "pepperoni",
];

/// Animal by-products that keep an item vegetarian but not vegan.
pub const DAIRY: &[&str] = &["paneer", "cheese", "butter", "milk", "mayonnaise"];

pub const PROCESSED: &[&str] = &["fried", "nuggets", "muffin", "sausage"];

pub const CRISPY: &[&str] = &["crispy", "crunchy", "brittle", "fried", "nuggets"];
pub const CHEWY: &[&str] = &["chewy", "tough", "rubbery", "gum"];
pub const SOFT: &[&str] = &["soft", "fluffy", "tender", "muffin", "burger"];
pub const SMOOTH: &[&str] = &["smooth", "velvety", "creamy", "flat white"];

pub const LACTOSE: &[&str] = &["milk", "cheese", "cream", "butter", "yogurt"];
pub const GLUTEN: &[&str] = &["wheat", "barley", "rye", "bread", "pasta"];

pub const NUTS: &[&str] = &["almond", "cashew", "peanut", "walnut"];
pub const SOY: &[&str] = &["soy", "tofu"];
pub const SHELLFISH: &[&str] = &["shrimp", "crab", "lobster"];

/// True when the lowercased `text` contains any keyword.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|keyword| lower.contains(keyword))
}
