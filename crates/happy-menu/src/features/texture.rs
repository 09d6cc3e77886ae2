use super::keywords::{CHEWY, CRISPY, SMOOTH, SOFT};
use crate::input::{normalize_token, InvalidUserInput};
use serde::{Deserialize, Serialize};

/// Mouthfeel derived from an item's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureClass {
    Crispy,
    Chewy,
    Soft,
    Smooth,
    Unknown,
}

impl TextureClass {
    /// Scoring classes in tie-break order.
    pub const SCORED: [Self; 4] = [Self::Crispy, Self::Chewy, Self::Soft, Self::Smooth];

    pub const TOKENS: [&'static str; 4] = ["crispy", "chewy", "soft", "smooth"];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Crispy => "Crispy",
            Self::Chewy => "Chewy",
            Self::Soft => "Soft",
            Self::Smooth => "Smooth",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Crispy => CRISPY,
            Self::Chewy => CHEWY,
            Self::Soft => SOFT,
            Self::Smooth => SMOOTH,
            Self::Unknown => &[],
        }
    }

    /// How eating something of this texture tends to feel.
    pub const fn feeling(self) -> &'static str {
        match self {
            Self::Crispy => "Energizing",
            Self::Chewy => "Satisfying",
            Self::Soft => "Comforting",
            Self::Smooth => "Soothing",
            Self::Unknown => "Neutral",
        }
    }

    /// Accepts the four classes a user can ask for; `unknown` is not selectable.
    pub fn parse(raw: &str) -> Result<Self, InvalidUserInput> {
        match normalize_token(raw).as_str() {
            "crispy" => Ok(Self::Crispy),
            "chewy" => Ok(Self::Chewy),
            "soft" => Ok(Self::Soft),
            "smooth" => Ok(Self::Smooth),
            _ => Err(InvalidUserInput::unknown("texture", raw, &Self::TOKENS)),
        }
    }
}

/// Which classifier edition assigns textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureModel {
    /// Ordered if/else keyword chain used by the console script.
    KeywordChain,
    /// Per-class lexicon scoring used by the dashboard.
    #[default]
    Lexicon,
}

impl TextureModel {
    pub fn classify(self, name: &str) -> TextureClass {
        match self {
            Self::KeywordChain => classify_by_chain(name),
            Self::Lexicon => classify_texture(name),
        }
    }
}

/// Scores each class by keyword substring hits plus exact-token bonuses and
/// returns the first class reaching the maximum, or `Unknown` when nothing hit.
pub fn classify_texture(name: &str) -> TextureClass {
    let lower = name.to_lowercase();
    let tokens = tokenize(&lower);

    let mut best = TextureClass::Unknown;
    let mut best_score = 0usize;
    for class in TextureClass::SCORED {
        let score = texture_score(class, &lower, &tokens);
        if score > best_score {
            best = class;
            best_score = score;
        }
    }
    best
}

pub fn texture_score(class: TextureClass, lower_name: &str, tokens: &[String]) -> usize {
    class
        .keywords()
        .iter()
        .map(|keyword| {
            let substring = usize::from(lower_name.contains(keyword));
            let exact = tokens.iter().filter(|token| token.as_str() == *keyword).count();
            substring + exact
        })
        .sum()
}

fn tokenize(lower_name: &str) -> Vec<String> {
    lower_name
        .split_whitespace()
        .map(|token| {
            token
                .chars()
                .filter(|ch| !ch.is_ascii_punctuation())
                .collect::<String>()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

fn classify_by_chain(name: &str) -> TextureClass {
    let lower = name.to_lowercase();
    if lower.contains("nuggets") || lower.contains("fried") {
        TextureClass::Crispy
    } else if lower.contains("wrap") {
        TextureClass::Chewy
    } else if lower.contains("muffin") {
        TextureClass::Soft
    } else if lower.contains("flat white") {
        TextureClass::Smooth
    } else if lower.contains("burger") {
        TextureClass::Soft
    } else {
        TextureClass::Unknown
    }
}
