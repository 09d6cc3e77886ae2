use super::views::{ItemSummary, TextureRow};
use crate::dataset::{Column, LoadOptions, MenuDataset};
use crate::features::{TextureClass, TextureModel};
use serde::Serialize;
use tracing::info;

/// Which surface asked for the listing; each ships its own classifier and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureEdition {
    Console,
    Dashboard,
}

impl TextureEdition {
    pub const fn model(self) -> TextureModel {
        match self {
            Self::Console => TextureModel::KeywordChain,
            Self::Dashboard => TextureModel::Lexicon,
        }
    }

    pub const fn limit(self) -> usize {
        match self {
            Self::Console => 5,
            Self::Dashboard => 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextureReport {
    pub texture: TextureClass,
    pub feeling: &'static str,
    pub model: TextureModel,
    pub items: Vec<TextureRow>,
}

pub fn load_options() -> LoadOptions {
    LoadOptions::requiring([Column::Category, Column::Name])
}

/// Items of the requested texture, in table order.
pub fn texture_matches(
    dataset: &MenuDataset,
    texture: TextureClass,
    edition: TextureEdition,
) -> TextureReport {
    let model = edition.model();
    let items: Vec<TextureRow> = dataset
        .items()
        .iter()
        .filter(|item| model.classify(&item.name) == texture)
        .take(edition.limit())
        .map(|item| TextureRow {
            item: ItemSummary::from(item),
            texture,
        })
        .collect();

    info!(?texture, ?model, matches = items.len(), "texture listing built");

    TextureReport {
        texture,
        feeling: texture.feeling(),
        model,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::MenuItem;

    fn dataset() -> MenuDataset {
        MenuDataset::from_items(
            [
                "McVeggie Burger",
                "Chicken McNuggets (4 Pc)",
                "Spicy Paneer Wrap",
                "McAloo Tikki Burger",
                "Chicken McNuggets (9 Pc)",
                "Flat White (Regular)",
            ]
            .into_iter()
            .enumerate()
            .map(|(position, name)| MenuItem::new(position, name))
            .collect(),
        )
    }

    #[test]
    fn listing_keeps_table_order() {
        let report = texture_matches(&dataset(), TextureClass::Soft, TextureEdition::Dashboard);
        let names: Vec<&str> = report
            .items
            .iter()
            .map(|row| row.item.menu_item.as_str())
            .collect();
        assert_eq!(names, vec!["McVeggie Burger", "McAloo Tikki Burger"]);
        assert_eq!(report.feeling, "Comforting");
    }

    #[test]
    fn editions_use_their_own_classifier() {
        let console = texture_matches(&dataset(), TextureClass::Chewy, TextureEdition::Console);
        assert_eq!(console.items.len(), 1);
        assert_eq!(console.model, TextureModel::KeywordChain);

        // the lexicon has no "wrap" keyword
        let dashboard = texture_matches(&dataset(), TextureClass::Chewy, TextureEdition::Dashboard);
        assert!(dashboard.items.is_empty());
    }

    #[test]
    fn console_edition_caps_at_five_rows() {
        let items = (0..8)
            .map(|position| MenuItem::new(position, format!("Fried Snack {position}")))
            .collect();
        let report = texture_matches(
            &MenuDataset::from_items(items),
            TextureClass::Crispy,
            TextureEdition::Console,
        );
        assert_eq!(report.items.len(), 5);
        assert_eq!(report.items[4].item.position, 4);
    }
}
