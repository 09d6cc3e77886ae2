//! One pipeline per screen: load options, filtering, scoring and a
//! serializable report. Both the console and the dashboard render these.

pub mod body;
pub mod disorders;
pub mod mood;
pub mod soul;
pub mod texture;
pub mod views;

use crate::dataset::Column;

/// Concatenates column lists, keeping the first occurrence of each.
pub(crate) fn merge_columns(columns: impl IntoIterator<Item = Column>) -> Vec<Column> {
    let mut merged: Vec<Column> = Vec::new();
    for column in columns {
        if !merged.contains(&column) {
            merged.push(column);
        }
    }
    merged
}
