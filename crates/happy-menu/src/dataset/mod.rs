//! Loading the menu export into an in-memory table.
//!
//! The table is rebuilt on every invocation; nothing here is cached.

mod columns;
mod fill;
mod parser;

pub use columns::{Column, Nutrient, DIET_LABEL, MENU_CATEGORY, MENU_ITEMS, PER_SERVE_SIZE};
pub use fill::{fill_missing, mean, median, FillStrategy};

use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug)]
pub enum DataLoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Csv(csv::Error),
    MissingColumns(Vec<String>),
}

impl std::fmt::Display for DataLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataLoadError::Io { path, source } => write!(
                f,
                "failed to read menu export '{}': {}",
                path.display(),
                source
            ),
            DataLoadError::Csv(err) => write!(f, "invalid menu CSV data: {}", err),
            DataLoadError::MissingColumns(columns) => write!(
                f,
                "menu export is missing required column(s): {}",
                columns.join(", ")
            ),
        }
    }
}

impl std::error::Error for DataLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataLoadError::Io { source, .. } => Some(source),
            DataLoadError::Csv(err) => Some(err),
            DataLoadError::MissingColumns(_) => None,
        }
    }
}

impl From<csv::Error> for DataLoadError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One row of the export. Identity is its position in the source table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub position: usize,
    pub name: String,
    pub category: String,
    pub serving_size: String,
    pub diet_label: Option<String>,
    nutrients: [f64; Nutrient::COUNT],
}

impl MenuItem {
    pub fn new(position: usize, name: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
            category: String::new(),
            serving_size: String::new(),
            diet_label: None,
            nutrients: [f64::NAN; Nutrient::COUNT],
        }
    }

    pub fn with(mut self, nutrient: Nutrient, value: f64) -> Self {
        self.set(nutrient, value);
        self
    }

    /// Nutrient value, NaN when the cell was missing or unparseable.
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.nutrients[nutrient.index()]
    }

    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        self.nutrients[nutrient.index()] = value;
    }
}

/// Which headers must exist and how missing cells are filled.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub required: Vec<Column>,
    pub fill: Vec<(Nutrient, FillStrategy)>,
}

impl LoadOptions {
    pub fn requiring(columns: impl IntoIterator<Item = Column>) -> Self {
        Self {
            required: columns.into_iter().collect(),
            fill: Vec::new(),
        }
    }

    pub fn fill(mut self, nutrient: Nutrient, strategy: FillStrategy) -> Self {
        self.fill.push((nutrient, strategy));
        self
    }
}

/// The whole export as loaded for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuDataset {
    headers: Vec<String>,
    items: Vec<MenuItem>,
    synthesized: Vec<Nutrient>,
}

impl MenuDataset {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        options: &LoadOptions,
    ) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading menu export");
        Self::from_reader(file, options)
    }

    pub fn from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Self, DataLoadError> {
        let table = parser::parse_table(reader)?;

        let missing: Vec<String> = options
            .required
            .iter()
            .map(|column| column.header())
            .filter(|header| !table.headers.iter().any(|present| present == header))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(DataLoadError::MissingColumns(missing));
        }

        let mut dataset = Self {
            headers: table.headers,
            items: table.items,
            synthesized: Vec::new(),
        };
        for (nutrient, strategy) in &options.fill {
            if !dataset.has_column(nutrient.header()) {
                dataset.synthesized.push(*nutrient);
            }
            dataset.fill_column(*nutrient, *strategy);
        }

        debug!(rows = dataset.items.len(), "menu export loaded");
        Ok(dataset)
    }

    pub fn from_items(items: Vec<MenuItem>) -> Self {
        Self {
            headers: Vec::new(),
            items,
            synthesized: Vec::new(),
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_column(&self, header: &str) -> bool {
        self.headers.iter().any(|present| present == header)
    }

    /// Columns the export lacked that were produced entirely by a fill.
    pub fn synthesized(&self) -> &[Nutrient] {
        &self.synthesized
    }

    pub fn column(&self, nutrient: Nutrient) -> Vec<f64> {
        self.items.iter().map(|item| item.get(nutrient)).collect()
    }

    fn fill_column(&mut self, nutrient: Nutrient, strategy: FillStrategy) {
        let mut values = self.column(nutrient);
        let filled = fill_missing(&mut values, strategy);
        if filled == 0 {
            if values.iter().any(|value| value.is_nan()) {
                warn!(column = nutrient.header(), "no values available to fill column");
            }
            return;
        }

        for (item, value) in self.items.iter_mut().zip(values) {
            item.set(nutrient, value);
        }
        debug!(column = nutrient.header(), filled, ?strategy, "filled missing values");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Menu Category,Menu Items,Per Serve Size,Protein (g),Sodium (mg)\n\
Regular Menu,McVeggie Burger,168 g,10.24,706.13\n\
Regular Menu,McAloo Tikki Burger,146 g,8.5,\n\
Regular Menu,Chicken McNuggets,96 g,20.1,545.34\n\
Regular Menu,Fries,77 g,2.0,100.0\n";

    #[test]
    fn from_reader_fills_with_median_of_current_load() {
        let options = LoadOptions::requiring([Column::Name, Column::Nutrient(Nutrient::Sodium)])
            .fill(Nutrient::Sodium, FillStrategy::Median);
        let dataset = MenuDataset::from_reader(SAMPLE.as_bytes(), &options).expect("loads");

        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.items()[1].get(Nutrient::Sodium), 545.34);
    }

    #[test]
    fn filling_an_absent_column_marks_it_synthesized() {
        let options = LoadOptions::default()
            .fill(Nutrient::Sodium, FillStrategy::Median)
            .fill(Nutrient::DietaryFiber, FillStrategy::Zero);
        let dataset = MenuDataset::from_reader(SAMPLE.as_bytes(), &options).expect("loads");

        assert_eq!(dataset.synthesized(), &[Nutrient::DietaryFiber]);
        assert!(dataset
            .column(Nutrient::DietaryFiber)
            .iter()
            .all(|value| *value == 0.0));
    }

    #[test]
    fn from_reader_fills_with_mean_when_asked() {
        let options = LoadOptions::default().fill(Nutrient::Sodium, FillStrategy::Mean);
        let dataset = MenuDataset::from_reader(SAMPLE.as_bytes(), &options).expect("loads");

        let expected = (706.13 + 545.34 + 100.0) / 3.0;
        assert!((dataset.items()[1].get(Nutrient::Sodium) - expected).abs() < 1e-9);
    }

    #[test]
    fn from_reader_reports_every_missing_column() {
        let options = LoadOptions::requiring([
            Column::Name,
            Column::Nutrient(Nutrient::TotalSugars),
            Column::Nutrient(Nutrient::Energy),
        ]);
        let error = MenuDataset::from_reader(SAMPLE.as_bytes(), &options)
            .expect_err("columns missing");

        match error {
            DataLoadError::MissingColumns(columns) => {
                assert_eq!(columns, vec!["Total Sugars (g)", "Energy (kCal)"]);
            }
            other => panic!("expected missing columns, got {other:?}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = MenuDataset::from_path("./does-not-exist.csv", &LoadOptions::default())
            .expect_err("expected io error");

        match error {
            DataLoadError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("./does-not-exist.csv"));
            }
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn has_column_uses_trimmed_headers() {
        let csv = "Menu Items , Veg/Non-Veg \nFries,Veg\n";
        let dataset = MenuDataset::from_reader(csv.as_bytes(), &LoadOptions::default())
            .expect("loads");
        assert!(dataset.has_column(DIET_LABEL));
        assert!(dataset.has_column(MENU_ITEMS));
    }
}
