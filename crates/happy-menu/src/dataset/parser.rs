use super::columns::Nutrient;
use super::MenuItem;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) struct ParsedTable {
    pub(crate) headers: Vec<String>,
    pub(crate) items: Vec<MenuItem>,
}

pub(crate) fn parse_table<R: Read>(reader: R) -> Result<ParsedTable, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut items = Vec::new();
    for (position, record) in csv_reader.deserialize::<MenuRow>().enumerate() {
        let row = record?;
        items.push(row.into_item(position));
    }

    Ok(ParsedTable { headers, items })
}

#[derive(Debug, Deserialize)]
struct MenuRow {
    #[serde(rename = "Menu Category", default)]
    category: String,
    #[serde(rename = "Menu Items", default)]
    name: String,
    #[serde(rename = "Per Serve Size", default)]
    serving_size: String,
    #[serde(
        rename = "Veg/Non-Veg",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    diet_label: Option<String>,
    #[serde(rename = "Energy (kCal)", default, deserialize_with = "lenient_number")]
    energy: Option<f64>,
    #[serde(rename = "Protein (g)", default, deserialize_with = "lenient_number")]
    protein: Option<f64>,
    #[serde(rename = "Total fat (g)", default, deserialize_with = "lenient_number")]
    total_fat: Option<f64>,
    #[serde(rename = "Sat Fat (g)", default, deserialize_with = "lenient_number")]
    sat_fat: Option<f64>,
    #[serde(rename = "Trans fat (g)", default, deserialize_with = "lenient_number")]
    trans_fat: Option<f64>,
    #[serde(
        rename = "Cholesterols (mg)",
        default,
        deserialize_with = "lenient_number"
    )]
    cholesterol: Option<f64>,
    #[serde(
        rename = "Total carbohydrate (g)",
        default,
        deserialize_with = "lenient_number"
    )]
    total_carbohydrate: Option<f64>,
    #[serde(
        rename = "Total Sugars (g)",
        default,
        deserialize_with = "lenient_number"
    )]
    total_sugars: Option<f64>,
    #[serde(
        rename = "Added Sugars (g)",
        default,
        deserialize_with = "lenient_number"
    )]
    added_sugars: Option<f64>,
    #[serde(rename = "Sodium (mg)", default, deserialize_with = "lenient_number")]
    sodium: Option<f64>,
    #[serde(
        rename = "Dietary Fiber (g)",
        default,
        deserialize_with = "lenient_number"
    )]
    dietary_fiber: Option<f64>,
    #[serde(rename = "Omega-3 (g)", default, deserialize_with = "lenient_number")]
    omega3: Option<f64>,
}

impl MenuRow {
    fn into_item(self, position: usize) -> MenuItem {
        let mut nutrients = [f64::NAN; Nutrient::COUNT];
        let values = [
            (Nutrient::Energy, self.energy),
            (Nutrient::Protein, self.protein),
            (Nutrient::TotalFat, self.total_fat),
            (Nutrient::SatFat, self.sat_fat),
            (Nutrient::TransFat, self.trans_fat),
            (Nutrient::Cholesterol, self.cholesterol),
            (Nutrient::TotalCarbohydrate, self.total_carbohydrate),
            (Nutrient::TotalSugars, self.total_sugars),
            (Nutrient::AddedSugars, self.added_sugars),
            (Nutrient::Sodium, self.sodium),
            (Nutrient::DietaryFiber, self.dietary_fiber),
            (Nutrient::Omega3, self.omega3),
        ];
        for (nutrient, value) in values {
            if let Some(value) = value {
                nutrients[nutrient.index()] = value;
            }
        }

        MenuItem {
            position,
            name: self.name,
            category: self.category,
            serving_size: self.serving_size,
            diet_label: self.diet_label,
            nutrients,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.and_then(|value| parse_number(&value)))
}

fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
}
