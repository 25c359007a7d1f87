use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::error::AppResult;

/// Raw row of the product catalog
#[derive(Debug, Deserialize)]
struct CatalogRow {
    item_id: String,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// Catalog attributes of a single product
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub price: Option<f64>,
    pub category: Option<String>,
}

/// Product catalog keyed by lowercased item identifier
///
/// When the source lists an identifier more than once, the first row wins.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_path(path)?;
        Self::from_csv(reader)
    }

    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> AppResult<Self> {
        let mut entries = HashMap::new();

        for row in reader.deserialize::<CatalogRow>() {
            let row = row?;
            let key = row.item_id.to_lowercase();
            if key.trim().is_empty() {
                continue;
            }

            entries.entry(key).or_insert_with(|| CatalogEntry {
                price: row.price.as_deref().and_then(parse_price),
                category: row
                    .category
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty()),
            });
        }

        Ok(Self { entries })
    }

    /// Case-insensitive exact lookup; surrounding whitespace is significant
    pub fn get(&self, item_id: &str) -> Option<&CatalogEntry> {
        self.entries.get(&item_id.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Prices must be finite and nonnegative; anything else counts as unknown.
fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}
