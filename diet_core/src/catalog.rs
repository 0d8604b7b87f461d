//! Food reference catalog loaded from the dish dataset.
//!
//! The dataset is a CSV file read once at startup. Lookups are linear,
//! case-insensitive and exact; the first matching row wins when a dish name
//! appears more than once.

use crate::{CatalogEntry, Error, Macros, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::BTreeSet;
use std::path::Path;

pub const DISH_NAME_COL: &str = "Dish Name";
pub const CALORIES_COL: &str = "Calories (kcal)";
pub const PROTEIN_COL: &str = "Protein (g)";
pub const CARBS_COL: &str = "Carbohydrates (g)";
pub const FATS_COL: &str = "Fats (g)";

/// Immutable table of dishes and their per-serving nutrition values
#[derive(Clone, Debug, Default)]
pub struct FoodCatalog {
    entries: Vec<CatalogEntry>,
}

/// Column positions resolved from the header row
struct Columns {
    name: usize,
    calories: usize,
    protein: usize,
    carbs: usize,
    fats: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |col: &str| {
            headers
                .iter()
                .position(|h| h == col)
                .ok_or_else(|| Error::Catalog(format!("required column '{}' not found", col)))
        };

        Ok(Self {
            name: find(DISH_NAME_COL)?,
            calories: find(CALORIES_COL)?,
            protein: find(PROTEIN_COL)?,
            carbs: find(CARBS_COL)?,
            fats: find(FATS_COL)?,
        })
    }

    fn parse(&self, record: &StringRecord) -> std::result::Result<CatalogEntry, String> {
        let dish_name = record.get(self.name).unwrap_or_default().to_string();
        if dish_name.is_empty() {
            return Err("empty dish name".into());
        }

        let value = |idx: usize, col: &str| -> std::result::Result<f64, String> {
            let raw = record
                .get(idx)
                .ok_or_else(|| format!("missing '{}'", col))?;
            let v: f64 = raw
                .parse()
                .map_err(|_| format!("'{}' is not a number: {:?}", col, raw))?;
            if !v.is_finite() || v < 0.0 {
                return Err(format!("'{}' must be non-negative, got {}", col, v));
            }
            Ok(v)
        };

        Ok(CatalogEntry {
            per_serving: Macros::new(
                value(self.calories, CALORIES_COL)?,
                value(self.protein, PROTEIN_COL)?,
                value(self.carbs, CARBS_COL)?,
                value(self.fats, FATS_COL)?,
            ),
            dish_name,
        })
    }
}

impl FoodCatalog {
    /// Build a catalog from already-parsed entries
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Load the dataset from a CSV file
    ///
    /// Fails if the file is missing, lacks a required column, or yields no
    /// usable rows. Rows that cannot be parsed are skipped with a warning.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Catalog(format!(
                "food dataset not found at {:?}",
                path
            )));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_path(path)?;

        let columns = Columns::resolve(reader.headers()?)?;

        let mut entries = Vec::new();
        for (row_index, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("Failed to read dataset row {}: {}", row_index + 2, e);
                    continue;
                }
            };

            match columns.parse(&record) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    // +2: one for the header, one for 1-based numbering
                    tracing::warn!("Skipping dataset row {}: {}", row_index + 2, e);
                }
            }
        }

        if entries.is_empty() {
            return Err(Error::Catalog(format!(
                "food dataset at {:?} has no usable rows",
                path
            )));
        }

        tracing::info!("Loaded {} dishes from {:?}", entries.len(), path);
        Ok(Self { entries })
    }

    /// Case-insensitive exact match on dish name; first match wins
    pub fn lookup(&self, dish_name: &str) -> Option<&CatalogEntry> {
        let wanted = dish_name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|e| e.dish_name.to_lowercase() == wanted)
    }

    /// Sorted, de-duplicated dish names
    pub fn dish_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.dish_name.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Dish names containing `fragment` (case-insensitive), sorted
    pub fn search(&self, fragment: &str) -> Vec<&str> {
        let needle = fragment.trim().to_lowercase();
        self.dish_names()
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
