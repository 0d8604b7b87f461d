//! The current day's food log.
//!
//! One `DailyLog` is owned by each user session. Entries keep insertion order
//! for display numbering; totals are always recomputed from the full list.

use crate::catalog::FoodCatalog;
use crate::{DailyTotals, EntrySource, Error, LogEntry, Macros, Result};

/// Whether the log currently holds any entries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogState {
    Empty,
    HasEntries,
}

#[derive(Clone, Debug, Default)]
pub struct DailyLog {
    entries: Vec<LogEntry>,
}

fn check_quantity(quantity: u32) -> Result<()> {
    if quantity == 0 {
        return Err(Error::InvalidInput(
            "quantity must be at least 1 serving".into(),
        ));
    }
    Ok(())
}

fn check_scaled(macros: &Macros, name: &str, quantity: u32) -> Result<()> {
    if !macros.is_valid() {
        return Err(Error::InvalidInput(format!(
            "{} servings of {:?} overflow the nutrition totals",
            quantity,
            name.trim()
        )));
    }
    Ok(())
}

impl DailyLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `dish_name` in the catalog and append `quantity` servings
    ///
    /// Returns `Ok(None)` without touching the log when the dish is unknown.
    pub fn add_food(
        &mut self,
        catalog: &FoodCatalog,
        dish_name: &str,
        quantity: u32,
    ) -> Result<Option<&LogEntry>> {
        check_quantity(quantity)?;

        let Some(found) = catalog.lookup(dish_name) else {
            tracing::warn!("Food not found: {:?}", dish_name);
            return Ok(None);
        };

        let macros = found.per_serving.scale(quantity);
        check_scaled(&macros, dish_name, quantity)?;

        self.entries.push(LogEntry {
            dish_name: dish_name.trim().to_string(),
            quantity,
            macros,
            source: EntrySource::Catalog,
        });

        tracing::debug!("Added {} x {}", quantity, dish_name);
        Ok(self.entries.last())
    }

    /// Append a food that is not in the catalog
    pub fn add_custom_food(
        &mut self,
        name: &str,
        per_serving: Macros,
        quantity: u32,
    ) -> Result<&LogEntry> {
        check_quantity(quantity)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("custom food needs a name".into()));
        }
        if !per_serving.is_valid() {
            return Err(Error::InvalidInput(format!(
                "nutrition values must be non-negative numbers, got {:?}",
                per_serving
            )));
        }

        let macros = per_serving.scale(quantity);
        check_scaled(&macros, name, quantity)?;

        self.entries.push(LogEntry {
            dish_name: name.to_string(),
            quantity,
            macros,
            source: EntrySource::Custom,
        });

        tracing::debug!("Added custom food {} x {}", quantity, name);
        let Some(entry) = self.entries.last() else {
            return Err(Error::InvalidInput(format!("{:?} was not logged", name)));
        };
        Ok(entry)
    }

    /// Sum of all entries; zero when the log is empty
    pub fn calculate_totals(&self) -> DailyTotals {
        self.entries
            .iter()
            .fold(DailyTotals::default(), |acc, e| acc + e.macros)
    }

    /// Drop every entry for the current day
    pub fn reset_day(&mut self) {
        let cleared = self.entries.len();
        self.entries.clear();
        tracing::info!("Reset daily log ({} entries cleared)", cleared);
    }

    pub fn state(&self) -> LogState {
        if self.entries.is_empty() {
            LogState::Empty
        } else {
            LogState::HasEntries
        }
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogEntry;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn assert_totals_eq(a: DailyTotals, b: DailyTotals) {
        assert!(close(a.calories, b.calories), "{:?} != {:?}", a, b);
        assert!(close(a.protein, b.protein), "{:?} != {:?}", a, b);
        assert!(close(a.carbs, b.carbs), "{:?} != {:?}", a, b);
        assert!(close(a.fats, b.fats), "{:?} != {:?}", a, b);
    }

    fn test_catalog() -> FoodCatalog {
        FoodCatalog::from_entries(vec![
            CatalogEntry {
                dish_name: "Plain Dosa".into(),
                per_serving: Macros::new(120.5, 2.9, 18.4, 3.7),
            },
            CatalogEntry {
                dish_name: "Chapati".into(),
                per_serving: Macros::new(104.0, 3.1, 17.2, 2.5),
            },
        ])
    }

    #[test]
    fn test_empty_log_totals_zero() {
        let log = DailyLog::new();
        assert_eq!(log.state(), LogState::Empty);
        assert_eq!(log.calculate_totals(), DailyTotals::default());
    }

    #[test]
    fn test_add_food_scales_by_quantity() {
        let catalog = test_catalog();
        let mut log = DailyLog::new();

        let entry = log.add_food(&catalog, "plain dosa", 2).unwrap().unwrap();
        assert_eq!(entry.dish_name, "plain dosa");
        assert_eq!(entry.quantity, 2);
        assert_eq!(entry.source, EntrySource::Catalog);
        assert_totals_eq(entry.macros, Macros::new(241.0, 5.8, 36.8, 7.4));
        assert_eq!(log.state(), LogState::HasEntries);
    }

    #[test]
    fn test_dosa_and_chapati_totals() {
        let catalog = test_catalog();
        let mut log = DailyLog::new();
        log.add_food(&catalog, "Plain Dosa", 2).unwrap();
        log.add_food(&catalog, "Chapati", 3).unwrap();

        let c1 = catalog.lookup("Plain Dosa").unwrap().per_serving;
        let c2 = catalog.lookup("Chapati").unwrap().per_serving;
        assert_totals_eq(log.calculate_totals(), c1.scale(2) + c2.scale(3));

        let mut reversed = DailyLog::new();
        reversed.add_food(&catalog, "Chapati", 3).unwrap();
        reversed.add_food(&catalog, "Plain Dosa", 2).unwrap();
        assert_totals_eq(reversed.calculate_totals(), log.calculate_totals());
    }

    #[test]
    fn test_unknown_dish_is_noop() {
        crate::logging::init_test();
        let catalog = test_catalog();
        let mut log = DailyLog::new();
        log.add_food(&catalog, "Chapati", 1).unwrap();

        let result = log.add_food(&catalog, "Pizza", 2).unwrap();
        assert!(result.is_none());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let catalog = test_catalog();
        let mut log = DailyLog::new();
        assert!(matches!(
            log.add_food(&catalog, "Chapati", 0),
            Err(Error::InvalidInput(_))
        ));
        assert!(log
            .add_custom_food("Shake", Macros::new(100.0, 20.0, 3.0, 1.0), 0)
            .is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn test_custom_food_bypasses_catalog() {
        let mut log = DailyLog::new();
        let entry = log
            .add_custom_food("Protein Shake", Macros::new(120.0, 24.0, 3.0, 1.5), 2)
            .unwrap();
        assert_eq!(entry.source, EntrySource::Custom);
        assert_eq!(entry.macros, Macros::new(240.0, 48.0, 6.0, 3.0));
        assert_eq!(log.calculate_totals(), Macros::new(240.0, 48.0, 6.0, 3.0));
    }

    #[test]
    fn test_custom_food_validation() {
        let mut log = DailyLog::new();
        assert!(log.add_custom_food("  ", Macros::default(), 1).is_err());
        assert!(log
            .add_custom_food("Mystery", Macros::new(-1.0, 0.0, 0.0, 0.0), 1)
            .is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn test_custom_food_rejects_overflowing_quantity() {
        let mut log = DailyLog::new();
        let result = log.add_custom_food("Huge", Macros::new(1e308, 1.0, 1.0, 1.0), 2);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(log.is_empty());

        let catalog = FoodCatalog::from_entries(vec![CatalogEntry {
            dish_name: "Feast".into(),
            per_serving: Macros::new(1.0, 1.0, f64::MAX, 1.0),
        }]);
        assert!(log.add_food(&catalog, "Feast", 3).is_err());
        assert!(log.is_empty());
        assert_eq!(log.calculate_totals(), DailyTotals::default());
    }

    #[test]
    fn test_reset_returns_to_empty() {
        let catalog = test_catalog();
        let mut log = DailyLog::new();
        log.add_food(&catalog, "Chapati", 3).unwrap();
        log.add_custom_food("Lassi", Macros::new(150.0, 5.0, 20.0, 5.0), 1)
            .unwrap();

        log.reset_day();
        assert_eq!(log.state(), LogState::Empty);
        assert_eq!(log.calculate_totals(), DailyTotals::default());

        log.reset_day();
        assert_eq!(log.state(), LogState::Empty);
    }

    #[test]
    fn test_totals_idempotent() {
        let catalog = test_catalog();
        let mut log = DailyLog::new();
        log.add_food(&catalog, "Chapati", 2).unwrap();
        let first = log.calculate_totals();
        let second = log.calculate_totals();
        assert_eq!(first, second);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let catalog = test_catalog();
        let mut log = DailyLog::new();
        log.add_food(&catalog, "Chapati", 1).unwrap();
        log.add_custom_food("Curd", Macros::new(60.0, 3.0, 4.0, 3.0), 1)
            .unwrap();
        log.add_food(&catalog, "Plain Dosa", 1).unwrap();

        let names: Vec<_> = log.entries().iter().map(|e| e.dish_name.as_str()).collect();
        assert_eq!(names, vec!["Chapati", "Curd", "Plain Dosa"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Totals do not depend on the order entries were added
        #[test]
        fn prop_totals_order_independent(
            items in prop::collection::vec(
                ((0.0f64..1000.0, 0.0f64..100.0, 0.0f64..200.0, 0.0f64..100.0), 1u32..10),
                0..12,
            )
        ) {
            let mut forward = DailyLog::new();
            for ((c, p, cb, f), qty) in &items {
                forward.add_custom_food("item", Macros::new(*c, *p, *cb, *f), *qty).unwrap();
            }

            let mut backward = DailyLog::new();
            for ((c, p, cb, f), qty) in items.iter().rev() {
                backward.add_custom_food("item", Macros::new(*c, *p, *cb, *f), *qty).unwrap();
            }

            let a = forward.calculate_totals();
            let b = backward.calculate_totals();
            prop_assert!((a.calories - b.calories).abs() < 1e-6);
            prop_assert!((a.protein - b.protein).abs() < 1e-6);
            prop_assert!((a.carbs - b.carbs).abs() < 1e-6);
            prop_assert!((a.fats - b.fats).abs() < 1e-6);
        }
    }
}
