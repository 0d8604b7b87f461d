//! Append-only day history stored as CSV.
//!
//! Each call to [`HistoryStore::record_day`] opens the file, appends one
//! row (writing the header only when the file is empty) and closes it again.
//! Reading skips rows that fail to parse instead of aborting.

use crate::metrics::round2;
use crate::{DailyTotals, DayStatus, HistoryRecord, Macros, Result};
use chrono::{Local, NaiveDate};
use csv::{ReaderBuilder, WriterBuilder};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

/// A row in the history CSV
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Calories")]
    calories: f64,
    #[serde(rename = "Protein")]
    protein: f64,
    #[serde(rename = "Carbs")]
    carbs: f64,
    #[serde(rename = "Fats")]
    fats: f64,
    #[serde(rename = "Status")]
    status: DayStatus,
}

impl From<&HistoryRecord> for CsvRow {
    fn from(record: &HistoryRecord) -> Self {
        CsvRow {
            date: record.date,
            name: record.name.clone(),
            calories: record.totals.calories,
            protein: record.totals.protein,
            carbs: record.totals.carbs,
            fats: record.totals.fats,
            status: record.status,
        }
    }
}

impl From<CsvRow> for HistoryRecord {
    fn from(row: CsvRow) -> Self {
        HistoryRecord {
            date: row.date,
            name: row.name,
            totals: Macros::new(row.calories, row.protein, row.carbs, row.fats),
            status: row.status,
        }
    }
}

/// Handle to the history CSV file
#[derive(Clone, Debug)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Record today's totals (local calendar date)
    pub fn record_day(
        &self,
        user_name: &str,
        totals: &DailyTotals,
        target_calories: f64,
    ) -> Result<HistoryRecord> {
        self.record_day_on(Local::now().date_naive(), user_name, totals, target_calories)
    }

    /// Record totals for an explicit date
    pub fn record_day_on(
        &self,
        date: NaiveDate,
        user_name: &str,
        totals: &DailyTotals,
        target_calories: f64,
    ) -> Result<HistoryRecord> {
        let record = HistoryRecord {
            date,
            name: user_name.trim().to_string(),
            totals: totals.rounded(),
            status: DayStatus::classify(totals.calories, target_calories),
        };

        self.append(&record)?;

        tracing::info!(
            "Recorded {} for {:?}: {} kcal vs target {} ({})",
            record.date,
            record.name,
            record.totals.calories,
            round2(target_calories),
            record.status
        );
        Ok(record)
    }

    fn append(&self, record: &HistoryRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        // Header only goes into an empty file
        let len = file.metadata()?.len();
        let needs_headers = len == 0;

        // A crash mid-write can leave a row without its newline; terminate it
        // so the new row starts on a line of its own
        if len > 0 {
            let mut last = [0u8; 1];
            (&file).seek(SeekFrom::End(-1))?;
            (&file).read_exact(&mut last)?;
            if last[0] != b'\n' {
                tracing::warn!("History file {:?} ends mid-row; starting a new line", self.path);
                (&file).write_all(b"\n")?;
            }
        }

        let mut writer = WriterBuilder::new()
            .has_headers(needs_headers)
            .from_writer(&file);
        writer.serialize(CsvRow::from(record))?;
        writer.flush()?;
        drop(writer);

        file.sync_all()?;
        file.unlock()?;

        tracing::debug!("Appended history row to {:?}", self.path);
        Ok(())
    }

    /// All recorded days, oldest first
    ///
    /// Returns an empty list if the store has not been created yet.
    pub fn read_history(&self) -> Result<Vec<HistoryRecord>> {
        if !self.exists() {
            tracing::debug!("No history file at {:?}", self.path);
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        file.lock_shared()?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(&file);

        let mut records = Vec::new();
        for (row_index, result) in reader.deserialize::<CsvRow>().enumerate() {
            match result {
                Ok(row) => records.push(HistoryRecord::from(row)),
                // I/O failures are not row-level and would repeat on every next()
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    tracing::warn!("Skipping history row {}: {}", row_index + 2, e);
                    // Continue reading, don't fail completely
                }
            }
        }

        file.unlock()?;
        tracing::debug!("Read {} history records", records.len());
        Ok(records)
    }
}
