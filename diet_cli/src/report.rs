//! Plain-text rendering of targets, logs, totals and history.

use diet_core::{
    round2, BmiReport, CalorieTarget, DailyTotals, EntrySource, HistoryRecord, LogEntry, Result,
};
use std::io::Write;

pub fn print_bmi(out: &mut impl Write, report: &BmiReport) -> Result<()> {
    writeln!(out, "BMI Analysis")?;
    writeln!(out, "  Your BMI: {}", round2(report.bmi))?;
    writeln!(out, "  Category: {}", report.category)?;
    writeln!(out, "  {}", report.advice)?;
    Ok(())
}

pub fn print_target(out: &mut impl Write, target: &CalorieTarget) -> Result<()> {
    writeln!(out, "Daily Calorie Target")?;
    writeln!(out, "  BMR: {} kcal", round2(target.bmr))?;
    writeln!(out, "  TDEE: {} kcal", round2(target.tdee))?;
    writeln!(out, "  Final Target: {} kcal", round2(target.target))?;
    Ok(())
}

pub fn print_log(out: &mut impl Write, entries: &[LogEntry]) -> Result<()> {
    if entries.is_empty() {
        writeln!(out, "No food logged yet.")?;
        return Ok(());
    }

    writeln!(out, "Today's Food Log")?;
    writeln!(
        out,
        "{:>4}  {:<28} {:>4} {:>10} {:>9} {:>9} {:>9}",
        "S.No", "Dish", "Qty", "Calories", "Protein", "Carbs", "Fats"
    )?;
    for (i, entry) in entries.iter().enumerate() {
        let marker = match entry.source {
            EntrySource::Catalog => "",
            EntrySource::Custom => " (custom)",
        };
        writeln!(
            out,
            "{:>4}  {:<28} {:>4} {:>10} {:>9} {:>9} {:>9}",
            i + 1,
            format!("{}{}", entry.dish_name, marker),
            entry.quantity,
            round2(entry.macros.calories),
            round2(entry.macros.protein),
            round2(entry.macros.carbs),
            round2(entry.macros.fats),
        )?;
    }
    Ok(())
}

pub fn print_totals(out: &mut impl Write, totals: &DailyTotals, target: f64) -> Result<()> {
    writeln!(out, "Daily Totals")?;
    writeln!(out, "  Calories Consumed: {} kcal", round2(totals.calories))?;
    writeln!(out, "  Protein: {} g", round2(totals.protein))?;
    writeln!(out, "  Carbs: {} g", round2(totals.carbs))?;
    writeln!(out, "  Fats: {} g", round2(totals.fats))?;

    let remaining = totals.remaining(target);
    if remaining > 0.0 {
        writeln!(out, "You can still eat {} kcal today", round2(remaining))?;
    } else {
        writeln!(
            out,
            "You exceeded your limit by {} kcal",
            round2(remaining.abs())
        )?;
    }
    Ok(())
}

pub fn print_history(out: &mut impl Write, records: &[HistoryRecord]) -> Result<()> {
    if records.is_empty() {
        writeln!(out, "No history recorded yet.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<10}  {:<16} {:>10} {:>9} {:>9} {:>9}  {}",
        "Date", "Name", "Calories", "Protein", "Carbs", "Fats", "Status"
    )?;
    for record in records {
        writeln!(
            out,
            "{:<10}  {:<16} {:>10} {:>9} {:>9} {:>9}  {}",
            record.date.format("%Y-%m-%d").to_string(),
            record.name,
            record.totals.calories,
            record.totals.protein,
            record.totals.carbs,
            record.totals.fats,
            record.status,
        )?;
    }
    Ok(())
}
