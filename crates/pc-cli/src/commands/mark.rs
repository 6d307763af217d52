//! Done/undone commands for completion records.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use pc_core::{CompletionKey, DaySelector, KeyValueStore, ProgressStore};

use crate::catalog::Catalog;

/// Marks a day done at `at`.
pub fn done<W: Write, S: KeyValueStore>(
    writer: &mut W,
    catalog: &Catalog,
    progress: &mut ProgressStore<S>,
    week: u32,
    selector: &DaySelector,
    at: DateTime<Utc>,
) -> Result<()> {
    let day = catalog.day(week, selector)?;
    progress
        .mark_done(CompletionKey::new(week, day.title.as_str()), at)
        .context("failed to save completion")?;
    writeln!(writer, "Marked week {week}: {} done.", day.title)?;
    Ok(())
}

/// Removes a day's completion record.
pub fn undone<W: Write, S: KeyValueStore>(
    writer: &mut W,
    catalog: &Catalog,
    progress: &mut ProgressStore<S>,
    week: u32,
    selector: &DaySelector,
) -> Result<()> {
    let day = catalog.day(week, selector)?;
    let removed = progress
        .unmark_done(CompletionKey::new(week, day.title.as_str()))
        .context("failed to remove completion")?;
    if removed {
        writeln!(writer, "Unmarked week {week}: {}.", day.title)?;
    } else {
        writeln!(writer, "Week {week}: {} was not marked done.", day.title)?;
    }
    Ok(())
}
