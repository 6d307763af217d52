//! Day command: one day's exercises and completion status.

use std::io::Write;

use anyhow::Result;

use pc_core::{CompletionKey, DaySelector, KeyValueStore, ProgressStore};

use crate::catalog::Catalog;

pub fn run<W: Write, S: KeyValueStore>(
    writer: &mut W,
    catalog: &Catalog,
    progress: &ProgressStore<S>,
    week: u32,
    selector: &DaySelector,
) -> Result<()> {
    let day = catalog.day(week, selector)?;
    let done_at = progress
        .completed_at(CompletionKey::new(week, day.title.as_str()))
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "failed to read completion record");
            eprintln!("warning: could not read completion record: {err}");
            None
        });

    writeln!(writer, "Week {week}: {}", day.title)?;
    writeln!(
        writer,
        "Rounds: {} · Work: {}s · Rest: {}s",
        day.rounds, day.work_sec, day.rest_sec
    )?;
    writeln!(writer)?;

    for (i, exercise) in day.exercises.iter().enumerate() {
        writeln!(writer, "{}. {}", i + 1, exercise.name)?;
        writeln!(writer, "   {}", exercise.description)?;
    }
    writeln!(writer)?;

    match done_at {
        Some(at) => writeln!(writer, "Done: {}", at.format("%Y-%m-%d %H:%M UTC"))?,
        None => writeln!(writer, "Not done yet.")?,
    }

    Ok(())
}
