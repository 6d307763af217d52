//! Run command: the interactive interval timer.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use pc_core::{
    CompletionKey, DaySelector, KeyValueStore, ProgressStore, SequenceDriver, build_sequence,
};

use crate::Config;
use crate::catalog::Catalog;
use crate::render;
use crate::session::{self, SessionOptions, SessionOutcome, TICK_PERIOD, TickScheduler};

/// Runs the timer for a day, reading commands from stdin.
pub fn run<W: Write, S: KeyValueStore>(
    writer: &mut W,
    catalog: &Catalog,
    progress: &mut ProgressStore<S>,
    config: &Config,
    week: u32,
    selector: &DaySelector,
) -> Result<()> {
    let day = catalog.day(week, selector)?;
    let segments = build_sequence(&day);
    if segments.is_empty() {
        writeln!(writer, "Week {week}: {} has nothing to run.", day.title)?;
        return Ok(());
    }

    writeln!(writer, "Week {week}: {}", day.title)?;
    writeln!(writer, "{}", render::SESSION_HELP)?;
    writeln!(writer)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start timer runtime")?;

    let (tx, rx) = mpsc::channel(16);
    session::spawn_stdin_reader(tx);

    let options = SessionOptions { bell: config.bell };
    let mut driver = SequenceDriver::new(segments);
    let outcome = runtime.block_on(async {
        let mut scheduler = TickScheduler::new(TICK_PERIOD);
        session::run_session(&mut driver, rx, &mut scheduler, writer, options).await
    })?;
    tracing::debug!(index = driver.index(), ?outcome, "session ended");

    finish(
        writer,
        progress,
        CompletionKey::new(week, day.title.as_str()),
        outcome,
        Utc::now(),
    )
}

/// Records the day when the session ended with a mark-done request.
///
/// A failed write is reported as a warning; the session result still stands.
pub fn finish<W: Write, S: KeyValueStore>(
    writer: &mut W,
    progress: &mut ProgressStore<S>,
    key: CompletionKey<'_>,
    outcome: SessionOutcome,
    at: DateTime<Utc>,
) -> Result<()> {
    match outcome {
        SessionOutcome::MarkDone => match progress.mark_done(key, at) {
            Ok(()) => writeln!(writer, "Marked week {}: {} done.", key.week, key.day_title)?,
            Err(err) => {
                tracing::warn!(%err, "failed to save completion");
                writeln!(writer, "warning: could not save completion: {err}")?;
            }
        },
        SessionOutcome::Quit => {}
    }
    Ok(())
}
