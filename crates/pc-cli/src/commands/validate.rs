//! Validate command for checking program and library documents.

use std::collections::BTreeSet;
use std::io::Write;

use anyhow::Result;

use crate::catalog::Catalog;

/// Reports a summary of an already-validated catalog.
///
/// Schema violations never get this far: they fail while loading. What is
/// left to report are exercise IDs the library does not define, which the
/// app tolerates but which show up as placeholders.
pub fn run<W: Write>(writer: &mut W, catalog: &Catalog) -> Result<()> {
    let program = &catalog.program;
    let days: usize = program.weeks.iter().map(|w| w.days.len()).sum();

    writeln!(
        writer,
        "Program: {} ({} weeks, {days} days)",
        program.program_name,
        program.weeks.len()
    )?;
    writeln!(writer, "Library: {} exercises", catalog.library.len())?;

    let mut missing = BTreeSet::new();
    for week in &program.weeks {
        for day in &week.days {
            for id in &day.exercise_ids {
                if catalog.library.get(id).is_none() {
                    missing.insert(format!("week {}, {}: {id}", week.week, day.title));
                }
            }
        }
    }

    if missing.is_empty() {
        writeln!(writer, "All exercise references resolve.")?;
    } else {
        writeln!(writer, "Missing exercises:")?;
        for entry in missing {
            writeln!(writer, "- {entry}")?;
        }
    }

    Ok(())
}
