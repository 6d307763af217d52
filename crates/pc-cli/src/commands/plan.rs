//! Plan command: the timed segments of a day.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use pc_core::sequence::total_seconds;
use pc_core::{DaySelector, Segment, build_sequence};

use crate::catalog::Catalog;
use crate::render::mmss;

#[derive(Debug, Serialize)]
struct PlanView<'a> {
    week: u32,
    day: &'a str,
    total_seconds: u64,
    segments: &'a [Segment],
}

pub fn run<W: Write>(
    writer: &mut W,
    catalog: &Catalog,
    week: u32,
    selector: &DaySelector,
    json: bool,
) -> Result<()> {
    let day = catalog.day(week, selector)?;
    let segments = build_sequence(&day);
    let total = total_seconds(&segments);

    if json {
        let view = PlanView {
            week,
            day: day.title.as_str(),
            total_seconds: total,
            segments: &segments,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&view)?)?;
        return Ok(());
    }

    writeln!(
        writer,
        "Week {week}: {} ({} segments, {} total)",
        day.title,
        segments.len(),
        mmss(total)
    )?;
    writeln!(writer)?;

    let width = segments.len().to_string().len();
    for (i, segment) in segments.iter().enumerate() {
        let label = segment.kind.as_str().to_uppercase();
        let line = format!(
            "{:>width$}. {label}  {}  {}",
            i + 1,
            mmss(u64::from(segment.seconds)),
            segment.exercise_name.as_deref().unwrap_or_default()
        );
        writeln!(writer, "{}", line.trim_end())?;
    }

    Ok(())
}
