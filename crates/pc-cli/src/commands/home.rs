//! Home command: the week overview.
//!
//! Completion stamps for the whole week are loaded in one step before
//! anything is rendered. A store that cannot be read only costs the done
//! badges; the overview is still shown.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use pc_core::{KeyValueStore, ProgressStore, ResolvedWeek};

use crate::catalog::Catalog;

/// Data behind the overview, also the JSON output shape.
#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub program_name: String,
    pub week: u32,
    pub weeks: Vec<u32>,
    pub rounds: u32,
    pub work_sec: u32,
    pub rest_sec: u32,
    pub rest_days_per_week: u32,
    pub days: Vec<HomeDay>,
    pub session_notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeDay {
    pub index: usize,
    pub title: String,
    pub done_at: Option<DateTime<Utc>>,
}

/// Picks the week to show: an explicit choice (remembered), else the
/// remembered one if it still exists, else the first week.
fn select_week<S: KeyValueStore>(
    catalog: &Catalog,
    progress: &mut ProgressStore<S>,
    requested: Option<u32>,
) -> Result<ResolvedWeek> {
    if let Some(number) = requested {
        let week = catalog.week(number)?;
        if let Err(err) = progress.set_last_week(number) {
            tracing::warn!(%err, "failed to remember selected week");
        }
        return Ok(week);
    }

    let remembered = progress.last_week().unwrap_or_else(|err| {
        tracing::warn!(%err, "failed to read remembered week");
        None
    });
    let number = remembered
        .filter(|n| catalog.program.week(*n).is_some())
        .or_else(|| catalog.program.first_week().map(|w| w.week))
        .unwrap_or(1);
    catalog.week(number)
}

/// Builds the overview for a week.
pub fn build_view<S: KeyValueStore>(
    catalog: &Catalog,
    progress: &mut ProgressStore<S>,
    requested: Option<u32>,
) -> Result<HomeView> {
    let week = select_week(catalog, progress, requested)?;

    let stamps = progress.load_week(&week).unwrap_or_else(|err| {
        tracing::warn!(%err, "failed to load completion records");
        eprintln!("warning: could not read completion records: {err}");
        vec![None; week.days.len()]
    });

    let days = week
        .days
        .iter()
        .zip(stamps)
        .enumerate()
        .map(|(i, (day, done_at))| HomeDay {
            index: i + 1,
            title: day.title.to_string(),
            done_at,
        })
        .collect();

    Ok(HomeView {
        program_name: catalog.program.program_name.clone(),
        week: week.week,
        weeks: catalog.week_numbers(),
        rounds: week.rounds,
        work_sec: week.work_sec,
        rest_sec: week.rest_sec,
        rest_days_per_week: catalog.program.rest_days_per_week,
        days,
        session_notes: catalog.program.session_notes.clone(),
    })
}

/// Formats the overview for humans.
pub fn format_home(view: &HomeView) -> String {
    let mut lines = Vec::new();
    let weeks: Vec<String> = view.weeks.iter().map(ToString::to_string).collect();

    lines.push(view.program_name.clone());
    lines.push(String::new());
    lines.push(format!("Week {} (weeks: {})", view.week, weeks.join(", ")));
    lines.push(format!(
        "Rounds: {} · Work: {}s · Rest: {}s · Rest days per week: {}",
        view.rounds, view.work_sec, view.rest_sec, view.rest_days_per_week
    ));
    lines.push(String::new());

    let width = view.days.iter().map(|d| d.title.chars().count()).max().unwrap_or(0);
    for day in &view.days {
        let badge = if day.done_at.is_some() { "✓ Done" } else { "" };
        let line = format!("  {}. {:<width$}  {badge}", day.index, day.title);
        lines.push(line.trim_end().to_string());
    }

    if !view.session_notes.is_empty() {
        lines.push(String::new());
        lines.push("Session notes".to_string());
        lines.push(format!("  {}", view.session_notes));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

pub fn run<W: Write, S: KeyValueStore>(
    writer: &mut W,
    catalog: &Catalog,
    progress: &mut ProgressStore<S>,
    week: Option<u32>,
    json: bool,
) -> Result<()> {
    let view = build_view(catalog, progress, week)?;
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&view)?)?;
    } else {
        write!(writer, "{}", format_home(&view))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use pc_core::{CompletionKey, KeyValueStore, MemoryStore};

    use crate::catalog::tests::sample;

    fn stamp(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn home_lists_days_with_done_badges() {
        let catalog = sample();
        let mut progress = ProgressStore::new(MemoryStore::new(), "pc");
        progress
            .mark_done(CompletionKey::new(1, "Legs"), stamp("2025-02-01T07:00:00Z"))
            .unwrap();

        let mut output = Vec::new();
        run(&mut output, &catalog, &mut progress, None, false).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Sample Program

        Week 1 (weeks: 1, 2)
        Rounds: 2 · Work: 30s · Rest: 10s · Rest days per week: 2

          1. Push
          2. Legs  ✓ Done

        Session notes
          Warm up first.
        ");
    }

    #[test]
    fn explicit_week_is_remembered() {
        let catalog = sample();
        let mut progress = ProgressStore::new(MemoryStore::new(), "pc");

        let view = build_view(&catalog, &mut progress, Some(2)).unwrap();
        assert_eq!(view.week, 2);
        assert_eq!(progress.last_week().unwrap(), Some(2));

        let view = build_view(&catalog, &mut progress, None).unwrap();
        assert_eq!(view.week, 2);
        assert_eq!(view.work_sec, 40);
    }

    #[test]
    fn stale_remembered_week_falls_back_to_first() {
        let catalog = sample();
        let mut store = MemoryStore::new();
        store.set("pc:lastWeek", "7").unwrap();
        let mut progress = ProgressStore::new(store, "pc");

        let view = build_view(&catalog, &mut progress, None).unwrap();
        assert_eq!(view.week, 1);
    }

    #[test]
    fn unknown_week_is_an_error() {
        let catalog = sample();
        let mut progress = ProgressStore::new(MemoryStore::new(), "pc");
        let err = build_view(&catalog, &mut progress, Some(5)).unwrap_err();
        assert!(err.to_string().contains("week 5 not found"));
        assert_eq!(progress.last_week().unwrap(), None);
    }

    #[test]
    fn unreadable_stamp_drops_badges_only() {
        let catalog = sample();
        let mut store = MemoryStore::new();
        store.set("pc:done:w1:Push", "not a time").unwrap();
        let mut progress = ProgressStore::new(store, "pc");

        let view = build_view(&catalog, &mut progress, Some(1)).unwrap();
        assert_eq!(view.days.len(), 2);
        assert!(view.days.iter().all(|d| d.done_at.is_none()));
    }

    #[test]
    fn home_json_output() {
        let catalog = sample();
        let mut progress = ProgressStore::new(MemoryStore::new(), "pc");
        let mut output = Vec::new();
        run(&mut output, &catalog, &mut progress, Some(2), true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["week"], 2);
        assert_eq!(value["days"][0]["title"], "Push");
        assert_eq!(value["days"][0]["index"], 1);
        assert!(value["days"][0]["done_at"].is_null());
    }
}
