//! Loading the program and exercise library the commands work from.

use std::path::Path;

use anyhow::{Context, Result};

use pc_core::{
    DaySelector, ExerciseLibrary, Program, ResolvedDay, ResolvedWeek, resolve_week,
};

use crate::Config;

/// The program together with the library its days refer to.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub program: Program,
    pub library: ExerciseLibrary,
}

impl Catalog {
    pub const fn new(program: Program, library: ExerciseLibrary) -> Self {
        Self { program, library }
    }

    /// Loads the configured documents, falling back to the bundled ones.
    pub fn load(config: &Config) -> Result<Self> {
        let program = match &config.program_path {
            Some(path) => Program::from_json(&read(path)?)
                .with_context(|| format!("failed to load program from {}", path.display()))?,
            None => Program::bundled().context("failed to load bundled program")?,
        };
        let library = match &config.library_path {
            Some(path) => ExerciseLibrary::from_json(&read(path)?).with_context(|| {
                format!("failed to load exercise library from {}", path.display())
            })?,
            None => ExerciseLibrary::bundled().context("failed to load bundled exercise library")?,
        };
        tracing::debug!(
            program = %program.program_name,
            weeks = program.weeks.len(),
            exercises = library.len(),
            "loaded catalog"
        );
        Ok(Self { program, library })
    }

    /// Week numbers in program order.
    pub fn week_numbers(&self) -> Vec<u32> {
        self.program.weeks.iter().map(|w| w.week).collect()
    }

    /// Resolves a week by number.
    pub fn week(&self, number: u32) -> Result<ResolvedWeek> {
        let week = self.program.week(number).with_context(|| {
            let available: Vec<String> =
                self.week_numbers().iter().map(ToString::to_string).collect();
            format!(
                "week {number} not found (available: {})",
                available.join(", ")
            )
        })?;
        Ok(resolve_week(week, &self.library))
    }

    /// Resolves a single day of a week.
    pub fn day(&self, week: u32, selector: &DaySelector) -> Result<ResolvedDay> {
        let resolved = self.week(week)?;
        let day = resolved
            .day(selector)
            .with_context(|| format!("day {selector} not found in week {week}"))?;
        Ok(day.clone())
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
