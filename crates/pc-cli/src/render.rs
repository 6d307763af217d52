//! Text rendering shared by the commands and the timer session.

use pc_core::{Progress, Segment, SequenceDriver, TimerState};

const REST_HINT: &str = "Breathe, shake out, and get ready.";
const BAR_WIDTH: usize = 20;

/// Formats seconds as `MM:SS`.
pub fn mmss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// A fixed-width progress bar.
pub fn progress_bar(progress: Progress) -> String {
    let filled = if progress.total == 0 {
        0
    } else {
        let ratio = progress.elapsed.min(progress.total) * BAR_WIDTH as u64 / progress.total;
        usize::try_from(ratio).unwrap_or(BAR_WIDTH)
    };
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// The heading shown when a segment becomes current.
pub fn segment_header(driver: &SequenceDriver) -> String {
    let Some(segment) = driver.current() else {
        return "Nothing to do: this day has no segments.".to_string();
    };
    let position = format!("{}/{}", driver.index() + 1, driver.segments().len());
    let mut lines = Vec::new();

    if segment.is_work() {
        lines.push(format!(
            "WORK {position}  {}",
            segment.exercise_name.as_deref().unwrap_or("Work")
        ));
        if let Some(description) = segment.exercise_description.as_deref() {
            lines.push(format!("  {description}"));
        }
    } else {
        lines.push(format!("REST {position}"));
        lines.push(format!("  {REST_HINT}"));
        if let Some(next) = driver.up_next() {
            lines.push(format!("  Up next: {}", next_name(next)));
        }
    }

    lines.join("\n")
}

fn next_name(segment: &Segment) -> &str {
    segment.exercise_name.as_deref().unwrap_or("Work")
}

/// One-line countdown status for the current segment.
pub fn status_line(driver: &SequenceDriver) -> String {
    let timer = driver.timer();
    let state = match timer.state() {
        TimerState::Idle => "ready",
        TimerState::Running => "running",
        TimerState::Paused => "paused",
        TimerState::Expired => "done",
    };
    let progress = driver.progress();
    format!(
        "{}  {state:<7}  {} {}/{}",
        mmss(u64::from(timer.remaining())),
        progress_bar(progress),
        mmss(progress.elapsed),
        mmss(progress.total),
    )
}

/// Key bindings for the timer session.
pub const SESSION_HELP: &str = "\
Commands (type and press Enter):
  <Enter>  start/pause      s  start      p  pause
  r        reset segment    n  skip       R  restart day
  d        mark day done    q  quit       ?  help";
