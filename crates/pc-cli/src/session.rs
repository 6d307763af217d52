//! Interactive timer session.
//!
//! A session owns exactly one [`TickScheduler`]. The scheduler is created
//! when the session starts and dropped when it ends, so no tick source can
//! outlive the view that consumes it.
//!
//! The loop multiplexes user commands and ticks with `tokio::select!` on a
//! single task. Each branch runs to completion before the next one is
//! polled, so a tick is never applied in the middle of a user transition.

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use pc_core::{DriverEvent, SequenceDriver};

use crate::render;

/// One countdown step.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owns the tick source for one session.
#[derive(Debug)]
pub struct TickScheduler {
    interval: Interval,
}

impl TickScheduler {
    /// Creates a scheduler whose first tick is one `period` away.
    ///
    /// Must be called from within a Tokio runtime with time enabled.
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    /// Pushes the next tick a full period into the future.
    pub fn rearm(&mut self) {
        self.interval.reset();
    }

    /// Waits for the next tick.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// A user action during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Pause,
    Toggle,
    Reset,
    Skip,
    Restart,
    Done,
    Quit,
    Help,
}

/// Maps one line of input to a command. Unknown input yields `None`.
pub fn parse_command(line: &str) -> Option<SessionCommand> {
    let command = match line.trim() {
        "" => SessionCommand::Toggle,
        "s" | "start" => SessionCommand::Start,
        "p" | "pause" => SessionCommand::Pause,
        "r" | "reset" => SessionCommand::Reset,
        "n" | "skip" | "next" => SessionCommand::Skip,
        "R" | "restart" => SessionCommand::Restart,
        "d" | "done" => SessionCommand::Done,
        "q" | "quit" | "exit" => SessionCommand::Quit,
        "?" | "h" | "help" => SessionCommand::Help,
        _ => return None,
    };
    Some(command)
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The whole day ran to completion and the user asked to record it.
    MarkDone,
    /// The user left, or input closed.
    Quit,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Ring the terminal bell on segment changes.
    pub bell: bool,
}

/// Forwards stdin lines to the session from a dedicated thread.
///
/// The thread ends at EOF, on a read error, or on the first line after the
/// session has gone away.
pub fn spawn_stdin_reader(tx: mpsc::Sender<SessionCommand>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let command = parse_command(&line).unwrap_or(SessionCommand::Help);
            if tx.blocking_send(command).is_err() {
                break;
            }
        }
    });
}

/// Runs the session until the user quits, marks the day done, or input closes.
pub async fn run_session<W: Write>(
    driver: &mut SequenceDriver,
    mut commands: mpsc::Receiver<SessionCommand>,
    scheduler: &mut TickScheduler,
    out: &mut W,
    options: SessionOptions,
) -> Result<SessionOutcome> {
    writeln!(out, "{}", render::segment_header(driver))?;
    writeln!(out, "{}", render::status_line(driver))?;
    out.flush()?;

    loop {
        tokio::select! {
            biased;

            command = commands.recv() => {
                let Some(command) = command else {
                    tracing::debug!("input closed, leaving session");
                    return Ok(SessionOutcome::Quit);
                };
                if let Some(outcome) = apply_command(driver, scheduler, command, out)? {
                    return Ok(outcome);
                }
            }

            () = scheduler.tick(), if driver.is_running() => {
                on_tick(driver, out, options)?;
            }
        }
        out.flush()?;
    }
}

fn apply_command<W: Write>(
    driver: &mut SequenceDriver,
    scheduler: &mut TickScheduler,
    command: SessionCommand,
    out: &mut W,
) -> Result<Option<SessionOutcome>> {
    tracing::debug!(?command, index = driver.index(), "session command");
    let was_running = driver.is_running();
    let index = driver.index();

    match command {
        SessionCommand::Start => driver.start(),
        SessionCommand::Pause => driver.pause(),
        SessionCommand::Toggle => driver.toggle(),
        SessionCommand::Reset => driver.reset_segment(),
        SessionCommand::Skip => driver.skip(),
        SessionCommand::Restart => driver.restart_day(),
        SessionCommand::Done => {
            if driver.can_mark_done() {
                return Ok(Some(SessionOutcome::MarkDone));
            }
            writeln!(
                out,
                "The day can be marked done once the last segment has run out."
            )?;
            return Ok(None);
        }
        SessionCommand::Quit => return Ok(Some(SessionOutcome::Quit)),
        SessionCommand::Help => {
            writeln!(out, "{}", render::SESSION_HELP)?;
            return Ok(None);
        }
    }

    if driver.is_running() && !was_running {
        scheduler.rearm();
    }
    if driver.index() != index {
        writeln!(out, "{}", render::segment_header(driver))?;
    }
    writeln!(out, "{}", render::status_line(driver))?;
    Ok(None)
}

fn on_tick<W: Write>(
    driver: &mut SequenceDriver,
    out: &mut W,
    options: SessionOptions,
) -> Result<()> {
    match driver.tick() {
        DriverEvent::Idle => {}
        DriverEvent::Ticked { .. } => {
            writeln!(out, "{}", render::status_line(driver))?;
        }
        DriverEvent::Advanced { .. } => {
            if options.bell {
                write!(out, "\x07")?;
            }
            writeln!(out, "{}", render::segment_header(driver))?;
            writeln!(out, "{}", render::status_line(driver))?;
        }
        DriverEvent::Finished => {
            if options.bell {
                write!(out, "\x07")?;
            }
            writeln!(out, "{}", render::status_line(driver))?;
            writeln!(out, "Workout complete! Enter d to mark the day done, q to quit.")?;
        }
    }
    Ok(())
}
