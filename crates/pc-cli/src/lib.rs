//! Program coach CLI library.
//!
//! This crate provides the CLI interface for the program coach.

pub mod catalog;
mod cli;
pub mod commands;
mod config;
pub mod render;
pub mod session;

pub use cli::{Cli, Commands, DayArgs};
pub use config::Config;
