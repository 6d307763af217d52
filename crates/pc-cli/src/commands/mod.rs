//! CLI subcommand implementations.

pub mod day;
pub mod home;
pub mod mark;
pub mod plan;
pub mod run;
pub mod status;
pub mod validate;
