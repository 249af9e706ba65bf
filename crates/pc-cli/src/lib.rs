//! Punch clock CLI library.
//!
//! This crate provides the CLI interface for punchclock.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, PunchArgs};
pub use config::Config;
