//! CLI subcommand implementations.

pub mod chart;
pub mod events;
pub mod punch;
pub mod report;
pub mod status;
pub mod util;
