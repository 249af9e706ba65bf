//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Duration;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use pc_core::{
    OpenBreakPolicy, SessionPolicy, SubjectId, TrailingIntervalPolicy, ValidationError, WeekStart,
};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// Whose time is tracked.
    pub subject: String,
    /// Hours in a standard workday; work beyond this is overtime.
    pub standard_workday_hours: f64,
    /// First day of the week for charts.
    pub week_start: WeekStart,
    /// Maximum number of events read from the store at once.
    pub list_limit: usize,
    pub open_break_at_clock_out: OpenBreakPolicy,
    pub trailing_interval: TrailingIntervalPolicy,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("subject", &self.subject)
            .field("standard_workday_hours", &self.standard_workday_hours)
            .field("week_start", &self.week_start)
            .field("list_limit", &self.list_limit)
            .field("open_break_at_clock_out", &self.open_break_at_clock_out)
            .field("trailing_interval", &self.trailing_interval)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("punchclock.db"),
            subject: "default".to_string(),
            standard_workday_hours: 8.0,
            week_start: WeekStart::default(),
            list_limit: 10_000,
            open_break_at_clock_out: OpenBreakPolicy::default(),
            trailing_interval: TrailingIntervalPolicy::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default locations, then `config_path` if
    /// given, then `PC_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (PC_*)
        figment = figment.merge(Env::prefixed("PC_"));

        figment.extract()
    }

    /// The tracked subject as a validated id.
    pub fn subject_id(&self) -> Result<SubjectId, ValidationError> {
        SubjectId::new(self.subject.clone())
    }

    /// Builds the reconstruction policy from the configured values.
    #[allow(clippy::cast_possible_truncation)]
    pub fn session_policy(&self) -> SessionPolicy {
        let workday_ms = (self.standard_workday_hours.max(0.0) * 3_600_000.0).round() as i64;
        SessionPolicy {
            standard_workday: Duration::milliseconds(workday_ms),
            open_break_at_clock_out: self.open_break_at_clock_out,
            trailing_interval: self.trailing_interval,
        }
    }
}

/// Returns the platform-specific config directory for punchclock.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("punchclock"))
}

/// Returns the platform-specific data directory for punchclock.
///
/// On Linux: `~/.local/share/punchclock`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("punchclock"))
}
