//! Punch status enum as the single source of truth for status strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::ValidationError;

/// The status a punch moves the worker into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    ClockedIn,
    ClockedOut,
    OnBreak,
    OnLunch,
}

impl Status {
    /// Every status, in the order they are usually shown.
    pub const ALL: [Self; 4] = [Self::ClockedIn, Self::OnBreak, Self::OnLunch, Self::ClockedOut];

    /// String representation for storage and JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ClockedIn => "clocked-in",
            Self::ClockedOut => "clocked-out",
            Self::OnBreak => "on-break",
            Self::OnLunch => "on-lunch",
        }
    }

    /// Statuses a worker may punch into from this one.
    ///
    /// Clocked out can only clock in. While working, any pause or clocking
    /// out is allowed. A pause can only be ended by clocking back in.
    #[must_use]
    pub const fn allowed_next(self) -> &'static [Self] {
        match self {
            Self::ClockedOut => &[Self::ClockedIn],
            Self::ClockedIn => &[Self::OnLunch, Self::OnBreak, Self::ClockedOut],
            Self::OnBreak | Self::OnLunch => &[Self::ClockedIn],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next().contains(&next)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clocked-in" => Ok(Self::ClockedIn),
            "clocked-out" => Ok(Self::ClockedOut),
            "on-break" => Ok(Self::OnBreak),
            "on-lunch" => Ok(Self::OnLunch),
            _ => Err(ValidationError::UnknownStatus {
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for Status {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_variants() {
        for variant in &Status::ALL {
            let s = variant.to_string();
            let parsed: Status = s.parse().expect("should parse");
            assert_eq!(parsed, *variant, "roundtrip failed for {variant:?}");
        }
    }

    #[test]
    fn unknown_status_errors() {
        let result: Result<Status, _> = "on-vacation".parse();
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "unknown status: on-vacation");
    }

    #[test]
    fn serde_uses_kebab_case_strings() {
        let json = serde_json::to_string(&Status::OnLunch).unwrap();
        assert_eq!(json, "\"on-lunch\"");
        let parsed: Status = serde_json::from_str("\"clocked-out\"").unwrap();
        assert_eq!(parsed, Status::ClockedOut);
        assert!(serde_json::from_str::<Status>("\"clocked_out\"").is_err());
    }

    #[test]
    fn clocked_out_can_only_clock_in() {
        assert!(Status::ClockedOut.can_transition_to(Status::ClockedIn));
        assert!(!Status::ClockedOut.can_transition_to(Status::OnBreak));
        assert!(!Status::ClockedOut.can_transition_to(Status::ClockedOut));
    }

    #[test]
    fn working_can_pause_or_leave() {
        assert!(Status::ClockedIn.can_transition_to(Status::OnBreak));
        assert!(Status::ClockedIn.can_transition_to(Status::OnLunch));
        assert!(Status::ClockedIn.can_transition_to(Status::ClockedOut));
        assert!(!Status::ClockedIn.can_transition_to(Status::ClockedIn));
    }

    #[test]
    fn pauses_resume_by_clocking_in() {
        for pause in [Status::OnBreak, Status::OnLunch] {
            assert_eq!(pause.allowed_next(), &[Status::ClockedIn]);
        }
    }
}
