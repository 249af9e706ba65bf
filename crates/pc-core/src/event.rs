//! Punch events as recorded by the worker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::Status;
use crate::types::{EventId, SubjectId, ValidationError};

/// A geolocation reading attached to a punch.
///
/// `(0, 0, 0)` is reserved to mean "location unavailable". Use
/// [`Location::UNAVAILABLE`] rather than constructing it by hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Accuracy radius in metres.
    pub accuracy: f64,
}

impl Location {
    /// Sentinel stored when no reading could be taken.
    pub const UNAVAILABLE: Self = Self {
        latitude: 0.0,
        longitude: 0.0,
        accuracy: 0.0,
    };

    /// Creates a location after range validation.
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::CoordinateOutOfRange {
                field: "latitude",
                value: latitude,
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::CoordinateOutOfRange {
                field: "longitude",
                value: longitude,
            });
        }
        if accuracy.is_nan() || accuracy < 0.0 {
            return Err(ValidationError::CoordinateOutOfRange {
                field: "accuracy",
                value: accuracy,
            });
        }
        Ok(Self {
            latitude,
            longitude,
            accuracy,
        })
    }

    /// Returns false for the "location unavailable" sentinel.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_available(&self) -> bool {
        !(self.latitude == 0.0 && self.longitude == 0.0 && self.accuracy == 0.0)
    }

    /// Returns the reading, or `None` for the sentinel.
    #[must_use]
    pub fn reading(&self) -> Option<Self> {
        self.is_available().then_some(*self)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::UNAVAILABLE
    }
}

/// A single status change, immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier, assigned by the store.
    pub id: EventId,
    /// Whose time this event tracks.
    pub subject: SubjectId,
    /// The status the subject moved into.
    pub status: Status,
    /// When the punch happened.
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub location: Location,
}

/// An event that has not been stored yet and so has no id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub subject: SubjectId,
    pub status: Status,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub location: Location,
}

impl NewEvent {
    /// Attaches the store-assigned id.
    #[must_use]
    pub fn with_id(self, id: EventId) -> Event {
        Event {
            id,
            subject: self.subject,
            status: self.status,
            timestamp: self.timestamp,
            location: self.location,
        }
    }
}

/// Status of the most recent event, or clocked out if there are none.
///
/// Ties on timestamp resolve to the event listed last.
pub fn latest_status(events: &[Event]) -> Status {
    events
        .iter()
        .max_by_key(|event| event.timestamp)
        .map_or(Status::ClockedOut, |event| event.status)
}

/// Events at or after `start`, in their original order.
pub fn events_since(events: &[Event], start: DateTime<Utc>) -> Vec<Event> {
    events
        .iter()
        .filter(|event| event.timestamp >= start)
        .cloned()
        .collect()
}
