//! Entity components: drivers, passengers, and the trips that link them.
//!
//! The dispatcher's world is the sole owner of every entity; components hold
//! `Entity` handles instead of owned references, so there are no ownership
//! cycles between a trip and its two parties.

use std::fmt;
use std::str::FromStr;

use bevy_ecs::prelude::{Component, Entity};
use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::ids::{DriverId, PassengerId, TripId};

/// A 17-character vehicle identification number, validated at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VehicleId(String);

impl VehicleId {
    pub const LEN: usize = 17;

    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.chars().count() != Self::LEN {
            return Err(ValidationError::InvalidVehicleId { got: raw });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverStatus {
    #[default]
    Available,
    Unavailable,
}

impl FromStr for DriverStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(DriverStatus::Available),
            "UNAVAILABLE" => Ok(DriverStatus::Unavailable),
            other => Err(ValidationError::UnknownStatus {
                got: other.to_string(),
            }),
        }
    }
}

/// A driver and the ordered list of trips they have been handed.
///
/// `trips` preserves append order (bulk load first, then live requests), so
/// the last element is always the most recently assigned trip.
#[derive(Debug, Clone, PartialEq, Component)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub vehicle_id: VehicleId,
    pub status: DriverStatus,
    pub trips: Vec<Entity>,
}

impl Driver {
    pub fn new(id: DriverId, name: impl Into<String>, vehicle_id: VehicleId) -> Self {
        Self {
            id,
            name: name.into(),
            vehicle_id,
            status: DriverStatus::Available,
            trips: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: DriverStatus) -> Self {
        self.status = status;
        self
    }

    /// Append a trip from the bulk-load path. Status is untouched.
    pub fn add_trip(&mut self, trip: Entity) {
        self.trips.push(trip);
    }

    /// Append a trip from the live dispatch path and take the driver off the
    /// available pool. No transition back exists here; completion is handled
    /// elsewhere.
    pub fn add_latest_trip(&mut self, trip: Entity) {
        self.trips.push(trip);
        self.status = DriverStatus::Unavailable;
    }
}

#[derive(Debug, Clone, PartialEq, Component)]
pub struct Passenger {
    pub id: PassengerId,
    pub name: String,
    pub phone: String,
    pub trips: Vec<Entity>,
}

impl Passenger {
    pub fn new(id: PassengerId, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone: phone.into(),
            trips: Vec::new(),
        }
    }

    pub fn add_trip(&mut self, trip: Entity) {
        self.trips.push(trip);
    }
}

/// Terminal state of a trip. Cost and rating only exist once a trip has
/// ended, so callers match instead of checking sentinel fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TripOutcome {
    InProgress,
    Completed {
        ended_at: DateTime<Utc>,
        cost: f64,
        rating: u8,
    },
}

/// One ride linking a driver and a passenger.
#[derive(Debug, Clone, PartialEq, Component)]
pub struct Trip {
    pub id: TripId,
    pub driver: Entity,
    pub passenger: Entity,
    pub started_at: DateTime<Utc>,
    pub outcome: TripOutcome,
}

impl Trip {
    pub fn is_in_progress(&self) -> bool {
        matches!(self.outcome, TripOutcome::InProgress)
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        match self.outcome {
            TripOutcome::InProgress => None,
            TripOutcome::Completed { ended_at, .. } => Some(ended_at),
        }
    }

    pub fn cost(&self) -> Option<f64> {
        match self.outcome {
            TripOutcome::InProgress => None,
            TripOutcome::Completed { cost, .. } => Some(cost),
        }
    }

    pub fn rating(&self) -> Option<u8> {
        match self.outcome {
            TripOutcome::InProgress => None,
            TripOutcome::Completed { rating, .. } => Some(rating),
        }
    }

    /// Seconds between start and end for a completed trip.
    pub fn completed_duration_secs(&self) -> Option<i64> {
        self.ended_at()
            .map(|ended_at| (ended_at - self.started_at).num_seconds())
    }
}
