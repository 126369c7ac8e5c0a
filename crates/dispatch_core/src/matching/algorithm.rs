use bevy_ecs::prelude::Entity;
use chrono::{DateTime, Utc};

/// One driver eligible for a trip request: available status and no trip in
/// progress. `last_dropoff` is the latest completed end time, `None` for a
/// driver who has never finished a trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchCandidate {
    pub driver: Entity,
    pub last_dropoff: Option<DateTime<Utc>>,
}

/// Trait for policies that pick which available driver takes a request.
///
/// Candidates arrive in roster (source) order; policies must be
/// deterministic given the same slice.
pub trait DispatchAlgorithm: Send + Sync {
    /// Pick a driver for the request, or `None` if no candidate qualifies.
    fn select(&self, candidates: &[DispatchCandidate]) -> Option<Entity>;
}
