//! Dispatch telemetry: counters plus a record of requests that found no
//! driver. Insert as a resource; the dispatcher updates it on every request.

use bevy_ecs::prelude::Resource;
use chrono::{DateTime, Utc};

use crate::ids::PassengerId;

/// A trip request that could not be served because no driver qualified.
/// Recorded instead of raised; an empty pool is a normal outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct UnfulfilledRequest {
    pub passenger: PassengerId,
    pub requested_at: DateTime<Utc>,
}

#[derive(Debug, Default, Resource)]
pub struct DispatchTelemetry {
    pub trips_requested: u64,
    pub trips_assigned: u64,
    pub unfulfilled: Vec<UnfulfilledRequest>,
}

impl DispatchTelemetry {
    pub fn record_assigned(&mut self) {
        self.trips_requested += 1;
        self.trips_assigned += 1;
    }

    pub fn record_unfulfilled(&mut self, passenger: PassengerId, requested_at: DateTime<Utc>) {
        self.trips_requested += 1;
        self.unfulfilled.push(UnfulfilledRequest {
            passenger,
            requested_at,
        });
    }
}
