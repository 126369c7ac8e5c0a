//! Shared test fixtures: a known VIN, a pinned clock, and world-building
//! shortcuts used across test modules.

use bevy_ecs::prelude::{Entity, World};
use chrono::{DateTime, Utc};

use crate::clock::DispatchClock;
use crate::dispatcher::Dispatcher;
use crate::ecs::{Driver, Passenger, Trip, TripOutcome, VehicleId};
use crate::ids::{DriverId, PassengerId, TripId};

/// A valid 17-character VIN used across test files for consistency.
pub const TEST_VIN: &str = "1C9EVBRM0YBC564DZ";

/// The instant every pinned test clock reads.
pub const FIXED_NOW: &str = "2016-08-16T09:00:00+00:00";

pub fn test_vehicle_id() -> VehicleId {
    VehicleId::new(TEST_VIN).expect("TEST_VIN is 17 characters")
}

/// Parse an RFC 3339 timestamp literal.
///
/// # Panics
///
/// Panics on a malformed literal; test data is written inline.
pub fn ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

/// Empty dispatcher with the clock pinned to [FIXED_NOW].
pub fn test_dispatcher() -> Dispatcher {
    Dispatcher::new().with_clock(DispatchClock::fixed(ts(FIXED_NOW)))
}

/// Spawn a bare driver (no trips, available) directly into `world`.
pub fn spawn_test_driver(world: &mut World, raw_id: i64) -> Entity {
    let driver = Driver::new(
        DriverId::new(raw_id).expect("positive test id"),
        "Rogers Bartell IV",
        test_vehicle_id(),
    );
    world.spawn(driver).id()
}

fn spawn_counterparty(world: &mut World) -> Entity {
    world
        .spawn(Passenger::new(
            PassengerId::new(1).expect("positive test id"),
            "Ada",
            "412-432-7640",
        ))
        .id()
}

/// Spawn a completed trip for `driver` and append it via the bulk path.
pub fn attach_completed_trip(
    world: &mut World,
    driver: Entity,
    raw_trip_id: i64,
    started_at: &str,
    ended_at: &str,
    cost: f64,
    rating: u8,
) -> Entity {
    let passenger = spawn_counterparty(world);
    let trip = world
        .spawn(Trip {
            id: TripId::new(raw_trip_id).expect("positive test id"),
            driver,
            passenger,
            started_at: ts(started_at),
            outcome: TripOutcome::Completed {
                ended_at: ts(ended_at),
                cost,
                rating,
            },
        })
        .id();
    world
        .get_mut::<Driver>(driver)
        .expect("spawned test driver")
        .add_trip(trip);
    trip
}

/// Spawn an in-progress trip for `driver` and append it via the bulk path.
pub fn attach_open_trip(
    world: &mut World,
    driver: Entity,
    raw_trip_id: i64,
    started_at: &str,
) -> Entity {
    let passenger = spawn_counterparty(world);
    let trip = world
        .spawn(Trip {
            id: TripId::new(raw_trip_id).expect("positive test id"),
            driver,
            passenger,
            started_at: ts(started_at),
            outcome: TripOutcome::InProgress,
        })
        .id();
    world
        .get_mut::<Driver>(driver)
        .expect("spawned test driver")
        .add_trip(trip);
    trip
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vin_is_valid() {
        assert_eq!(test_vehicle_id().as_str(), TEST_VIN);
    }

    #[test]
    fn attach_helpers_append_in_order() {
        let mut world = World::new();
        let driver = spawn_test_driver(&mut world, 54);
        let first = attach_completed_trip(
            &mut world,
            driver,
            1,
            "2015-05-20T12:14:00+00:00",
            "2015-05-20T14:16:23+00:00",
            4.0,
            5,
        );
        let second = attach_open_trip(&mut world, driver, 2, "2015-05-20T15:00:00+00:00");

        let trips = &world.get::<Driver>(driver).expect("driver").trips;
        assert_eq!(trips.as_slice(), &[first, second]);
    }
}
