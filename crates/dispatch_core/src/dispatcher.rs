//! The dispatcher: sole owner of all drivers, passengers, and trips, and the
//! mutation entry point for live trip requests.
//!
//! Entities live in a [World]; ordered entity lists are kept in a
//! [DispatchRoster] resource so lookups and selection never depend on
//! archetype iteration order.

use bevy_ecs::prelude::{Entity, Resource, World};
use chrono::{DateTime, Utc};

use crate::clock::DispatchClock;
use crate::ecs::{Driver, DriverStatus, Passenger, Trip, TripOutcome};
use crate::error::ValidationError;
use crate::ids::{DriverId, PassengerId, TripId};
use crate::matching::{
    DispatchAlgorithm, DispatchAlgorithmResource, DispatchCandidate, LeastRecentDispatch,
};
use crate::metrics;
use crate::telemetry::DispatchTelemetry;

/// Source-ordered entity lists. `trips` is append-only; its last element is
/// the most recently created trip.
#[derive(Debug, Default, Resource)]
pub struct DispatchRoster {
    pub drivers: Vec<Entity>,
    pub passengers: Vec<Entity>,
    pub trips: Vec<Entity>,
}

/// A fully populated historical trip, as handed over by the data-access
/// layer. Driver and passenger are referenced by id and resolved against the
/// roster when the record is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedTripRecord {
    pub trip_id: TripId,
    pub driver_id: DriverId,
    pub passenger_id: PassengerId,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub cost: f64,
    pub rating: u8,
}

pub struct Dispatcher {
    world: World,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Empty dispatcher with the system clock and the default
    /// [LeastRecentDispatch] policy.
    pub fn new() -> Self {
        let mut world = World::new();
        world.insert_resource(DispatchRoster::default());
        world.insert_resource(DispatchTelemetry::default());
        world.insert_resource(DispatchClock::system());
        world.insert_resource(DispatchAlgorithmResource::new(Box::new(
            LeastRecentDispatch,
        )));
        Self { world }
    }

    pub fn with_clock(mut self, clock: DispatchClock) -> Self {
        self.world.insert_resource(clock);
        self
    }

    /// Replace the driver-selection policy.
    pub fn set_algorithm(&mut self, algorithm: Box<dyn DispatchAlgorithm>) {
        self.world
            .insert_resource(DispatchAlgorithmResource::new(algorithm));
    }

    pub fn add_driver(&mut self, driver: Driver) -> Entity {
        let entity = self.world.spawn(driver).id();
        self.world.resource_mut::<DispatchRoster>().drivers.push(entity);
        entity
    }

    pub fn add_passenger(&mut self, passenger: Passenger) -> Entity {
        let entity = self.world.spawn(passenger).id();
        self.world
            .resource_mut::<DispatchRoster>()
            .passengers
            .push(entity);
        entity
    }

    /// Bulk-load path: apply one historical trip record, wiring the trip into
    /// the driver's and passenger's lists and the dispatcher ledger. Fails
    /// when either referenced id resolves to nobody. Driver status is not
    /// touched; the trip already ended.
    pub fn record_completed_trip(
        &mut self,
        record: CompletedTripRecord,
    ) -> Result<Entity, ValidationError> {
        let driver = self
            .find_driver(record.driver_id)
            .ok_or(ValidationError::UnknownDriver(record.driver_id))?;
        let passenger = self
            .find_passenger(record.passenger_id)
            .ok_or(ValidationError::UnknownPassenger(record.passenger_id))?;

        let trip = self
            .world
            .spawn(Trip {
                id: record.trip_id,
                driver,
                passenger,
                started_at: record.started_at,
                outcome: TripOutcome::Completed {
                    ended_at: record.ended_at,
                    cost: record.cost,
                    rating: record.rating,
                },
            })
            .id();
        self.link_trip(trip, driver, passenger, false);
        Ok(trip)
    }

    /// First driver in roster order with this id, or `None`. Absence is a
    /// legitimate outcome, not an error; malformed raw ids are rejected at
    /// [DriverId] construction.
    pub fn find_driver(&self, id: DriverId) -> Option<Entity> {
        self.world
            .resource::<DispatchRoster>()
            .drivers
            .iter()
            .copied()
            .find(|&entity| {
                self.world
                    .get::<Driver>(entity)
                    .is_some_and(|driver| driver.id == id)
            })
    }

    pub fn find_passenger(&self, id: PassengerId) -> Option<Entity> {
        self.world
            .resource::<DispatchRoster>()
            .passengers
            .iter()
            .copied()
            .find(|&entity| {
                self.world
                    .get::<Passenger>(entity)
                    .is_some_and(|passenger| passenger.id == id)
            })
    }

    /// Run the configured policy over drivers that are available and not
    /// mid-trip. `None` when nobody qualifies.
    pub fn find_available_driver(&self) -> Option<Entity> {
        let candidates: Vec<DispatchCandidate> = self
            .world
            .resource::<DispatchRoster>()
            .drivers
            .iter()
            .copied()
            .filter_map(|entity| {
                let driver = self.world.get::<Driver>(entity)?;
                if driver.status != DriverStatus::Available
                    || metrics::is_trip_in_progress(&self.world, entity)
                {
                    return None;
                }
                Some(DispatchCandidate {
                    driver: entity,
                    last_dropoff: metrics::recent_trip_end_time(&self.world, entity),
                })
            })
            .collect();
        self.world
            .resource::<DispatchAlgorithmResource>()
            .select(&candidates)
    }

    /// Live dispatch path. Fails for an unknown passenger id; returns
    /// `Ok(None)` and records an [crate::telemetry::UnfulfilledRequest] when
    /// no driver qualifies. Otherwise creates an in-progress trip starting
    /// now, hands it to the selected driver (who goes unavailable) and the
    /// passenger, and appends it to the ledger.
    pub fn request_trip(
        &mut self,
        passenger_id: PassengerId,
    ) -> Result<Option<Entity>, ValidationError> {
        let passenger = self
            .find_passenger(passenger_id)
            .ok_or(ValidationError::UnknownPassenger(passenger_id))?;
        let now = self.world.resource::<DispatchClock>().now();

        let Some(driver) = self.find_available_driver() else {
            self.world
                .resource_mut::<DispatchTelemetry>()
                .record_unfulfilled(passenger_id, now);
            return Ok(None);
        };

        let trip = self
            .world
            .spawn(Trip {
                id: self.next_trip_id(),
                driver,
                passenger,
                started_at: now,
                outcome: TripOutcome::InProgress,
            })
            .id();
        self.link_trip(trip, driver, passenger, true);
        self.world
            .resource_mut::<DispatchTelemetry>()
            .record_assigned();
        Ok(Some(trip))
    }

    /// One past the last ledger id, or 1 for an empty ledger.
    fn next_trip_id(&self) -> TripId {
        self.world
            .resource::<DispatchRoster>()
            .trips
            .last()
            .and_then(|&entity| self.world.get::<Trip>(entity))
            .map(|trip| trip.id.next())
            .unwrap_or_else(TripId::first)
    }

    fn link_trip(&mut self, trip: Entity, driver: Entity, passenger: Entity, live: bool) {
        {
            let mut d = self
                .world
                .get_mut::<Driver>(driver)
                .expect("resolved driver entity has a Driver component");
            if live {
                d.add_latest_trip(trip);
            } else {
                d.add_trip(trip);
            }
        }
        self.world
            .get_mut::<Passenger>(passenger)
            .expect("resolved passenger entity has a Passenger component")
            .add_trip(trip);
        self.world.resource_mut::<DispatchRoster>().trips.push(trip);
    }

    pub fn drivers(&self) -> &[Entity] {
        &self.world.resource::<DispatchRoster>().drivers
    }

    pub fn passengers(&self) -> &[Entity] {
        &self.world.resource::<DispatchRoster>().passengers
    }

    pub fn trips(&self) -> &[Entity] {
        &self.world.resource::<DispatchRoster>().trips
    }

    pub fn driver(&self, entity: Entity) -> Option<&Driver> {
        self.world.get::<Driver>(entity)
    }

    pub fn passenger(&self, entity: Entity) -> Option<&Passenger> {
        self.world.get::<Passenger>(entity)
    }

    pub fn trip(&self, entity: Entity) -> Option<&Trip> {
        self.world.get::<Trip>(entity)
    }

    pub fn telemetry(&self) -> &DispatchTelemetry {
        self.world.resource::<DispatchTelemetry>()
    }

    /// Read access to the underlying world, for the metrics functions.
    pub fn world(&self) -> &World {
        &self.world
    }
}
