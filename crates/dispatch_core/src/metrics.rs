//! Per-driver derived figures: ratings, earnings, and recency.
//!
//! Components stay plain data; everything here is computed from the world on
//! demand, looking trips up through the driver's ordered trip list.

use bevy_ecs::prelude::{Entity, World};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ecs::{Driver, Trip};
use crate::ids::DriverId;

/// Flat per-ride fee withheld before the driver's cut.
pub const BOOKING_FEE: f64 = 1.65;
/// Driver's share of the remainder.
pub const DRIVER_TAKE_RATE: f64 = 0.8;

const SECS_PER_HOUR: i64 = 3600;

fn trips_of<'w>(world: &'w World, driver: Entity) -> impl Iterator<Item = &'w Trip> + 'w {
    world
        .get::<Driver>(driver)
        .into_iter()
        .flat_map(|d| d.trips.iter())
        .filter_map(|&trip| world.get::<Trip>(trip))
}

/// Mean rating in `[0.0, 5.0]`; `0.0` for a driver with no trips.
///
/// Only completed trips carry a rating, but the denominator counts every
/// trip: an open trip drags the average down until it ends.
pub fn average_rating(world: &World, driver: Entity) -> f64 {
    let trip_count = world
        .get::<Driver>(driver)
        .map(|d| d.trips.len())
        .unwrap_or(0);
    if trip_count == 0 {
        return 0.0;
    }
    let rating_total: u32 = trips_of(world, driver)
        .filter_map(Trip::rating)
        .map(u32::from)
        .sum();
    f64::from(rating_total) / trip_count as f64
}

/// Driver's take across completed trips, rounded to cents. An in-progress
/// trip has no cost yet and contributes nothing.
pub fn total_revenue(world: &World, driver: Entity) -> f64 {
    let gross: f64 = trips_of(world, driver)
        .filter_map(Trip::cost)
        .map(|cost| (cost - BOOKING_FEE) * DRIVER_TAKE_RATE)
        .sum();
    (gross * 100.0).round() / 100.0
}

/// Revenue per whole hour of completed driving.
///
/// Completed durations are summed in seconds and integer-divided by 3600.
/// Returns `None` below one full hour of completed driving, which also
/// covers a driver with no completed trips at all.
pub fn revenue_per_hour(world: &World, driver: Entity) -> Option<f64> {
    let total_secs: i64 = trips_of(world, driver)
        .filter_map(Trip::completed_duration_secs)
        .sum();
    let whole_hours = total_secs / SECS_PER_HOUR;
    if whole_hours <= 0 {
        return None;
    }
    Some(total_revenue(world, driver) / whole_hours as f64)
}

/// Whether the driver's most recently appended trip is still open. Earlier
/// trips are irrelevant; only the last one can be the live assignment.
pub fn is_trip_in_progress(world: &World, driver: Entity) -> bool {
    world
        .get::<Driver>(driver)
        .and_then(|d| d.trips.last().copied())
        .and_then(|trip| world.get::<Trip>(trip))
        .is_some_and(Trip::is_in_progress)
}

/// Latest drop-off among the driver's completed trips. `None` when there is
/// none to compare: no trips, or only in-progress ones.
pub fn recent_trip_end_time(world: &World, driver: Entity) -> Option<DateTime<Utc>> {
    trips_of(world, driver).filter_map(Trip::ended_at).max()
}

/// Snapshot of one driver's figures for reporting/export.
#[derive(Debug, Clone, Serialize)]
pub struct DriverSummary {
    pub driver_id: DriverId,
    pub name: String,
    pub trips: usize,
    pub completed_trips: usize,
    pub average_rating: f64,
    pub total_revenue: f64,
    pub revenue_per_hour: Option<f64>,
}

pub fn driver_summary(world: &World, driver: Entity) -> Option<DriverSummary> {
    let d = world.get::<Driver>(driver)?;
    Some(DriverSummary {
        driver_id: d.id,
        name: d.name.clone(),
        trips: d.trips.len(),
        completed_trips: trips_of(world, driver)
            .filter(|t| !t.is_in_progress())
            .count(),
        average_rating: average_rating(world, driver),
        total_revenue: total_revenue(world, driver),
        revenue_per_hour: revenue_per_hour(world, driver),
    })
}
