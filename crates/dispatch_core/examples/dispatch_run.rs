//! Build a seeded 50-driver fleet and drain it with trip requests.
//!
//! Run with: cargo run -p dispatch_core --example dispatch_run

use dispatch_core::dispatcher::Dispatcher;
use dispatch_core::ids::PassengerId;
use dispatch_core::metrics;
use dispatch_core::scenario::{build_scenario, ScenarioParams};

fn main() {
    const NUM_DRIVERS: usize = 50;
    const NUM_PASSENGERS: usize = 150;
    const NUM_REQUESTS: usize = 60;

    let mut dispatcher = Dispatcher::new();
    build_scenario(
        &mut dispatcher,
        ScenarioParams {
            num_drivers: NUM_DRIVERS,
            num_passengers: NUM_PASSENGERS,
            num_completed_trips: 300,
            ..Default::default()
        }
        .with_seed(123),
    );

    println!(
        "--- Dispatch run ({} drivers, {} passengers, {} requests, seed 123) ---",
        NUM_DRIVERS, NUM_PASSENGERS, NUM_REQUESTS
    );

    for i in 0..NUM_REQUESTS {
        let raw_passenger = (i % NUM_PASSENGERS) as i64 + 1;
        let passenger = PassengerId::new(raw_passenger).expect("generated passenger id");
        match dispatcher.request_trip(passenger) {
            Ok(Some(trip_entity)) => {
                let trip = dispatcher.trip(trip_entity).expect("created trip");
                let driver = dispatcher.driver(trip.driver).expect("assigned driver");
                println!(
                    "  trip {:>3}  passenger {:>3} -> {} ({})",
                    trip.id, raw_passenger, driver.name, driver.vehicle_id
                );
            }
            Ok(None) => {
                println!("  passenger {:>3} -> no driver available", raw_passenger);
            }
            Err(err) => {
                println!("  passenger {:>3} -> rejected: {}", raw_passenger, err);
            }
        }
    }

    let telemetry = dispatcher.telemetry();
    println!("\nRequested: {}", telemetry.trips_requested);
    println!("Assigned:  {}", telemetry.trips_assigned);
    println!("Unfulfilled: {}", telemetry.unfulfilled.len());

    let mut summaries: Vec<_> = dispatcher
        .drivers()
        .iter()
        .filter_map(|&entity| metrics::driver_summary(dispatcher.world(), entity))
        .collect();
    summaries.sort_by(|a, b| {
        b.total_revenue
            .partial_cmp(&a.total_revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    println!("\nTop earners:");
    for summary in summaries.iter().take(5) {
        println!(
            "  {:<12} trips={:<3} completed={:<3} revenue={:>8.2} rating={:.2} per_hour={}",
            summary.name,
            summary.trips,
            summary.completed_trips,
            summary.total_revenue,
            summary.average_rating,
            summary
                .revenue_per_hour
                .map(|rate| format!("{rate:.2}"))
                .unwrap_or_else(|| "n/a".to_string()),
        );
    }
}
