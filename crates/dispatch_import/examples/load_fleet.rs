//! Load the bundled CSV fixtures, print per-driver figures, and place one
//! live trip request.
//!
//! Run with: cargo run -p dispatch_import --example load_fleet

use std::path::Path;

use dispatch_core::ids::PassengerId;
use dispatch_core::metrics;
use dispatch_import::load_dispatcher_from_paths;

fn main() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let mut dispatcher = match load_dispatcher_from_paths(
        &data.join("drivers.csv"),
        &data.join("passengers.csv"),
        &data.join("trips.csv"),
    ) {
        Ok(dispatcher) => dispatcher,
        Err(err) => {
            eprintln!("failed to load fleet: {err}");
            std::process::exit(1);
        }
    };

    println!(
        "Loaded {} drivers, {} passengers, {} trips",
        dispatcher.drivers().len(),
        dispatcher.passengers().len(),
        dispatcher.trips().len()
    );

    println!("\nDrivers:");
    for &entity in dispatcher.drivers() {
        let summary = metrics::driver_summary(dispatcher.world(), entity)
            .expect("roster entity has a driver");
        println!(
            "  {:>3}  {:<18} trips={} revenue={:>6.2} rating={:.2}",
            summary.driver_id,
            summary.name,
            summary.trips,
            summary.total_revenue,
            summary.average_rating,
        );
    }

    let passenger = PassengerId::new(1).expect("fixture passenger");
    match dispatcher.request_trip(passenger) {
        Ok(Some(trip_entity)) => {
            let trip = dispatcher.trip(trip_entity).expect("created trip");
            let driver = dispatcher.driver(trip.driver).expect("assigned driver");
            println!(
                "\nRequested a trip for passenger {passenger}: trip {} assigned to {}",
                trip.id, driver.name
            );
        }
        Ok(None) => println!("\nRequested a trip for passenger {passenger}: no driver available"),
        Err(err) => eprintln!("\nrequest rejected: {err}"),
    }
}
