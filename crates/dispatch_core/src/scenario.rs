//! Scenario setup: populate a dispatcher with a seeded synthetic fleet,
//! passenger population, and a ledger of completed historical trips.
//!
//! Used by the demo example, the benchmarks, and exhaustion tests; a fixed
//! seed reproduces the exact same fleet.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::dispatcher::{CompletedTripRecord, Dispatcher};
use crate::ecs::{Driver, Passenger, VehicleId};
use crate::ids::{DriverId, PassengerId, TripId};

/// VIN alphabet: uppercase letters except I, O, Q, plus digits.
const VIN_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPRSTUVWXYZ0123456789";

/// History window the generated trips fall into, in minutes (30 days).
const HISTORY_WINDOW_MINUTES: i64 = 30 * 24 * 60;

/// Parameters for building a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub num_drivers: usize,
    pub num_passengers: usize,
    /// Completed historical trips spread across the fleet.
    pub num_completed_trips: usize,
    /// Random seed for reproducibility (optional; if None, uses entropy).
    pub seed: Option<u64>,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            num_drivers: 50,
            num_passengers: 150,
            num_completed_trips: 300,
            seed: None,
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_fleet(mut self, num_drivers: usize) -> Self {
        self.num_drivers = num_drivers;
        self
    }

    pub fn with_history(mut self, num_completed_trips: usize) -> Self {
        self.num_completed_trips = num_completed_trips;
        self
    }
}

fn random_vin<R: Rng>(rng: &mut R) -> VehicleId {
    let raw: String = (0..VehicleId::LEN)
        .map(|_| VIN_ALPHABET[rng.gen_range(0..VIN_ALPHABET.len())] as char)
        .collect();
    VehicleId::new(raw).expect("generated VIN is 17 characters")
}

fn history_base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 4, 5, 14, 0, 0)
        .single()
        .expect("valid base timestamp")
}

/// Populate `dispatcher` with drivers (ids `1..=num_drivers`), passengers
/// (ids `1..=num_passengers`), and completed trips with sequential ids.
/// Every generated driver starts available with no open trip.
pub fn build_scenario(dispatcher: &mut Dispatcher, params: ScenarioParams) {
    let mut rng: StdRng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for i in 1..=params.num_drivers {
        let id = DriverId::new(i as i64).expect("generated ids start at 1");
        let vin = random_vin(&mut rng);
        dispatcher.add_driver(Driver::new(id, format!("Driver {i}"), vin));
    }

    for i in 1..=params.num_passengers {
        let id = PassengerId::new(i as i64).expect("generated ids start at 1");
        let phone = format!("555-{:04}", rng.gen_range(0..10_000));
        dispatcher.add_passenger(Passenger::new(id, format!("Passenger {i}"), phone));
    }

    if params.num_drivers == 0 || params.num_passengers == 0 {
        return;
    }

    let base = history_base();
    for k in 1..=params.num_completed_trips {
        let started_at = base + Duration::minutes(rng.gen_range(0..HISTORY_WINDOW_MINUTES));
        let ended_at = started_at + Duration::minutes(rng.gen_range(5..=120));
        let record = CompletedTripRecord {
            trip_id: TripId::new(k as i64).expect("generated ids start at 1"),
            driver_id: DriverId::new(rng.gen_range(1..=params.num_drivers) as i64)
                .expect("generated ids start at 1"),
            passenger_id: PassengerId::new(rng.gen_range(1..=params.num_passengers) as i64)
                .expect("generated ids start at 1"),
            started_at,
            ended_at,
            cost: rng.gen_range(3.0..45.0),
            rating: rng.gen_range(1..=5),
        };
        dispatcher
            .record_completed_trip(record)
            .expect("generated ids resolve against the roster");
    }
}
