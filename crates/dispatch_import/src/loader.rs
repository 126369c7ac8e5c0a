//! CSV loaders: read driver, passenger, and trip files and build a
//! cross-referenced [Dispatcher].
//!
//! Load order matters: drivers and passengers first, then trips, which
//! resolve their `driver_id`/`passenger_id` against the roster and fail on
//! an unknown reference. The one tolerated defect is a malformed VIN, which
//! is replaced by [PLACEHOLDER_VIN] instead of rejecting the row.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};

use dispatch_core::dispatcher::{CompletedTripRecord, Dispatcher};
use dispatch_core::ecs::{Driver, DriverStatus, Passenger, VehicleId};
use dispatch_core::error::ValidationError;
use dispatch_core::ids::{DriverId, PassengerId, TripId};

use crate::records::{DriverRow, PassengerRow, TripRow};

/// Substituted for any VIN that is not exactly 17 characters.
pub const PLACEHOLDER_VIN: &str = "00000000000000000";

/// Errors encountered while loading CSV files into a dispatcher.
#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Timestamp {
        field: &'static str,
        source: chrono::ParseError,
    },
    Validation(ValidationError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "io error: {err}"),
            ImportError::Csv(err) => write!(f, "csv error: {err}"),
            ImportError::Timestamp { field, source } => {
                write!(f, "invalid {field} timestamp: {source}")
            }
            ImportError::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::Timestamp { source, .. } => Some(source),
            ImportError::Validation(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::Csv(err)
    }
}

impl From<ValidationError> for ImportError {
    fn from(err: ValidationError) -> Self {
        ImportError::Validation(err)
    }
}

fn parse_timestamp(raw: &str, field: &'static str) -> Result<DateTime<Utc>, ImportError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| ImportError::Timestamp { field, source })
}

/// Read `drivers.csv` rows into the dispatcher. Returns the number of
/// drivers added. VINs of the wrong length become [PLACEHOLDER_VIN]; an
/// unknown status symbol or non-positive id fails the load.
pub fn load_drivers<R: Read>(reader: R, dispatcher: &mut Dispatcher) -> Result<usize, ImportError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut count = 0;
    for row in csv_reader.deserialize::<DriverRow>() {
        let row = row?;
        let id = DriverId::new(row.id)?;
        let status: DriverStatus = row.status.parse()?;
        let vehicle_id = VehicleId::new(row.vin)
            .unwrap_or_else(|_| VehicleId::new(PLACEHOLDER_VIN).expect("placeholder is 17 zeros"));
        dispatcher.add_driver(Driver::new(id, row.name, vehicle_id).with_status(status));
        count += 1;
    }
    Ok(count)
}

/// Read `passengers.csv` rows into the dispatcher. Returns the number of
/// passengers added.
pub fn load_passengers<R: Read>(
    reader: R,
    dispatcher: &mut Dispatcher,
) -> Result<usize, ImportError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut count = 0;
    for row in csv_reader.deserialize::<PassengerRow>() {
        let row = row?;
        let id = PassengerId::new(row.id)?;
        dispatcher.add_passenger(Passenger::new(id, row.name, row.phone));
        count += 1;
    }
    Ok(count)
}

/// Read `trips.csv` rows into the dispatcher, resolving each trip's driver
/// and passenger against the already-loaded rosters. Returns the number of
/// trips added.
pub fn load_trips<R: Read>(reader: R, dispatcher: &mut Dispatcher) -> Result<usize, ImportError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut count = 0;
    for row in csv_reader.deserialize::<TripRow>() {
        let row = row?;
        let record = CompletedTripRecord {
            trip_id: TripId::new(row.id)?,
            driver_id: DriverId::new(row.driver_id)?,
            passenger_id: PassengerId::new(row.passenger_id)?,
            started_at: parse_timestamp(&row.start_time, "start_time")?,
            ended_at: parse_timestamp(&row.end_time, "end_time")?,
            cost: row.cost,
            rating: row.rating,
        };
        dispatcher.record_completed_trip(record)?;
        count += 1;
    }
    Ok(count)
}

/// Build a dispatcher from the three CSV sources.
pub fn load_dispatcher<D: Read, P: Read, T: Read>(
    drivers: D,
    passengers: P,
    trips: T,
) -> Result<Dispatcher, ImportError> {
    let mut dispatcher = Dispatcher::new();
    load_drivers(drivers, &mut dispatcher)?;
    load_passengers(passengers, &mut dispatcher)?;
    load_trips(trips, &mut dispatcher)?;
    Ok(dispatcher)
}

/// Build a dispatcher from three CSV files on disk.
pub fn load_dispatcher_from_paths(
    drivers: &Path,
    passengers: &Path,
    trips: &Path,
) -> Result<Dispatcher, ImportError> {
    load_dispatcher(
        File::open(drivers)?,
        File::open(passengers)?,
        File::open(trips)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use dispatch_core::test_helpers::ts;

    const DRIVERS_CSV: &str = "\
id,name,vin,status
1,Bernardo Prosacco,WBWSS52P9NEYLVDE9,UNAVAILABLE
2,Emory Rosenbaum,1B9WEX2R92R12900E,AVAILABLE
3,Daryl Nitzsche,bad,AVAILABLE
";

    const PASSENGERS_CSV: &str = "\
id,name,phone
1,Nina Hintz Sr.,560.815.3059
300,Miss Isom Gleason,791-114-8423 x70188
";

    const TRIPS_CSV: &str = "\
id,driver_id,passenger_id,start_time,end_time,cost,rating
1,1,1,2016-04-05T14:01:00+00:00,2016-04-05T14:09:00+00:00,17.39,3
2,2,300,2016-04-25T02:59:00+00:00,2016-04-25T03:06:00+00:00,26.76,5
";

    #[test]
    fn loads_drivers_in_source_order_with_statuses() {
        let mut dispatcher = Dispatcher::new();
        let count =
            load_drivers(DRIVERS_CSV.as_bytes(), &mut dispatcher).expect("well-formed csv");
        assert_eq!(count, 3);

        let first = dispatcher
            .driver(dispatcher.drivers()[0])
            .expect("component");
        assert_eq!(first.name, "Bernardo Prosacco");
        assert_eq!(first.status, DriverStatus::Unavailable);

        let second = dispatcher
            .driver(dispatcher.drivers()[1])
            .expect("component");
        assert_eq!(second.status, DriverStatus::Available);
    }

    #[test]
    fn malformed_vin_becomes_the_placeholder() {
        let mut dispatcher = Dispatcher::new();
        load_drivers(DRIVERS_CSV.as_bytes(), &mut dispatcher).expect("well-formed csv");
        let third = dispatcher
            .driver(dispatcher.drivers()[2])
            .expect("component");
        assert_eq!(third.vehicle_id.as_str(), PLACEHOLDER_VIN);
    }

    #[test]
    fn unknown_status_fails_the_load() {
        let csv = "id,name,vin,status\n1,George,WBWSS52P9NEYLVDE9,DRIVING\n";
        let mut dispatcher = Dispatcher::new();
        let err = load_drivers(csv.as_bytes(), &mut dispatcher).expect_err("closed status set");
        assert!(matches!(
            err,
            ImportError::Validation(ValidationError::UnknownStatus { .. })
        ));
    }

    #[test]
    fn non_positive_id_fails_the_load() {
        let csv = "id,name,phone\n0,Nina Hintz Sr.,560.815.3059\n";
        let mut dispatcher = Dispatcher::new();
        let err = load_passengers(csv.as_bytes(), &mut dispatcher).expect_err("bad id");
        assert!(matches!(
            err,
            ImportError::Validation(ValidationError::InvalidId { got: 0 })
        ));
    }

    #[test]
    fn load_dispatcher_wires_trips_to_both_parties() {
        let dispatcher = load_dispatcher(
            DRIVERS_CSV.as_bytes(),
            PASSENGERS_CSV.as_bytes(),
            TRIPS_CSV.as_bytes(),
        )
        .expect("consistent fixture");

        assert_eq!(dispatcher.trips().len(), 2);
        let trip_entity = dispatcher.trips()[0];
        let trip = dispatcher.trip(trip_entity).expect("component");
        assert_eq!(trip.started_at, ts("2016-04-05T14:01:00+00:00"));
        assert_eq!(trip.ended_at(), Some(ts("2016-04-05T14:09:00+00:00")));
        assert_eq!(trip.cost(), Some(17.39));
        assert_eq!(trip.rating(), Some(3));

        let driver = dispatcher.driver(trip.driver).expect("component");
        assert!(driver.trips.contains(&trip_entity));
        let passenger = dispatcher.passenger(trip.passenger).expect("component");
        assert!(passenger.trips.contains(&trip_entity));
    }

    #[test]
    fn trip_referencing_an_unknown_driver_fails_the_load() {
        let trips = "\
id,driver_id,passenger_id,start_time,end_time,cost,rating
1,99,1,2016-04-05T14:01:00+00:00,2016-04-05T14:09:00+00:00,17.39,3
";
        let err = load_dispatcher(
            DRIVERS_CSV.as_bytes(),
            PASSENGERS_CSV.as_bytes(),
            trips.as_bytes(),
        )
        .expect_err("dangling reference");
        assert!(matches!(
            err,
            ImportError::Validation(ValidationError::UnknownDriver(_))
        ));
    }

    #[test]
    fn bad_timestamp_fails_with_the_field_name() {
        let trips = "\
id,driver_id,passenger_id,start_time,end_time,cost,rating
1,1,1,yesterday,2016-04-05T14:09:00+00:00,17.39,3
";
        let err = load_dispatcher(
            DRIVERS_CSV.as_bytes(),
            PASSENGERS_CSV.as_bytes(),
            trips.as_bytes(),
        )
        .expect_err("unparseable timestamp");
        assert!(matches!(
            err,
            ImportError::Timestamp {
                field: "start_time",
                ..
            }
        ));
    }

    #[test]
    fn load_dispatcher_from_paths_reads_the_three_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let drivers_path = dir.path().join("drivers.csv");
        let passengers_path = dir.path().join("passengers.csv");
        let trips_path = dir.path().join("trips.csv");
        std::fs::File::create(&drivers_path)
            .and_then(|mut f| f.write_all(DRIVERS_CSV.as_bytes()))
            .expect("write drivers");
        std::fs::File::create(&passengers_path)
            .and_then(|mut f| f.write_all(PASSENGERS_CSV.as_bytes()))
            .expect("write passengers");
        std::fs::File::create(&trips_path)
            .and_then(|mut f| f.write_all(TRIPS_CSV.as_bytes()))
            .expect("write trips");

        let dispatcher =
            load_dispatcher_from_paths(&drivers_path, &passengers_path, &trips_path)
                .expect("consistent fixture");
        assert_eq!(dispatcher.drivers().len(), 3);
        assert_eq!(dispatcher.passengers().len(), 2);
        assert_eq!(dispatcher.trips().len(), 2);
    }
}
