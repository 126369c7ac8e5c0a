//! Raw CSV row shapes, exactly as they appear in the source files. All
//! validation happens in the loader, not here.

use serde::Deserialize;

/// Row of `drivers.csv`: `id,name,vin,status`.
#[derive(Debug, Clone, Deserialize)]
pub struct DriverRow {
    pub id: i64,
    pub name: String,
    pub vin: String,
    pub status: String,
}

/// Row of `passengers.csv`: `id,name,phone`.
#[derive(Debug, Clone, Deserialize)]
pub struct PassengerRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

/// Row of `trips.csv`: `id,driver_id,passenger_id,start_time,end_time,cost,rating`.
/// Historical trips are always completed, so every column is present.
#[derive(Debug, Clone, Deserialize)]
pub struct TripRow {
    pub id: i64,
    pub driver_id: i64,
    pub passenger_id: i64,
    pub start_time: String,
    pub end_time: String,
    pub cost: f64,
    pub rating: u8,
}
