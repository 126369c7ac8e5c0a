use std::fmt;

use crate::ids::{DriverId, PassengerId};

/// Errors raised when input records or request arguments fail validation.
///
/// Absence is never an error: `find_driver`/`find_passenger` return `None`
/// for a well-formed but unknown id. Validation errors are fatal to the call
/// that raised them and propagate to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A raw id was zero or negative.
    InvalidId { got: i64 },
    /// A vehicle id was not exactly 17 characters.
    InvalidVehicleId { got: String },
    /// A driver status symbol outside the closed AVAILABLE/UNAVAILABLE set.
    UnknownStatus { got: String },
    /// A trip record referenced a driver id with no matching driver.
    UnknownDriver(DriverId),
    /// A trip record or trip request referenced a passenger id with no
    /// matching passenger.
    UnknownPassenger(PassengerId),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidId { got } => {
                write!(f, "id must be a positive integer (got {got})")
            }
            ValidationError::InvalidVehicleId { got } => {
                write!(f, "vehicle id must be exactly 17 characters (got {got:?})")
            }
            ValidationError::UnknownStatus { got } => {
                write!(f, "unknown driver status {got:?}")
            }
            ValidationError::UnknownDriver(id) => {
                write!(f, "no driver with id {id}")
            }
            ValidationError::UnknownPassenger(id) => {
                write!(f, "no passenger with id {id}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
