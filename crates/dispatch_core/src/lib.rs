pub mod clock;
pub mod dispatcher;
pub mod ecs;
pub mod error;
pub mod ids;
pub mod matching;
pub mod metrics;
pub mod scenario;
pub mod telemetry;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
