//! Wall-clock source for live trip requests.
//!
//! Inserted as a resource so tests can pin "now" to a fixed instant and
//! assert on trip start times.

use bevy_ecs::prelude::Resource;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, Default, Resource)]
pub struct DispatchClock {
    fixed: Option<DateTime<Utc>>,
}

impl DispatchClock {
    /// System clock; every call to [DispatchClock::now] reads `Utc::now()`.
    pub fn system() -> Self {
        Self { fixed: None }
    }

    /// Clock pinned to `at`.
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self { fixed: Some(at) }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.fixed.unwrap_or_else(Utc::now)
    }
}
