use bevy_ecs::prelude::Entity;

use super::algorithm::{DispatchAlgorithm, DispatchCandidate};

/// Default policy: the driver whose last drop-off is oldest goes first.
///
/// Drivers with no completed trip at all keep the epoch as their key, so a
/// fresh driver sorts before anyone with a post-1970 drop-off and ties with
/// a (hypothetical) pre-epoch one; a drop-off before 1970 would outrank a
/// fresh driver outright. Ties go to the first-listed candidate.
#[derive(Debug, Default)]
pub struct LeastRecentDispatch;

impl DispatchAlgorithm for LeastRecentDispatch {
    fn select(&self, candidates: &[DispatchCandidate]) -> Option<Entity> {
        candidates
            .iter()
            .min_by_key(|candidate| {
                candidate
                    .last_dropoff
                    .map(|dropoff| dropoff.timestamp())
                    .unwrap_or(0)
            })
            .map(|candidate| candidate.driver)
    }
}
