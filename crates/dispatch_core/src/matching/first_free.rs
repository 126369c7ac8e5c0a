use bevy_ecs::prelude::Entity;

use super::algorithm::{DispatchAlgorithm, DispatchCandidate};

/// Greedy baseline: the first qualifying driver in roster order takes the
/// request, with no recency fairness. Useful for comparisons against
/// [super::LeastRecentDispatch].
#[derive(Debug, Default)]
pub struct FirstFreeDispatch;

impl DispatchAlgorithm for FirstFreeDispatch {
    fn select(&self, candidates: &[DispatchCandidate]) -> Option<Entity> {
        candidates.first().map(|candidate| candidate.driver)
    }
}
