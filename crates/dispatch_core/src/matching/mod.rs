pub mod algorithm;
pub mod first_free;
pub mod least_recent;

use bevy_ecs::prelude::Resource;

pub use algorithm::{DispatchAlgorithm, DispatchCandidate};
pub use first_free::FirstFreeDispatch;
pub use least_recent::LeastRecentDispatch;

/// Resource wrapper for the dispatch algorithm trait object.
#[derive(Resource)]
pub struct DispatchAlgorithmResource(pub Box<dyn DispatchAlgorithm>);

impl DispatchAlgorithmResource {
    pub fn new(algorithm: Box<dyn DispatchAlgorithm>) -> Self {
        Self(algorithm)
    }
}

impl std::ops::Deref for DispatchAlgorithmResource {
    type Target = dyn DispatchAlgorithm;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
