use std::time::Duration;

use folio_core::hash::HashAlgorithm;

/// Default quiet period after the last edit before inbound pushes resume.
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterConfig {
    /// How long after the last edit the adapter keeps treating the user as
    /// typing. A heuristic for "the user paused", not a guarantee.
    pub quiescence: Duration,
    /// Algorithm used for content hashes when comparing documents.
    pub hash_algorithm: HashAlgorithm,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            quiescence: DEFAULT_QUIESCENCE,
            hash_algorithm: HashAlgorithm::Xxh64,
        }
    }
}

impl AdapterConfig {
    pub fn with_quiescence(mut self, quiescence: Duration) -> Self {
        self.quiescence = quiescence;
        self
    }

    pub fn with_hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = algorithm;
        self
    }
}
