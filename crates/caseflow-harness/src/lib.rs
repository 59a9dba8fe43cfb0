//! Recording fakes of the three collaborator ports.
//!
//! Each fake implements its port in-process against a small in-memory
//! store and records every call with a sequence number drawn from a shared
//! counter, so tests can assert zero-interaction contracts, write-target
//! sets, and cross-collaborator call ordering directly.

pub mod casework;
pub mod engine;
pub mod info;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub use casework::{CaseworkCall, RecordingCasework};
pub use engine::{EngineCall, RecordingEngine};
pub use info::{InfoCall, RecordingInfo};

/// Shared call counter: fakes created from the same `Sequence` stamp their
/// calls from one monotonic series, so ordering across collaborators is
/// observable.
#[derive(Debug, Clone, Default)]
pub struct Sequence(Arc<AtomicUsize>);

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn next(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

/// Install a fmt subscriber honouring `RUST_LOG`. Safe to call from every
/// test; only the first call wins.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
