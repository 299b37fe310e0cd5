//! Stopping criteria of the search. The time limit and the "never stop" criteria come from the
//! dogs framework, this module adds an external cancellation flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub use dogs::search_algorithm::{NeverStoppingCriterion, StoppingCriterion, TimeStoppingCriterion};


/**
stops when a shared flag is raised (external cancellation).
Clones share the same flag, so one criterion can be handed to every worker.
*/
#[derive(Debug, Clone, Default)]
pub struct FlagStoppingCriterion {
    flag: Arc<AtomicBool>,
}

impl FlagStoppingCriterion {
    /// creates a criterion with a fresh (lowered) flag
    pub fn new() -> Self { Self::default() }

    /// handle that can be used to cancel the search from another thread
    pub fn flag(&self) -> Arc<AtomicBool> { self.flag.clone() }

    /// requests the search to stop
    pub fn cancel(&self) { self.flag.store(true, Ordering::Relaxed); }
}

impl StoppingCriterion for FlagStoppingCriterion {
    fn is_finished(&self) -> bool { self.flag.load(Ordering::Relaxed) }
}
