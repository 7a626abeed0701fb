// src/watch/guard.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::trace;

/// Single-slot "a run is in flight" flag.
///
/// [`SingleFlight::try_acquire`] either hands out the only permit or
/// returns `None`; callers drop the request instead of queueing it. The
/// flag is cleared when the permit is dropped, on every exit path.
#[derive(Debug, Default)]
pub struct SingleFlight {
    in_flight: AtomicBool,
}

impl SingleFlight {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Claim the slot if it is free.
    pub fn try_acquire(self: &Arc<Self>) -> Option<FlightPermit> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| {
                trace!("single-flight slot acquired");
                FlightPermit {
                    owner: Arc::clone(self),
                }
            })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Proof of holding the [`SingleFlight`] slot. Releases it on drop.
#[derive(Debug)]
pub struct FlightPermit {
    owner: Arc<SingleFlight>,
}

impl Drop for FlightPermit {
    fn drop(&mut self) {
        self.owner.in_flight.store(false, Ordering::Release);
        trace!("single-flight slot released");
    }
}
