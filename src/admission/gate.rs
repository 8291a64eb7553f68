//! Bounded-concurrency gate for a single route.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Limits a route to at most `capacity` in-flight operations.
///
/// Slot accounting is the gate's only job; it performs no business logic.
pub struct AdmissionGate {
    slots: Arc<Semaphore>,
    capacity: usize,
}

/// An occupied slot. Dropping the permit releases the slot.
pub struct SlotPermit {
    _permit: OwnedSemaphorePermit,
}

impl AdmissionGate {
    /// Create a gate with the given capacity. Capacities below 1 are
    /// clamped to 1; a zero-slot gate would block every caller forever.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Acquire a slot, suspending until one frees up.
    ///
    /// There is no timeout: a caller waits as long as it takes. Fairness is
    /// whatever the semaphore's wait queue provides.
    pub async fn acquire(&self) -> SlotPermit {
        let permit = self
            .slots
            .clone()
            .acquire_owned()
            .await
            .expect("admission gate semaphore closed");
        SlotPermit { _permit: permit }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.slots.available_permits()
    }
}
