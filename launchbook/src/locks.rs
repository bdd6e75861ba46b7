//! Per-flight exclusive locks.
//!
//! The booking and cancellation workflows mutate shared state (flight status,
//! booking counts) that concurrent requests touch simultaneously. Each flight
//! identity gets its own async mutex, so the count-check-pay-persist sequence
//! runs as one atomic unit per flight while bookings for *different* flights
//! proceed fully in parallel. No process-wide lock is ever held across the
//! payment call.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::types::FlightId;

/// Registry of per-flight exclusive locks, striped by flight identity.
///
/// Shared (via `Arc`) between the booking and the cancellation workflows so
/// a cancellation cannot interleave with a booking on the same flight.
#[derive(Debug, Default)]
pub struct FlightLocks {
    inner: Mutex<HashMap<FlightId, Arc<AsyncMutex<()>>>>,
}

impl FlightLocks {
    /// Creates an empty lock registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the exclusive lock for one flight, waiting if another
    /// workflow currently holds it.
    pub async fn acquire(&self, flight_id: &FlightId) -> OwnedMutexGuard<()> {
        let slot = {
            let mut locks = self.inner.lock().expect("lock registry poisoned");
            Arc::clone(locks.entry(flight_id.clone()).or_default())
        };
        slot.lock_owned().await
    }
}
