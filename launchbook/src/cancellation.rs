//! The low-demand cancellation workflow.
//!
//! Scans flights nearing departure, cancels those under their
//! minimum-passengers threshold through the anti-corruption port, refunds
//! every booking at its recorded price, and notifies the affected passengers.

use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::booking::passenger_count;
use crate::errors::DomainResult;
use crate::locks::FlightLocks;
use crate::ports::{BookingRepository, FlightInfoProvider, NotificationService, PaymentGateway};

/// Tunables for the cancellation scan.
#[derive(Debug, Clone)]
pub struct CancellationPolicy {
    /// How far ahead of departure a flight is considered for cancellation.
    pub window: Duration,
    /// Only flights whose configured minimum-passengers threshold is at
    /// least this value are screened.
    pub screening_threshold: u32,
}

impl Default for CancellationPolicy {
    fn default() -> Self {
        Self {
            window: Duration::days(7),
            screening_threshold: 5,
        }
    }
}

/// Cancellation use-case: the periodic (or admin-triggered) low-demand scan.
pub struct CancellationService {
    flight_info: Arc<dyn FlightInfoProvider>,
    bookings: Arc<dyn BookingRepository>,
    payments: Arc<dyn PaymentGateway>,
    notifications: Arc<dyn NotificationService>,
    locks: Arc<FlightLocks>,
    policy: CancellationPolicy,
}

impl CancellationService {
    /// Wires the workflow with its collaborators and policy. The lock
    /// registry is the same one the booking workflow uses.
    pub fn new(
        flight_info: Arc<dyn FlightInfoProvider>,
        bookings: Arc<dyn BookingRepository>,
        payments: Arc<dyn PaymentGateway>,
        notifications: Arc<dyn NotificationService>,
        locks: Arc<FlightLocks>,
        policy: CancellationPolicy,
    ) -> Self {
        Self {
            flight_info,
            bookings,
            payments,
            notifications,
            locks,
            policy,
        }
    }

    /// Cancels every under-subscribed flight inside the policy window and
    /// returns how many were cancelled.
    ///
    /// Per candidate, the read-bookings-cancel-refund sequence runs under the
    /// flight's lock, and the port re-validates the low-demand guard against
    /// the live flight - a flight that was concurrently confirmed is skipped
    /// without refunds or notifications.
    #[instrument(skip(self))]
    pub async fn cancel_flights(&self) -> DomainResult<u32> {
        let cutoff = Utc::now() + self.policy.window;
        let candidates = self
            .flight_info
            .flights_for_cancellation(cutoff, self.policy.screening_threshold)
            .await?;
        debug!(candidates = candidates.len(), %cutoff, "low-demand scan");

        let mut cancelled_count = 0;
        for flight in candidates {
            let _guard = self.locks.acquire(&flight.id).await;

            let bookings = self.bookings.find_by_flight_id(&flight.id).await?;
            let count = passenger_count(&bookings)?;

            let cancelled = self
                .flight_info
                .cancel_flight_if_low_demand(&flight.id, count, cutoff)
                .await?;
            if !cancelled {
                warn!(flight_id = %flight.id, count, "cancellation declined, skipping");
                continue;
            }

            info!(
                flight_id = %flight.id,
                count,
                min_passengers = flight.min_passengers,
                "cancelling flight for low demand"
            );

            for booking in &bookings {
                self.payments
                    .process_refund(booking.transaction_id(), booking.final_price())
                    .await;
            }

            self.notifications
                .notify_cancellation(&flight.id, &bookings)
                .await;
            cancelled_count += 1;
        }

        Ok(cancelled_count)
    }
}
