//! The booking workflow: capacity-aware seat sales.
//!
//! `BookingsService` orchestrates validation, the capacity checks, discount
//! computation, payment, persistence, and flight-status progression for a
//! single booking request. It consults flight state exclusively through the
//! [`FlightInfoProvider`] port and holds the flight's lock across the
//! count-check-pay-persist sequence so the capacity invariant survives
//! concurrent requests.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use crate::booking::{passenger_count, Booking};
use crate::errors::{DomainError, DomainResult};
use crate::flight::FlightStatus;
use crate::locks::FlightLocks;
use crate::ports::{BookingRepository, FlightInfoProvider, NotificationService, PaymentGateway};
use crate::pricing::{days_until_departure, discount_rate};
use crate::types::{FlightId, PassengerName};

/// Request to book one seat on a flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBookingCommand {
    /// The flight to book.
    pub flight_id: FlightId,
    /// The passenger taking the seat.
    pub passenger_name: PassengerName,
}

impl CreateBookingCommand {
    /// Creates a booking request. The inputs are already validated through
    /// their smart constructors.
    pub const fn new(flight_id: FlightId, passenger_name: PassengerName) -> Self {
        Self {
            flight_id,
            passenger_name,
        }
    }
}

/// Optional filters for listing bookings.
#[derive(Debug, Clone, Default)]
pub struct BookingQuery {
    /// Restrict to one flight.
    pub flight_id: Option<FlightId>,
    /// Restrict to one passenger (case-insensitive exact match).
    pub passenger_name: Option<PassengerName>,
}

/// Booking use-cases: seat creation and booking queries.
pub struct BookingsService {
    bookings: Arc<dyn BookingRepository>,
    flight_info: Arc<dyn FlightInfoProvider>,
    payments: Arc<dyn PaymentGateway>,
    notifications: Arc<dyn NotificationService>,
    locks: Arc<FlightLocks>,
}

impl BookingsService {
    /// Wires the workflow with its collaborators. The lock registry is shared
    /// with the cancellation workflow so both serialize per flight.
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        flight_info: Arc<dyn FlightInfoProvider>,
        payments: Arc<dyn PaymentGateway>,
        notifications: Arc<dyn NotificationService>,
        locks: Arc<FlightLocks>,
    ) -> Self {
        Self {
            bookings,
            flight_info,
            payments,
            notifications,
            locks,
        }
    }

    /// Books one seat, failing fast at the first violated precondition.
    ///
    /// On payment failure nothing is persisted and no flight state changes.
    /// After persisting, the flight progresses at most one step: sold out if
    /// the post-booking count fills the capacity, otherwise confirmed (with a
    /// single notification) if the count just reached the minimum.
    #[instrument(skip(self), fields(flight_id = %command.flight_id))]
    pub async fn create_booking(&self, command: CreateBookingCommand) -> DomainResult<Booking> {
        let flight = self
            .flight_info
            .flight_by_id(&command.flight_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Flight not found"))?;

        if matches!(flight.status, FlightStatus::Cancelled | FlightStatus::SoldOut) {
            return Err(DomainError::validation(
                "Flight is not available for booking",
            ));
        }

        if !self
            .flight_info
            .can_accept_passengers(&command.flight_id)
            .await?
        {
            return Err(DomainError::capacity("Flight is sold out"));
        }

        // The count-check-pay-persist sequence is atomic per flight.
        let _guard = self.locks.acquire(&command.flight_id).await;

        let existing = self.bookings.find_by_flight_id(&command.flight_id).await?;
        let current = passenger_count(&existing)?;

        // Second, authoritative capacity check against the live count. The
        // availability flag above may come from a different data path; both
        // must pass.
        flight.capacity.ensure_can_board(current)?;

        let days = days_until_departure(Utc::now(), flight.departure);
        let rate = discount_rate(flight.capacity, flight.min_passengers, current, days);
        let final_price = flight.base_price.apply_discount(rate);

        // Any payment collaborator failure surfaces as the Payment kind, and
        // nothing past this point runs: no booking or flight state changes.
        let transaction_id = self
            .payments
            .process_payment(final_price)
            .await
            .map_err(|err| match err {
                DomainError::Payment(_) => err,
                other => DomainError::payment(other.to_string()),
            })?;

        let booking = Booking::create(
            command.flight_id.clone(),
            command.passenger_name,
            final_price,
            transaction_id,
        );
        let saved = self.bookings.save(booking).await?;

        let post_booking = current + 1;
        if flight.capacity.is_full(post_booking) {
            self.flight_info
                .mark_flight_sold_out(&command.flight_id)
                .await?;
            info!(count = post_booking, "flight sold out");
        } else if self
            .flight_info
            .confirm_flight_if_min_reached(&command.flight_id, post_booking)
            .await?
        {
            info!(count = post_booking, "flight confirmed");
            self.notifications
                .notify_confirmation(&command.flight_id, post_booking)
                .await;
        }

        Ok(saved)
    }

    /// Lists bookings, optionally filtered by flight and/or passenger name.
    ///
    /// A flight filter applies first; a name filter then narrows it
    /// case-insensitively. A name filter alone searches across all flights.
    /// No pagination.
    #[instrument(skip(self))]
    pub async fn get_bookings(&self, query: BookingQuery) -> DomainResult<Vec<Booking>> {
        match (query.flight_id, query.passenger_name) {
            (Some(flight_id), name) => {
                let mut bookings = self.bookings.find_by_flight_id(&flight_id).await?;
                if let Some(name) = name {
                    bookings.retain(|booking| booking.passenger_name().matches_ignore_case(&name));
                }
                Ok(bookings)
            }
            (None, Some(name)) => self.bookings.find_by_passenger_name(&name).await,
            (None, None) => self.bookings.find_all().await,
        }
    }
}
