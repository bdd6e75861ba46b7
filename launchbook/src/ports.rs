//! Collaborator contracts for the booking domain.
//!
//! Every external dependency of the workflows - storage, payment,
//! notification, and the fleet boundary - is expressed as a trait here, so
//! the domain depends on contracts and adapters are wired in at process
//! start. No component reaches out to a process-wide singleton.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::booking::Booking;
use crate::errors::DomainResult;
use crate::flight::{Flight, FlightStatus};
use crate::rocket::Rocket;
use crate::types::{Capacity, FlightId, PassengerName, Price, RocketId, TransactionId};

/// Booking storage contract.
///
/// `save` assigns an identity on first save; saving a booking that already
/// has one preserves it and overwrites the same record.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// All bookings, across all flights.
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Bookings for one flight. The authoritative passenger count for a
    /// flight is the length of this list.
    async fn find_by_flight_id(&self, flight_id: &FlightId) -> DomainResult<Vec<Booking>>;

    /// Bookings matching a passenger name, case-insensitively, across all
    /// flights.
    async fn find_by_passenger_name(&self, name: &PassengerName) -> DomainResult<Vec<Booking>>;

    /// Persists a booking, assigning an identity if it has none.
    async fn save(&self, booking: Booking) -> DomainResult<Booking>;
}

/// Flight storage contract, with the same identity-on-first-save semantics.
#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Looks up one flight.
    async fn find_by_id(&self, id: &FlightId) -> DomainResult<Option<Flight>>;

    /// All flights. Flights are never deleted; cancelled flights remain
    /// queryable.
    async fn find_all(&self) -> DomainResult<Vec<Flight>>;

    /// Flights in the given status.
    async fn find_by_status(&self, status: FlightStatus) -> DomainResult<Vec<Flight>>;

    /// Persists a flight, assigning an identity if it has none.
    async fn save(&self, flight: Flight) -> DomainResult<Flight>;
}

/// Rocket storage contract.
#[async_trait]
pub trait RocketRepository: Send + Sync {
    /// Looks up one rocket.
    async fn find_by_id(&self, id: &RocketId) -> DomainResult<Option<Rocket>>;

    /// All registered rockets.
    async fn find_all(&self) -> DomainResult<Vec<Rocket>>;

    /// Persists a rocket, assigning an identity if it has none.
    async fn save(&self, rocket: Rocket) -> DomainResult<Rocket>;
}

/// Payment collaborator contract.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charges the given amount, returning the transaction reference.
    ///
    /// # Errors
    ///
    /// Fails with a `Payment` error when the payment is rejected (for
    /// example, the amount exceeds a configured limit).
    async fn process_payment(&self, amount: Price) -> DomainResult<TransactionId>;

    /// Refunds a previously charged transaction at the given amount.
    ///
    /// Fire-and-forget: infallible by contract. Adapters handle refund
    /// problems internally (logging them) and the cancellation workflow
    /// proceeds regardless.
    async fn process_refund(&self, transaction_id: &TransactionId, amount: Price);
}

/// Passenger notification contract. One-way; the core never retries.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Announces that a flight reached its minimum and will fly.
    async fn notify_confirmation(&self, flight_id: &FlightId, passenger_count: u32);

    /// Announces a cancellation to every affected booking.
    async fn notify_cancellation(&self, flight_id: &FlightId, bookings: &[Booking]);
}

/// Immutable snapshot of a flight, as seen across the sales/fleet boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightInfo {
    /// The flight identity.
    pub id: FlightId,
    /// The referenced rocket.
    pub rocket_id: RocketId,
    /// Departure timestamp.
    pub departure: DateTime<Utc>,
    /// Undiscounted seat price.
    pub base_price: Price,
    /// Lifecycle status at snapshot time.
    pub status: FlightStatus,
    /// Minimum passengers for viability.
    pub min_passengers: u32,
    /// The flight's capacity snapshot.
    pub capacity: Capacity,
}

/// Anti-corruption port: the booking logic's only view of flight state.
///
/// Callers receive immutable [`FlightInfo`] snapshots and request mutations
/// through guarded operations; they never hold a live `Flight`, so they
/// cannot bypass the aggregate's transition guards.
#[async_trait]
pub trait FlightInfoProvider: Send + Sync {
    /// Snapshot of one flight, or `None` if it does not exist.
    async fn flight_by_id(&self, flight_id: &FlightId) -> DomainResult<Option<FlightInfo>>;

    /// Whether the flight can currently accept another passenger.
    async fn can_accept_passengers(&self, flight_id: &FlightId) -> DomainResult<bool>;

    /// Marks a flight sold out through the aggregate's guarded transition.
    async fn mark_flight_sold_out(&self, flight_id: &FlightId) -> DomainResult<()>;

    /// Confirms a flight if `count` reaches its minimum, reporting whether
    /// the transition happened.
    async fn confirm_flight_if_min_reached(
        &self,
        flight_id: &FlightId,
        count: u32,
    ) -> DomainResult<bool>;

    /// Cancels a flight for low demand, re-validating the guard against the
    /// live flight. Reports whether the transition happened.
    async fn cancel_flight_if_low_demand(
        &self,
        flight_id: &FlightId,
        count: u32,
        cutoff: DateTime<Utc>,
    ) -> DomainResult<bool>;

    /// All `Scheduled` flights departing at or before `cutoff` whose
    /// configured minimum-passengers threshold is at least
    /// `min_passengers_threshold`.
    async fn flights_for_cancellation(
        &self,
        cutoff: DateTime<Utc>,
        min_passengers_threshold: u32,
    ) -> DomainResult<Vec<FlightInfo>>;
}
