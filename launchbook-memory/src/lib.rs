//! In-memory adapters for the `launchbook` domain core.
//!
//! This crate provides in-memory implementations of the storage ports plus a
//! simulated payment gateway and a tracing-backed notification service,
//! useful for testing and development scenarios where persistence and real
//! collaborators are not required.
//!
//! All repositories share storage across clones and assign identities on
//! first save; re-saving an aggregate that already has an identity preserves
//! it and overwrites the same record.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::significant_drop_tightening)]

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{info, warn};
use uuid::Uuid;

use launchbook::{
    Booking, BookingId, BookingRepository, DomainError, DomainResult, Flight, FlightId,
    FlightRepository, FlightStatus, NotificationService, PassengerName, PaymentGateway, Price,
    Rocket, RocketId, RocketRepository, TransactionId,
};

/// Thread-safe in-memory booking storage.
#[derive(Clone, Default)]
pub struct InMemoryBookingRepository {
    bookings: Arc<RwLock<HashMap<BookingId, Booking>>>,
}

impl InMemoryBookingRepository {
    /// Creates an empty booking repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let bookings = self.bookings.read().expect("RwLock poisoned");
        Ok(bookings.values().cloned().collect())
    }

    async fn find_by_flight_id(&self, flight_id: &FlightId) -> DomainResult<Vec<Booking>> {
        let bookings = self.bookings.read().expect("RwLock poisoned");
        Ok(bookings
            .values()
            .filter(|booking| booking.flight_id() == flight_id)
            .cloned()
            .collect())
    }

    async fn find_by_passenger_name(&self, name: &PassengerName) -> DomainResult<Vec<Booking>> {
        let bookings = self.bookings.read().expect("RwLock poisoned");
        Ok(bookings
            .values()
            .filter(|booking| booking.passenger_name().matches_ignore_case(name))
            .cloned()
            .collect())
    }

    async fn save(&self, mut booking: Booking) -> DomainResult<Booking> {
        let mut bookings = self.bookings.write().expect("RwLock poisoned");
        if booking.id().is_none() {
            booking.assign_id(BookingId::generate());
        }
        let id = booking
            .id()
            .cloned()
            .ok_or_else(|| DomainError::internal("Booking id missing after assignment"))?;
        bookings.insert(id, booking.clone());
        Ok(booking)
    }
}

/// Thread-safe in-memory flight storage.
#[derive(Clone, Default)]
pub struct InMemoryFlightRepository {
    flights: Arc<RwLock<HashMap<FlightId, Flight>>>,
}

impl InMemoryFlightRepository {
    /// Creates an empty flight repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlightRepository for InMemoryFlightRepository {
    async fn find_by_id(&self, id: &FlightId) -> DomainResult<Option<Flight>> {
        let flights = self.flights.read().expect("RwLock poisoned");
        Ok(flights.get(id).cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<Flight>> {
        let flights = self.flights.read().expect("RwLock poisoned");
        Ok(flights.values().cloned().collect())
    }

    async fn find_by_status(&self, status: FlightStatus) -> DomainResult<Vec<Flight>> {
        let flights = self.flights.read().expect("RwLock poisoned");
        Ok(flights
            .values()
            .filter(|flight| flight.status() == status)
            .cloned()
            .collect())
    }

    async fn save(&self, mut flight: Flight) -> DomainResult<Flight> {
        let mut flights = self.flights.write().expect("RwLock poisoned");
        if flight.id().is_none() {
            flight.assign_id(FlightId::generate());
        }
        let id = flight
            .id()
            .cloned()
            .ok_or_else(|| DomainError::internal("Flight id missing after assignment"))?;
        flights.insert(id, flight.clone());
        Ok(flight)
    }
}

/// Thread-safe in-memory rocket storage.
#[derive(Clone, Default)]
pub struct InMemoryRocketRepository {
    rockets: Arc<RwLock<HashMap<RocketId, Rocket>>>,
}

impl InMemoryRocketRepository {
    /// Creates an empty rocket repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RocketRepository for InMemoryRocketRepository {
    async fn find_by_id(&self, id: &RocketId) -> DomainResult<Option<Rocket>> {
        let rockets = self.rockets.read().expect("RwLock poisoned");
        Ok(rockets.get(id).cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<Rocket>> {
        let rockets = self.rockets.read().expect("RwLock poisoned");
        Ok(rockets.values().cloned().collect())
    }

    async fn save(&self, mut rocket: Rocket) -> DomainResult<Rocket> {
        let mut rockets = self.rockets.write().expect("RwLock poisoned");
        if rocket.id().is_none() {
            rocket.assign_id(RocketId::generate());
        }
        let id = rocket
            .id()
            .cloned()
            .ok_or_else(|| DomainError::internal("Rocket id missing after assignment"))?;
        rockets.insert(id, rocket.clone());
        Ok(rocket)
    }
}

/// Default limit above which the simulated gateway rejects payments.
pub const DEFAULT_PAYMENT_LIMIT: Decimal = dec!(10_000);

/// Simulated payment gateway.
///
/// Charges succeed up to a configured limit and produce `TXN-` prefixed
/// transaction references. Refunds always succeed and are logged.
#[derive(Debug, Clone)]
pub struct SimulatedPaymentGateway {
    limit: Decimal,
}

impl SimulatedPaymentGateway {
    /// Creates a gateway with the given rejection limit.
    pub const fn with_limit(limit: Decimal) -> Self {
        Self { limit }
    }
}

impl Default for SimulatedPaymentGateway {
    fn default() -> Self {
        Self::with_limit(DEFAULT_PAYMENT_LIMIT)
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn process_payment(&self, amount: Price) -> DomainResult<TransactionId> {
        if amount.amount() > self.limit {
            warn!(%amount, limit = %self.limit, "payment rejected");
            return Err(DomainError::payment(format!(
                "Payment rejected: amount {amount} exceeds limit ${}",
                self.limit
            )));
        }
        let reference = Uuid::now_v7().simple().to_string();
        let transaction_id =
            TransactionId::try_new(format!("TXN-{}", reference[..8].to_uppercase()))
                .map_err(|err| DomainError::internal(err.to_string()))?;
        info!(%amount, %transaction_id, "payment processed");
        Ok(transaction_id)
    }

    async fn process_refund(&self, transaction_id: &TransactionId, amount: Price) {
        info!(%transaction_id, %amount, "refund processed");
    }
}

/// Notification adapter that logs through `tracing` instead of sending
/// anything.
#[derive(Debug, Clone, Default)]
pub struct TracingNotificationService;

impl TracingNotificationService {
    /// Creates the adapter.
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationService for TracingNotificationService {
    async fn notify_confirmation(&self, flight_id: &FlightId, passenger_count: u32) {
        info!(%flight_id, passenger_count, "flight confirmed, notifying passengers");
    }

    async fn notify_cancellation(&self, flight_id: &FlightId, bookings: &[Booking]) {
        info!(
            %flight_id,
            passengers = bookings.len(),
            "flight cancelled, notifying passengers"
        );
        for booking in bookings {
            info!(
                passenger = %booking.passenger_name(),
                booking_id = ?booking.id(),
                refund = %booking.final_price(),
                "sending cancellation notice"
            );
        }
    }
}
