//! Shared wiring and recording collaborators for the integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use launchbook::{
    Booking, BookingRepository, BookingsService, CancellationPolicy, CancellationService,
    DomainError, DomainResult, FleetAdapter, FleetService, Flight, FlightId, FlightInfoProvider,
    FlightLocks, FlightRepository, NotificationService, PassengerName, PaymentGateway, Price,
    RegisterRocketCommand, RocketName, RocketRepository, ScheduleFlightCommand, TransactionId,
};
use launchbook_memory::{
    InMemoryBookingRepository, InMemoryFlightRepository, InMemoryRocketRepository,
};

static TXN_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_reference() -> String {
    format!("TXN-{:08}", TXN_COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Payment gateway that records every charge and refund, optionally
/// rejecting charges above a limit.
pub struct RecordingPaymentGateway {
    limit: Option<Decimal>,
    pub charges: Mutex<Vec<Price>>,
    pub refunds: Mutex<Vec<(TransactionId, Price)>>,
}

impl RecordingPaymentGateway {
    pub fn unlimited() -> Self {
        Self {
            limit: None,
            charges: Mutex::new(Vec::new()),
            refunds: Mutex::new(Vec::new()),
        }
    }

    pub fn with_limit(limit: Decimal) -> Self {
        Self {
            limit: Some(limit),
            ..Self::unlimited()
        }
    }
}

#[async_trait]
impl PaymentGateway for RecordingPaymentGateway {
    async fn process_payment(&self, amount: Price) -> DomainResult<TransactionId> {
        if let Some(limit) = self.limit {
            if amount.amount() > limit {
                return Err(DomainError::payment(format!(
                    "Payment rejected: amount {amount} exceeds limit ${limit}"
                )));
            }
        }
        self.charges.lock().unwrap().push(amount);
        Ok(TransactionId::try_new(next_reference()).unwrap())
    }

    async fn process_refund(&self, transaction_id: &TransactionId, amount: Price) {
        self.refunds
            .lock()
            .unwrap()
            .push((transaction_id.clone(), amount));
    }
}

/// Notification service that records every call.
#[derive(Default)]
pub struct RecordingNotificationService {
    pub confirmations: Mutex<Vec<(FlightId, u32)>>,
    pub cancellations: Mutex<Vec<(FlightId, Vec<Booking>)>>,
}

#[async_trait]
impl NotificationService for RecordingNotificationService {
    async fn notify_confirmation(&self, flight_id: &FlightId, passenger_count: u32) {
        self.confirmations
            .lock()
            .unwrap()
            .push((flight_id.clone(), passenger_count));
    }

    async fn notify_cancellation(&self, flight_id: &FlightId, bookings: &[Booking]) {
        self.cancellations
            .lock()
            .unwrap()
            .push((flight_id.clone(), bookings.to_vec()));
    }
}

/// A fully wired application over in-memory adapters.
pub struct TestApp {
    pub flights: Arc<InMemoryFlightRepository>,
    pub rockets: Arc<InMemoryRocketRepository>,
    pub bookings: Arc<InMemoryBookingRepository>,
    pub payments: Arc<RecordingPaymentGateway>,
    pub notifications: Arc<RecordingNotificationService>,
    pub adapter: Arc<FleetAdapter>,
    pub fleet: FleetService,
    pub sales: BookingsService,
    pub cancellation: CancellationService,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(RecordingPaymentGateway::unlimited())
    }

    pub fn with_payment_limit(limit: Decimal) -> Self {
        Self::build(RecordingPaymentGateway::with_limit(limit))
    }

    fn build(payments: RecordingPaymentGateway) -> Self {
        let flights = Arc::new(InMemoryFlightRepository::new());
        let rockets = Arc::new(InMemoryRocketRepository::new());
        let bookings = Arc::new(InMemoryBookingRepository::new());
        let payments = Arc::new(payments);
        let notifications = Arc::new(RecordingNotificationService::default());
        let locks = Arc::new(FlightLocks::new());

        let flight_repo: Arc<dyn FlightRepository> = flights.clone();
        let rocket_repo: Arc<dyn RocketRepository> = rockets.clone();
        let booking_repo: Arc<dyn BookingRepository> = bookings.clone();
        let payment_port: Arc<dyn PaymentGateway> = payments.clone();
        let notification_port: Arc<dyn NotificationService> = notifications.clone();

        let adapter = Arc::new(FleetAdapter::new(
            flight_repo.clone(),
            booking_repo.clone(),
        ));
        let flight_info: Arc<dyn FlightInfoProvider> = adapter.clone();

        let fleet = FleetService::new(rocket_repo, flight_repo);
        let sales = BookingsService::new(
            booking_repo.clone(),
            flight_info.clone(),
            payment_port.clone(),
            notification_port.clone(),
            locks.clone(),
        );
        let cancellation = CancellationService::new(
            flight_info,
            booking_repo,
            payment_port,
            notification_port,
            locks,
            CancellationPolicy::default(),
        );

        Self {
            flights,
            rockets,
            bookings,
            payments,
            notifications,
            adapter,
            fleet,
            sales,
            cancellation,
        }
    }

    /// Registers a rocket and schedules a flight on it, returning the
    /// flight's assigned identity.
    pub async fn schedule_flight(
        &self,
        days_out: i64,
        base_price: Decimal,
        capacity: u32,
        min_passengers: u32,
    ) -> FlightId {
        let rocket = self
            .fleet
            .register_rocket(RegisterRocketCommand {
                name: RocketName::try_new("Test Rocket").unwrap(),
                capacity,
                max_speed: Some(dec!(28000)),
            })
            .await
            .unwrap();

        let flight = self
            .fleet
            .schedule_flight(ScheduleFlightCommand {
                rocket_id: rocket.id().cloned().unwrap(),
                departure: Utc::now() + Duration::days(days_out),
                base_price: Price::new(base_price).unwrap(),
                min_passengers,
            })
            .await
            .unwrap();
        flight.id().cloned().unwrap()
    }

    /// Books a seat for the named passenger.
    pub async fn book(&self, flight_id: &FlightId, passenger: &str) -> DomainResult<Booking> {
        self.sales
            .create_booking(launchbook::CreateBookingCommand::new(
                flight_id.clone(),
                PassengerName::try_new(passenger).unwrap(),
            ))
            .await
    }

    /// The persisted flight, straight from storage.
    pub async fn stored_flight(&self, flight_id: &FlightId) -> Flight {
        self.flights
            .find_by_id(flight_id)
            .await
            .unwrap()
            .expect("flight should exist")
    }
}
