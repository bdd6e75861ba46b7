//! `Launchbook` - Launch-booking marketplace domain core
//!
//! This crate implements the booking/flight domain logic of a launch-booking
//! marketplace: rockets carry flights, passengers book seats, prices are
//! discounted by a fixed rule set, and under-subscribed flights are cancelled
//! with refunds before departure.
//!
//! The crate is organized hexagonally. Aggregates ([`Flight`], [`Booking`],
//! [`Rocket`]) carry their own invariants and guarded transitions; all
//! collaborators (storage, payment, notification) are expressed as ports in
//! [`ports`]; the booking workflow consults flight state exclusively through
//! the [`FlightInfoProvider`] anti-corruption port, never through a live
//! `Flight` reference.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod adapter;
pub mod booking;
pub mod bookings;
pub mod cancellation;
pub mod errors;
pub mod fleet;
pub mod flight;
pub mod locks;
pub mod ports;
pub mod pricing;
pub mod rocket;
pub mod types;

pub use adapter::FleetAdapter;
pub use booking::Booking;
pub use bookings::{BookingQuery, BookingsService, CreateBookingCommand};
pub use cancellation::{CancellationPolicy, CancellationService};
pub use errors::{DomainError, DomainResult};
pub use fleet::{FleetService, RegisterRocketCommand, ScheduleFlightCommand};
pub use flight::{Flight, FlightStatus};
pub use locks::FlightLocks;
pub use ports::{
    BookingRepository, FlightInfo, FlightInfoProvider, FlightRepository, NotificationService,
    PaymentGateway, RocketRepository,
};
pub use rocket::Rocket;
pub use types::{
    BookingId, Capacity, FlightId, PassengerName, Price, RocketId, RocketName, TransactionId,
};
