//! Fleet use-cases: rocket registration and flight scheduling.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, instrument};

use crate::errors::{DomainError, DomainResult};
use crate::flight::{Flight, FlightStatus};
use crate::ports::{FlightRepository, RocketRepository};
use crate::rocket::Rocket;
use crate::types::{Capacity, Price, RocketId, RocketName};

/// Request to register a new rocket.
#[derive(Debug, Clone)]
pub struct RegisterRocketCommand {
    /// The rocket's display name.
    pub name: RocketName,
    /// Raw passenger capacity, validated into a [`Capacity`] on registration.
    pub capacity: u32,
    /// Maximum speed, informational only.
    pub max_speed: Option<Decimal>,
}

/// Request to schedule a new flight on an existing rocket.
#[derive(Debug, Clone)]
pub struct ScheduleFlightCommand {
    /// The rocket that will fly.
    pub rocket_id: RocketId,
    /// Departure timestamp.
    pub departure: DateTime<Utc>,
    /// Undiscounted seat price.
    pub base_price: Price,
    /// Minimum passengers for viability. Rejected, never clamped, when zero
    /// or above the rocket's capacity.
    pub min_passengers: u32,
}

/// Fleet-side use-cases over rocket and flight storage.
pub struct FleetService {
    rockets: Arc<dyn RocketRepository>,
    flights: Arc<dyn FlightRepository>,
}

impl FleetService {
    /// Wires the service with its storage contracts.
    pub fn new(rockets: Arc<dyn RocketRepository>, flights: Arc<dyn FlightRepository>) -> Self {
        Self { rockets, flights }
    }

    /// Registers a rocket, validating its capacity.
    #[instrument(skip(self, command), fields(name = %command.name))]
    pub async fn register_rocket(&self, command: RegisterRocketCommand) -> DomainResult<Rocket> {
        let capacity = Capacity::try_new(command.capacity)?;
        let rocket = Rocket::register(command.name, capacity, command.max_speed);
        let saved = self.rockets.save(rocket).await?;
        info!(capacity = capacity.max_passengers(), "rocket registered");
        Ok(saved)
    }

    /// Lists all registered rockets.
    pub async fn get_rockets(&self) -> DomainResult<Vec<Rocket>> {
        self.rockets.find_all().await
    }

    /// Schedules a flight, copying the rocket's capacity into the flight.
    ///
    /// The capacity snapshot is taken here, once; later rocket changes do not
    /// retroactively alter the flight.
    #[instrument(skip(self, command), fields(rocket_id = %command.rocket_id))]
    pub async fn schedule_flight(&self, command: ScheduleFlightCommand) -> DomainResult<Flight> {
        let rocket = self
            .rockets
            .find_by_id(&command.rocket_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Rocket {} does not exist", command.rocket_id))
            })?;

        let flight = Flight::schedule(
            command.rocket_id,
            command.departure,
            command.base_price,
            rocket.capacity(),
            command.min_passengers,
        )?;
        let saved = self.flights.save(flight).await?;
        info!(departure = %saved.departure(), "flight scheduled");
        Ok(saved)
    }

    /// Lists flights, optionally filtered by status.
    pub async fn get_flights(&self, status: Option<FlightStatus>) -> DomainResult<Vec<Flight>> {
        match status {
            Some(status) => self.flights.find_by_status(status).await,
            None => self.flights.find_all().await,
        }
    }
}
