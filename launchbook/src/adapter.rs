//! Fleet adapter: implements the [`FlightInfoProvider`] port over flight and
//! booking storage.
//!
//! This is the sales side's only mechanism to reach fleet state. Every
//! mutation loads the `Flight` aggregate, invokes its guarded transition, and
//! saves the result - the adapter never sets a status directly, so the
//! aggregate's guards cannot be bypassed from outside.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::booking::passenger_count;
use crate::errors::{DomainError, DomainResult};
use crate::flight::{Flight, FlightStatus};
use crate::ports::{BookingRepository, FlightInfo, FlightInfoProvider, FlightRepository};
use crate::types::FlightId;

/// Anti-corruption adapter between the booking workflows and flight storage.
#[derive(Clone)]
pub struct FleetAdapter {
    flights: Arc<dyn FlightRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl FleetAdapter {
    /// Creates the adapter over the given storage contracts.
    pub fn new(flights: Arc<dyn FlightRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { flights, bookings }
    }

    async fn load_flight(&self, flight_id: &FlightId) -> DomainResult<Flight> {
        self.flights
            .find_by_id(flight_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Flight {flight_id} not found")))
    }
}

fn snapshot(flight: &Flight) -> DomainResult<FlightInfo> {
    let id = flight
        .id()
        .cloned()
        .ok_or_else(|| DomainError::internal("Stored flight has no identity"))?;
    Ok(FlightInfo {
        id,
        rocket_id: flight.rocket_id().clone(),
        departure: flight.departure(),
        base_price: flight.base_price(),
        status: flight.status(),
        min_passengers: flight.min_passengers(),
        capacity: flight.capacity(),
    })
}

#[async_trait]
impl FlightInfoProvider for FleetAdapter {
    async fn flight_by_id(&self, flight_id: &FlightId) -> DomainResult<Option<FlightInfo>> {
        match self.flights.find_by_id(flight_id).await? {
            Some(flight) => Ok(Some(snapshot(&flight)?)),
            None => Ok(None),
        }
    }

    async fn can_accept_passengers(&self, flight_id: &FlightId) -> DomainResult<bool> {
        let Some(flight) = self.flights.find_by_id(flight_id).await? else {
            return Ok(false);
        };
        let bookings = self.bookings.find_by_flight_id(flight_id).await?;
        let count = passenger_count(&bookings)?;
        Ok(flight.can_accept_new_passenger(count))
    }

    async fn mark_flight_sold_out(&self, flight_id: &FlightId) -> DomainResult<()> {
        let mut flight = self.load_flight(flight_id).await?;
        flight.mark_sold_out();
        self.flights.save(flight).await?;
        debug!(flight_id = %flight_id, "flight marked sold out");
        Ok(())
    }

    async fn confirm_flight_if_min_reached(
        &self,
        flight_id: &FlightId,
        count: u32,
    ) -> DomainResult<bool> {
        let mut flight = self.load_flight(flight_id).await?;
        let confirmed = flight.confirm_if_min_reached(count);
        if confirmed {
            self.flights.save(flight).await?;
            debug!(flight_id = %flight_id, count, "flight confirmed");
        }
        Ok(confirmed)
    }

    async fn cancel_flight_if_low_demand(
        &self,
        flight_id: &FlightId,
        count: u32,
        cutoff: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let mut flight = self.load_flight(flight_id).await?;
        let cancelled = flight.cancel_due_to_low_demand(count, cutoff);
        if cancelled {
            self.flights.save(flight).await?;
            debug!(flight_id = %flight_id, count, "flight cancelled for low demand");
        }
        Ok(cancelled)
    }

    async fn flights_for_cancellation(
        &self,
        cutoff: DateTime<Utc>,
        min_passengers_threshold: u32,
    ) -> DomainResult<Vec<FlightInfo>> {
        let all = self.flights.find_all().await?;
        all.iter()
            .filter(|flight| {
                flight.status() == FlightStatus::Scheduled
                    && flight.departure() <= cutoff
                    && flight.min_passengers() >= min_passengers_threshold
            })
            .map(snapshot)
            .collect()
    }
}
