//! The `Flight` aggregate and its status state machine.
//!
//! A flight is mutated only through its own guarded transition methods -
//! external code never sets the status directly. The passenger counts the
//! transitions take are always supplied by the caller from the authoritative
//! booking count; the flight itself stores no count.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::types::{Capacity, FlightId, Price, RocketId};

/// Flight lifecycle status.
///
/// `Scheduled` is the initial state. `Scheduled` and `Confirmed` can both
/// progress to `SoldOut`; only `Scheduled` can be cancelled. `SoldOut` and
/// `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightStatus {
    /// Announced and selling seats; not yet viable.
    Scheduled,
    /// Reached its minimum-passengers threshold; will fly.
    Confirmed,
    /// Every seat is taken. Terminal.
    SoldOut,
    /// Cancelled for low demand. Terminal; never overwritten.
    Cancelled,
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Scheduled => "SCHEDULED",
            Self::Confirmed => "CONFIRMED",
            Self::SoldOut => "SOLD_OUT",
            Self::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

/// A scheduled launch tied to one rocket, with its own capacity snapshot,
/// pricing, and status.
///
/// The capacity is copied from the referenced rocket at schedule time and
/// never re-read, so later rocket changes do not retroactively alter a
/// flight's capacity. Flights are retained indefinitely - cancelled flights
/// remain queryable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    id: Option<FlightId>,
    rocket_id: RocketId,
    departure: DateTime<Utc>,
    base_price: Price,
    status: FlightStatus,
    min_passengers: u32,
    capacity: Capacity,
}

impl Flight {
    /// Schedules a new flight with schedule-time validation.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if the departure is not strictly in the
    /// future, is more than one year ahead, or if `min_passengers` is zero or
    /// exceeds the capacity. Invalid `min_passengers` values are rejected,
    /// never clamped.
    pub fn schedule(
        rocket_id: RocketId,
        departure: DateTime<Utc>,
        base_price: Price,
        capacity: Capacity,
        min_passengers: u32,
    ) -> DomainResult<Self> {
        let now = Utc::now();
        if departure <= now {
            return Err(DomainError::validation(
                "Departure date must be in the future",
            ));
        }
        let horizon = now
            .checked_add_months(Months::new(12))
            .ok_or_else(|| DomainError::internal("Departure horizon overflow"))?;
        if departure > horizon {
            return Err(DomainError::validation(
                "Departure date cannot exceed 1 year",
            ));
        }
        if min_passengers == 0 {
            return Err(DomainError::validation("Min passengers must be positive"));
        }
        if min_passengers > capacity.max_passengers() {
            return Err(DomainError::validation(format!(
                "Min passengers cannot exceed rocket capacity ({})",
                capacity.max_passengers()
            )));
        }
        Ok(Self {
            id: None,
            rocket_id,
            departure,
            base_price,
            status: FlightStatus::Scheduled,
            min_passengers,
            capacity,
        })
    }

    /// Rehydrates a flight from storage without validation.
    pub const fn restore(
        id: FlightId,
        rocket_id: RocketId,
        departure: DateTime<Utc>,
        base_price: Price,
        status: FlightStatus,
        min_passengers: u32,
        capacity: Capacity,
    ) -> Self {
        Self {
            id: Some(id),
            rocket_id,
            departure,
            base_price,
            status,
            min_passengers,
            capacity,
        }
    }

    /// Confirms the flight if it is still `Scheduled` and `count` has reached
    /// the minimum-passengers threshold. Returns whether the transition
    /// happened.
    ///
    /// Idempotent: calling again on an already-confirmed flight returns
    /// `false`, so callers emit at most one confirmation notification.
    pub fn confirm_if_min_reached(&mut self, count: u32) -> bool {
        if self.status == FlightStatus::Scheduled && count >= self.min_passengers {
            self.status = FlightStatus::Confirmed;
            return true;
        }
        false
    }

    /// Marks the flight sold out, unless it is already cancelled.
    ///
    /// A sold-out-triggering booking must never overwrite a cancelled flight.
    pub fn mark_sold_out(&mut self) {
        if self.status != FlightStatus::Cancelled {
            self.status = FlightStatus::SoldOut;
        }
    }

    /// Whether another passenger can be accepted at the given current count.
    pub fn can_accept_new_passenger(&self, count: u32) -> bool {
        if matches!(self.status, FlightStatus::Cancelled | FlightStatus::SoldOut) {
            return false;
        }
        !self.capacity.is_full(count)
    }

    /// Cancels the flight for low demand. Succeeds only if the flight is
    /// still `Scheduled`, departs at or before `cutoff`, and `count` is below
    /// the minimum-passengers threshold. Returns whether the transition
    /// happened.
    pub fn cancel_due_to_low_demand(&mut self, count: u32, cutoff: DateTime<Utc>) -> bool {
        if self.status != FlightStatus::Scheduled {
            return false;
        }
        if self.departure > cutoff {
            return false;
        }
        if count >= self.min_passengers {
            return false;
        }
        self.status = FlightStatus::Cancelled;
        true
    }

    /// The flight identity, absent before first save.
    pub const fn id(&self) -> Option<&FlightId> {
        self.id.as_ref()
    }

    /// Assigns the storage identity. Called once, by storage, on first save.
    pub fn assign_id(&mut self, id: FlightId) {
        self.id = Some(id);
    }

    /// The referenced rocket.
    pub const fn rocket_id(&self) -> &RocketId {
        &self.rocket_id
    }

    /// Departure timestamp.
    pub const fn departure(&self) -> DateTime<Utc> {
        self.departure
    }

    /// Undiscounted seat price.
    pub const fn base_price(&self) -> Price {
        self.base_price
    }

    /// Current lifecycle status.
    pub const fn status(&self) -> FlightStatus {
        self.status
    }

    /// Minimum passengers required for the flight to be viable.
    pub const fn min_passengers(&self) -> u32 {
        self.min_passengers
    }

    /// Capacity snapshot taken from the rocket at schedule time.
    pub const fn capacity(&self) -> Capacity {
        self.capacity
    }
}
