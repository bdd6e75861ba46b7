//! The `Booking` aggregate: one passenger's paid seat on a flight.

use serde::{Deserialize, Serialize};

use crate::types::{BookingId, FlightId, PassengerName, Price, TransactionId};

/// One paid seat on a flight.
///
/// Every field except the storage-assigned identity is validated at type
/// construction, so a `Booking` only ever exists with a non-blank passenger
/// name, a positive final price, and a recorded payment transaction. Bookings
/// are never mutated after creation and never deleted - cancellation refunds
/// a booking but the record persists as history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: Option<BookingId>,
    flight_id: FlightId,
    passenger_name: PassengerName,
    final_price: Price,
    transaction_id: TransactionId,
}

impl Booking {
    /// Creates a new booking recording an already-successful payment.
    ///
    /// This constructor only records the payment *result* - it never
    /// initiates payment. The inputs are already validated through their
    /// smart constructors, so no further checks are needed here.
    pub const fn create(
        flight_id: FlightId,
        passenger_name: PassengerName,
        final_price: Price,
        transaction_id: TransactionId,
    ) -> Self {
        Self {
            id: None,
            flight_id,
            passenger_name,
            final_price,
            transaction_id,
        }
    }

    /// Rehydrates a booking from storage.
    pub const fn restore(
        id: BookingId,
        flight_id: FlightId,
        passenger_name: PassengerName,
        final_price: Price,
        transaction_id: TransactionId,
    ) -> Self {
        Self {
            id: Some(id),
            flight_id,
            passenger_name,
            final_price,
            transaction_id,
        }
    }

    /// The booking identity, absent before first save.
    pub const fn id(&self) -> Option<&BookingId> {
        self.id.as_ref()
    }

    /// Assigns the storage identity. Called once, by storage, on first save.
    pub fn assign_id(&mut self, id: BookingId) {
        self.id = Some(id);
    }

    /// The booked flight.
    pub const fn flight_id(&self) -> &FlightId {
        &self.flight_id
    }

    /// The passenger who holds the seat.
    pub const fn passenger_name(&self) -> &PassengerName {
        &self.passenger_name
    }

    /// The price actually paid, discounts already applied.
    pub const fn final_price(&self) -> Price {
        self.final_price
    }

    /// The payment transaction this booking records.
    pub const fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }
}

/// The authoritative passenger count of a booking list.
///
/// # Errors
///
/// Returns an `Internal` error if the count exceeds `u32::MAX`, which a
/// capacity-bounded flight can never reach.
pub fn passenger_count(bookings: &[Booking]) -> crate::errors::DomainResult<u32> {
    u32::try_from(bookings.len())
        .map_err(|_| crate::errors::DomainError::internal("Booking count overflow"))
}
