//! Validated domain types for the booking marketplace.
//!
//! All types use smart constructors so validity is established at
//! construction time, following the "parse, don't validate" principle.
//! Once constructed, a value is always valid - downstream code never
//! re-checks these invariants.

use nutype::nutype;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// Flight identifier. Assigned by storage on first save.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 50),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Display,
        AsRef,
        Deref,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct FlightId(String);

impl FlightId {
    /// Generates a new unique `FlightId`.
    pub fn generate() -> Self {
        let uuid = Uuid::now_v7();
        Self::try_new(format!("FLT-{}", uuid.simple().to_string().to_uppercase()))
            .expect("generated flight id is valid")
    }
}

/// Rocket identifier. Assigned by storage on first save.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 50),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Display,
        AsRef,
        Deref,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct RocketId(String);

impl RocketId {
    /// Generates a new unique `RocketId`.
    pub fn generate() -> Self {
        let uuid = Uuid::now_v7();
        Self::try_new(format!("RKT-{}", uuid.simple().to_string().to_uppercase()))
            .expect("generated rocket id is valid")
    }
}

/// Booking identifier. Assigned by storage on first save.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 50),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Display,
        AsRef,
        Deref,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct BookingId(String);

impl BookingId {
    /// Generates a new unique `BookingId`.
    pub fn generate() -> Self {
        let uuid = Uuid::now_v7();
        Self::try_new(format!("BKG-{}", uuid.simple().to_string().to_uppercase()))
            .expect("generated booking id is valid")
    }
}

/// Passenger name: trimmed and non-blank.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 100),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Display,
        AsRef,
        Deref,
        Serialize,
        Deserialize
    )
)]
pub struct PassengerName(String);

impl PassengerName {
    /// Case-insensitive exact-match comparison, used by booking queries.
    pub fn matches_ignore_case(&self, other: &Self) -> bool {
        self.as_ref().eq_ignore_ascii_case(other.as_ref())
    }
}

/// Rocket name: trimmed and non-blank.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 100),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Display,
        AsRef,
        Deref,
        Serialize,
        Deserialize
    )
)]
pub struct RocketName(String);

/// Payment transaction reference, recorded on a booking.
///
/// Non-blank by construction: a booking cannot exist without a successful
/// payment, and a failed construction surfaces as a `Payment` error.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 64),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Display,
        AsRef,
        Deref,
        Serialize,
        Deserialize
    )
)]
pub struct TransactionId(String);

/// A strictly positive monetary amount.
///
/// Base prices and final (discounted) prices are both carried by this type,
/// so "price > 0" is enforced exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price(Decimal);

impl Price {
    /// Creates a new `Price` from a `Decimal`.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if the amount is zero or negative.
    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "Price must be positive, got {amount}"
            )));
        }
        Ok(Self(amount))
    }

    /// Returns the amount as a `Decimal`.
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Applies a discount rate in `[0, 1)`, returning the discounted price.
    ///
    /// The rate is strictly below 1 for every rule in the discount table, so
    /// the result stays positive.
    pub fn apply_discount(&self, rate: Decimal) -> Self {
        Self(self.0 * (Decimal::ONE - rate))
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Minimum allowed passenger capacity.
pub const MIN_CAPACITY: u32 = 1;
/// Maximum allowed passenger capacity.
pub const MAX_CAPACITY: u32 = 10;

/// Validated passenger-limit value, bound to `[1, 10]`.
///
/// All capacity comparisons are expressed as methods on this type, never as
/// raw integer comparisons, so the bound is enforced exactly once. A flight
/// copies this value from its rocket at schedule time and never re-reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity(u32);

impl Capacity {
    /// Creates a `Capacity` from a raw value.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if the value is outside `[1, 10]`.
    pub fn try_new(raw: u32) -> DomainResult<Self> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&raw) {
            return Err(DomainError::validation(format!(
                "Capacity must be between {MIN_CAPACITY} and {MAX_CAPACITY}, got {raw}"
            )));
        }
        Ok(Self(raw))
    }

    /// Returns the maximum number of passengers.
    pub const fn max_passengers(&self) -> u32 {
        self.0
    }

    /// Returns true iff `current_passengers` has reached the bound.
    pub const fn is_full(&self, current_passengers: u32) -> bool {
        current_passengers >= self.0
    }

    /// Fails with a `Capacity` error iff the flight is full at
    /// `current_passengers`. Side-effect-free otherwise.
    pub fn ensure_can_board(&self, current_passengers: u32) -> DomainResult<()> {
        if self.is_full(current_passengers) {
            return Err(DomainError::capacity(format!(
                "Flight is sold out ({current_passengers}/{})",
                self.0
            )));
        }
        Ok(())
    }
}

impl Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Capacity({})", self.0)
    }
}
