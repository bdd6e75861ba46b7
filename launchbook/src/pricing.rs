//! Discount computation for new bookings.
//!
//! Exactly one discount applies per booking, evaluated in a fixed precedence
//! where the first matching rule wins. The rules reward tipping a flight into
//! viability and early purchases, push sales close to departure, and reserve
//! the last seat for scarcity pricing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Capacity;

/// No discount: the last seat and the default case.
pub const NO_DISCOUNT: Decimal = dec!(0);
/// Reward for the booking that exactly reaches the minimum-passengers
/// threshold.
pub const MIN_REACHED_RATE: Decimal = dec!(0.3);
/// Early-bird rate for departures more than 180 days out.
pub const EARLY_BIRD_RATE: Decimal = dec!(0.1);
/// Late availability push for departures 7 to 30 days out.
pub const LATE_PUSH_RATE: Decimal = dec!(0.2);

/// Whole days from `now` until `departure`, truncated (partial days never
/// round up).
pub fn days_until_departure(now: DateTime<Utc>, departure: DateTime<Utc>) -> i64 {
    (departure - now).num_days()
}

/// The discount rate for the next booking on a flight.
///
/// `current_bookings` is the count *before* this booking. Precedence, first
/// match wins:
///
/// 1. This booking takes the last seat: no discount.
/// 2. This booking exactly reaches the minimum: 30% off.
/// 3. More than 180 days to departure: 10% off.
/// 4. 7 to 30 days (inclusive) to departure: 20% off.
/// 5. Otherwise: no discount.
pub fn discount_rate(
    capacity: Capacity,
    min_passengers: u32,
    current_bookings: u32,
    days_until_departure: i64,
) -> Decimal {
    let seat_number = current_bookings + 1;
    if seat_number == capacity.max_passengers() {
        NO_DISCOUNT
    } else if seat_number == min_passengers {
        MIN_REACHED_RATE
    } else if days_until_departure > 180 {
        EARLY_BIRD_RATE
    } else if (7..=30).contains(&days_until_departure) {
        LATE_PUSH_RATE
    } else {
        NO_DISCOUNT
    }
}
