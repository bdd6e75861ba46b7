//! End-to-end booking flow tests over the in-memory adapters: discount
//! precedence, flight-status progression, payment failure isolation, and
//! booking queries.

mod support;

use chrono::{Duration, Utc};
use launchbook::{
    Booking, BookingQuery, Capacity, DomainError, Flight, FlightId, FlightStatus, PassengerName,
    Price, RocketId,
};
use rust_decimal_macros::dec;
use support::TestApp;

#[tokio::test]
async fn booking_is_persisted_with_identity() {
    let app = TestApp::new();
    let flight_id = app.schedule_flight(100, dec!(1000), 7, 5).await;

    let booking = app.book(&flight_id, "Ada Lovelace").await.unwrap();

    assert!(booking.id().is_some());
    assert_eq!(booking.flight_id(), &flight_id);
    assert!(booking.transaction_id().as_ref().starts_with("TXN-"));

    let stored = app.sales.get_bookings(BookingQuery::default()).await.unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn unknown_flight_is_not_found() {
    let app = TestApp::new();
    let result = app.book(&FlightId::generate(), "Ada Lovelace").await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn cancelled_flight_rejects_bookings() {
    let app = TestApp::new();
    let cancelled = Flight::restore(
        FlightId::generate(),
        RocketId::generate(),
        Utc::now() + Duration::days(30),
        Price::new(dec!(1000)).unwrap(),
        FlightStatus::Cancelled,
        5,
        Capacity::try_new(7).unwrap(),
    );
    use launchbook::FlightRepository;
    let cancelled = app.flights.save(cancelled).await.unwrap();

    let result = app
        .book(cancelled.id().unwrap(), "Ada Lovelace")
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn min_reached_discount_beats_early_bird() {
    let app = TestApp::new();
    // 200 days out: every seat would get the 10% early-bird rate...
    let flight_id = app.schedule_flight(200, dec!(1000), 7, 5).await;

    for passenger in ["P1", "P2", "P3", "P4"] {
        let booking = app.book(&flight_id, passenger).await.unwrap();
        assert_eq!(booking.final_price().amount(), dec!(900));
    }

    // ...but the 5th booking exactly reaches the minimum and gets 30%.
    let fifth = app.book(&flight_id, "P5").await.unwrap();
    assert_eq!(fifth.final_price().amount(), dec!(700));

    let flight = app.stored_flight(&flight_id).await;
    assert_eq!(flight.status(), FlightStatus::Confirmed);
}

#[tokio::test]
async fn late_push_and_dead_zone_rates() {
    let app = TestApp::new();

    // 20 days out: late availability push, 20% off.
    let flight_id = app.schedule_flight(20, dec!(1000), 7, 5).await;
    let booking = app.book(&flight_id, "Ada Lovelace").await.unwrap();
    assert_eq!(booking.final_price().amount(), dec!(800));

    // 100 days out: between the windows, full price.
    let flight_id = app.schedule_flight(100, dec!(1000), 7, 5).await;
    let booking = app.book(&flight_id, "Ada Lovelace").await.unwrap();
    assert_eq!(booking.final_price().amount(), dec!(1000));
}

#[tokio::test]
async fn last_seat_never_discounted() {
    let app = TestApp::new();
    // Capacity 3, minimum 3: the last seat simultaneously reaches the
    // minimum, and the last-seat rule still wins.
    let flight_id = app.schedule_flight(200, dec!(1000), 3, 3).await;

    app.book(&flight_id, "P1").await.unwrap();
    app.book(&flight_id, "P2").await.unwrap();
    let last = app.book(&flight_id, "P3").await.unwrap();
    assert_eq!(last.final_price().amount(), dec!(1000));
}

#[tokio::test]
async fn filling_capacity_marks_sold_out_without_confirmation() {
    let app = TestApp::new();
    let flight_id = app.schedule_flight(200, dec!(1000), 3, 2).await;

    app.book(&flight_id, "P1").await.unwrap();
    app.book(&flight_id, "P2").await.unwrap();
    assert_eq!(
        app.stored_flight(&flight_id).await.status(),
        FlightStatus::Confirmed
    );

    app.book(&flight_id, "P3").await.unwrap();
    assert_eq!(
        app.stored_flight(&flight_id).await.status(),
        FlightStatus::SoldOut
    );

    // Only the min-reaching booking notified; the sold-out one did not.
    let confirmations = app.notifications.confirmations.lock().unwrap().clone();
    assert_eq!(confirmations, vec![(flight_id.clone(), 2)]);

    // A fourth attempt is rejected up front.
    let result = app.book(&flight_id, "P4").await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn confirmation_fires_exactly_once() {
    let app = TestApp::new();
    let flight_id = app.schedule_flight(200, dec!(1000), 7, 2).await;

    app.book(&flight_id, "P1").await.unwrap();
    app.book(&flight_id, "P2").await.unwrap();
    app.book(&flight_id, "P3").await.unwrap();

    let confirmations = app.notifications.confirmations.lock().unwrap().clone();
    assert_eq!(confirmations, vec![(flight_id, 2)]);
}

#[tokio::test]
async fn payment_failure_leaves_no_trace() {
    let app = TestApp::with_payment_limit(dec!(10_000));
    // 18,000 after the early-bird discount, above the gateway limit.
    let flight_id = app.schedule_flight(200, dec!(20_000), 7, 5).await;

    let result = app.book(&flight_id, "Ada Lovelace").await;
    assert!(matches!(result, Err(DomainError::Payment(_))));

    // No booking persisted, no flight state changed, nothing notified.
    let bookings = app.sales.get_bookings(BookingQuery::default()).await.unwrap();
    assert!(bookings.is_empty());
    assert_eq!(
        app.stored_flight(&flight_id).await.status(),
        FlightStatus::Scheduled
    );
    assert!(app.notifications.confirmations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn get_bookings_filter_matrix() {
    let app = TestApp::new();
    let flight_a = app.schedule_flight(100, dec!(1000), 7, 5).await;
    let flight_b = app.schedule_flight(100, dec!(1000), 7, 5).await;

    app.book(&flight_a, "Alice").await.unwrap();
    app.book(&flight_a, "Bob").await.unwrap();
    app.book(&flight_b, "alice").await.unwrap();

    let all = app.sales.get_bookings(BookingQuery::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let on_a = app
        .sales
        .get_bookings(BookingQuery {
            flight_id: Some(flight_a.clone()),
            passenger_name: None,
        })
        .await
        .unwrap();
    assert_eq!(on_a.len(), 2);

    // Flight filter first, then case-insensitive name filter.
    let alice_on_a = app
        .sales
        .get_bookings(BookingQuery {
            flight_id: Some(flight_a),
            passenger_name: Some(PassengerName::try_new("ALICE").unwrap()),
        })
        .await
        .unwrap();
    assert_eq!(alice_on_a.len(), 1);
    assert_eq!(alice_on_a[0].passenger_name().as_ref(), "Alice");

    // Name-only filter searches across all flights.
    let alices = app
        .sales
        .get_bookings(BookingQuery {
            flight_id: None,
            passenger_name: Some(PassengerName::try_new("Alice").unwrap()),
        })
        .await
        .unwrap();
    assert_eq!(alices.len(), 2);
}

#[tokio::test]
async fn bookings_survive_flight_cancellation_as_history() {
    let app = TestApp::new();
    let flight_id = app.schedule_flight(6, dec!(1000), 7, 5).await;
    let booking = app.book(&flight_id, "Ada Lovelace").await.unwrap();

    assert_eq!(app.cancellation.cancel_flights().await.unwrap(), 1);

    // The booking record persists after the refund.
    let history: Vec<Booking> = app
        .sales
        .get_bookings(BookingQuery {
            flight_id: Some(flight_id),
            passenger_name: None,
        })
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id(), booking.id());
}
