use chrono::NaiveDate;
use padelbook_booking::{BookingOrchestrator, BookingPhase, ConfirmOutcome, Submission};
use padelbook_common::{ClientError, NoticeLevel, SessionStore};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};


use fixtures::MockPort;

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

async fn mount_availability(server: &MockServer, court_id: i64, fecha: &str, delay: Duration) {
    Mock::given(method("POST"))
        .and(path("/api/disponibilidadpista"))
        .and(body_json(json!({"pista_id": court_id, "fecha": fecha})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "disponibilidades": [
                        fixtures::slot_json(101, "10:00 - 11:00"),
                        fixtures::slot_json(102, "11:00 - 12:00"),
                        fixtures::slot_json(103, &format!("{fecha} 12:00 - 13:00"))
                    ]
                }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

async fn mount_quote(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/calcular_precio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_precio": 40,
            "extra_aplicado": null
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn loaded_orchestrator(
    server: &MockServer,
    port: Arc<MockPort>,
) -> (BookingOrchestrator, Arc<padelbook_common::MemorySessionStore>) {
    fixtures::mount_profile_and_courts(server).await;
    let (api, store) = fixtures::create_api(server, Some("abc"));
    let orchestrator = BookingOrchestrator::with_date(api, port, june(1));
    orchestrator.load().await.unwrap();
    (orchestrator, store)
}

#[tokio::test]
async fn test_load_fills_courts() {
    let server = MockServer::start().await;
    let (orchestrator, _store) = loaded_orchestrator(&server, fixtures::silent_port()).await;

    let snapshot = orchestrator.snapshot().await;

    assert_eq!(snapshot.phase, BookingPhase::CourtsLoaded);
    assert_eq!(snapshot.courts.len(), 2);
    assert_eq!(snapshot.user.unwrap().formatted_name(), "Ana García");
    assert_eq!(snapshot.date, june(1));
}

#[tokio::test]
async fn test_load_failure_drops_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::user_json("ana")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/pistas"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "db down"})))
        .mount(&server)
        .await;
    let (api, store) = fixtures::create_api(&server, Some("abc"));
    let orchestrator = BookingOrchestrator::with_date(api, fixtures::silent_port(), june(1));

    let err = orchestrator.load().await.unwrap_err();

    assert_eq!(err.to_string(), "db down");
    assert!(!store.has_token());
    assert_eq!(orchestrator.phase().await, BookingPhase::Idle);
}

#[tokio::test]
async fn test_load_without_token_sends_nothing() {
    let server = MockServer::start().await;
    let (api, _store) = fixtures::create_api(&server, None);
    let orchestrator = BookingOrchestrator::with_date(api, fixtures::silent_port(), june(1));

    let err = orchestrator.load().await.unwrap_err();

    assert!(err.is_auth_failure());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_court_rejected_locally() {
    let server = MockServer::start().await;
    let (orchestrator, _store) = loaded_orchestrator(&server, fixtures::silent_port()).await;

    let err = orchestrator.select_court(99).await.unwrap_err();

    assert!(matches!(err, ClientError::ValidationLocal(_)));
    assert_eq!(orchestrator.phase().await, BookingPhase::CourtsLoaded);
}

#[tokio::test]
async fn test_toggle_scenario_and_quote_presence() {
    let server = MockServer::start().await;
    mount_availability(&server, 5, "2024-06-01", Duration::ZERO).await;
    // {101}, {101, 102}, {102}; emptying the selection makes no call.
    mount_quote(&server, 3).await;
    let (orchestrator, _store) = loaded_orchestrator(&server, fixtures::silent_port()).await;

    orchestrator.select_court(5).await.unwrap();
    assert_eq!(orchestrator.phase().await, BookingPhase::AvailabilityLoaded);

    assert!(orchestrator.toggle_slot(101).await.unwrap());
    assert!(orchestrator.toggle_slot(102).await.unwrap());
    let snapshot = orchestrator.snapshot().await;
    assert_eq!(snapshot.selection, vec![101, 102]);
    assert_eq!(snapshot.quote.unwrap().total, 40.0);
    assert_eq!(snapshot.phase, BookingPhase::PriceQuoted);

    assert!(!orchestrator.toggle_slot(101).await.unwrap());
    assert_eq!(orchestrator.snapshot().await.selection, vec![102]);

    assert!(!orchestrator.toggle_slot(102).await.unwrap());
    let snapshot = orchestrator.snapshot().await;
    assert!(snapshot.selection.is_empty());
    assert!(snapshot.quote.is_none());
    assert_eq!(snapshot.phase, BookingPhase::AvailabilityLoaded);
}

#[tokio::test]
async fn test_toggle_unavailable_slot_rejected() {
    let server = MockServer::start().await;
    mount_availability(&server, 5, "2024-06-01", Duration::ZERO).await;
    mount_quote(&server, 0).await;
    let (orchestrator, _store) = loaded_orchestrator(&server, fixtures::silent_port()).await;

    assert!(orchestrator.toggle_slot(101).await.is_err(), "no court selected yet");

    orchestrator.select_court(5).await.unwrap();
    let err = orchestrator.toggle_slot(999).await.unwrap_err();

    assert!(matches!(err, ClientError::ValidationLocal(_)));
    assert!(orchestrator.snapshot().await.selection.is_empty());
}

#[tokio::test]
async fn test_court_change_clears_selection_before_availability_arrives() {
    let server = MockServer::start().await;
    mount_availability(&server, 5, "2024-06-01", Duration::ZERO).await;
    mount_availability(&server, 6, "2024-06-01", Duration::from_millis(400)).await;
    mount_quote(&server, 1).await;
    let (orchestrator, _store) = loaded_orchestrator(&server, fixtures::silent_port()).await;
    orchestrator.select_court(5).await.unwrap();
    orchestrator.toggle_slot(101).await.unwrap();

    let (switched, during) = tokio::join!(orchestrator.select_court(6), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        orchestrator.snapshot().await
    });

    switched.unwrap();
    assert!(during.selection.is_empty());
    assert!(during.quote.is_none());
    assert_eq!(during.availability, None);
    assert_eq!(during.phase, BookingPhase::CourtSelected);

    let after = orchestrator.snapshot().await;
    assert_eq!(after.court.unwrap().id, 6);
    assert_eq!(after.phase, BookingPhase::AvailabilityLoaded);
}

#[tokio::test]
async fn test_slow_stale_availability_is_discarded() {
    let server = MockServer::start().await;
    mount_availability(&server, 5, "2024-06-01", Duration::from_millis(400)).await;
    mount_availability(&server, 5, "2024-06-02", Duration::ZERO).await;
    let (orchestrator, _store) = loaded_orchestrator(&server, fixtures::silent_port()).await;

    let (first, second) = tokio::join!(orchestrator.select_court(5), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        orchestrator.set_date(june(2)).await
    });

    first.unwrap();
    second.unwrap();
    let snapshot = orchestrator.snapshot().await;
    assert_eq!(snapshot.date, june(2));
    let labels: Vec<String> = snapshot
        .availability
        .unwrap()
        .into_iter()
        .map(|slot| slot.label)
        .collect();
    assert_eq!(labels[2], "2024-06-02 12:00 - 13:00");
}

#[tokio::test]
async fn test_confirm_with_empty_selection_is_noop() {
    let server = MockServer::start().await;
    mount_availability(&server, 5, "2024-06-01", Duration::ZERO).await;
    Mock::given(method("POST"))
        .and(path("/api/reservar"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (orchestrator, _store) = loaded_orchestrator(&server, fixtures::silent_port()).await;

    assert_eq!(orchestrator.confirm().await.unwrap(), ConfirmOutcome::NothingSelected);
    orchestrator.select_court(5).await.unwrap();
    assert_eq!(orchestrator.confirm().await.unwrap(), ConfirmOutcome::NothingSelected);
}

#[tokio::test]
async fn test_conflict_keeps_selection_and_shows_message() {
    let server = MockServer::start().await;
    mount_availability(&server, 5, "2024-06-01", Duration::ZERO).await;
    mount_quote(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/reservar"))
        .and(body_json(json!({"pista_id": 5, "fecha": "2024-06-01", "horario_ids": [102]})))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"error": "Horario ya ocupado"})))
        .expect(1)
        .mount(&server)
        .await;
    let mut port = MockPort::new();
    port.expect_notify()
        .withf(|notice| notice.level == NoticeLevel::Error && notice.text == "Horario ya ocupado")
        .times(1)
        .return_const(());
    port.expect_confirm().never();
    let (orchestrator, store) = loaded_orchestrator(&server, Arc::new(port)).await;
    orchestrator.select_court(5).await.unwrap();
    orchestrator.toggle_slot(102).await.unwrap();

    let err = orchestrator.confirm().await.unwrap_err();

    assert_eq!(err.to_string(), "Horario ya ocupado");
    let snapshot = orchestrator.snapshot().await;
    assert_eq!(snapshot.selection, vec![102]);
    assert_eq!(snapshot.phase, BookingPhase::ReservationFailed);
    assert_eq!(
        snapshot.submission,
        Some(Submission::Failed("Horario ya ocupado".to_string()))
    );
    assert!(store.has_token());
}

#[tokio::test]
async fn test_confirm_then_stay_resets_and_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/disponibilidadpista"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "disponibilidades": [fixtures::slot_json(101, "10:00 - 11:00")]
        })))
        .expect(2)
        .mount(&server)
        .await;
    mount_quote(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/reservar"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"mensaje": "Reserva creada", "reserva_id": 9})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let mut port = MockPort::new();
    port.expect_notify()
        .withf(|notice| notice.level == NoticeLevel::Success && notice.text == "Reserva creada")
        .times(1)
        .return_const(());
    port.expect_confirm()
        .withf(|prompt| prompt.cancel_label == "Stay here")
        .times(1)
        .return_const(false);
    let (orchestrator, _store) = loaded_orchestrator(&server, Arc::new(port)).await;
    orchestrator.select_court(5).await.unwrap();
    orchestrator.toggle_slot(101).await.unwrap();

    let outcome = orchestrator.confirm().await.unwrap();

    match outcome {
        ConfirmOutcome::Stayed(receipt) => assert_eq!(receipt.id, Some(9)),
        other => panic!("unexpected outcome {other:?}"),
    }
    let snapshot = orchestrator.snapshot().await;
    assert!(snapshot.selection.is_empty());
    assert!(snapshot.quote.is_none());
    assert_eq!(snapshot.phase, BookingPhase::AvailabilityLoaded);
}

#[tokio::test]
async fn test_confirm_then_view_reservations_keeps_state() {
    let server = MockServer::start().await;
    mount_availability(&server, 5, "2024-06-01", Duration::ZERO).await;
    mount_quote(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/reservar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"mensaje": "ok"})))
        .mount(&server)
        .await;
    let mut port = MockPort::new();
    port.expect_notify().times(1).return_const(());
    port.expect_confirm().times(1).return_const(true);
    let (orchestrator, _store) = loaded_orchestrator(&server, Arc::new(port)).await;
    orchestrator.select_court(5).await.unwrap();
    orchestrator.toggle_slot(103).await.unwrap();

    let outcome = orchestrator.confirm().await.unwrap();

    assert!(matches!(outcome, ConfirmOutcome::ViewReservations(_)));
    let snapshot = orchestrator.snapshot().await;
    assert_eq!(snapshot.phase, BookingPhase::ReservationConfirmed);
    assert_eq!(snapshot.selection, vec![103]);
}

async fn mount_quote_for(server: &MockServer, slot_ids: &[i64], total: i64, delay: Duration) {
    Mock::given(method("POST"))
        .and(path("/api/calcular_precio"))
        .and(body_json(json!({"pista_id": 5, "fecha": "2024-06-01", "horario_ids": slot_ids})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"total_precio": total, "extra_aplicado": null}))
                .set_delay(delay),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_slow_stale_quote_is_discarded() {
    let server = MockServer::start().await;
    mount_availability(&server, 5, "2024-06-01", Duration::ZERO).await;
    mount_quote_for(&server, &[101], 20, Duration::from_millis(400)).await;
    mount_quote_for(&server, &[101, 102], 40, Duration::ZERO).await;
    let (orchestrator, _store) = loaded_orchestrator(&server, fixtures::silent_port()).await;
    orchestrator.select_court(5).await.unwrap();

    let (first, second) = tokio::join!(orchestrator.toggle_slot(101), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        orchestrator.toggle_slot(102).await
    });

    assert!(first.unwrap());
    assert!(second.unwrap());
    let snapshot = orchestrator.snapshot().await;
    assert_eq!(snapshot.selection, vec![101, 102]);
    assert_eq!(snapshot.quote.unwrap().total, 40.0);
    assert_eq!(snapshot.phase, BookingPhase::PriceQuoted);
}

#[tokio::test]
async fn test_date_change_clears_selection_before_availability_arrives() {
    let server = MockServer::start().await;
    mount_availability(&server, 5, "2024-06-01", Duration::ZERO).await;
    mount_availability(&server, 5, "2024-06-02", Duration::from_millis(400)).await;
    mount_quote(&server, 1).await;
    let (orchestrator, _store) = loaded_orchestrator(&server, fixtures::silent_port()).await;
    orchestrator.select_court(5).await.unwrap();
    orchestrator.toggle_slot(101).await.unwrap();
    assert_eq!(orchestrator.phase().await, BookingPhase::PriceQuoted);

    let (changed, during) = tokio::join!(orchestrator.set_date(june(2)), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        orchestrator.snapshot().await
    });

    changed.unwrap();
    assert_eq!(during.date, june(2));
    assert!(during.selection.is_empty());
    assert!(during.quote.is_none());
    assert_eq!(during.availability, None);
    assert_eq!(during.phase, BookingPhase::CourtSelected);

    let after = orchestrator.snapshot().await;
    assert!(after.selection.is_empty());
    assert_eq!(after.phase, BookingPhase::AvailabilityLoaded);
}

#[tokio::test]
async fn test_inputs_frozen_while_reservation_in_flight() {
    let server = MockServer::start().await;
    mount_availability(&server, 5, "2024-06-01", Duration::ZERO).await;
    mount_quote(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/reservar"))
        .and(body_json(json!({"pista_id": 5, "fecha": "2024-06-01", "horario_ids": [101]})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"mensaje": "Reserva creada", "reserva_id": 9}))
                .set_delay(Duration::from_millis(400)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let mut port = MockPort::new();
    port.expect_notify()
        .withf(|notice| notice.level == NoticeLevel::Success)
        .times(1)
        .return_const(());
    port.expect_confirm().times(1).return_const(true);
    let (orchestrator, _store) = loaded_orchestrator(&server, Arc::new(port)).await;
    orchestrator.select_court(5).await.unwrap();
    orchestrator.toggle_slot(101).await.unwrap();

    let (outcome, ()) = tokio::join!(orchestrator.confirm(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(orchestrator.phase().await, BookingPhase::Reserving);
        let toggled = orchestrator.toggle_slot(102).await;
        assert!(matches!(toggled, Err(ClientError::ValidationLocal(_))));
        let untoggled = orchestrator.toggle_slot(101).await;
        assert!(matches!(untoggled, Err(ClientError::ValidationLocal(_))));
        let again = orchestrator.confirm().await;
        assert!(matches!(again, Err(ClientError::ValidationLocal(_))));
        assert!(orchestrator.set_date(june(2)).await.is_err());
        assert!(orchestrator.select_court(6).await.is_err());
    });

    match outcome.unwrap() {
        ConfirmOutcome::ViewReservations(receipt) => assert_eq!(receipt.id, Some(9)),
        other => panic!("unexpected outcome {other:?}"),
    }
    let snapshot = orchestrator.snapshot().await;
    assert_eq!(snapshot.court.unwrap().id, 5);
    assert_eq!(snapshot.date, june(1));
    assert_eq!(snapshot.selection, vec![101]);
    assert_eq!(snapshot.phase, BookingPhase::ReservationConfirmed);
}
