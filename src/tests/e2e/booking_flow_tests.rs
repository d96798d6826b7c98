use crate::modules::appointments::core::state::AppointmentStatus;
use crate::modules::slots::core::slot_id::SlotId;
use crate::modules::tasks::core::status::{TaskAction, TaskStatus};
use crate::modules::time_tracking::core::state::TimeLogStatus;
use crate::shared::core::errors::ApplicationError;
use crate::tests::fixtures::app_state::{TestState, book_service, make_test_state};
use crate::tests::fixtures::commands::act_on_task::ActOnTaskBuilder;
use crate::tests::fixtures::commands::book_appointment::BookAppointmentBuilder;
use chrono::{Duration, NaiveDate};

fn tuesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
}

#[tokio::test]
async fn books_assigns_and_completes_a_service_appointment() {
    let TestState { state, clock, .. } = make_test_state();

    let availability = state.availability.available_slots(tuesday()).await.unwrap();
    assert_eq!(availability.slots_remaining, 3);

    let booked = book_service(&state, "2026-10-20#2").await;
    assert_eq!(booked.status, AppointmentStatus::Pending);
    let slot = SlotId::parse("2026-10-20#2").unwrap();
    assert_eq!(state.slot_ledger.state_of(slot).await.unwrap().holder(), None);

    let approved = state
        .assign_employees
        .handle(&booked.id, vec!["E7".into()])
        .await
        .unwrap();
    assert_eq!(approved.status, AppointmentStatus::Approved);
    assert_eq!(
        state.slot_ledger.state_of(slot).await.unwrap().holder(),
        Some(booked.id.as_str())
    );
    let availability = state.availability.available_slots(tuesday()).await.unwrap();
    assert_eq!(availability.slots_remaining, 2);
    assert!(availability.slots.iter().all(|s| s.slot_id != "2026-10-20#2"));

    let task_id = approved.assignments[0].task_id.clone();
    let act = |action| {
        ActOnTaskBuilder::new()
            .task_id(task_id.clone())
            .action(action)
            .build()
    };
    state.task_lifecycle.act(act(TaskAction::Accept)).await.unwrap();
    let started = state.task_lifecycle.act(act(TaskAction::Start)).await.unwrap();
    assert_eq!(started.time_log.unwrap().status, TimeLogStatus::Active);
    assert_eq!(
        state.appointment_queries.get(&booked.id).await.unwrap().status,
        AppointmentStatus::InProgress
    );

    clock.advance(Duration::hours(2));
    let completed = state.task_lifecycle.act(act(TaskAction::Complete)).await.unwrap();
    assert_eq!(completed.task.status, TaskStatus::Completed);
    let log = completed.time_log.unwrap();
    assert_eq!(log.status, TimeLogStatus::Completed);
    assert_eq!(log.duration_seconds, 2 * 60 * 60);

    let appointment = state.appointment_queries.get(&booked.id).await.unwrap();
    assert_eq!(appointment.status, AppointmentStatus::Completed);
}

#[tokio::test]
async fn leaves_the_losing_appointment_pending_when_two_claim_one_slot() {
    let TestState { state, .. } = make_test_state();
    let first = book_service(&state, "2026-10-20#2").await;
    let second = book_service(&state, "2026-10-20#2").await;

    let (a, b) = tokio::join!(
        state.assign_employees.handle(&first.id, vec!["E7".into()]),
        state.assign_employees.handle(&second.id, vec!["E8".into()]),
    );
    let results = [(first.id.clone(), a), (second.id.clone(), b)];
    let winners: Vec<_> = results.iter().filter(|(_, r)| r.is_ok()).collect();
    let losers: Vec<_> = results.iter().filter(|(_, r)| r.is_err()).collect();
    assert_eq!(winners.len(), 1);
    assert_eq!(losers.len(), 1);
    assert!(matches!(
        losers[0].1,
        Err(ApplicationError::SlotConflict { .. })
    ));

    let winner = state.appointment_queries.get(&winners[0].0).await.unwrap();
    let loser = state.appointment_queries.get(&losers[0].0).await.unwrap();
    assert_eq!(winner.status, AppointmentStatus::Approved);
    assert_eq!(loser.status, AppointmentStatus::Pending);
    assert!(loser.assignments.is_empty());
}

#[tokio::test]
async fn refuses_bookings_on_a_declared_holiday() {
    let TestState { state, .. } = make_test_state();
    let wednesday = NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();
    state
        .unavailable_dates
        .add(wednesday, "Holiday".into(), None)
        .await
        .unwrap();

    let availability = state.availability.available_slots(wednesday).await.unwrap();
    assert!(!availability.is_open);
    assert!(availability.is_explicitly_blocked);
    assert_eq!(availability.reason.as_deref(), Some("Holiday"));
    assert!(availability.slots.is_empty());

    let service = state
        .book_appointment
        .handle(
            BookAppointmentBuilder::new()
                .date(wednesday)
                .slot_id("2026-10-21#1")
                .build(),
        )
        .await;
    assert!(matches!(service, Err(ApplicationError::Validation(ref m)) if m.contains("Holiday")));

    let modification = state
        .book_appointment
        .handle(
            BookAppointmentBuilder::new()
                .date(wednesday)
                .modification(&["m-1"])
                .build(),
        )
        .await;
    assert!(matches!(modification, Err(ApplicationError::Validation(_))));
}

#[tokio::test]
async fn cancellation_returns_the_slot_and_voids_open_tasks() {
    let TestState { state, .. } = make_test_state();
    let booked = book_service(&state, "2026-10-20#1").await;
    let approved = state
        .assign_employees
        .handle(&booked.id, vec!["E7".into(), "E8".into()])
        .await
        .unwrap();
    let e7_task = approved.assignments[0].task_id.clone();
    state
        .task_lifecycle
        .act(ActOnTaskBuilder::new().task_id(e7_task.clone()).build())
        .await
        .unwrap();

    let cancelled = state
        .cancel_appointment
        .handle(&booked.id, Some("Car sold".into()))
        .await
        .unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    assert!(cancelled.assignments.iter().all(|a| a.voided));

    let availability = state.availability.available_slots(tuesday()).await.unwrap();
    assert!(availability.slots.iter().any(|s| s.slot_id == "2026-10-20#1"));
    for employee in ["E7", "E8"] {
        assert!(state.task_lifecycle.list_for_employee(employee).await.unwrap().is_empty());
    }
    let refused = state
        .task_lifecycle
        .act(
            ActOnTaskBuilder::new()
                .task_id(e7_task)
                .action(TaskAction::Start)
                .build(),
        )
        .await;
    assert!(refused.is_err());
    assert_eq!(state.time_tracking.active_for("E7").await.unwrap(), None);
}

#[tokio::test]
async fn completes_once_the_unfinished_employee_is_unassigned() {
    let TestState { state, .. } = make_test_state();
    let booked = book_service(&state, "2026-10-20#1").await;
    let approved = state
        .assign_employees
        .handle(&booked.id, vec!["E7".into(), "E8".into()])
        .await
        .unwrap();
    let t7 = approved.assignments[0].task_id.clone();
    for action in [TaskAction::Accept, TaskAction::Start, TaskAction::Complete] {
        state
            .task_lifecycle
            .act(ActOnTaskBuilder::new().task_id(t7.clone()).action(action).build())
            .await
            .unwrap();
    }
    assert_eq!(
        state.appointment_queries.get(&booked.id).await.unwrap().status,
        AppointmentStatus::Approved
    );

    let reassigned = state
        .assign_employees
        .handle(&booked.id, vec!["E7".into()])
        .await
        .unwrap();
    assert_eq!(reassigned.status, AppointmentStatus::Completed);
    assert_eq!(reassigned.assigned_employee_ids(), vec!["E7".to_string()]);
    assert_eq!(
        state.appointment_queries.get(&booked.id).await.unwrap().status,
        AppointmentStatus::Completed
    );
}

#[tokio::test]
async fn a_retried_completion_repairs_an_appointment_left_behind() {
    let TestState {
        state,
        appointment_store,
        ..
    } = make_test_state();
    let booked = book_service(&state, "2026-10-20#2").await;
    let approved = state
        .assign_employees
        .handle(&booked.id, vec!["E7".into()])
        .await
        .unwrap();
    let task_id = approved.assignments[0].task_id.clone();
    let act = |action| {
        ActOnTaskBuilder::new()
            .task_id(task_id.clone())
            .action(action)
            .build()
    };
    state.task_lifecycle.act(act(TaskAction::Accept)).await.unwrap();
    state.task_lifecycle.act(act(TaskAction::Start)).await.unwrap();

    appointment_store.fail_next_append();
    assert!(matches!(
        state.task_lifecycle.act(act(TaskAction::Complete)).await,
        Err(ApplicationError::Unavailable(_))
    ));
    assert_eq!(
        state.appointment_queries.get(&booked.id).await.unwrap().status,
        AppointmentStatus::InProgress
    );

    let retried = state.task_lifecycle.act(act(TaskAction::Complete)).await.unwrap();
    assert_eq!(retried.task.status, TaskStatus::Completed);
    assert_eq!(
        state.appointment_queries.get(&booked.id).await.unwrap().status,
        AppointmentStatus::Completed
    );
    assert!(matches!(
        state.task_lifecycle.act(act(TaskAction::Complete)).await,
        Err(ApplicationError::InvalidTransition { .. })
    ));
}
