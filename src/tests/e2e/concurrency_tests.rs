use crate::modules::slots::core::slot_id::SlotId;
use crate::shared::core::errors::ApplicationError;
use crate::tests::fixtures::app_state::{TestState, make_test_state};
use chrono::NaiveDate;

const CONTENDERS: usize = 8;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn grants_a_contested_slot_to_exactly_one_appointment() {
    let TestState {
        state, slot_store, ..
    } = make_test_state();
    slot_store.set_delay_append_ms(5);
    let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();

    let handles: Vec<_> = (0..CONTENDERS)
        .map(|n| {
            let ledger = state.slot_ledger.clone();
            tokio::spawn(async move {
                ledger
                    .reserve_slot(date, "2026-10-20#2", &format!("a-{n}"))
                    .await
            })
        })
        .collect();
    let mut wins = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => wins += 1,
            Err(ApplicationError::SlotConflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(wins, 1);
    assert_eq!(conflicts, CONTENDERS - 1);

    let slot = state
        .slot_ledger
        .state_of(SlotId::parse("2026-10-20#2").unwrap())
        .await
        .unwrap();
    assert!(slot.holder().is_some_and(|holder| holder.starts_with("a-")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn opens_at_most_one_timer_per_employee() {
    let TestState {
        state, timer_store, ..
    } = make_test_state();
    timer_store.set_delay_append_ms(5);

    let handles: Vec<_> = (0..CONTENDERS)
        .map(|n| {
            let engine = state.time_tracking.clone();
            tokio::spawn(async move { engine.start("E7", &format!("t-{n}"), None).await })
        })
        .collect();
    let mut started = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => started += 1,
            Err(ApplicationError::TimerAlreadyOpen { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(started, 1);
    assert_eq!(state.time_tracking.list_for_employee("E7").await.unwrap().len(), 1);

    let open = state.time_tracking.active_for("E7").await.unwrap().unwrap();
    state.time_tracking.pause("E7", &open.id).await.unwrap();
    assert!(matches!(
        state.time_tracking.start("E7", "t-late", None).await,
        Err(ApplicationError::TimerAlreadyOpen { .. })
    ));
}
