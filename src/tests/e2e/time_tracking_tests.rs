use crate::modules::tasks::core::status::TaskAction;
use crate::modules::time_tracking::core::state::TimeLogStatus;
use crate::shared::core::errors::ApplicationError;
use crate::tests::fixtures::commands::act_on_task::ActOnTaskBuilder;
use crate::tests::fixtures::task_harness::{TaskHarness, seeded_task_harness, task_harness};
use chrono::Duration;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn counts_only_running_intervals(#[future] task_harness: TaskHarness) {
    let TaskHarness {
        time_tracking,
        clock,
        ..
    } = task_harness.await;

    let log = time_tracking.start("E7", "t-1", None).await.unwrap();
    clock.advance(Duration::seconds(60));
    time_tracking.pause("E7", &log.id).await.unwrap();
    clock.advance(Duration::seconds(60));
    time_tracking.resume("E7", &log.id).await.unwrap();
    clock.advance(Duration::seconds(60));
    let stopped = time_tracking
        .stop("E7", &log.id, Some("done".into()))
        .await
        .unwrap();

    assert_eq!(stopped.status, TimeLogStatus::Completed);
    assert_eq!(stopped.duration_seconds, 120);
    assert_eq!(stopped.intervals.len(), 2);
    assert_eq!(stopped.hours_worked(), 0.03);
}

const ACTIONS: [TaskAction; 5] = [
    TaskAction::Accept,
    TaskAction::Reject,
    TaskAction::Start,
    TaskAction::Complete,
    TaskAction::Deliver,
];

/// Drives a fresh task along `path`, then tries every action and returns the accepted ones.
async fn legal_after(path: &[TaskAction]) -> Vec<TaskAction> {
    let mut legal = Vec::new();
    for action in ACTIONS {
        let harness = seeded_task_harness().await;
        for step in path {
            harness
                .lifecycle
                .act(ActOnTaskBuilder::new().action(*step).build())
                .await
                .unwrap();
        }
        match harness
            .lifecycle
            .act(ActOnTaskBuilder::new().action(action).build())
            .await
        {
            Ok(_) => legal.push(action),
            Err(ApplicationError::InvalidTransition { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    legal
}

#[rstest]
#[case(&[], &[TaskAction::Accept, TaskAction::Reject])]
#[case(&[TaskAction::Accept], &[TaskAction::Start])]
#[case(&[TaskAction::Accept, TaskAction::Start], &[TaskAction::Start, TaskAction::Complete])]
#[case(&[TaskAction::Accept, TaskAction::Start, TaskAction::Complete], &[TaskAction::Deliver])]
#[case(&[TaskAction::Reject], &[])]
#[case(
    &[TaskAction::Accept, TaskAction::Start, TaskAction::Complete, TaskAction::Deliver],
    &[]
)]
#[tokio::test]
async fn allows_only_the_lifecycle_transitions(
    #[case] path: &[TaskAction],
    #[case] expected: &[TaskAction],
) {
    assert_eq!(legal_after(path).await, expected.to_vec());
}
