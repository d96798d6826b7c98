use crate::modules::tasks::adapters::outbound::projections::{TaskProjectionRepository, TaskQueries};
use crate::modules::tasks::core::state::Task;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryTaskProjections {
    rows: RwLock<HashMap<String, Task>>,
    is_offline: AtomicBool,
}

impl InMemoryTaskProjections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> anyhow::Result<()> {
        if self.is_offline.load(Ordering::SeqCst) {
            anyhow::bail!("Task projections offline");
        }
        Ok(())
    }

    async fn select(&self, keep: impl Fn(&Task) -> bool) -> Vec<Task> {
        let mut rows: Vec<Task> = self
            .rows
            .read()
            .await
            .values()
            .filter(|task| keep(task))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        rows
    }
}

#[async_trait::async_trait]
impl TaskProjectionRepository for InMemoryTaskProjections {
    async fn upsert(&self, task: Task) -> anyhow::Result<()> {
        self.ensure_online()?;
        let mut guard = self.rows.write().await;
        // Rows only move forward: a late writer must not overwrite a newer snapshot.
        let stale = guard
            .get(&task.id)
            .is_some_and(|current| current.history.len() > task.history.len());
        if !stale {
            guard.insert(task.id.clone(), task);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TaskQueries for InMemoryTaskProjections {
    async fn list_by_employee(&self, employee_id: &str) -> anyhow::Result<Vec<Task>> {
        self.ensure_online()?;
        Ok(self
            .select(|task| task.employee_id == employee_id && !task.voided)
            .await)
    }

    async fn list_by_appointment(&self, appointment_id: &str) -> anyhow::Result<Vec<Task>> {
        self.ensure_online()?;
        Ok(self.select(|task| task.appointment_id == appointment_id).await)
    }
}

#[cfg(test)]
mod in_memory_task_projections_tests {
    use super::*;
    use crate::modules::tasks::core::events::TaskEvent;
    use crate::modules::tasks::core::evolve::evolve;
    use crate::modules::tasks::core::state::TaskState;
    use crate::tests::fixtures::events::task_assigned_v1::make_task_assigned_v1_event;
    use rstest::{fixture, rstest};

    #[fixture]
    fn task() -> Task {
        match evolve(
            TaskState::None,
            TaskEvent::TaskAssignedV1(make_task_assigned_v1_event()),
        ) {
            TaskState::Existing(task) => task,
            TaskState::None => unreachable!(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_hide_voided_tasks_from_the_employee_list(task: Task) {
        let projections = InMemoryTaskProjections::new();
        projections.upsert(task.clone()).await.unwrap();
        assert_eq!(projections.list_by_employee("E7").await.unwrap().len(), 1);

        let mut voided = task;
        voided.voided = true;
        voided.history.push(voided.history[0].clone());
        projections.upsert(voided).await.unwrap();
        assert!(projections.list_by_employee("E7").await.unwrap().is_empty());
        assert_eq!(projections.list_by_appointment("a-1").await.unwrap().len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_ignore_an_older_snapshot(task: Task) {
        let projections = InMemoryTaskProjections::new();
        let mut newer = task.clone();
        newer.voided = true;
        newer.history.push(newer.history[0].clone());
        projections.upsert(newer).await.unwrap();
        projections.upsert(task).await.unwrap();
        assert!(projections.list_by_appointment("a-1").await.unwrap()[0].voided);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_while_offline(task: Task) {
        let projections = InMemoryTaskProjections::new();
        projections.toggle_offline();
        assert!(projections.upsert(task).await.is_err());
    }
}
