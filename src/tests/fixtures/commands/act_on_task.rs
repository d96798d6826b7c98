use crate::modules::tasks::core::decide::ActOnTask;
use crate::modules::tasks::core::status::TaskAction;

/// Defaults to E7 accepting t-1.
pub struct ActOnTaskBuilder {
    inner: ActOnTask,
}

impl Default for ActOnTaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl ActOnTaskBuilder {
    pub fn new() -> Self {
        Self {
            inner: ActOnTask {
                task_id: "t-1".into(),
                employee_id: "E7".into(),
                action: TaskAction::Accept,
                notes: None,
            },
        }
    }

    pub fn task_id(mut self, v: impl Into<String>) -> Self {
        self.inner.task_id = v.into();
        self
    }

    pub fn employee_id(mut self, v: impl Into<String>) -> Self {
        self.inner.employee_id = v.into();
        self
    }

    pub fn action(mut self, v: TaskAction) -> Self {
        self.inner.action = v;
        self
    }

    pub fn notes(mut self, v: impl Into<String>) -> Self {
        self.inner.notes = Some(v.into());
        self
    }

    pub fn build(self) -> ActOnTask {
        self.inner
    }
}
