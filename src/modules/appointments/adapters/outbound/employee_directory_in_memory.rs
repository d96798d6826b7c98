use crate::modules::appointments::adapters::outbound::employee_directory::EmployeeDirectory;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryEmployeeDirectory {
    employees: RwLock<HashSet<String>>,
    is_offline: AtomicBool,
}

impl InMemoryEmployeeDirectory {
    pub fn with_employees<I, S>(employees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            employees: RwLock::new(employees.into_iter().map(Into::into).collect()),
            is_offline: AtomicBool::new(false),
        }
    }

    pub async fn hire(&self, employee_id: &str) {
        self.employees.write().await.insert(employee_id.to_string());
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl EmployeeDirectory for InMemoryEmployeeDirectory {
    async fn exists(&self, employee_id: &str) -> anyhow::Result<bool> {
        if self.is_offline.load(Ordering::SeqCst) {
            anyhow::bail!("Employee directory offline");
        }
        Ok(self.employees.read().await.contains(employee_id))
    }
}
