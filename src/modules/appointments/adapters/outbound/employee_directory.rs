use async_trait::async_trait;

/// Who can be assigned. Skills are the admin's call, only existence is checked.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn exists(&self, employee_id: &str) -> anyhow::Result<bool>;
}
