use crate::modules::appointments::adapters::outbound::projections::{
    AppointmentProjectionRepository, AppointmentQueries,
};
use crate::modules::appointments::core::state::Appointment;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryAppointmentProjections {
    rows: RwLock<HashMap<String, Appointment>>,
    is_offline: AtomicBool,
}

impl InMemoryAppointmentProjections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> anyhow::Result<()> {
        if self.is_offline.load(Ordering::SeqCst) {
            anyhow::bail!("Appointment projections offline");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AppointmentProjectionRepository for InMemoryAppointmentProjections {
    async fn upsert(&self, appointment: Appointment) -> anyhow::Result<()> {
        self.ensure_online()?;
        let mut guard = self.rows.write().await;
        let stale = guard
            .get(&appointment.id)
            .is_some_and(|current| current.updated_at > appointment.updated_at);
        if !stale {
            guard.insert(appointment.id.clone(), appointment);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AppointmentQueries for InMemoryAppointmentProjections {
    async fn get(&self, appointment_id: &str) -> anyhow::Result<Option<Appointment>> {
        self.ensure_online()?;
        Ok(self.rows.read().await.get(appointment_id).cloned())
    }

    async fn list_by_customer(&self, customer_id: &str) -> anyhow::Result<Vec<Appointment>> {
        self.ensure_online()?;
        let mut rows: Vec<Appointment> = self
            .rows
            .read()
            .await
            .values()
            .filter(|a| a.customer_id == customer_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn list_by_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<Appointment>> {
        self.ensure_online()?;
        let mut rows: Vec<Appointment> = self
            .rows
            .read()
            .await
            .values()
            .filter(|a| a.date >= from && a.date <= to)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(rows)
    }
}
