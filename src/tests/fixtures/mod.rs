pub mod app_state;
pub mod appointments;
pub mod task_harness;

pub mod commands {
    pub mod act_on_task;
    pub mod book_appointment;
}

pub mod events {
    pub mod appointment_requested_v1;
    pub mod task_assigned_v1;
}
