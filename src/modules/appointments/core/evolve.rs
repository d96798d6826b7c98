use crate::modules::appointments::core::events::AppointmentEvent;
use crate::modules::appointments::core::state::{
    Appointment, AppointmentState, AppointmentStatus, Assignment,
};
use crate::modules::tasks::core::status::TaskStatus;

pub fn evolve(state: AppointmentState, event: AppointmentEvent) -> AppointmentState {
    match (state, event) {
        (AppointmentState::None, AppointmentEvent::AppointmentRequestedV1(e)) => {
            AppointmentState::Existing(Appointment {
                id: e.appointment_id,
                customer_id: e.customer_id,
                service_type: e.service_type,
                date: e.date,
                slot_id: e.slot_id,
                modification_item_ids: e.modification_item_ids,
                vehicle_id: e.vehicle_id,
                instructions: e.instructions,
                status: AppointmentStatus::Pending,
                assignments: Vec::new(),
                estimated_cost: e.estimated_cost,
                estimated_hours: e.estimated_hours,
                created_at: e.requested_at,
                updated_at: e.requested_at,
            })
        }
        (AppointmentState::Existing(mut appointment), AppointmentEvent::EmployeesAssignedV1(e)) => {
            for removed in &e.removed {
                if let Some(assignment) = appointment
                    .assignments
                    .iter_mut()
                    .find(|a| a.task_id == removed.task_id)
                {
                    assignment.voided = true;
                }
            }
            appointment
                .assignments
                .extend(e.added.into_iter().map(|added| Assignment {
                    employee_id: added.employee_id,
                    task_id: added.task_id,
                    task_status: TaskStatus::Assigned,
                    voided: false,
                }));
            if appointment.status == AppointmentStatus::Pending {
                appointment.status = AppointmentStatus::Approved;
            }
            appointment.updated_at = e.assigned_at;
            AppointmentState::Existing(appointment)
        }
        (AppointmentState::Existing(mut appointment), AppointmentEvent::AssignmentProgressedV1(e)) => {
            if let Some(assignment) = appointment
                .assignments
                .iter_mut()
                .find(|a| a.task_id == e.task_id)
            {
                assignment.task_status = e.task_status;
                appointment.updated_at = e.at;
            }
            AppointmentState::Existing(appointment)
        }
        (
            AppointmentState::Existing(mut appointment),
            AppointmentEvent::AppointmentStatusChangedV1(e),
        ) => {
            appointment.status = e.to;
            appointment.updated_at = e.at;
            AppointmentState::Existing(appointment)
        }
        (AppointmentState::Existing(mut appointment), AppointmentEvent::AppointmentCancelledV1(e)) => {
            appointment.status = AppointmentStatus::Cancelled;
            for assignment in &mut appointment.assignments {
                if !assignment.task_status.is_terminal() {
                    assignment.voided = true;
                }
            }
            appointment.updated_at = e.cancelled_at;
            AppointmentState::Existing(appointment)
        }
        (state, _) => state,
    }
}
