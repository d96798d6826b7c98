// Pure decisions for the appointment aggregate.
//
// Responsibilities
// - Shape checks on a booking request (slot required for Service, forbidden for Modification).
// - Assignment diff: which employees gain a task and which lose theirs.
// - Mirror task progress and advance the aggregate status, never backwards. The customer
//   hears about Completed and Delivered from here, once per appointment.
// - Cancellation from any non-terminal status; repeating it is a no-op.
//
// Calendar, slot and catalog checks need ports, so they live in the handlers.

use crate::modules::appointments::core::events::{
    AppointmentEvent,
    v1::{
        AppointmentCancelledV1, AppointmentRequestedV1, AppointmentStatusChangedV1,
        AssignmentProgressedV1, AssignmentRef, EmployeesAssignedV1,
    },
};
use crate::modules::appointments::core::evolve::evolve;
use crate::modules::appointments::core::state::{Appointment, AppointmentState, AppointmentStatus};
use crate::modules::tasks::core::status::TaskStatus;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::notifications::{Notification, NotificationKind, Recipient};
use crate::shared::core::primitives::{Decision, ServiceType};
use chrono::NaiveDate;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AppointmentDecideError {
    #[error("appointment {appointment_id} not found")]
    UnknownAppointment { appointment_id: String },

    #[error("appointment {appointment_id} already exists")]
    AlreadyExists { appointment_id: String },

    #[error("{0}")]
    Invalid(String),

    #[error("no employees selected")]
    NoEmployeesSelected,

    #[error("cannot {action} an appointment that is {state}")]
    InvalidTransition {
        state: AppointmentStatus,
        action: &'static str,
    },
}

pub type AppointmentDecision = Decision<AppointmentEvent, Notification, AppointmentDecideError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestAppointment {
    pub appointment_id: String,
    pub customer_id: String,
    pub service_type: ServiceType,
    pub date: NaiveDate,
    pub slot_id: Option<String>,
    pub modification_item_ids: Vec<String>,
    pub vehicle_id: Option<String>,
    pub instructions: Option<String>,
    pub estimated_cost: i64,
    pub estimated_hours: i64,
}

/// `candidate_task_ids[i]` becomes the task id of `employee_ids[i]` if that employee is new.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignEmployees {
    pub appointment_id: String,
    pub employee_ids: Vec<String>,
    pub candidate_task_ids: Vec<String>,
}

pub fn decide_request(
    state: &AppointmentState,
    command: RequestAppointment,
    now: i64,
) -> AppointmentDecision {
    if state.appointment().is_some() {
        return Decision::reject(AppointmentDecideError::AlreadyExists {
            appointment_id: command.appointment_id,
        });
    }
    if command.customer_id.trim().is_empty() {
        return Decision::reject(AppointmentDecideError::Invalid(
            "customer id is required".into(),
        ));
    }
    match command.service_type {
        ServiceType::Service if command.slot_id.is_none() => {
            return Decision::reject(AppointmentDecideError::Invalid(
                "a slot is required for a Service appointment".into(),
            ));
        }
        ServiceType::Service if !command.modification_item_ids.is_empty() => {
            return Decision::reject(AppointmentDecideError::Invalid(
                "modification items are only allowed on a Modification appointment".into(),
            ));
        }
        ServiceType::Modification if command.slot_id.is_some() => {
            return Decision::reject(AppointmentDecideError::Invalid(
                "a Modification appointment books the whole day, not a slot".into(),
            ));
        }
        _ => {}
    }
    Decision::accept(vec![AppointmentEvent::AppointmentRequestedV1(
        AppointmentRequestedV1 {
            appointment_id: command.appointment_id,
            customer_id: command.customer_id,
            service_type: command.service_type,
            date: command.date,
            slot_id: command.slot_id,
            modification_item_ids: command.modification_item_ids,
            vehicle_id: command.vehicle_id,
            instructions: command.instructions.filter(|i| !i.trim().is_empty()),
            estimated_cost: command.estimated_cost,
            estimated_hours: command.estimated_hours,
            requested_at: now,
        },
    )])
}

/// Keeps employees that already hold an active task, voids the ones left out and opens a
/// task for every newcomer. Only path from Pending to Approved.
pub fn decide_assign(
    state: &AppointmentState,
    command: AssignEmployees,
    now: i64,
) -> AppointmentDecision {
    let Some(appointment) = state.appointment() else {
        return Decision::reject(AppointmentDecideError::UnknownAppointment {
            appointment_id: command.appointment_id,
        });
    };
    if !matches!(
        appointment.status,
        AppointmentStatus::Pending | AppointmentStatus::Approved
    ) {
        return Decision::reject(AppointmentDecideError::InvalidTransition {
            state: appointment.status,
            action: "assign employees to",
        });
    }

    let mut requested: Vec<(String, String)> = Vec::new();
    for (employee_id, task_id) in command
        .employee_ids
        .into_iter()
        .zip(command.candidate_task_ids)
    {
        let employee_id = employee_id.trim().to_string();
        if employee_id.is_empty() || requested.iter().any(|(e, _)| *e == employee_id) {
            continue;
        }
        requested.push((employee_id, task_id));
    }
    if requested.is_empty() {
        return Decision::reject(AppointmentDecideError::NoEmployeesSelected);
    }

    let removed: Vec<AssignmentRef> = appointment
        .assignments
        .iter()
        .filter(|a| a.is_active())
        .filter(|a| !requested.iter().any(|(e, _)| *e == a.employee_id))
        .map(|a| AssignmentRef {
            employee_id: a.employee_id.clone(),
            task_id: a.task_id.clone(),
        })
        .collect();
    let added: Vec<AssignmentRef> = requested
        .into_iter()
        .filter(|(employee_id, _)| appointment.active_assignment_of(employee_id).is_none())
        .map(|(employee_id, task_id)| AssignmentRef {
            employee_id,
            task_id,
        })
        .collect();

    if added.is_empty() && removed.is_empty() && appointment.status == AppointmentStatus::Approved {
        return Decision::accept(Vec::new());
    }

    let mut intents = Vec::new();
    if appointment.status == AppointmentStatus::Pending {
        intents.push(notify(
            appointment,
            "AppointmentApproved",
            Recipient::Customer(appointment.customer_id.clone()),
            NotificationKind::Success,
            "Appointment Approved",
            format!(
                "Your {} appointment on {} has been approved",
                appointment.service_type, appointment.date
            ),
            now,
        ));
    }
    for assignment in &added {
        intents.push(Notification {
            task_id: Some(assignment.task_id.clone()),
            ..notify(
                appointment,
                "TaskAssigned",
                Recipient::Employee(assignment.employee_id.clone()),
                NotificationKind::Info,
                "New Task Assigned",
                format!(
                    "You have been assigned a {} task due {}",
                    appointment.service_type, appointment.date
                ),
                now,
            )
        });
    }

    let assigned = AppointmentEvent::EmployeesAssignedV1(EmployeesAssignedV1 {
        appointment_id: appointment.id.clone(),
        added,
        removed,
        slot_id: appointment.slot_id.clone(),
        assigned_at: now,
    });
    let next = evolve(state.clone(), assigned.clone());
    let mut events = vec![assigned];
    // Dropping the last unfinished employee can leave every remaining task ahead of Approved.
    if let Some(after) = next.appointment() {
        if let Some((changed, notifications)) = advance(after, now) {
            events.push(changed);
            intents.extend(notifications);
        }
    }
    Decision::Accepted { events, intents }
}

/// Records a task's new status on its assignment and lets the appointment follow the least
/// advanced active task. Progress on a cancelled appointment or an unknown task is ignored.
pub fn decide_progress(
    state: &AppointmentState,
    appointment_id: &str,
    task_id: &str,
    task_status: TaskStatus,
    now: i64,
) -> AppointmentDecision {
    let Some(appointment) = state.appointment() else {
        return Decision::reject(AppointmentDecideError::UnknownAppointment {
            appointment_id: appointment_id.to_string(),
        });
    };
    if appointment.status == AppointmentStatus::Cancelled {
        return Decision::accept(Vec::new());
    }
    match appointment.assignments.iter().find(|a| a.task_id == task_id) {
        Some(assignment) if assignment.task_status != task_status => {}
        _ => return Decision::accept(Vec::new()),
    }

    let progressed = AppointmentEvent::AssignmentProgressedV1(AssignmentProgressedV1 {
        appointment_id: appointment.id.clone(),
        task_id: task_id.to_string(),
        task_status,
        at: now,
    });
    let next = evolve(state.clone(), progressed.clone());
    let mut events = vec![progressed];
    let mut intents = Vec::new();
    if let Some(after) = next.appointment() {
        if let Some((changed, notifications)) = advance(after, now) {
            events.push(changed);
            intents = notifications;
        }
    }
    Decision::Accepted { events, intents }
}

/// The status change owed once `appointment` follows its least advanced active task, with the
/// customer notice that goes with reaching Completed or Delivered.
fn advance(appointment: &Appointment, now: i64) -> Option<(AppointmentEvent, Vec<Notification>)> {
    let to = appointment.aggregate_status();
    if to <= appointment.status {
        return None;
    }
    let customer = Recipient::Customer(appointment.customer_id.clone());
    let intents = match to {
        AppointmentStatus::Completed => vec![notify(
            appointment,
            "AppointmentCompleted",
            customer,
            NotificationKind::Success,
            "Service Completed",
            format!(
                "Work on your {} appointment is complete.",
                appointment.service_type
            ),
            now,
        )],
        AppointmentStatus::Delivered => vec![notify(
            appointment,
            "AppointmentDelivered",
            customer,
            NotificationKind::Success,
            "Vehicle Delivered",
            "Your vehicle has been delivered. Thank you for choosing us.".to_string(),
            now,
        )],
        _ => Vec::new(),
    };
    let changed = AppointmentEvent::AppointmentStatusChangedV1(AppointmentStatusChangedV1 {
        appointment_id: appointment.id.clone(),
        from: appointment.status,
        to,
        at: now,
    });
    Some((changed, intents))
}

pub fn decide_cancel(
    state: &AppointmentState,
    appointment_id: &str,
    reason: Option<String>,
    now: i64,
) -> AppointmentDecision {
    let Some(appointment) = state.appointment() else {
        return Decision::reject(AppointmentDecideError::UnknownAppointment {
            appointment_id: appointment_id.to_string(),
        });
    };
    match appointment.status {
        AppointmentStatus::Cancelled => Decision::accept(Vec::new()),
        AppointmentStatus::Completed | AppointmentStatus::Delivered => {
            Decision::reject(AppointmentDecideError::InvalidTransition {
                state: appointment.status,
                action: "cancel",
            })
        }
        _ => {
            let intents = appointment
                .assignments
                .iter()
                .filter(|a| a.is_active())
                .map(|a| Notification {
                    task_id: Some(a.task_id.clone()),
                    ..notify(
                        appointment,
                        "AppointmentCancelled",
                        Recipient::Employee(a.employee_id.clone()),
                        NotificationKind::Info,
                        "Appointment Cancelled",
                        format!("The appointment on {} was cancelled", appointment.date),
                        now,
                    )
                })
                .collect();
            Decision::Accepted {
                events: vec![AppointmentEvent::AppointmentCancelledV1(
                    AppointmentCancelledV1 {
                        appointment_id: appointment.id.clone(),
                        reason: reason.filter(|r| !r.trim().is_empty()),
                        cancelled_at: now,
                    },
                )],
                intents,
            }
        }
    }
}

impl From<AppointmentDecideError> for ApplicationError {
    fn from(error: AppointmentDecideError) -> Self {
        match error {
            AppointmentDecideError::UnknownAppointment { appointment_id } => {
                ApplicationError::not_found("appointment", appointment_id)
            }
            AppointmentDecideError::AlreadyExists { appointment_id } => {
                ApplicationError::Validation(format!("appointment {appointment_id} already exists"))
            }
            AppointmentDecideError::Invalid(message) => ApplicationError::Validation(message),
            AppointmentDecideError::NoEmployeesSelected => ApplicationError::NoEmployeesSelected,
            AppointmentDecideError::InvalidTransition { state, action } => {
                ApplicationError::invalid_transition(state, action)
            }
        }
    }
}

fn notify(
    appointment: &Appointment,
    event_type: &str,
    recipient: Recipient,
    kind: NotificationKind,
    title: &str,
    message: String,
    now: i64,
) -> Notification {
    Notification {
        event_type: event_type.to_string(),
        recipient,
        kind,
        title: title.to_string(),
        message,
        appointment_id: Some(appointment.id.clone()),
        task_id: None,
        occurred_at: now,
    }
}
