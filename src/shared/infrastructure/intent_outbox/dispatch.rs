use crate::shared::core::notifications::Notification;
use crate::shared::infrastructure::intent_outbox::{DomainOutbox, OutboxRow};

/// Translate notification intents into outbox rows and enqueue them.
/// `stream_version` is the stream version after the append that produced them.
///
/// Delivery is fire-and-forget: a failed enqueue is logged and never undoes the
/// state transition that triggered it. Returns how many rows were accepted.
pub async fn dispatch_notifications(
    outbox: &dyn DomainOutbox,
    topic: &str,
    stream_id: &str,
    stream_version: i64,
    notifications: Vec<Notification>,
) -> usize {
    let mut accepted = 0;
    for notification in notifications {
        let payload = match serde_json::to_value(&notification) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(%error, stream_id, "notification not serializable");
                continue;
            }
        };
        let row = OutboxRow {
            topic: topic.to_string(),
            event_type: notification.event_type.clone(),
            event_version: 1,
            stream_id: stream_id.to_string(),
            stream_version,
            occurred_at: notification.occurred_at,
            payload,
        };
        match outbox.enqueue(row).await {
            Ok(()) => accepted += 1,
            Err(error) => tracing::warn!(
                %error,
                stream_id,
                event_type = %notification.event_type,
                "notification dropped"
            ),
        }
    }
    accepted
}
