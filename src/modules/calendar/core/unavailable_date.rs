// A date the admin has closed the shop (holiday, maintenance, ...).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, async_graphql::SimpleObject)]
pub struct UnavailableDate {
    pub id: String,
    pub date: NaiveDate,
    pub reason: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
