use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: i32,
    pub user_id: Uuid,
    pub course_id: i32,
    /// Course price at the time of purchase, whole hryvnias.
    pub amount: i32,
    pub payment_method: Option<String>,
    pub payment_id: Option<String>,
    pub purchase_date: DateTime<Utc>,
}

/// How a purchase was paid for. Both fields are free text kept for bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentReference {
    pub method: Option<String>,
    pub payment_id: Option<String>,
}
