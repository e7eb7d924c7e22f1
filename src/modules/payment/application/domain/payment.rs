use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Invoice lifecycle as reported by the acquirer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Created,
    Processing,
    Hold,
    Success,
    Failure,
    Reversed,
    Expired,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Created => "created",
            PaymentStatus::Processing => "processing",
            PaymentStatus::Hold => "hold",
            PaymentStatus::Success => "success",
            PaymentStatus::Failure => "failure",
            PaymentStatus::Reversed => "reversed",
            PaymentStatus::Expired => "expired",
        }
    }

    /// No further transitions are expected once an invoice reaches one of these.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Success
                | PaymentStatus::Failure
                | PaymentStatus::Reversed
                | PaymentStatus::Expired
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(PaymentStatus::Created),
            "processing" => Ok(PaymentStatus::Processing),
            "hold" => Ok(PaymentStatus::Hold),
            "success" => Ok(PaymentStatus::Success),
            "failure" => Ok(PaymentStatus::Failure),
            "reversed" => Ok(PaymentStatus::Reversed),
            "expired" => Ok(PaymentStatus::Expired),
            other => Err(format!("unknown payment status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i32,
    pub user_id: Uuid,
    pub course_ids: Vec<i32>,
    /// Kopiyky.
    pub amount: i64,
    pub invoice_id: String,
    pub page_url: Option<String>,
    pub status: PaymentStatus,
    pub payment_id: Option<String>,
    pub modified_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub user_id: Uuid,
    pub course_ids: Vec<i32>,
    pub amount: i64,
    pub invoice_id: String,
    pub page_url: Option<String>,
}

/// A status report for one invoice, from a webhook delivery or a status poll.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceStatusUpdate {
    pub invoice_id: String,
    pub status: PaymentStatus,
    pub modified_date: DateTime<Utc>,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub failure_reason: Option<String>,
}

/// What happened to a status update.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The update was newer than the stored state and was written.
    Applied {
        payment: Payment,
        previous: PaymentStatus,
        /// Courses granted by this update. Empty unless it was the first move to success.
        fulfilled: Vec<i32>,
    },
    /// Stored state is as new or newer; nothing changed.
    Ignored(Payment),
    NotFound,
}

impl UpdateOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            UpdateOutcome::Applied { .. } => "applied",
            UpdateOutcome::Ignored(_) => "ignored",
            UpdateOutcome::NotFound => "not_found",
        }
    }
}

/// Whether an update carrying `incoming` may overwrite state stamped `stored`.
pub fn is_newer(stored: Option<DateTime<Utc>>, incoming: DateTime<Utc>) -> bool {
    stored.map_or(true, |current| incoming > current)
}

#[cfg(test)]
pub(crate) fn sample_payment(user_id: Uuid, status: PaymentStatus) -> Payment {
    let now = Utc::now();
    Payment {
        id: 1,
        user_id,
        course_ids: vec![1, 2],
        amount: 210_000,
        invoice_id: "inv_1".to_string(),
        page_url: Some("https://pay.example/inv_1".to_string()),
        status,
        payment_id: None,
        modified_date: None,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_final_statuses() {
        assert!(PaymentStatus::Success.is_final());
        assert!(PaymentStatus::Expired.is_final());
        assert!(!PaymentStatus::Hold.is_final());
        assert!(!PaymentStatus::Created.is_final());
    }

    #[test]
    fn test_status_round_trips_through_text() {
        for status in [PaymentStatus::Processing, PaymentStatus::Reversed] {
            assert_eq!(status.as_str().parse::<PaymentStatus>(), Ok(status));
        }
        assert!("paid".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn test_only_strictly_newer_updates_win() {
        let t = Utc::now();

        assert!(is_newer(None, t));
        assert!(is_newer(Some(t - Duration::seconds(1)), t));
        assert!(!is_newer(Some(t), t));
        assert!(!is_newer(Some(t + Duration::seconds(1)), t));
    }

    #[test]
    fn test_webhook_body_parses() {
        let body = r#"{
            "invoiceId": "p2_9ZgpZVsl3",
            "status": "success",
            "amount": 4200,
            "ccy": 980,
            "createdDate": "2024-05-01T10:00:00Z",
            "modifiedDate": "2024-05-01T10:01:30Z",
            "reference": "84d0070ee4e44667b31371d8f8813947"
        }"#;

        let update: InvoiceStatusUpdate = serde_json::from_str(body).unwrap();

        assert_eq!(update.invoice_id, "p2_9ZgpZVsl3");
        assert_eq!(update.status, PaymentStatus::Success);
        assert_eq!(update.payment_id, None);
    }
}
