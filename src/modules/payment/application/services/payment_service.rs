use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::modules::payment::application::domain::{
    build_invoice, CheckoutUrls, InvoiceStatusUpdate, NewPayment, Payment, UpdateOutcome,
};
use crate::modules::payment::application::ports::incoming::use_cases::{
    ApplyPaymentUpdateUseCase, CheckoutSession, CreatePaymentUseCase, GetPaymentStatusUseCase,
    PaymentError,
};
use crate::modules::payment::application::ports::outgoing::{
    GatewayError, PaymentGateway, PaymentRepository, PaymentRepositoryError,
};
use crate::modules::purchase::application::ports::incoming::use_cases::PurchaseError;
use crate::modules::purchase::application::services::CourseSelector;

impl From<PurchaseError> for PaymentError {
    fn from(err: PurchaseError) -> Self {
        match err {
            PurchaseError::Selection(e) => PaymentError::Selection(e),
            PurchaseError::RepositoryError(msg) => PaymentError::RepositoryError(msg),
        }
    }
}

impl From<PaymentRepositoryError> for PaymentError {
    fn from(err: PaymentRepositoryError) -> Self {
        match err {
            PaymentRepositoryError::DatabaseError(msg) => PaymentError::RepositoryError(msg),
        }
    }
}

impl From<GatewayError> for PaymentError {
    fn from(err: GatewayError) -> Self {
        PaymentError::Gateway(err.to_string())
    }
}

/// Checkout through the acquirer and reconciliation of invoice status.
pub struct PaymentService {
    selector: CourseSelector,
    payments: Arc<dyn PaymentRepository + Send + Sync>,
    gateway: Arc<dyn PaymentGateway + Send + Sync>,
    urls: CheckoutUrls,
}

impl PaymentService {
    pub fn new(
        selector: CourseSelector,
        payments: Arc<dyn PaymentRepository + Send + Sync>,
        gateway: Arc<dyn PaymentGateway + Send + Sync>,
        urls: CheckoutUrls,
    ) -> Self {
        Self {
            selector,
            payments,
            gateway,
            urls,
        }
    }

    async fn apply(&self, update: &InvoiceStatusUpdate) -> Result<UpdateOutcome, PaymentError> {
        let outcome = self.payments.apply_update(update).await?;

        match &outcome {
            UpdateOutcome::Applied {
                payment,
                previous,
                fulfilled,
            } => info!(
                invoice_id = %payment.invoice_id,
                from = %previous,
                to = %payment.status,
                fulfilled = ?fulfilled,
                "payment status updated"
            ),
            UpdateOutcome::Ignored(payment) => info!(
                invoice_id = %payment.invoice_id,
                modified_date = %update.modified_date,
                "stale payment update ignored"
            ),
            UpdateOutcome::NotFound => {
                warn!(invoice_id = %update.invoice_id, "update for unknown invoice")
            }
        }
        Ok(outcome)
    }
}

#[async_trait]
impl CreatePaymentUseCase for PaymentService {
    async fn execute(
        &self,
        user_id: Uuid,
        course_ids: Vec<i32>,
    ) -> Result<CheckoutSession, PaymentError> {
        let courses = self.selector.select(user_id, &course_ids).await?;

        let reference = Uuid::new_v4().simple().to_string();
        let invoice = build_invoice(&courses, reference, &self.urls);
        let created = self.gateway.create_invoice(&invoice).await.map_err(|e| {
            error!(user_id = %user_id, error = %e, "invoice creation failed");
            PaymentError::from(e)
        })?;

        self.payments
            .create(NewPayment {
                user_id,
                course_ids: courses.iter().map(|c| c.id).collect(),
                amount: invoice.amount,
                invoice_id: created.invoice_id.clone(),
                page_url: Some(created.page_url.clone()),
            })
            .await?;

        info!(
            user_id = %user_id,
            invoice_id = %created.invoice_id,
            amount = invoice.amount,
            "payment created"
        );
        Ok(CheckoutSession {
            invoice_id: created.invoice_id,
            page_url: created.page_url,
            amount: invoice.amount,
        })
    }
}

#[async_trait]
impl GetPaymentStatusUseCase for PaymentService {
    async fn execute(&self, user_id: Uuid, invoice_id: String) -> Result<Payment, PaymentError> {
        let payment = self
            .payments
            .find_by_invoice(&invoice_id)
            .await?
            .filter(|p| p.user_id == user_id)
            .ok_or(PaymentError::NotFound)?;

        if payment.status.is_final() {
            return Ok(payment);
        }

        let update = match self.gateway.invoice_status(&invoice_id).await {
            Ok(update) => update,
            Err(e) => {
                warn!(invoice_id = %invoice_id, error = %e, "status poll failed, serving stored state");
                return Ok(payment);
            }
        };

        match self.apply(&update).await? {
            UpdateOutcome::Applied { payment, .. } | UpdateOutcome::Ignored(payment) => Ok(payment),
            UpdateOutcome::NotFound => Err(PaymentError::NotFound),
        }
    }
}

#[async_trait]
impl ApplyPaymentUpdateUseCase for PaymentService {
    async fn execute(&self, update: InvoiceStatusUpdate) -> Result<UpdateOutcome, PaymentError> {
        match self.apply(&update).await? {
            UpdateOutcome::NotFound => Err(PaymentError::NotFound),
            outcome => Ok(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::payment::application::domain::{
        sample_payment, CreatedInvoice, InvoiceRequest, PaymentStatus,
    };
    use crate::modules::purchase::application::domain::{
        priced, PaymentReference, PricedCourse, Purchase, SelectionError,
    };
    use crate::modules::purchase::application::ports::outgoing::{
        PurchaseRepository, PurchaseRepositoryError,
    };
    use chrono::Utc;
    use mockall::mock;

    mock! {
        pub Purchases {}

        #[async_trait]
        impl PurchaseRepository for Purchases {
            async fn priced_courses(&self, course_ids: &[i32]) -> Result<Vec<PricedCourse>, PurchaseRepositoryError>;
            async fn owned_course_ids(&self, user_id: Uuid, course_ids: &[i32]) -> Result<Vec<i32>, PurchaseRepositoryError>;
            async fn purchase(&self, user_id: Uuid, courses: &[PricedCourse], reference: PaymentReference) -> Result<Vec<Purchase>, PurchaseRepositoryError>;
        }
    }

    mock! {
        pub Payments {}

        #[async_trait]
        impl PaymentRepository for Payments {
            async fn create(&self, payment: NewPayment) -> Result<Payment, PaymentRepositoryError>;
            async fn find_by_invoice(&self, invoice_id: &str) -> Result<Option<Payment>, PaymentRepositoryError>;
            async fn apply_update(&self, update: &InvoiceStatusUpdate) -> Result<UpdateOutcome, PaymentRepositoryError>;
        }
    }

    mock! {
        pub Gateway {}

        #[async_trait]
        impl PaymentGateway for Gateway {
            async fn create_invoice(&self, invoice: &InvoiceRequest) -> Result<CreatedInvoice, GatewayError>;
            async fn invoice_status(&self, invoice_id: &str) -> Result<InvoiceStatusUpdate, GatewayError>;
            async fn public_key(&self) -> Result<String, GatewayError>;
        }
    }

    fn selector(owned: Vec<i32>) -> CourseSelector {
        let mut purchases = MockPurchases::new();
        purchases
            .expect_priced_courses()
            .returning(|_| Ok(vec![priced(1, 900), priced(2, 1200)]));
        purchases
            .expect_owned_course_ids()
            .returning(move |_, _| Ok(owned.clone()));
        CourseSelector::new(Arc::new(purchases))
    }

    fn urls() -> CheckoutUrls {
        CheckoutUrls::new("https://app.example", "https://api.example")
    }

    fn service(selector: CourseSelector, payments: MockPayments, gateway: MockGateway) -> PaymentService {
        PaymentService::new(selector, Arc::new(payments), Arc::new(gateway), urls())
    }

    fn update(status: PaymentStatus) -> InvoiceStatusUpdate {
        InvoiceStatusUpdate {
            invoice_id: "inv_1".into(),
            status,
            modified_date: Utc::now(),
            payment_id: None,
            failure_reason: None,
        }
    }

    #[tokio::test]
    async fn test_create_payment_bills_total_in_kopiyky() {
        let user = Uuid::new_v4();
        let mut gateway = MockGateway::new();
        gateway
            .expect_create_invoice()
            .withf(|invoice| {
                invoice.amount == 210_000
                    && invoice.ccy == 980
                    && invoice.web_hook_url == "https://api.example/api/payments/webhook"
            })
            .returning(|_| {
                Ok(CreatedInvoice {
                    invoice_id: "inv_1".into(),
                    page_url: "https://pay.example/inv_1".into(),
                })
            });
        let mut payments = MockPayments::new();
        payments
            .expect_create()
            .withf(move |p| p.user_id == user && p.course_ids == vec![1, 2] && p.amount == 210_000)
            .returning(|p| Ok(sample_payment(p.user_id, PaymentStatus::Created)));

        let session = CreatePaymentUseCase::execute(
            &service(selector(vec![]), payments, gateway),
            user,
            vec![1, 2],
        )
        .await
        .unwrap();

        assert_eq!(session.invoice_id, "inv_1");
        assert_eq!(session.amount, 210_000);
    }

    #[tokio::test]
    async fn test_gateway_failure_stores_nothing() {
        let mut gateway = MockGateway::new();
        gateway.expect_create_invoice().returning(|_| {
            Err(GatewayError::Rejected {
                status: 403,
                message: "forbidden".into(),
            })
        });
        let mut payments = MockPayments::new();
        payments.expect_create().never();

        let result = CreatePaymentUseCase::execute(
            &service(selector(vec![]), payments, gateway),
            Uuid::new_v4(),
            vec![1, 2],
        )
        .await;

        assert!(matches!(result, Err(PaymentError::Gateway(_))));
    }

    #[tokio::test]
    async fn test_owned_course_blocks_checkout() {
        let result = CreatePaymentUseCase::execute(
            &service(selector(vec![2]), MockPayments::new(), MockGateway::new()),
            Uuid::new_v4(),
            vec![1, 2],
        )
        .await;

        assert_eq!(
            result.unwrap_err(),
            PaymentError::Selection(SelectionError::AlreadyPurchased(vec![2]))
        );
    }

    #[tokio::test]
    async fn test_status_of_someone_elses_payment_is_not_found() {
        let mut payments = MockPayments::new();
        payments
            .expect_find_by_invoice()
            .returning(|_| Ok(Some(sample_payment(Uuid::new_v4(), PaymentStatus::Created))));

        let result = GetPaymentStatusUseCase::execute(
            &service(selector(vec![]), payments, MockGateway::new()),
            Uuid::new_v4(),
            "inv_1".into(),
        )
        .await;

        assert_eq!(result.unwrap_err(), PaymentError::NotFound);
    }

    #[tokio::test]
    async fn test_final_status_is_not_polled() {
        let user = Uuid::new_v4();
        let mut payments = MockPayments::new();
        payments
            .expect_find_by_invoice()
            .returning(move |_| Ok(Some(sample_payment(user, PaymentStatus::Success))));
        let mut gateway = MockGateway::new();
        gateway.expect_invoice_status().never();

        let payment = GetPaymentStatusUseCase::execute(
            &service(selector(vec![]), payments, gateway),
            user,
            "inv_1".into(),
        )
        .await
        .unwrap();

        assert_eq!(payment.status, PaymentStatus::Success);
    }

    #[tokio::test]
    async fn test_pending_status_is_polled_and_applied() {
        let user = Uuid::new_v4();
        let mut payments = MockPayments::new();
        payments
            .expect_find_by_invoice()
            .returning(move |_| Ok(Some(sample_payment(user, PaymentStatus::Processing))));
        payments.expect_apply_update().times(1).returning(move |u| {
            Ok(UpdateOutcome::Applied {
                payment: sample_payment(user, u.status),
                previous: PaymentStatus::Processing,
                fulfilled: vec![1, 2],
            })
        });
        let mut gateway = MockGateway::new();
        gateway
            .expect_invoice_status()
            .returning(|_| Ok(update(PaymentStatus::Success)));

        let payment = GetPaymentStatusUseCase::execute(
            &service(selector(vec![]), payments, gateway),
            user,
            "inv_1".into(),
        )
        .await
        .unwrap();

        assert_eq!(payment.status, PaymentStatus::Success);
    }

    #[tokio::test]
    async fn test_poll_failure_serves_stored_state() {
        let user = Uuid::new_v4();
        let mut payments = MockPayments::new();
        payments
            .expect_find_by_invoice()
            .returning(move |_| Ok(Some(sample_payment(user, PaymentStatus::Created))));
        let mut gateway = MockGateway::new();
        gateway
            .expect_invoice_status()
            .returning(|_| Err(GatewayError::Request("timeout".into())));

        let payment = GetPaymentStatusUseCase::execute(
            &service(selector(vec![]), payments, gateway),
            user,
            "inv_1".into(),
        )
        .await
        .unwrap();

        assert_eq!(payment.status, PaymentStatus::Created);
    }

    #[tokio::test]
    async fn test_update_for_unknown_invoice() {
        let mut payments = MockPayments::new();
        payments
            .expect_apply_update()
            .returning(|_| Ok(UpdateOutcome::NotFound));

        let result = ApplyPaymentUpdateUseCase::execute(
            &service(selector(vec![]), payments, MockGateway::new()),
            update(PaymentStatus::Success),
        )
        .await;

        assert_eq!(result.unwrap_err(), PaymentError::NotFound);
    }

    #[tokio::test]
    async fn test_stale_update_is_reported_ignored() {
        let mut payments = MockPayments::new();
        payments.expect_apply_update().returning(|_| {
            Ok(UpdateOutcome::Ignored(sample_payment(
                Uuid::new_v4(),
                PaymentStatus::Success,
            )))
        });

        let outcome = ApplyPaymentUpdateUseCase::execute(
            &service(selector(vec![]), payments, MockGateway::new()),
            update(PaymentStatus::Processing),
        )
        .await
        .unwrap();

        assert_eq!(outcome.label(), "ignored");
    }
}
