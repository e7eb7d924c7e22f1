pub mod invoice;
pub mod payment;
pub mod signature;

pub use invoice::{build_invoice, CheckoutUrls, CreatedInvoice, InvoiceRequest, UAH};
pub use payment::{
    is_newer, InvoiceStatusUpdate, NewPayment, Payment, PaymentStatus, UpdateOutcome,
};
pub use signature::{verify_signature, SignatureError};

#[cfg(test)]
pub(crate) use payment::sample_payment;
