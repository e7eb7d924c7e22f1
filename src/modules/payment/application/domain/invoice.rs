use serde::{Deserialize, Serialize};

use crate::modules::purchase::application::domain::{total_minor_units, PricedCourse};

/// ISO 4217 numeric code for the hryvnia.
pub const UAH: i32 = 980;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketItem {
    pub name: String,
    pub qty: i32,
    /// Kopiyky per unit.
    pub sum: i64,
    pub total: i64,
    pub unit: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantPaymentInfo {
    pub reference: String,
    pub destination: String,
    pub basket_order: Vec<BasketItem>,
}

/// Body of the acquirer's invoice creation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    pub amount: i64,
    pub ccy: i32,
    pub merchant_paym_info: MerchantPaymentInfo,
    pub redirect_url: String,
    pub web_hook_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedInvoice {
    pub invoice_id: String,
    pub page_url: String,
}

/// Where the acquirer sends the buyer and the status callbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutUrls {
    pub redirect_url: String,
    pub webhook_url: String,
}

impl CheckoutUrls {
    pub fn new(client_url: &str, public_base_url: &str) -> Self {
        Self {
            redirect_url: format!("{client_url}/payment/result"),
            webhook_url: format!("{public_base_url}/api/payments/webhook"),
        }
    }
}

pub fn build_invoice(
    courses: &[PricedCourse],
    reference: String,
    urls: &CheckoutUrls,
) -> InvoiceRequest {
    let basket_order = courses
        .iter()
        .map(|c| {
            let sum = i64::from(c.price) * 100;
            BasketItem {
                name: c.title.clone(),
                qty: 1,
                sum,
                total: sum,
                unit: "шт.".to_string(),
                code: format!("course-{}", c.id),
            }
        })
        .collect();

    InvoiceRequest {
        amount: total_minor_units(courses),
        ccy: UAH,
        merchant_paym_info: MerchantPaymentInfo {
            reference,
            destination: "Оплата курсів".to_string(),
            basket_order,
        },
        redirect_url: urls.redirect_url.clone(),
        web_hook_url: urls.webhook_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::purchase::application::domain::priced;

    #[test]
    fn test_invoice_totals_in_kopiyky() {
        let urls = CheckoutUrls::new("https://app.example", "https://api.example");
        let invoice = build_invoice(&[priced(1, 900), priced(2, 1200)], "ref-1".into(), &urls);

        assert_eq!(invoice.amount, 210_000);
        assert_eq!(invoice.ccy, 980);
        assert_eq!(invoice.merchant_paym_info.basket_order[1].sum, 120_000);
        assert_eq!(invoice.web_hook_url, "https://api.example/api/payments/webhook");

        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["merchantPaymInfo"]["basketOrder"][0]["code"], "course-1");
        assert_eq!(json["webHookUrl"], "https://api.example/api/payments/webhook");
    }
}
