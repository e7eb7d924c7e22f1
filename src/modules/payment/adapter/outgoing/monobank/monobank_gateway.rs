use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};

use crate::config::MonobankConfig;
use crate::modules::payment::application::domain::{
    CreatedInvoice, InvoiceRequest, InvoiceStatusUpdate,
};
use crate::modules::payment::application::ports::outgoing::{GatewayError, PaymentGateway};

use super::key_cache::KeyCache;

const TOKEN_HEADER: &str = "X-Token";

#[derive(Debug, Deserialize)]
struct PublicKeyResponse {
    key: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(alias = "errorDescription")]
    err_text: Option<String>,
}

/// Monobank acquiring over HTTP.
pub struct MonobankGateway {
    client: reqwest::Client,
    api_url: String,
    token: String,
    key_cache: KeyCache,
}

impl MonobankGateway {
    pub fn new(config: &MonobankConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &MonobankConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
            key_cache: KeyCache::default(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.err_text)
                .unwrap_or(body);
            error!(status = status.as_u16(), message = %message, "acquirer rejected request");
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

fn request_err(e: reqwest::Error) -> GatewayError {
    GatewayError::Request(e.to_string())
}

#[async_trait]
impl PaymentGateway for MonobankGateway {
    async fn create_invoice(&self, invoice: &InvoiceRequest) -> Result<CreatedInvoice, GatewayError> {
        let response = self
            .client
            .post(self.url("/api/merchant/invoice/create"))
            .header(TOKEN_HEADER, &self.token)
            .json(invoice)
            .send()
            .await
            .map_err(request_err)?;

        Self::parse_response(response).await
    }

    async fn invoice_status(&self, invoice_id: &str) -> Result<InvoiceStatusUpdate, GatewayError> {
        let response = self
            .client
            .get(self.url(&format!(
                "/api/merchant/invoice/status?invoiceId={invoice_id}"
            )))
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(request_err)?;

        Self::parse_response(response).await
    }

    async fn public_key(&self) -> Result<String, GatewayError> {
        if let Some(key) = self.key_cache.get().await {
            return Ok(key);
        }

        let response = self
            .client
            .get(self.url("/api/merchant/pubkey"))
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(request_err)?;
        let PublicKeyResponse { key } = Self::parse_response(response).await?;

        debug!("webhook verification key refreshed");
        self.key_cache.put(key.clone()).await;
        Ok(key)
    }
}
