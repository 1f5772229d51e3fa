use crate::domain::model::{now_iso, OrderPayload};
use crate::domain::ports::{OrderSubmitter, SubmissionReceipt};
use crate::utils::error::{Result, SellerError};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Posts the export document as JSON to an order-intake endpoint.
#[derive(Debug, Clone)]
pub struct HttpOrderSubmitter {
    client: Client,
    endpoint: String,
    auth_token: Option<String>,
}

impl HttpOrderSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_options(endpoint, None, DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn with_options(
        endpoint: impl Into<String>,
        auth_token: Option<String>,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let endpoint = endpoint.into();
        validate_url("submitter.endpoint", &endpoint)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            auth_token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl OrderSubmitter for HttpOrderSubmitter {
    async fn submit(&self, payload: &OrderPayload) -> Result<SubmissionReceipt> {
        tracing::debug!("Submitting order payload to: {}", self.endpoint);

        let mut request = self.client.post(&self.endpoint).json(payload);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Order intake response status: {}", status);

        let body = response.text().await?;

        if status.is_success() {
            Ok(SubmissionReceipt {
                status: Some(status.as_u16()),
                body,
                submitted_at: now_iso(),
            })
        } else {
            tracing::warn!("Order intake rejected payload: {} {}", status, body);
            Err(SellerError::SubmissionFailed {
                status: Some(status.as_u16()),
                message: body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_endpoint() {
        assert!(HttpOrderSubmitter::new("not a url").is_err());
        assert!(HttpOrderSubmitter::new("ftp://orders.example.com").is_err());
        let submitter = HttpOrderSubmitter::new("https://orders.example.com/v1/orders").unwrap();
        assert_eq!(submitter.endpoint(), "https://orders.example.com/v1/orders");
    }
}
