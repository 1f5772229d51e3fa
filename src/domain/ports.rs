use crate::core::pricing::PricingPolicy;
use crate::domain::model::OrderPayload;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn pricing_policy(&self) -> PricingPolicy;
    fn submitter_endpoint(&self) -> Option<&str>;
    fn catalog_seed_file(&self) -> Option<&str>;
}

/// What the order-intake side reported for an accepted payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub status: Option<u16>,
    pub body: String,
    pub submitted_at: String,
}

/// Sends a finished export document to the order-intake service.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    async fn submit(&self, payload: &OrderPayload) -> Result<SubmissionReceipt>;
}
