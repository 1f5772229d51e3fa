use crate::domain::model::{now_iso, OrderPayload};
use crate::domain::ports::{OrderSubmitter, SubmissionReceipt};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_DELAY_MS: u64 = 900;

/// Stand-in for an order-intake service: waits, then accepts everything.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DELAY_MS))
    }
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl OrderSubmitter for SimulatedSubmitter {
    async fn submit(&self, payload: &OrderPayload) -> Result<SubmissionReceipt> {
        tracing::debug!(
            "Simulating submission of {} ({:?})",
            payload.transaction_details.transaction_id,
            self.delay
        );
        tokio::time::sleep(self.delay).await;
        Ok(SubmissionReceipt {
            status: None,
            body: String::new(),
            submitted_at: now_iso(),
        })
    }
}
