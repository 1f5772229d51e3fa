use crate::core::session::{PublishNotification, PublishState, SellerSession};
use crate::domain::ports::OrderSubmitter;
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type SharedSession = Arc<Mutex<SellerSession>>;

#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    Published(PublishNotification),
    /// Another publish was in flight; nothing happened.
    Ignored,
}

/// Drives `idle -> publishing -> idle` against an injected submitter.
pub struct Publisher<S: OrderSubmitter> {
    session: SharedSession,
    submitter: S,
}

impl<S: OrderSubmitter> Publisher<S> {
    pub fn new(session: SellerSession, submitter: S) -> Self {
        Self::from_shared(Arc::new(Mutex::new(session)), submitter)
    }

    pub fn from_shared(session: SharedSession, submitter: S) -> Self {
        Self { session, submitter }
    }

    pub fn session(&self) -> SharedSession {
        Arc::clone(&self.session)
    }

    pub async fn state(&self) -> PublishState {
        self.session.lock().await.publish_state()
    }

    pub async fn publish(&self) -> Result<PublishOutcome> {
        // Not held across the submit; a second caller must observe `Publishing`.
        let ticket = {
            let mut session = self.session.lock().await;
            match session.begin_publish()? {
                Some(ticket) => ticket,
                None => return Ok(PublishOutcome::Ignored),
            }
        };

        let guard = PublishGuard::new(Arc::clone(&self.session));
        let result = self.submitter.submit(&ticket.payload).await;

        let mut session = self.session.lock().await;
        guard.disarm();
        session
            .finish_publish(ticket, result)
            .map(PublishOutcome::Published)
    }
}

/// Puts the session back to `Idle` if `publish()` is dropped mid-submit.
struct PublishGuard {
    session: Option<SharedSession>,
}

impl PublishGuard {
    fn new(session: SharedSession) -> Self {
        Self {
            session: Some(session),
        }
    }

    fn disarm(mut self) {
        self.session = None;
    }
}

impl Drop for PublishGuard {
    fn drop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        if let Ok(mut locked) = session.try_lock() {
            locked.abort_publish();
            return;
        }

        // Someone else holds the lock; reset once it is released.
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    session.lock().await.abort_publish();
                });
            }
            Err(_) => {
                tracing::error!("Publish cancelled outside a runtime; session left publishing");
            }
        }
    }
}
