pub mod catalog;
pub mod payload;
pub mod pricing;
pub mod publisher;
pub mod session;

pub use crate::domain::model::{Offering, OrderPayload};
pub use crate::domain::ports::{ConfigProvider, OrderSubmitter, Storage, SubmissionReceipt};
pub use crate::utils::error::Result;
