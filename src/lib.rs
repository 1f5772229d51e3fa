pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{HttpOrderSubmitter, LocalStorage, SimulatedSubmitter};
pub use core::{
    catalog::{filter_offerings, Catalog, CatalogFilter, ComponentFilter},
    payload::build_order_payload,
    pricing::{clamp_energy, compute_totals, format_inr, quote, FeeRounding, PricingPolicy, Quote},
    publisher::{PublishOutcome, Publisher},
    session::{PublishNotification, PublishState, SellerSession},
};
pub use domain::model::{Offering, OrderPayload, SellerComponent};
pub use domain::ports::{OrderSubmitter, SubmissionReceipt};
pub use utils::error::{Result, SellerError};
