// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod simulated;
pub mod storage;

pub use http::HttpOrderSubmitter;
pub use simulated::SimulatedSubmitter;
pub use storage::LocalStorage;
