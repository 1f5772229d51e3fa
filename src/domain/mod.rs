// Domain layer: models, seed data and ports. Only serde/chrono here.

pub mod defaults;
pub mod model;
pub mod ports;
