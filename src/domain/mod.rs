// Domain layer: column models, per-kind configurations and the ports to the dataset service.

pub mod configuration;
pub mod model;
pub mod ports;
