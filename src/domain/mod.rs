// Domain layer: outcome models and the ports the dispatcher works against.

pub mod model;
pub mod ports;
