// Domain layer: the lead model and the ports the funnel talks through.

pub mod model;
pub mod ports;
