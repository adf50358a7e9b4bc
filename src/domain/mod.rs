// Domain layer: probe outcome model and the ports implemented by config sources and probes.

pub mod model;
pub mod ports;
