// Domain layer: student entities and the ports the session talks through.

pub mod model;
pub mod ports;
