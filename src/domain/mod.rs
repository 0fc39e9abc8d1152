// Domain layer: listing model and the job board port.

pub mod model;
pub mod ports;
