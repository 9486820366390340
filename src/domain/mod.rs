// Domain layer: records, seed data and ports. No I/O lives here.

pub mod model;
pub mod ports;
pub mod seed;
