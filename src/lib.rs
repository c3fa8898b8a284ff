pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod pipeline;

// Domain data shapes shared across layers
pub mod domain;

pub mod observability;
