//! Infrastructure adapters: logging bootstrap and the platform viewer.

pub mod error;
pub mod telemetry;
pub mod viewer;
