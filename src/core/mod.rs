pub mod auth;
pub mod endpoint;
pub mod ocs;
pub mod probe;
pub mod runner;

pub use crate::domain::model::ProbeOutcome;
pub use crate::domain::ports::{Probe, ProbeSettings};
pub use crate::utils::error::Result;
