pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use crate::core::{
    auth::BasicCredentials,
    endpoint::RoomEndpoint,
    probe::{ProbeRequest, RoomProbe},
    runner::ProbeRunner,
};
pub use domain::model::ProbeOutcome;
pub use utils::error::{ProbeError, Result};
