use crate::core::auth::BasicCredentials;
use crate::core::endpoint::RoomEndpoint;
use crate::domain::model::ProbeOutcome;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 各種設定來源（CLI、TOML）共同提供的探測參數
pub trait ProbeSettings: Send + Sync {
    fn endpoint(&self) -> Result<RoomEndpoint>;
    fn credentials(&self) -> Result<BasicCredentials>;
    fn timeout(&self) -> Option<Duration>;
}

#[async_trait]
pub trait Probe: Send + Sync {
    fn target(&self) -> String;
    async fn run(&self) -> ProbeOutcome;
}
