use crate::config::toml_config::{
    resolve_credentials, resolve_endpoint, validate_timeout, TomlConfig,
};
use crate::core::auth::BasicCredentials;
use crate::core::endpoint::RoomEndpoint;
use crate::core::ProbeSettings;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Default, Parser)]
#[command(name = "talk-probe")]
#[command(about = "Send one authenticated GET to a Nextcloud Talk room and print the response")]
pub struct CliConfig {
    /// Full room URL, e.g. https://cloud.example.com/ocs/v2.php/apps/spreed/api/v4/room/<token>
    #[arg(long, env = "NEXTCLOUD_ROOM_URL")]
    pub url: Option<String>,

    /// Nextcloud base URL, combined with --room
    #[arg(long, env = "NEXTCLOUD_URL")]
    pub server: Option<String>,

    /// Talk room token
    #[arg(long, env = "NEXTCLOUD_ROOM_TOKEN")]
    pub room: Option<String>,

    #[arg(long, env = "NEXTCLOUD_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "NEXTCLOUD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Request timeout; no timeout when omitted
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// TOML file with [target], [auth] and [request] sections
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print a one-line summary of the OCS response
    #[arg(long)]
    pub summary: bool,

    /// Exit with 2 on an HTTP error and 3 on a transport failure
    #[arg(long)]
    pub fail_on_error: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON on stderr")]
    pub log_json: bool,
}

impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("url", &self.url)
            .field("server", &self.server)
            .field("room", &self.room)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout_seconds", &self.timeout_seconds)
            .field("config", &self.config)
            .field("summary", &self.summary)
            .field("fail_on_error", &self.fail_on_error)
            .finish()
    }
}

impl CliConfig {
    /// 用 TOML 檔補上 CLI / 環境變數沒有提供的欄位
    pub fn merge_file(mut self, file: TomlConfig) -> Self {
        let target = file.target;
        if self.url.is_none() {
            if self.server.is_none() && self.room.is_none() {
                self.url = target.url;
            }
            // 有 url 時 server + room 不會被使用
            if self.url.is_none() {
                self.server = self.server.or(target.server);
                self.room = self.room.or(target.room);
            }
        }

        self.username = self.username.or(file.auth.username);
        self.password = self.password.or(file.auth.password);
        self.timeout_seconds = self.timeout_seconds.or(file.request.timeout_seconds);
        self
    }

    /// 若有指定 --config，載入並合併
    pub fn resolve(self) -> Result<Self> {
        match &self.config {
            Some(path) => {
                tracing::debug!("Loading config file {}", path.display());
                let file = TomlConfig::from_file(path)?;
                Ok(self.merge_file(file))
            }
            None => Ok(self),
        }
    }
}

impl ProbeSettings for CliConfig {
    fn endpoint(&self) -> Result<RoomEndpoint> {
        resolve_endpoint(
            self.url.as_deref(),
            self.server.as_deref(),
            self.room.as_deref(),
        )
    }

    fn credentials(&self) -> Result<BasicCredentials> {
        resolve_credentials(&self.username, &self.password)
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.endpoint()?;
        self.credentials()?;
        validate_timeout(self.timeout_seconds)
    }
}
