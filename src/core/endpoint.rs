use crate::utils::error::{ProbeError, Result};
use crate::utils::validation::validate_url;
use regex::Regex;
use std::fmt;
use url::Url;

/// Talk (spreed) 聊天室 OCS API 路徑
pub const ROOM_API_PATH: &str = "/ocs/v2.php/apps/spreed/api/v4/room";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomEndpoint {
    url: Url,
}

impl RoomEndpoint {
    /// 直接使用完整的聊天室 URL
    pub fn from_url(url: &str) -> Result<Self> {
        let url = validate_url("url", url)?;
        Ok(Self { url })
    }

    /// 由伺服器位址與聊天室 token 組出 URL
    pub fn from_parts(server_url: &str, room_token: &str) -> Result<Self> {
        let base = validate_url("server", server_url)?;
        validate_room_token(room_token)?;

        // 保留伺服器子路徑，例如 https://host/nextcloud
        let prefix = base.path().trim_end_matches('/');
        let path = format!("{}{}/{}", prefix, ROOM_API_PATH, room_token);
        let url = base.join(&path)?;

        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for RoomEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

fn validate_room_token(room_token: &str) -> Result<()> {
    if room_token.trim().is_empty() {
        return Err(ProbeError::InvalidConfigValueError {
            field: "room".to_string(),
            value: room_token.to_string(),
            reason: "Room token cannot be empty".to_string(),
        });
    }

    // Talk token 只有英數字，也排除 `..`、`%2e` 這類會被正規化成其他路徑的值
    let token_pattern = Regex::new(r"^[A-Za-z0-9]+$").map_err(|e| {
        ProbeError::ConfigValidationError {
            field: "room".to_string(),
            message: e.to_string(),
        }
    })?;

    if !token_pattern.is_match(room_token) {
        return Err(ProbeError::InvalidConfigValueError {
            field: "room".to_string(),
            value: room_token.to_string(),
            reason: "Room token may only contain letters and digits".to_string(),
        });
    }

    Ok(())
}
