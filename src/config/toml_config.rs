use crate::core::auth::BasicCredentials;
use crate::core::endpoint::RoomEndpoint;
use crate::utils::error::{ProbeError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_required_field};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MAX_TIMEOUT_SECONDS: u64 = 3600;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub request: RequestConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    /// 完整的聊天室 URL，優先於 server + room
    pub url: Option<String>,
    pub server: Option<String>,
    pub room: Option<String>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestConfig {
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，解析完成後才替換環境變數
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: TomlConfig = toml::from_str(content)?;
        config.substitute_env_vars()?;
        Ok(config)
    }

    /// 替換字串欄位中的 ${VAR}。環境變數的值原樣放入，不經過 TOML 跳脫處理
    fn substitute_env_vars(&mut self) -> Result<()> {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            ProbeError::ConfigValidationError {
                field: "env_substitution".to_string(),
                message: e.to_string(),
            }
        })?;

        let fields = [
            ("target.url", &mut self.target.url),
            ("target.server", &mut self.target.server),
            ("target.room", &mut self.target.room),
            ("auth.username", &mut self.auth.username),
            ("auth.password", &mut self.auth.password),
        ];

        for (field, slot) in fields {
            if let Some(value) = slot.take() {
                *slot = substitute_value(&re, field, &value);
            }
        }

        Ok(())
    }
}

/// 引用了未設定的環境變數時，視同該欄位沒有提供
fn substitute_value(re: &Regex, field: &str, value: &str) -> Option<String> {
    let mut unset: Option<String> = None;

    let replaced = re.replace_all(value, |caps: &regex::Captures| {
        let var_name = &caps[1];
        match std::env::var(var_name) {
            Ok(v) => v,
            Err(_) => {
                unset.get_or_insert_with(|| var_name.to_string());
                String::new()
            }
        }
    });
    let replaced = replaced.into_owned();

    if let Some(var_name) = unset {
        tracing::warn!(
            "{} references unset environment variable {}, treating it as missing",
            field,
            var_name
        );
        return None;
    }

    Some(replaced)
}

/// url 優先，否則由 server + room 組合
pub(crate) fn resolve_endpoint(
    url: Option<&str>,
    server: Option<&str>,
    room: Option<&str>,
) -> Result<RoomEndpoint> {
    if let Some(url) = url {
        return RoomEndpoint::from_url(url);
    }

    match (server, room) {
        (Some(server), Some(room)) => RoomEndpoint::from_parts(server, room),
        (Some(_), None) => Err(ProbeError::MissingConfigError {
            field: "room".to_string(),
        }),
        (None, Some(_)) => Err(ProbeError::MissingConfigError {
            field: "server".to_string(),
        }),
        (None, None) => Err(ProbeError::MissingConfigError {
            field: "url (or server + room)".to_string(),
        }),
    }
}

pub(crate) fn resolve_credentials(
    username: &Option<String>,
    password: &Option<String>,
) -> Result<BasicCredentials> {
    let username = validate_required_field("username", username)?;
    validate_non_empty_string("username", username)?;

    // 空密碼合法，但必須明確提供
    let password = validate_required_field("password", password)?;

    Ok(BasicCredentials::new(username.as_str(), password.as_str()))
}

pub(crate) fn validate_timeout(timeout_seconds: Option<u64>) -> Result<()> {
    if let Some(timeout) = timeout_seconds {
        validate_range("timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
    }
    Ok(())
}
