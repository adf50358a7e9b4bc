use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::fmt;

/// HTTP Basic 認證憑證
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    username: String,
    password: String,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Base64("username:password")
    pub fn encode(&self) -> String {
        BASE64.encode(format!("{}:{}", self.username, self.password))
    }

    pub fn header_value(&self) -> String {
        format!("Basic {}", self.encode())
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
