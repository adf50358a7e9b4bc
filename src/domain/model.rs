use serde::Serialize;

/// 一次探測的結果。所有失敗都收斂到這裡，不往外拋錯
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// 2xx 回應
    Success { status: u16, body: String },
    /// 非 2xx 回應
    HttpError { status: u16, body: String },
    /// 已收到狀態碼，但讀取或 UTF-8 解碼 body 失敗
    BodyError { status: u16, message: String },
    /// DNS、連線、TLS、逾時等沒有拿到回應的情況
    Failure { message: String },
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ProbeOutcome::Success { status, .. }
            | ProbeOutcome::HttpError { status, .. }
            | ProbeOutcome::BodyError { status, .. } => Some(*status),
            ProbeOutcome::Failure { .. } => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Success { body, .. } | ProbeOutcome::HttpError { body, .. } => {
                Some(body)
            }
            ProbeOutcome::BodyError { .. } | ProbeOutcome::Failure { .. } => None,
        }
    }

    /// 輸出到 stdout 的文字
    pub fn render(&self) -> String {
        match self {
            ProbeOutcome::Success { status, body } => format!("Status: {}\n{}", status, body),
            ProbeOutcome::HttpError { status, body } => {
                format!("HTTP Error: {}\n{}", status, body)
            }
            ProbeOutcome::BodyError { status, message } => {
                let status_line = if (200..300).contains(status) {
                    format!("Status: {}", status)
                } else {
                    format!("HTTP Error: {}", status)
                };
                format!("{}\nError: {}", status_line, message)
            }
            ProbeOutcome::Failure { message } => format!("Error: {}", message),
        }
    }

    /// `--fail-on-error` 時使用的退出碼
    pub fn exit_code(&self) -> i32 {
        match self {
            ProbeOutcome::Success { .. } => 0,
            ProbeOutcome::HttpError { .. } => 2,
            ProbeOutcome::BodyError { .. } | ProbeOutcome::Failure { .. } => 3,
        }
    }
}
