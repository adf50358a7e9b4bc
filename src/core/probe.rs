use crate::core::auth::BasicCredentials;
use crate::core::endpoint::RoomEndpoint;
use crate::domain::model::ProbeOutcome;
use crate::domain::ports::Probe;
use reqwest::Client;
use std::error::Error as _;
use std::time::Duration;

pub const OCS_API_REQUEST_HEADER: &str = "OCS-APIRequest";

/// 單次探測請求的內容
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub endpoint: RoomEndpoint,
    pub credentials: BasicCredentials,
    pub timeout: Option<Duration>,
}

impl ProbeRequest {
    pub fn new(endpoint: RoomEndpoint, credentials: BasicCredentials) -> Self {
        Self {
            endpoint,
            credentials,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// 依序: OCS-APIRequest, Accept, Authorization
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            (OCS_API_REQUEST_HEADER, "true".to_string()),
            ("Accept", "application/json".to_string()),
            ("Authorization", self.credentials.header_value()),
        ]
    }
}

/// 對 Talk 聊天室發出一次 GET 請求，不重試
pub struct RoomProbe {
    request: ProbeRequest,
    client: Client,
}

impl RoomProbe {
    pub fn new(request: ProbeRequest) -> Self {
        Self {
            request,
            client: Client::new(),
        }
    }

    pub async fn execute(&self) -> ProbeOutcome {
        let mut builder = self.client.get(self.request.endpoint.url().clone());

        for (name, value) in self.request.headers() {
            builder = builder.header(name, value);
        }

        if let Some(timeout) = self.request.timeout {
            builder = builder.timeout(timeout);
        }

        tracing::debug!(
            "Sending GET to {} as user '{}'",
            self.request.endpoint,
            self.request.credentials.username()
        );

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Request failed before a response arrived: {:?}", e);
                return ProbeOutcome::Failure {
                    message: error_chain(&e),
                };
            }
        };

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        // 與原始行為一致：嚴格 UTF-8，不依 Content-Type 做有損轉換
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                return ProbeOutcome::BodyError {
                    status: status.as_u16(),
                    message: error_chain(&e),
                };
            }
        };

        let body = match String::from_utf8(bytes.to_vec()) {
            Ok(body) => body,
            Err(e) => {
                return ProbeOutcome::BodyError {
                    status: status.as_u16(),
                    message: e.to_string(),
                };
            }
        };

        if status.is_success() {
            ProbeOutcome::Success {
                status: status.as_u16(),
                body,
            }
        } else {
            ProbeOutcome::HttpError {
                status: status.as_u16(),
                body,
            }
        }
    }
}

#[async_trait::async_trait]
impl Probe for RoomProbe {
    fn target(&self) -> String {
        self.request.endpoint.to_string()
    }

    async fn run(&self) -> ProbeOutcome {
        self.execute().await
    }
}

/// reqwest 的頂層訊息通常不含根本原因，把 source 串起來
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn request_for(url: &str) -> ProbeRequest {
        ProbeRequest::new(
            RoomEndpoint::from_url(url).unwrap(),
            BasicCredentials::new("nextbridge", "p@ss:word"),
        )
    }

    #[test]
    fn test_headers_in_order() {
        let request = request_for("https://cloud.example.com/ocs/v2.php/apps/spreed/api/v4/room/x");
        let headers = request.headers();

        assert_eq!(headers.len(), 3);
        assert_eq!(headers[0], ("OCS-APIRequest", "true".to_string()));
        assert_eq!(headers[1], ("Accept", "application/json".to_string()));
        assert_eq!(headers[2].0, "Authorization");
        assert_eq!(
            headers[2].1,
            BasicCredentials::new("nextbridge", "p@ss:word").header_value()
        );
    }

    #[tokio::test]
    async fn test_success_keeps_raw_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/ocs/v2.php/apps/spreed/api/v4/room/abc")
                .header("OCS-APIRequest", "true")
                .header("Accept", "application/json")
                .header(
                    "Authorization",
                    BasicCredentials::new("nextbridge", "p@ss:word").header_value(),
                );
            then.status(200).body(r#"{"ocs":{"meta":{"status":"ok"}}}"#);
        });

        let probe = RoomProbe::new(request_for(
            &server.url("/ocs/v2.php/apps/spreed/api/v4/room/abc"),
        ));
        let outcome = probe.execute().await;

        mock.assert();
        assert_eq!(
            outcome,
            ProbeOutcome::Success {
                status: 200,
                body: r#"{"ocs":{"meta":{"status":"ok"}}}"#.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_not_found_is_http_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/room/missing");
            then.status(404).body("room not found");
        });

        let probe = RoomProbe::new(request_for(&server.url("/room/missing")));
        let outcome = probe.execute().await;

        mock.assert();
        assert_eq!(
            outcome,
            ProbeOutcome::HttpError {
                status: 404,
                body: "room not found".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_utf8_body_keeps_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/room/binary");
            then.status(200)
                .header("Content-Type", "application/json; charset=utf-8")
                .body(vec![0x66u8, 0xff, 0xfe, 0x67]);
        });

        let outcome = RoomProbe::new(request_for(&server.url("/room/binary")))
            .execute()
            .await;

        match &outcome {
            ProbeOutcome::BodyError { status, message } => {
                assert_eq!(*status, 200);
                assert!(message.contains("invalid utf-8"), "{}", message);
            }
            other => panic!("expected body error, got {:?}", other),
        }
        assert!(outcome.render().starts_with("Status: 200\nError: "));
        assert!(!outcome.render().contains('\u{FFFD}'));
    }

    #[tokio::test]
    async fn test_connection_refused_is_failure() {
        // 綁定後立即釋放，取得一個沒有人在監聽的埠
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let probe = RoomProbe::new(request_for(&format!("http://127.0.0.1:{}/room/x", port)));
        match probe.execute().await {
            ProbeOutcome::Failure { message } => assert!(!message.is_empty()),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .body("late");
        });

        let request =
            request_for(&server.url("/slow")).with_timeout(Some(Duration::from_millis(200)));
        let outcome = RoomProbe::new(request).execute().await;

        assert!(matches!(outcome, ProbeOutcome::Failure { .. }));
    }
}
