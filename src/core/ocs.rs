use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct OcsEnvelope {
    pub ocs: OcsBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcsBody {
    pub meta: OcsMeta,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcsMeta {
    pub status: String,
    pub statuscode: u16,
    #[serde(default)]
    pub message: Option<String>,
}

impl OcsEnvelope {
    /// 非 OCS 格式的回應回傳 None
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    pub fn room(&self) -> Option<RoomSummary> {
        RoomSummary::from_data(&self.ocs.data)
    }

    pub fn describe(&self) -> String {
        let meta = &self.ocs.meta;
        let mut line = format!("OCS {} ({})", meta.status, meta.statuscode);
        if let Some(message) = meta.message.as_deref().filter(|m| !m.is_empty()) {
            line.push_str(&format!(": {}", message));
        }
        if let Some(room) = self.room() {
            line.push_str(" | ");
            line.push_str(&room.describe());
        }
        line
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomSummary {
    pub token: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub room_type: Option<i64>,
    pub participant_type: Option<i64>,
    pub has_signaling: bool,
}

impl RoomSummary {
    pub fn from_data(data: &Value) -> Option<Self> {
        let obj = data.as_object()?;

        let text = |key: &str| obj.get(key).and_then(|v| v.as_str()).map(str::to_string);
        let number = |key: &str| obj.get(key).and_then(|v| v.as_i64());

        let has_signaling = obj
            .get("signaling")
            .map(|s| s.get("url").is_some() || s.get("ticket").is_some())
            .unwrap_or(false);

        let summary = Self {
            token: text("token"),
            name: text("name"),
            display_name: text("displayName"),
            room_type: number("type"),
            participant_type: number("participantType"),
            has_signaling,
        };

        if summary.token.is_none() && summary.name.is_none() && summary.display_name.is_none() {
            return None;
        }

        Some(summary)
    }

    pub fn describe(&self) -> String {
        let title = self
            .display_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("<unnamed>");

        let mut parts = vec![format!("room '{}'", title)];
        if let Some(token) = &self.token {
            parts.push(format!("token={}", token));
        }
        if let Some(kind) = self.room_type {
            parts.push(format!("type={} ({})", kind, room_type_label(kind)));
        }
        if let Some(participant) = self.participant_type {
            parts.push(format!("participantType={}", participant));
        }
        parts.push(format!(
            "signaling={}",
            if self.has_signaling { "yes" } else { "no" }
        ));
        parts.join(", ")
    }
}

/// Talk 的聊天室類型
fn room_type_label(kind: i64) -> &'static str {
    match kind {
        1 => "one-to-one",
        2 => "group",
        3 => "public",
        4 => "changelog",
        5 => "former one-to-one",
        6 => "note to self",
        _ => "unknown",
    }
}
