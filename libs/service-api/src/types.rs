use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ═══════════════════════════════════════════════════════════════
//  Message
// ═══════════════════════════════════════════════════════════════

/// Сохранённое сообщение. `id` и `timestamp` назначает producer при append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Наносекундный Unix timestamp в десятичной записи.
    pub id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Тело `POST /messages` и `POST /create-message`.
///
/// `id` / `timestamp` из запроса игнорируются: их выставляет сервер.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

impl NewMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into() }
    }

    /// Разобрать тело запроса. `null` (целиком или в `content`) даёт пустой draft.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let draft: Option<NewMessage> = serde_json::from_slice(body)?;
        Ok(draft.unwrap_or_default())
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ═══════════════════════════════════════════════════════════════
//  Responses
// ═══════════════════════════════════════════════════════════════

/// Payload `GET /`: кто отвечает и когда.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub hostname: String,
    pub timestamp: String,
}

/// Payload consumer'а на `GET /fetch-messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResponse {
    pub consumer_hostname: String,
    pub timestamp: String,
    pub messages: Vec<Message>,
}

/// Текущее время в RFC 3339 с точностью до секунды.
pub fn rfc3339_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
