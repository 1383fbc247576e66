use std::time::{Duration, Instant};

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;

use service_api::{Message, NewMessage};

use crate::error::ClientError;

/// Таймаут одиночной проверки `/health`.
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

// ═══════════════════════════════════════════════════════════════
//  ProducerClient
// ═══════════════════════════════════════════════════════════════

/// HTTP клиент producer'а. Дёшево клонируется: `reqwest::Client` внутри на Arc.
#[derive(Clone, Debug)]
pub struct ProducerClient {
    http: reqwest::Client,
    host: String,
    health_timeout: Duration,
}

/// Результат одного запроса `GET /health`.
#[derive(Debug, Clone)]
pub struct HealthProbe {
    pub status: u16,
    pub body: String,
    pub latency: Duration,
}

impl ProducerClient {
    /// `producer_host`: `host:port` без схемы, напр. `producer:8080`.
    pub fn new(producer_host: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            host: producer_host.into(),
            health_timeout: HEALTH_CHECK_TIMEOUT,
        }
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.host)
    }

    // --- GET /messages ---

    pub async fn fetch_messages(&self) -> Result<Vec<Message>, ClientError> {
        let resp = self
            .http
            .get(self.url("/messages"))
            .send()
            .await
            .map_err(ClientError::Connect)?;

        let body = expect_status(resp, StatusCode::OK).await?;
        // producer может отдать `null` вместо пустого списка
        let messages: Option<Vec<Message>> =
            serde_json::from_str(&body).map_err(ClientError::Decode)?;
        Ok(messages.unwrap_or_default())
    }

    // --- POST /messages ---

    pub async fn create_message(&self, draft: &NewMessage) -> Result<Message, ClientError> {
        let payload = serde_json::to_vec(draft).map_err(ClientError::Encode)?;

        let resp = self
            .http
            .post(self.url("/messages"))
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(ClientError::Connect)?;

        let body = expect_status(resp, StatusCode::CREATED).await?;
        serde_json::from_str(&body).map_err(ClientError::Decode)
    }

    // --- GET /health ---

    /// Latency меряется до чтения тела, как время до заголовков ответа.
    pub async fn check_health(&self) -> Result<HealthProbe, ClientError> {
        let start = Instant::now();
        let resp = self
            .http
            .get(self.url("/health"))
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(ClientError::Connect)?;
        let latency = start.elapsed();

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Ok(HealthProbe { status, body, latency })
    }
}

/// Прочитать тело; статус, отличный от `expected`, даёт ошибку с телом внутри.
async fn expect_status(resp: reqwest::Response, expected: StatusCode) -> Result<String, ClientError> {
    let status = resp.status();
    if status != expected {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            expected: expected.as_u16(),
            status: status.as_u16(),
            body,
        });
    }
    resp.text().await.map_err(ClientError::Read)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_plain_http() {
        let client = ProducerClient::new("producer:8080");
        assert_eq!(client.host(), "producer:8080");
        assert_eq!(client.url("/messages"), "http://producer:8080/messages");
    }

    #[test]
    fn status_error_mentions_expected_code_and_body() {
        let err = ClientError::Status {
            expected: 201,
            status: 400,
            body: "EOF".into(),
        };
        assert_eq!(
            err.to_string(),
            "producer service returned non-201 status code: 400 - EOF"
        );
    }
}
