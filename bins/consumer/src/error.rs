#[derive(Debug, thiserror::Error)]
pub enum ConsumerError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("{0}")]
    Serve(#[from] service_api::ServeError),
}

/// Ошибка вызова producer'а. Текст попадает в тело 500-го ответа.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to connect to producer service: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("producer service returned non-{expected} status code: {status} - {body}")]
    Status { expected: u16, status: u16, body: String },

    #[error("failed to read response: {0}")]
    Read(#[source] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to marshal message: {0}")]
    Encode(#[source] serde_json::Error),
}
