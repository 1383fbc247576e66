#[derive(Debug, thiserror::Error)]
pub enum ProducerError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("{0}")]
    Serve(#[from] service_api::ServeError),
}
