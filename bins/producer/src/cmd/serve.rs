use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use service_api::ServiceIdentity;

use crate::config::Effective;
use crate::error::ProducerError;
use crate::http;
use crate::store::MessageStore;

pub async fn run(eff: &Effective) -> Result<(), ProducerError> {
    tracing::info!(port = eff.port, "producer service starting");

    let hostname = service_api::resolve_hostname();
    let store = Arc::new(MessageStore::new());
    let app = http::router(store.clone(), ServiceIdentity::new(http::STATUS, hostname.as_str()));

    let listener = service_api::bind(&eff.listen_addr()).await?;
    tracing::info!(addr = %eff.listen_addr(), hostname = %hostname, "producer service listening");

    // --- CancellationToken for graceful shutdown ---
    let token = CancellationToken::new();
    let signal_handle = service_api::cancel_on_shutdown_signal(token.clone());

    let result = service_api::serve(listener, app, token.clone()).await;

    token.cancel();
    let _ = signal_handle.await;

    result?;
    tracing::info!(messages = store.len().await, "shutdown complete");
    Ok(())
}
