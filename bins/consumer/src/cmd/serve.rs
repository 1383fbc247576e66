use tokio_util::sync::CancellationToken;

use service_api::ServiceIdentity;

use crate::checker::spawn_connection_checker;
use crate::client::ProducerClient;
use crate::config::Effective;
use crate::error::ConsumerError;
use crate::http;

pub async fn run(eff: &Effective) -> Result<(), ConsumerError> {
    tracing::info!(
        port = eff.port,
        producer = %eff.producer_host,
        check_interval_secs = eff.check_interval.as_secs(),
        "consumer service starting"
    );

    let hostname = service_api::resolve_hostname();
    let client = ProducerClient::new(eff.producer_host.as_str());
    let app = http::router(client.clone(), ServiceIdentity::new(http::STATUS, hostname.as_str()));

    let listener = service_api::bind(&eff.listen_addr()).await?;
    tracing::info!(addr = %eff.listen_addr(), hostname = %hostname, "consumer service listening");

    // --- CancellationToken for graceful shutdown ---
    let token = CancellationToken::new();
    let checker_handle = spawn_connection_checker(client, eff.check_interval, token.clone());
    let signal_handle = service_api::cancel_on_shutdown_signal(token.clone());

    let result = service_api::serve(listener, app, token.clone()).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "http server error");
    }

    // Stop the checker and wait for it before exiting
    token.cancel();
    let _ = checker_handle.await;
    let _ = signal_handle.await;

    result?;
    tracing::info!("shutdown complete");
    Ok(())
}
