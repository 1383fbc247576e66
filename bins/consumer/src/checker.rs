use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::client::ProducerClient;

/// Итог одной проверки связи с producer'ом.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Healthy { status: u16, latency: Duration },
    UnexpectedStatus { status: u16, body: String, latency: Duration },
    Unreachable { error: String },
}

/// Один `GET /health` с логированием результата. Без retry.
pub async fn check_producer_connection(client: &ProducerClient) -> ProbeOutcome {
    match client.check_health().await {
        Ok(probe) if probe.status == 200 => {
            tracing::info!(
                producer = %client.host(),
                status = probe.status,
                latency_ms = probe.latency.as_millis() as u64,
                "connection check: producer reachable"
            );
            ProbeOutcome::Healthy {
                status: probe.status,
                latency: probe.latency,
            }
        }
        Ok(probe) => {
            tracing::warn!(
                producer = %client.host(),
                status = probe.status,
                body = %probe.body,
                latency_ms = probe.latency.as_millis() as u64,
                "connection check: producer returned unexpected status"
            );
            ProbeOutcome::UnexpectedStatus {
                status: probe.status,
                body: probe.body,
                latency: probe.latency,
            }
        }
        Err(e) => {
            tracing::warn!(
                producer = %client.host(),
                error = %e,
                "connection check: failed to reach producer"
            );
            ProbeOutcome::Unreachable { error: e.to_string() }
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Connection checker task
// ═══════════════════════════════════════════════════════════════

/// Запустить фоновую проверку: сразу при старте, затем раз в `interval`.
/// Останавливается по `token`; in-flight проверка при отмене бросается.
///
/// `interval` должен быть ненулевым.
pub fn spawn_connection_checker(
    client: ProducerClient,
    interval: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    tokio::select! {
                        biased;

                        _ = token.cancelled() => break,
                        _ = check_producer_connection(&client) => {}
                    }
                }
            }
        }

        tracing::info!(producer = %client.host(), "connection verification stopped");
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::Router;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::get;

    use super::*;

    async fn start(app: Router) -> (String, CancellationToken) {
        let listener = service_api::bind("127.0.0.1:0").await.unwrap();
        let host = listener.local_addr().unwrap().to_string();
        let token = CancellationToken::new();
        tokio::spawn(service_api::serve(listener, app, token.clone()));
        (host, token)
    }

    fn counting_health(hits: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/health",
                get(|State(hits): State<Arc<AtomicUsize>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    "OK"
                }),
            )
            .with_state(hits)
    }

    async fn unused_host() -> String {
        let listener = service_api::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().to_string()
    }

    async fn wait_for_hits(hits: &AtomicUsize, n: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while hits.load(Ordering::SeqCst) < n {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("producer was not probed in time");
    }

    #[tokio::test]
    async fn healthy_producer() {
        let hits = Arc::new(AtomicUsize::new(0));
        let (host, server) = start(counting_health(hits.clone())).await;

        let outcome = check_producer_connection(&ProducerClient::new(host)).await;
        assert!(matches!(outcome, ProbeOutcome::Healthy { status: 200, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        server.cancel();
    }

    #[tokio::test]
    async fn unexpected_status_keeps_body() {
        let app = Router::new().route(
            "/health",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "draining") }),
        );
        let (host, server) = start(app).await;

        match check_producer_connection(&ProducerClient::new(host)).await {
            ProbeOutcome::UnexpectedStatus { status, body, .. } => {
                assert_eq!(status, 503);
                assert_eq!(body, "draining");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        server.cancel();
    }

    #[tokio::test]
    async fn unreachable_producer() {
        let client = ProducerClient::new(unused_host().await);
        match check_producer_connection(&client).await {
            ProbeOutcome::Unreachable { error } => {
                assert!(error.starts_with("failed to connect to producer service"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_producer_times_out() {
        let app = Router::new().route(
            "/health",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                "OK"
            }),
        );
        let (host, server) = start(app).await;

        let client = ProducerClient::new(host).with_health_timeout(Duration::from_millis(100));
        let outcome = check_producer_connection(&client).await;
        assert!(matches!(outcome, ProbeOutcome::Unreachable { .. }));

        server.cancel();
    }

    #[tokio::test]
    async fn checks_immediately_then_stops_on_cancel() {
        let hits = Arc::new(AtomicUsize::new(0));
        let (host, server) = start(counting_health(hits.clone())).await;

        let token = CancellationToken::new();
        let handle = spawn_connection_checker(
            ProducerClient::new(host),
            Duration::from_secs(3600),
            token.clone(),
        );

        wait_for_hits(&hits, 1).await;
        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("checker did not stop")
            .unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        server.cancel();
    }

    #[tokio::test]
    async fn repeats_every_interval() {
        let hits = Arc::new(AtomicUsize::new(0));
        let (host, server) = start(counting_health(hits.clone())).await;

        let token = CancellationToken::new();
        let handle = spawn_connection_checker(
            ProducerClient::new(host),
            Duration::from_millis(50),
            token.clone(),
        );

        wait_for_hits(&hits, 3).await;
        token.cancel();
        handle.await.unwrap();

        server.cancel();
    }

    #[tokio::test]
    async fn cancel_interrupts_in_flight_check() {
        let app = Router::new().route(
            "/health",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                "OK"
            }),
        );
        let (host, server) = start(app).await;

        let token = CancellationToken::new();
        let handle = spawn_connection_checker(
            ProducerClient::new(host),
            Duration::from_secs(3600),
            token.clone(),
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("checker did not stop")
            .unwrap();

        server.cancel();
    }
}
