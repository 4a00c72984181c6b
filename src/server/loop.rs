// Server loop module
// Accepts connections until shutdown is requested

use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::ShutdownSignal;
use crate::config::AppState;
use crate::logger;

/// Accept loop.
///
/// This function:
/// 1. Waits for either a new connection or the shutdown signal
/// 2. Hands each accepted stream to `accept_connection`
/// 3. Logs accept errors and keeps listening
/// 4. On shutdown, drops the listener and logs the remaining connection count
///
/// Connections already accepted keep running in their own tasks.
///
/// # Arguments
///
/// * `listener` - Bound listener to accept from
/// * `state` - Shared application state
/// * `shutdown` - Signal that ends the loop
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<ShutdownSignal>,
) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = shutdown.wait() => break,
        }
    }

    drop(listener);
    logger::log_shutdown(state.active_connections.load(Ordering::SeqCst));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fact::OfflineProvider;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn start() -> (std::net::SocketAddr, Arc<ShutdownSignal>, tokio::task::JoinHandle<()>) {
        let config = Config::load_from("definitely-missing-config-file").unwrap();
        let state = Arc::new(AppState::with_provider(config, Arc::new(OfflineProvider)));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(ShutdownSignal::new());
        let handle = tokio::spawn(start_server_loop(listener, state, Arc::clone(&shutdown)));
        (addr, shutdown, handle)
    }

    async fn raw_get(addr: std::net::SocketAddr, target: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {target} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_serves_classification_over_tcp() {
        let (addr, shutdown, handle) = start().await;

        let response = raw_get(addr, "/api/classify-number?number=28").await;
        assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
        assert!(response.contains("access-control-allow-origin: *"));
        assert!(response.contains("server: number-classifier"));
        assert!(response.contains(r#""fun_fact":"28 is even and is not prime.""#));

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[test]
    fn test_large_prime_does_not_stall_health_check() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();

        let health = runtime.block_on(async {
            let (addr, _shutdown, _handle) = start().await;

            // Largest prime below i64::MAX, classifying it takes seconds
            let mut slow = TcpStream::connect(addr).await.unwrap();
            slow.write_all(
                b"GET /api/classify-number?number=9223372036854775783 HTTP/1.1\r\nHost: localhost\r\n\r\n",
            )
            .await
            .unwrap();
            tokio::time::sleep(Duration::from_millis(200)).await;

            tokio::time::timeout(Duration::from_secs(2), raw_get(addr, "/healthz")).await
        });
        // The classification is still running on a blocking thread
        runtime.shutdown_background();

        let response = health.expect("health check stalled behind classification");
        assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
        assert!(response.ends_with(r#"{"status":"ok"}"#));
    }

    #[tokio::test]
    async fn test_bad_input_over_tcp() {
        let (addr, shutdown, _handle) = start().await;

        let response = raw_get(addr, "/api/classify-number?number=abc").await;
        assert!(response.starts_with("HTTP/1.1 400 Bad Request"), "{response}");
        assert!(response.ends_with(r#"{"number":"abc","error":true}"#));

        shutdown.trigger();
    }
}
