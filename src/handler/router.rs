//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! body size checks and route matching.

use crate::config::AppState;
use crate::handler::classify;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{HeaderMap, Method, Request, Response, Uri};
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling
///
/// This function:
/// 1. Splits the request into its head, discarding the unread body
/// 2. Answers pre-flight requests and rejects unsupported methods
/// 3. Enforces the declared body size limit
/// 4. Routes health checks, the classify endpoint, or falls through to 404
///
/// # Arguments
///
/// * `req` - The incoming request
/// * `state` - Shared application state (configuration and fact provider)
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, _body) = req.into_parts();
    Ok(dispatch(&parts.method, &parts.uri, &parts.headers, &state).await)
}

/// Route a request from its head alone; the body is never read
pub async fn dispatch(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    state: &AppState,
) -> Response<Full<Bytes>> {
    // 1. Pre-flight and method check
    if let Some(resp) = check_http_method(method) {
        return resp;
    }

    // 2. Check body size
    if let Some(resp) = check_body_size(headers, state.config.http.max_body_size) {
        return resp;
    }

    // 3. Route by path
    let is_head = *method == Method::HEAD;
    let path = uri.path();
    let routes = &state.config.routes;

    if routes.health.enabled
        && (path == routes.health.liveness_path || path == routes.health.readiness_path)
    {
        return http::build_health_response("ok", is_head);
    }

    if path == routes.classify_path {
        let raw = classify::extract_number(uri.query());
        return classify::handle_classify(raw.as_deref(), state.fact_provider.as_ref(), is_head)
            .await;
    }

    http::build_404_response(is_head)
}

/// OPTIONS short-circuits to 204; anything but GET/HEAD gets 405
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get(hyper::header::CONTENT_LENGTH)?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fact::testing::{FailingProvider, FixedProvider};
    use crate::fact::{FactError, FactProvider};
    use crate::http::response::tests::{assert_cors, body_json};
    use hyper::StatusCode;
    use serde_json::json;

    fn state_with(provider: Arc<dyn FactProvider>) -> AppState {
        let config = Config::load_from("definitely-missing-config-file").unwrap();
        AppState::with_provider(config, provider)
    }

    async fn get(state: &AppState, uri: &str) -> Response<Full<Bytes>> {
        request(state, Method::GET, uri, HeaderMap::new()).await
    }

    async fn request(
        state: &AppState,
        method: Method,
        uri: &str,
        headers: HeaderMap,
    ) -> Response<Full<Bytes>> {
        let uri: Uri = uri.parse().unwrap();
        dispatch(&method, &uri, &headers, state).await
    }

    #[tokio::test]
    async fn test_preflight_short_circuits() {
        let state = state_with(Arc::new(FixedProvider("unused")));
        for uri in ["/api/classify-number", "/api/classify-number?number=abc", "/elsewhere"] {
            let response = request(&state, Method::OPTIONS, uri, HeaderMap::new()).await;
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
            assert_cors(&response);
            assert!(response.headers().get("Content-Type").is_none());
        }
    }

    #[tokio::test]
    async fn test_classify_route() {
        let state = state_with(Arc::new(FixedProvider("153 is narcissistic.")));
        let response = get(&state, "/api/classify-number?number=153").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        let body = body_json(response).await;
        assert_eq!(body["properties"], json!(["armstrong", "odd"]));
        assert_eq!(body["fun_fact"], "153 is narcissistic.");
    }

    #[tokio::test]
    async fn test_classify_fallback_through_router() {
        let state = state_with(Arc::new(FailingProvider(FactError::Timeout)));
        let body = body_json(get(&state, "/api/classify-number?number=28").await).await;
        assert_eq!(body["fun_fact"], "28 is even and is not prime.");
    }

    #[tokio::test]
    async fn test_classify_missing_and_invalid() {
        let state = state_with(Arc::new(FixedProvider("unused")));

        let response = get(&state, "/api/classify-number").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"number": "", "error": true}));

        let response = get(&state, "/api/classify-number?number=abc").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"number": "abc", "error": true}));
    }

    #[tokio::test]
    async fn test_head_has_headers_but_no_body() {
        let state = state_with(Arc::new(FixedProvider("fact")));
        let response = request(
            &state,
            Method::HEAD,
            "/api/classify-number?number=4",
            HeaderMap::new(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], "application/json");
        let bytes = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_write_methods_rejected() {
        let state = state_with(Arc::new(FixedProvider("unused")));
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
            let response = request(&state, method, "/api/classify-number?number=1", HeaderMap::new()).await;
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert_cors(&response);
        }
    }

    #[tokio::test]
    async fn test_health_and_not_found() {
        let state = state_with(Arc::new(FixedProvider("unused")));

        let response = get(&state, "/healthz").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "ok"}));

        let response = get(&state, "/readyz").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(&state, "/api/classify").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_cors(&response);
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let state = state_with(Arc::new(FixedProvider("unused")));
        let mut headers = HeaderMap::new();
        headers.insert(
            hyper::header::CONTENT_LENGTH,
            hyper::header::HeaderValue::from_static("99999999999"),
        );
        let response = request(&state, Method::GET, "/api/classify-number?number=1", headers).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
