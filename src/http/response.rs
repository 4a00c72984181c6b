//! HTTP response building module
//!
//! Builders for every status the server emits. All of them carry the CORS
//! header set; those with a body declare `application/json`.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};
use serde::Serialize;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "Content-Type";
pub const ALLOW_METHODS: &str = "GET, HEAD, OPTIONS";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Response builder pre-populated with the CORS headers
fn cors_builder(status: StatusCode) -> Builder {
    Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Full<Bytes>> {
    cors_builder(StatusCode::NO_CONTENT)
        .header("Access-Control-Max-Age", "86400")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error(StatusCode::NO_CONTENT, &e);
            empty_fallback(StatusCode::NO_CONTENT)
        })
}

/// Serialize `payload` as the JSON body of a response
///
/// For HEAD requests the body is dropped but `Content-Length` still reports
/// the size of the JSON document.
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    payload: &T,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(payload) {
        Ok(json) => json,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize {status} body: {e}"));
            return empty_fallback(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    let content_length = json.len();
    let body = if is_head { Bytes::new() } else { Bytes::from(json) };

    cors_builder(status)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            empty_fallback(status)
        })
}

#[derive(Serialize)]
struct ErrorMessage<'a> {
    error: bool,
    message: &'a str,
}

#[derive(Serialize)]
struct HealthStatus<'a> {
    status: &'a str,
}

fn build_error_message(status: StatusCode, is_head: bool) -> Response<Full<Bytes>> {
    let message = status.canonical_reason().unwrap_or("Error");
    build_json_response(status, &ErrorMessage { error: true, message }, is_head)
}

/// Build 404 Not Found response
pub fn build_404_response(is_head: bool) -> Response<Full<Bytes>> {
    build_error_message(StatusCode::NOT_FOUND, is_head)
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    let mut response = build_error_message(StatusCode::METHOD_NOT_ALLOWED, false);
    response.headers_mut().insert(
        hyper::header::ALLOW,
        hyper::header::HeaderValue::from_static(ALLOW_METHODS),
    );
    response
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_error_message(StatusCode::PAYLOAD_TOO_LARGE, false)
}

/// Build 500 Internal Server Error response
pub fn build_500_response(is_head: bool) -> Response<Full<Bytes>> {
    build_error_message(StatusCode::INTERNAL_SERVER_ERROR, is_head)
}

/// Build health check response
pub fn build_health_response(status: &str, is_head: bool) -> Response<Full<Bytes>> {
    build_json_response(StatusCode::OK, &HealthStatus { status }, is_head)
}

/// Bare response used when the builder itself fails
fn empty_fallback(status: StatusCode) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
