//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    middleware::Next,
    response::Response,
};

/// Bodies longer than this many bytes are truncated in the `info` logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = read_body(body).await;
    log_request(&parts, &String::from_utf8_lossy(&body));

    let request = Request::from_parts(parts, Body::from(body));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body = read_body(body).await;
    log_response(&parts, &String::from_utf8_lossy(&body));

    Response::from_parts(parts, Body::from(body))
}

async fn read_body(body: Body) -> Bytes {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .inspect_err(|error| tracing::error!("Could not read body for logging: {error}"))
        .unwrap_or_default()
}

/// Cut `body` to at most [LOG_BODY_LENGTH_LIMIT] bytes without splitting a character.
fn truncate(body: &str) -> Option<&str> {
    if body.len() <= LOG_BODY_LENGTH_LIMIT {
        return None;
    }

    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    Some(&body[..end])
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Received request: {parts:#?}\nbody: {truncated}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Received request: {parts:#?}\nbody: {body:?}"),
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Sending response: {parts:#?}\nbody: {truncated}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {parts:#?}\nbody: {body:?}"),
    }
}
