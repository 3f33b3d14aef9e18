//! Middleware for logging requests and responses.

use axum::{
    extract::Request,
    http::{HeaderMap, header::CONTENT_LENGTH},
    middleware::Next,
    response::Response,
};

/// Log the request and response heads for each request.
///
/// Bodies are not read, uploads can be several megabytes of binary data and
/// responses are spreadsheets. The body size is logged instead when the
/// `Content-Length` header is present.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    tracing::info!(
        "Received request: {} {} ({})",
        parts.method,
        parts.uri,
        describe_length(&parts.headers)
    );
    tracing::debug!("Request headers: {:#?}", parts.headers);

    let response = next.run(Request::from_parts(parts, body)).await;

    tracing::info!(
        "Sending response: {} ({})",
        response.status(),
        describe_length(response.headers())
    );
    tracing::debug!("Response headers: {:#?}", response.headers());

    response
}

fn describe_length(headers: &HeaderMap) -> String {
    match headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
    {
        Some(length) => format!("{length} bytes"),
        None => "unknown length".to_owned(),
    }
}
