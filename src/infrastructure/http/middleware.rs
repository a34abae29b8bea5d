//! Request logging middleware

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Log `<status> <method> <uri>` once the response is produced
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();
    if status.is_server_error() {
        tracing::warn!("{} {} {}", status.as_u16(), method, uri);
    } else {
        tracing::info!("{} {} {}", status.as_u16(), method, uri);
    }

    response
}
