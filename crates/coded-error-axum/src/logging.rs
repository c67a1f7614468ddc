use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use coded_error::Error;
use coded_error_config::ResponderConfig;
use http::{Method, StatusCode};

use crate::response::RecordedError;

/// Middleware that logs errors recorded by [`ErrorResponse`](crate::ErrorResponse)
///
/// Server errors are logged at `error`, everything else at `info`.
pub async fn log_error_responses(config: ResponderConfig, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    if config.log_errors
        && let Some(recorded) = response.extensions().get::<RecordedError>()
    {
        log_error(&config, &method, &path, response.status(), recorded.error());
    }

    response
}

fn log_error(config: &ResponderConfig, method: &Method, path: &str, status: StatusCode, err: &Error) {
    let rendered = if config.verbose_logs {
        format!("{err:#}")
    } else {
        err.to_string()
    };
    let code = err.status();

    if status.is_server_error() {
        tracing::error!(%method, path, status = status.as_u16(), %code, error = %rendered, "request failed");
    } else {
        tracing::info!(%method, path, status = status.as_u16(), %code, error = %rendered, "request rejected");
    }
}
