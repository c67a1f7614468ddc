use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use coded_error::Error;

use crate::responder::fail_json;

/// Error response wrapper that implements `IntoResponse`
///
/// The error is kept in the response extensions as a [`RecordedError`] so
/// outer middleware can log it.
#[derive(Debug)]
pub struct ErrorResponse(pub Error);

impl From<Error> for ErrorResponse {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let mut response = fail_json(&self.0);
        response.extensions_mut().insert(RecordedError(Arc::new(self.0)));
        response
    }
}

/// Error behind a response built from [`ErrorResponse`]
#[derive(Debug, Clone)]
pub struct RecordedError(Arc<Error>);

impl RecordedError {
    pub fn error(&self) -> &Error {
        &self.0
    }
}
