//! HTTP responses for [`coded_error::Error`]
//!
//! [`fail_json`] turns any error into a JSON response using the status,
//! message, and payload of the outermost coded wrapper in its chain.
//! Handlers can return [`ErrorResponse`] to get the same through `?`, and
//! [`log_error_responses`] logs those errors once the response is built.

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod error;
mod logging;
mod responder;
mod response;

pub use error::ResponderError;
pub use logging::log_error_responses;
pub use responder::{JSON_CONTENT_TYPE, fail_json};
pub use response::{ErrorResponse, RecordedError};
