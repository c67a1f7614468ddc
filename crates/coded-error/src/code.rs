use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr, IntoStaticStr};
use thiserror::Error;

/// Machine-readable failure classification
///
/// Union of HTTP semantics and the gRPC status codes. When adding a variant,
/// extend [`StatusCode::http_status`] as well.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter, FromRepr, IntoStaticStr,
)]
#[repr(i32)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatusCode {
    /// No classification was attached
    #[default]
    Unknown = 0,
    /// The caller gave up on the operation
    Canceled = 1,
    /// The request was malformed
    InvalidArgument = 2,
    /// The operation ran out of time
    DeadlineExceeded = 3,
    /// An invariant was broken on our side
    Internal = 4,
    /// The requested entity does not exist
    NotFound = 5,
    /// Credentials are missing or invalid
    Unauthenticated = 6,
    /// Credentials are valid but insufficient
    PermissionDenied = 7,
    /// The entity being created already exists
    AlreadyExists = 8,
    /// The system is not in a state that permits the operation
    FailedPrecondition = 9,
    /// The operation is not supported
    Unimplemented = 10,
}

impl StatusCode {
    /// HTTP status this code is reported as
    pub const fn http_status(self) -> http::StatusCode {
        match self {
            Self::Unknown | Self::Internal => http::StatusCode::INTERNAL_SERVER_ERROR,
            Self::Canceled => http::StatusCode::REQUEST_TIMEOUT,
            Self::Unimplemented => http::StatusCode::NOT_IMPLEMENTED,
            Self::NotFound => http::StatusCode::NOT_FOUND,
            Self::DeadlineExceeded => http::StatusCode::GATEWAY_TIMEOUT,
            Self::InvalidArgument | Self::FailedPrecondition => http::StatusCode::BAD_REQUEST,
            Self::AlreadyExists => http::StatusCode::CONFLICT,
            Self::Unauthenticated => http::StatusCode::UNAUTHORIZED,
            Self::PermissionDenied => http::StatusCode::FORBIDDEN,
        }
    }
}

/// Raw status value that has no [`StatusCode`] counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown status code: {0}")]
pub struct UnmappedCode(pub i32);

/// Map a raw status discriminant to its HTTP status
///
/// Values outside the known set are reported to `on_unmapped` and fall back
/// to `500 Internal Server Error`.
pub fn map_raw_code(raw: i32, on_unmapped: impl FnOnce(UnmappedCode)) -> http::StatusCode {
    StatusCode::from_repr(raw).map_or_else(
        || {
            on_unmapped(UnmappedCode(raw));
            http::StatusCode::INTERNAL_SERVER_ERROR
        },
        StatusCode::http_status,
    )
}

/// Stock `on_unmapped` collaborator that emits a warning
pub fn log_unmapped(unmapped: UnmappedCode) {
    tracing::warn!(code = unmapped.0, "{unmapped}");
}

/// HTTP status and client message for a code
///
/// An empty `message` is replaced by the canonical reason phrase of the
/// mapped status.
pub fn http_code_message(code: StatusCode, message: &str) -> (http::StatusCode, String) {
    let status = code.http_status();
    let message = if message.is_empty() {
        status.canonical_reason().unwrap_or_default().to_owned()
    } else {
        message.to_owned()
    };
    (status, message)
}
