use std::error::Error as StdError;

use axum::response::{IntoResponse, Response};
use http::header::{self, HeaderValue};
use http::StatusCode;
use serde::Serialize;

use crate::error::ResponderError;

/// Content type of every error response
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Body written when the real one cannot be encoded
const FALLBACK_BODY: &str = "{\"code\":500,\"message\":\"Internal Server Error\"}\n";

/// Default body when the error carries no payload
#[derive(Debug, Serialize)]
struct ApiError {
    #[serde(skip_serializing_if = "is_zero")]
    code: u16,
    #[serde(skip_serializing_if = "String::is_empty")]
    message: String,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(code: &u16) -> bool {
    *code == 0
}

/// Build the JSON response for an error
///
/// Uses the outermost coded wrapper's status and message, substituting the
/// reason phrase for an empty message. Its payload, when present, is sent
/// as the body; otherwise `{"code": .., "message": ..}` is.
pub fn fail_json(err: &(dyn StdError + 'static)) -> Response {
    let (code, message) = coded_error::code(err);
    let (status, message) = coded_error::http_code_message(code, message);

    let result = match coded_error::payload(err) {
        Some(payload) => write_json(status, payload),
        None => write_json(
            status,
            &ApiError {
                code: status.as_u16(),
                message,
            },
        ),
    };

    result.unwrap_or_else(|e| {
        tracing::error!(error = %e, %status, "falling back to generic error body");
        fallback_response()
    })
}

pub(crate) fn write_json<T>(status: StatusCode, value: &T) -> Result<Response, ResponderError>
where
    T: Serialize + ?Sized,
{
    let mut body = serde_json::to_vec(value)?;
    body.push(b'\n');

    Ok((
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
        body,
    )
        .into_response())
}

fn fallback_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
        FALLBACK_BODY,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use coded_error::{Error, StatusCode as Code, with_code};
    use serde::Serializer;
    use serde::ser::Error as _;

    use super::*;

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("not today"))
        }
    }

    #[test]
    fn encode_failure_is_an_error() {
        let err = write_json(StatusCode::BAD_REQUEST, &Unencodable).unwrap_err();
        assert!(matches!(err, ResponderError::Encode(_)));
        assert!(err.to_string().contains("not today"));
    }

    #[test]
    fn fallback_is_a_plain_internal_error() {
        let response = fallback_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
    }

    #[test]
    fn zero_code_and_empty_message_are_omitted() {
        let body = serde_json::to_string(&ApiError {
            code: 0,
            message: String::new(),
        })
        .unwrap();
        assert_eq!(body, "{}");
    }

    #[test]
    fn status_comes_from_the_code() {
        let response = fail_json(&with_code(Code::Unimplemented, "", Some(Error::msg("todo"))));
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
    }
}
