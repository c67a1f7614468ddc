use std::fmt;
use std::panic::Location;

use serde_json::Value;

use crate::code::StatusCode;
use crate::error::{Error, Repr};
use crate::stack::{Stack, wrap_stack};

/// Wrapper attaching a status, public message, and payload to a cause
#[derive(Debug)]
pub struct CodedError {
    code: StatusCode,
    /// Visible to API consumers
    message: String,
    /// Visible to API consumers
    payload: Option<Value>,
    cause: Option<Error>,
}

impl CodedError {
    pub const fn code(&self) -> StatusCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub const fn cause(&self) -> Option<&Error> {
        self.cause.as_ref()
    }

    pub(crate) fn write_message(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.message.is_empty(), &self.cause) {
            (false, Some(cause)) => {
                cause.write_message(f)?;
                write!(f, " ({})", self.message)
            }
            (false, None) => f.write_str(&self.message),
            (true, Some(cause)) => cause.write_message(f),
            (true, None) => write!(f, "error {}", self.code.http_status().as_u16()),
        }
    }
}

pub(crate) fn coded(code: StatusCode, message: String, payload: Option<Value>, cause: Option<Error>) -> Error {
    Error::from_repr(Repr::Coded(CodedError {
        code,
        message,
        payload,
        cause,
    }))
}

/// Attach a status and an optional public message to a cause
pub fn with_code(code: StatusCode, message: impl Into<String>, cause: Option<Error>) -> Error {
    coded(code, message.into(), None, cause)
}

/// Like [`with_code`], also capturing the stack at the caller
#[inline(never)]
#[track_caller]
pub fn with_code_stack(code: StatusCode, message: impl Into<String>, cause: Error) -> Error {
    let stack = Stack::capture(0);
    let cause = wrap_stack(cause, stack, Location::caller());
    coded(code, message.into(), None, Some(cause))
}
