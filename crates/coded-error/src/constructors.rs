//! Shorthands combining coded and stack wrappers
//!
//! Every function here that records a stack is `#[inline(never)]` and calls
//! [`Stack::capture`] itself, keeping the result alive past the call, so the
//! first recorded frame is the caller of the constructor rather than the
//! constructor itself.

use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;

use serde_json::Value;

use crate::code::StatusCode;
use crate::coded::coded;
use crate::error::Error;
use crate::stack::{Stack, wrap_stack};

/// Formatted internal error with a stack; see [`errorf!`](crate::errorf!)
#[inline(never)]
#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) -> Error {
    let stack = Stack::capture(0);
    wrap_stack(Error::msg(args.to_string()), stack, Location::caller())
}

/// Like [`errorf`], attributed to the caller's caller
///
/// For helper functions that build errors on behalf of their caller.
#[inline(never)]
#[track_caller]
pub fn helper_errorf(args: fmt::Arguments<'_>) -> Error {
    let stack = Stack::capture(1);
    wrap_stack(Error::msg(args.to_string()), stack, Location::caller())
}

/// Coded error whose formatted text stays internal
#[inline(never)]
#[track_caller]
pub fn error_codef(code: StatusCode, args: fmt::Arguments<'_>) -> Error {
    let stack = Stack::capture(0);
    let cause = wrap_stack(Error::msg(args.to_string()), stack, Location::caller());
    coded(code, String::new(), None, Some(cause))
}

/// Coded error exposing its formatted text as the public message
#[inline(never)]
#[track_caller]
pub fn error_messagef(code: StatusCode, args: fmt::Arguments<'_>) -> Error {
    let stack = Stack::capture(0);
    let message = args.to_string();
    let cause = wrap_stack(Error::msg(message.clone()), stack, Location::caller());
    coded(code, message, None, Some(cause))
}

/// Coded error exposing `message` publicly
#[inline(never)]
#[track_caller]
pub fn error_message(code: StatusCode, message: &str) -> Error {
    let stack = Stack::capture(0);
    let cause = wrap_stack(Error::msg(message), stack, Location::caller());
    coded(code, message.to_owned(), None, Some(cause))
}

/// Coded error carrying a structured payload instead of a message
#[inline(never)]
#[track_caller]
pub fn error_payload(code: StatusCode, payload: Value) -> Error {
    let stack = Stack::capture(0);
    let cause = wrap_stack(Error::msg(""), stack, Location::caller());
    coded(code, String::new(), Some(payload), Some(cause))
}

/// Wrapping helpers for `Result`s with any error type
pub trait ResultExt<T> {
    /// Attach a status and public message to the error
    fn with_code(self, code: StatusCode, message: &str) -> Result<T, Error>;

    /// Capture the stack at the caller and attach it to the error
    fn with_stack(self) -> Result<T, Error>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn with_code(self, code: StatusCode, message: &str) -> Result<T, Error> {
        self.map_err(|err| coded(code, message.to_owned(), None, Some(Error::new(err))))
    }

    #[inline(never)]
    #[track_caller]
    fn with_stack(self) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => {
                let stack = Stack::capture(0);
                Err(wrap_stack(Error::new(err), stack, Location::caller()))
            }
        }
    }
}
