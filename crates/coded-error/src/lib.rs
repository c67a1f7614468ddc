//! Status-coded errors with captured call stacks
//!
//! An [`Error`] is a chain of wrappers ending in a leaf. Two wrapper kinds
//! exist: a coded wrapper ([`with_code`]) carrying a [`StatusCode`], a public
//! message, and an optional JSON payload; and a stack wrapper
//! ([`with_stack`]) carrying a call-stack snapshot that is only symbolized
//! when rendered verbosely.
//!
//! ```
//! use coded_error::{Error, StatusCode, with_code, with_stack};
//!
//! let err = with_code(StatusCode::NotFound, "no such user", Some(with_stack(Error::msg("row missing"))));
//!
//! assert_eq!(err.to_string(), "row missing (no such user)");
//! assert_eq!(err.status(), StatusCode::NotFound);
//! assert!(err.has_stack());
//!
//! // `{:#}` adds the frames and public messages
//! assert!(format!("{err:#}").ends_with("\n(no such user)"));
//! ```
//!
//! Frames start at the function that called the constructor. A function
//! that returns a constructor's result directly may be compiled into a tail
//! jump and then does not appear in the stack.
//!
//! Introspection ([`code`], [`status`], [`payload`], [`has_stack`]) walks the
//! chain outermost first and also looks through foreign wrappers that expose
//! their cause via [`std::error::Error::source`].

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod chain;
mod code;
mod coded;
mod constructors;
mod error;
mod format;
mod macros;
mod stack;

pub use chain::{Chain, Link, code, find, has_stack, is, payload, status};
pub use code::{StatusCode, UnmappedCode, http_code_message, log_unmapped, map_raw_code};
pub use coded::{CodedError, with_code, with_code_stack};
pub use constructors::{
    ResultExt, error_codef, error_message, error_messagef, error_payload, errorf, helper_errorf,
};
pub use error::{Error, join};
pub use format::Verbosity;
pub use stack::{Frame, MAX_FRAMES, Stack, StackError, with_stack, with_stack_skip};
