use std::error::Error as StdError;

use serde_json::Value;

use crate::code::StatusCode;
use crate::coded::CodedError;
use crate::error::{Error, Repr};
use crate::stack::StackError;

/// One element of a cause chain
#[derive(Debug, Clone, Copy)]
pub enum Link<'a> {
    Coded(&'a CodedError),
    Stack(&'a StackError),
    /// Any error not produced by this crate, leaves included
    Foreign(&'a (dyn StdError + 'static)),
}

enum Pending<'a> {
    Ours(&'a Error),
    Foreign(&'a (dyn StdError + 'static)),
}

/// Depth-first walk of a cause chain, outermost link first
///
/// Foreign wrappers are followed through [`StdError::source`]; an [`Error`]
/// found behind one is walked structurally again.
pub struct Chain<'a> {
    pending: Vec<Pending<'a>>,
}

impl<'a> Chain<'a> {
    pub fn new(err: &'a (dyn StdError + 'static)) -> Self {
        Self {
            pending: vec![Pending::Foreign(err)],
        }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = Link<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.pending.pop()? {
                Pending::Foreign(err) => {
                    if let Some(ours) = err.downcast_ref::<Error>() {
                        self.pending.push(Pending::Ours(ours));
                        continue;
                    }
                    if let Some(source) = err.source() {
                        self.pending.push(Pending::Foreign(source));
                    }
                    return Some(Link::Foreign(err));
                }
                Pending::Ours(err) => match err.repr() {
                    Repr::Coded(coded) => {
                        if let Some(cause) = coded.cause() {
                            self.pending.push(Pending::Ours(cause));
                        }
                        return Some(Link::Coded(coded));
                    }
                    Repr::Stack(stack) => {
                        self.pending.push(Pending::Ours(stack.cause()));
                        return Some(Link::Stack(stack));
                    }
                    Repr::Joined(errors) => self.pending.extend(errors.iter().rev().map(Pending::Ours)),
                    Repr::Opaque(inner) => self.pending.push(Pending::Foreign(&**inner)),
                },
            }
        }
    }
}

fn first_coded<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a CodedError> {
    Chain::new(err).find_map(|link| match link {
        Link::Coded(coded) => Some(coded),
        _ => None,
    })
}

/// Status and public message of the outermost coded wrapper
///
/// `(StatusCode::Unknown, "")` when the chain has none.
pub fn code<'a>(err: &'a (dyn StdError + 'static)) -> (StatusCode, &'a str) {
    first_coded(err).map_or((StatusCode::Unknown, ""), |coded| (coded.code(), coded.message()))
}

/// Status of the outermost coded wrapper
pub fn status(err: &(dyn StdError + 'static)) -> StatusCode {
    code(err).0
}

/// Payload of the outermost coded wrapper
///
/// Deeper wrappers are not consulted when the outermost one has no payload.
pub fn payload<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Value> {
    first_coded(err).and_then(CodedError::payload)
}

/// Whether a stack wrapper appears anywhere in the chain
pub fn has_stack(err: &(dyn StdError + 'static)) -> bool {
    Chain::new(err).any(|link| matches!(link, Link::Stack(_)))
}

/// First foreign error of type `T` in the chain
pub fn find<'a, T>(err: &'a (dyn StdError + 'static)) -> Option<&'a T>
where
    T: StdError + 'static,
{
    Chain::new(err).find_map(|link| match link {
        Link::Foreign(foreign) => foreign.downcast_ref::<T>(),
        _ => None,
    })
}

/// Whether a foreign error of type `T` appears in the chain
pub fn is<T>(err: &(dyn StdError + 'static)) -> bool
where
    T: StdError + 'static,
{
    find::<T>(err).is_some()
}

impl Error {
    /// Walk this error's cause chain
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(self)
    }

    /// See [`code`]
    pub fn code(&self) -> (StatusCode, &str) {
        code(self)
    }

    /// See [`status`]
    pub fn status(&self) -> StatusCode {
        status(self)
    }

    /// See [`payload`]
    pub fn payload(&self) -> Option<&Value> {
        payload(self)
    }

    /// See [`has_stack`]
    pub fn has_stack(&self) -> bool {
        has_stack(self)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use serde_json::json;

    use super::*;
    use crate::{error_payload, join, with_code, with_stack};

    #[derive(Debug, thiserror::Error)]
    #[error("request failed")]
    struct RequestFailed(#[source] Error);

    #[test]
    fn status_of_coded_wrapper() {
        let err = with_code(StatusCode::DeadlineExceeded, "slow", Some(Error::msg("timeout")));
        assert_eq!(status(&err), StatusCode::DeadlineExceeded);
        assert_eq!(code(&err), (StatusCode::DeadlineExceeded, "slow"));
    }

    #[test]
    fn no_coded_wrapper_means_unknown() {
        let err = with_stack(Error::msg("plain"));
        assert_eq!(code(&err), (StatusCode::Unknown, ""));
        assert!(payload(&err).is_none());
    }

    #[test]
    fn outermost_wrapper_wins() {
        let inner = with_code(StatusCode::NotFound, "inner", Some(Error::msg("leaf")));
        let outer = with_code(StatusCode::PermissionDenied, "outer", Some(with_stack(inner)));
        assert_eq!(outer.code(), (StatusCode::PermissionDenied, "outer"));
    }

    #[test]
    fn payload_comes_from_outermost_wrapper_only() {
        let inner = error_payload(StatusCode::InvalidArgument, json!({"field": "name"}));
        assert_eq!(payload(&inner), Some(&json!({"field": "name"})));

        let outer = with_code(StatusCode::Internal, "", Some(inner));
        assert!(payload(&outer).is_none());
    }

    #[test]
    fn foreign_wrappers_are_walked_through() {
        let inner = with_code(StatusCode::Unauthenticated, "who?", Some(with_stack(Error::msg("no token"))));
        let err = RequestFailed(inner);
        assert_eq!(status(&err), StatusCode::Unauthenticated);
        assert!(has_stack(&err));
    }

    fn public_parts<'a>(err: &'a (dyn StdError + 'static)) -> (&'a str, Option<&'a Value>, Option<&'a io::Error>) {
        (code(err).1, payload(err), find::<io::Error>(err))
    }

    #[test]
    fn borrowed_results_outlive_the_lookup() {
        let err = with_code(
            StatusCode::NotFound,
            "missing",
            Some(Error::new(io::Error::new(io::ErrorKind::NotFound, "gone"))),
        );
        let (message, payload, io) = public_parts(&err);

        assert_eq!(message, "missing");
        assert!(payload.is_none());
        assert_eq!(io.map(io::Error::kind), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn foreign_leaves_can_be_found() {
        let io = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err = with_code(StatusCode::NotFound, "", Some(with_stack(Error::new(io))));

        assert!(is::<io::Error>(&err));
        assert_eq!(find::<io::Error>(&err).map(io::Error::kind), Some(io::ErrorKind::NotFound));
        assert!(!is::<std::fmt::Error>(&err));
    }

    #[test]
    fn joined_members_are_searched_in_order() {
        let err = join([
            Error::msg("plain"),
            with_code(StatusCode::Canceled, "first", None),
            with_code(StatusCode::Internal, "second", None),
        ])
        .unwrap();
        assert_eq!(err.status(), StatusCode::Canceled);
    }

    #[test]
    fn chain_lists_links_outermost_first() {
        let err = with_code(StatusCode::Internal, "x", Some(with_stack(Error::msg("leaf"))));
        let kinds: Vec<&str> = err
            .chain()
            .map(|link| match link {
                Link::Coded(_) => "coded",
                Link::Stack(_) => "stack",
                Link::Foreign(_) => "foreign",
            })
            .collect();
        assert_eq!(kinds, ["coded", "stack", "foreign"]);
    }
}
