use std::error::Error as StdError;

use crate::coded::CodedError;
use crate::stack::StackError;

/// Error value carrying an optional status, message, payload, and stack
///
/// Built through the constructors in this crate and composed by wrapping:
/// every wrapper holds its cause, reachable through
/// [`std::error::Error::source`] and [`Error::unwrap_cause`].
pub struct Error {
    repr: Box<Repr>,
}

/// Closed set of wrapper shapes
pub(crate) enum Repr {
    Coded(CodedError),
    Stack(StackError),
    Joined(Vec<Error>),
    Opaque(Box<dyn StdError + Send + Sync + 'static>),
}

/// Plain text leaf
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Message(String);

impl Error {
    pub(crate) fn from_repr(repr: Repr) -> Self {
        Self { repr: Box::new(repr) }
    }

    pub(crate) fn repr(&self) -> &Repr {
        &self.repr
    }

    /// Leaf error holding only a message
    pub fn msg(message: impl Into<String>) -> Self {
        Self::from_repr(Repr::Opaque(Box::new(Message(message.into()))))
    }

    /// Adopt any error as a leaf of the chain
    ///
    /// An [`Error`] passed in is returned as-is rather than boxed again.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(error);
        match boxed.downcast::<Self>() {
            Ok(ours) => *ours,
            Err(foreign) => Self::from_repr(Repr::Opaque(foreign)),
        }
    }

    /// The wrapped cause, if this error is a single-cause wrapper
    pub fn unwrap_cause(&self) -> Option<&Self> {
        match self.repr() {
            Repr::Coded(coded) => coded.cause(),
            Repr::Stack(stack) => Some(stack.cause()),
            Repr::Joined(_) | Repr::Opaque(_) => None,
        }
    }

    /// This error as a coded wrapper, without walking the chain
    pub fn as_coded(&self) -> Option<&CodedError> {
        match self.repr() {
            Repr::Coded(coded) => Some(coded),
            _ => None,
        }
    }

    /// This error as a stack wrapper, without walking the chain
    pub fn as_stack(&self) -> Option<&StackError> {
        match self.repr() {
            Repr::Stack(stack) => Some(stack),
            _ => None,
        }
    }

    /// Members of a joined error
    pub fn joined(&self) -> Option<&[Self]> {
        match self.repr() {
            Repr::Joined(errors) => Some(errors),
            _ => None,
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.repr() {
            Repr::Coded(coded) => coded.cause().map(|cause| cause as &(dyn StdError + 'static)),
            Repr::Stack(stack) => Some(stack.cause()),
            Repr::Joined(errors) => errors.first().map(|first| first as &(dyn StdError + 'static)),
            Repr::Opaque(inner) => inner.source(),
        }
    }
}

/// Combine several errors into one
///
/// Returns `None` for an empty input. Introspection visits the members
/// depth-first in the order given.
pub fn join(errors: impl IntoIterator<Item = Error>) -> Option<Error> {
    let errors: Vec<Error> = errors.into_iter().collect();
    (!errors.is_empty()).then(|| Error::from_repr(Repr::Joined(errors)))
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::{StatusCode, with_code, with_stack};

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<Error>();
    }

    #[test]
    fn new_does_not_wrap_twice() {
        let original = with_code(StatusCode::NotFound, "gone", None);
        let adopted = Error::new(original);
        assert!(adopted.as_coded().is_some());
        assert_eq!(adopted.to_string(), "gone");
    }

    #[test]
    fn opaque_leaf_keeps_foreign_display() {
        let err = Error::new(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        assert_eq!(err.to_string(), "no such file");
        assert!(err.unwrap_cause().is_none());
    }

    #[test]
    fn stack_then_code_unwraps_back_to_leaf() {
        let err = with_code(StatusCode::Internal, "oops", Some(with_stack(Error::msg("leaf"))));

        let stack = err.unwrap_cause().unwrap();
        assert!(stack.as_stack().is_some());

        let leaf = stack.unwrap_cause().unwrap();
        assert_eq!(leaf.to_string(), "leaf");
        assert!(leaf.unwrap_cause().is_none());
    }

    #[test]
    fn source_follows_the_cause() {
        let err = with_code(StatusCode::Internal, "", Some(Error::msg("root")));
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "root");
    }

    #[test]
    fn join_of_nothing_is_none() {
        assert!(join(Vec::new()).is_none());
    }

    #[test]
    fn joined_messages_are_line_separated() {
        let err = join([Error::msg("first"), Error::msg("second")]).unwrap();
        assert_eq!(err.to_string(), "first\nsecond");
        assert_eq!(err.joined().map(<[Error]>::len), Some(2));
    }
}
