use std::fmt;

use crate::error::{Error, Repr};

/// Rendering levels of an [`Error`]
///
/// Each level also has a formatting-trait spelling:
///
/// | level | spelling |
/// |---|---|
/// | `Concise` | `{}` |
/// | `Quoted` | `{:?}` |
/// | `Verbose` | `{:#}` or `{:#?}` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Message only
    Concise,
    /// Message in double quotes, escaped
    Quoted,
    /// Message, public messages, and every captured frame
    Verbose,
}

impl Error {
    /// Render at the given verbosity
    pub fn render(&self, verbosity: Verbosity) -> String {
        match verbosity {
            Verbosity::Concise => format!("{self}"),
            Verbosity::Quoted => format!("{self:?}"),
            Verbosity::Verbose => format!("{self:#}"),
        }
    }

    pub(crate) fn write_message(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr() {
            Repr::Coded(coded) => coded.write_message(f),
            Repr::Stack(stack) => stack.cause().write_message(f),
            Repr::Joined(errors) => write_joined(errors, f, Self::write_message),
            Repr::Opaque(inner) => write!(f, "{inner}"),
        }
    }

    fn write_verbose(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr() {
            Repr::Coded(coded) => {
                let Some(cause) = coded.cause() else {
                    return coded.write_message(f);
                };
                cause.write_verbose(f)?;
                if !coded.message().is_empty() {
                    write!(f, "\n({})", coded.message())?;
                }
                Ok(())
            }
            Repr::Stack(stack) => {
                stack.cause().write_verbose(f)?;
                for frame in stack.frames() {
                    write!(f, "\n{frame}")?;
                }
                Ok(())
            }
            Repr::Joined(errors) => write_joined(errors, f, Self::write_verbose),
            Repr::Opaque(inner) => write!(f, "{inner}"),
        }
    }
}

fn write_joined(
    errors: &[Error],
    f: &mut fmt::Formatter<'_>,
    write: fn(&Error, &mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    for (i, err) in errors.iter().enumerate() {
        if i > 0 {
            f.write_str("\n")?;
        }
        write(err, f)?;
    }
    Ok(())
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.write_verbose(f)
        } else {
            self.write_message(f)
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.write_verbose(f)
        } else {
            write!(f, "{:?}", self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StatusCode, error_message, join, with_code, with_stack};

    #[test]
    fn concise_ignores_stack() {
        let err = with_code(StatusCode::Internal, "oops", Some(with_stack(Error::msg("boom"))));
        assert_eq!(err.render(Verbosity::Concise), "boom (oops)");
        assert!(!err.to_string().contains('\n'));
    }

    #[test]
    fn quoted_escapes_inner_quotes() {
        let err = with_code(StatusCode::InvalidArgument, "bad \"name\"", None);
        assert_eq!(format!("{err:?}"), r#""bad \"name\"""#);
        assert_eq!(err.render(Verbosity::Quoted), format!("{err:?}"));
    }

    #[test]
    fn verbose_appends_public_message_after_frames() {
        let err = error_message(StatusCode::NotFound, "user not found");
        let verbose = err.render(Verbosity::Verbose);

        assert!(verbose.starts_with("user not found\n"));
        assert!(verbose.ends_with("\n(user not found)"));
        assert!(verbose.contains("verbose_appends_public_message_after_frames"));
        assert_eq!(verbose, format!("{err:#?}"));
    }

    #[test]
    fn verbose_skips_empty_message() {
        let err = with_code(StatusCode::Internal, "", Some(Error::msg("x")));
        assert_eq!(format!("{err:#}"), "x");
    }

    #[test]
    fn verbose_without_cause_falls_back_to_message() {
        let err = with_code(StatusCode::Canceled, "", None);
        assert_eq!(format!("{err:#}"), "error 408");
    }

    #[test]
    fn nested_stacks_render_their_own_frames() {
        let inner = with_stack(Error::msg("leaf"));
        let inner_frames = inner.as_stack().unwrap().frames().len();
        let outer = with_stack(inner);
        let outer_frames = outer.as_stack().unwrap().frames().len();

        let verbose = format!("{outer:#}");
        let frame_lines = verbose.lines().filter(|line| line.starts_with('\t')).count();
        assert_eq!(frame_lines, inner_frames + outer_frames);
    }

    #[test]
    fn joined_verbose_renders_each_member() {
        let err = join([with_code(StatusCode::Internal, "a", Some(Error::msg("x"))), Error::msg("y")]).unwrap();
        assert_eq!(format!("{err:#}"), "x\n(a)\ny");
    }
}
