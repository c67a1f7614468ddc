use std::ffi::c_void;
use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::{Error, Repr};

/// Maximum number of frames kept per capture
pub const MAX_FRAMES: usize = 32;

/// Frames walked before giving up on locating the capture point
const UNMARKED_LIMIT: usize = 128;

const UNKNOWN: &str = "<unknown>";

/// Raw call-stack snapshot
///
/// Holds instruction pointers only. Symbols are resolved the first time
/// [`Stack::frames`] is called and cached afterwards.
#[derive(Debug)]
pub struct Stack {
    ips: Vec<usize>,
    frames: OnceLock<Vec<Frame>>,
}

impl Stack {
    /// Snapshot the current thread's stack
    ///
    /// The first recorded frame is the caller of the function that invoked
    /// `capture`, moved outward by `skip` frames. At most [`MAX_FRAMES`]
    /// frames are kept.
    #[inline(never)]
    pub fn capture(skip: usize) -> Self {
        let marker = Self::capture as usize;
        let mut ips = Vec::with_capacity(MAX_FRAMES);
        let mut start = None;

        backtrace::trace(|frame| {
            ips.push(frame.ip() as usize);

            // the frame after ours belongs to the wrapping function
            if start.is_none() && frame.symbol_address() as usize == marker {
                start = Some(ips.len() + 1 + skip);
            }

            match start {
                Some(start) => ips.len() < start + MAX_FRAMES,
                None => ips.len() < UNMARKED_LIMIT,
            }
        });

        let start = start.unwrap_or(0).min(ips.len());
        ips.drain(..start);
        ips.truncate(MAX_FRAMES);

        Self {
            ips,
            frames: OnceLock::new(),
        }
    }

    /// Number of raw frames recorded
    pub fn depth(&self) -> usize {
        self.ips.len()
    }

    /// Resolved frames, innermost call first
    ///
    /// A raw frame that was inlined into its caller yields one entry per
    /// inlined function.
    pub fn frames(&self) -> &[Frame] {
        self.frames
            .get_or_init(|| self.ips.iter().flat_map(|&ip| Frame::resolve(ip)).collect())
    }
}

/// One resolved call site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    function: String,
    file: Option<PathBuf>,
    line: Option<u32>,
}

impl Frame {
    fn resolve(ip: usize) -> Vec<Self> {
        let mut frames = Vec::new();

        // return addresses point past the call instruction
        backtrace::resolve(ip.saturating_sub(1) as *mut c_void, |symbol| {
            frames.push(Self {
                function: symbol
                    .name()
                    .map_or_else(|| UNKNOWN.to_owned(), |name| format!("{name:#}")),
                file: symbol.filename().map(Path::to_path_buf),
                line: symbol.lineno(),
            });
        });

        if frames.is_empty() {
            frames.push(Self {
                function: UNKNOWN.to_owned(),
                file: None,
                line: None,
            });
        }

        frames
    }

    /// Demangled function path without the hash suffix
    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub const fn line(&self) -> Option<u32> {
        self.line
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.file.as_deref().map_or(UNKNOWN.into(), Path::to_string_lossy);
        write!(f, "{}\n\t{}:{}", self.function, file, self.line.unwrap_or(0))
    }
}

/// Wrapper attaching a captured stack to a cause
#[derive(Debug)]
pub struct StackError {
    cause: Error,
    stack: Stack,
    location: &'static Location<'static>,
}

impl StackError {
    pub const fn cause(&self) -> &Error {
        &self.cause
    }

    pub const fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Resolved frames of this wrapper's own capture
    pub fn frames(&self) -> &[Frame] {
        self.stack.frames()
    }

    /// Call site of the outermost public constructor
    ///
    /// Follows `#[track_caller]`, so a helper that wants its own callers
    /// reported here must carry the attribute too.
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

pub(crate) fn wrap_stack(cause: Error, stack: Stack, location: &'static Location<'static>) -> Error {
    Error::from_repr(Repr::Stack(StackError { cause, stack, location }))
}

/// Capture the stack and wrap `cause` with it
///
/// Frames start at the function invoking `with_stack_skip`, moved outward by
/// `skip`. A wrapping helper layered on top passes one more than it was
/// given. The invoking function must not return the result directly: a call
/// in tail position may be compiled into a jump, and its frame is then gone
/// before the capture runs.
#[inline(never)]
#[track_caller]
pub fn with_stack_skip(cause: Error, skip: usize) -> Error {
    let stack = Stack::capture(skip);
    wrap_stack(cause, stack, Location::caller())
}

/// Capture the stack at the caller and wrap `cause` with it
#[inline(never)]
#[track_caller]
pub fn with_stack(cause: Error) -> Error {
    let stack = Stack::capture(0);
    wrap_stack(cause, stack, Location::caller())
}
