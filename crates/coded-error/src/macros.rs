/// Formatted internal error with a stack captured at the call site
///
/// ```
/// let err = coded_error::errorf!("cannot open {}", "config.toml");
/// assert_eq!(err.to_string(), "cannot open config.toml");
/// assert!(err.has_stack());
/// ```
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)*) => {
        $crate::errorf(::core::format_args!($($arg)*))
    };
}

/// Like [`errorf!`], with frames starting at the caller's caller
#[macro_export]
macro_rules! helper_errorf {
    ($($arg:tt)*) => {
        $crate::helper_errorf(::core::format_args!($($arg)*))
    };
}

/// Coded error with a stack; the formatted text is not exposed publicly
///
/// ```
/// use coded_error::StatusCode;
///
/// let err = coded_error::error_codef!(StatusCode::Internal, "shard {} offline", 3);
/// assert_eq!(err.code(), (StatusCode::Internal, ""));
/// ```
#[macro_export]
macro_rules! error_codef {
    ($code:expr, $($arg:tt)*) => {
        $crate::error_codef($code, ::core::format_args!($($arg)*))
    };
}

/// Coded error with a stack and the formatted text as public message
///
/// ```
/// use coded_error::StatusCode;
///
/// let err = coded_error::error_messagef!(StatusCode::NotFound, "no user {}", 42);
/// assert_eq!(err.code(), (StatusCode::NotFound, "no user 42"));
/// ```
#[macro_export]
macro_rules! error_messagef {
    ($code:expr, $($arg:tt)*) => {
        $crate::error_messagef($code, ::core::format_args!($($arg)*))
    };
}
