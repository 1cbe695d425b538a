//! Per-level convenience macros.
//!
//! These emit ordinary `tracing` events. `fatal` and `panic` records are
//! error-level events tagged with a `severity` field; none of these macros
//! terminate the process.

/// Log at error level with `error` attached, or at info level when there is no error.
///
/// The first argument is an `Option<&E>` where `E: std::error::Error + 'static`.
///
/// # Example
///
/// ```ignore
/// let result = std::fs::read("config.toml");
/// log_err!(result.as_ref().err(), "reading config");
/// ```
#[macro_export]
macro_rules! log_err {
    ($err:expr, $($arg:tt)+) => {
        match $err {
            ::core::option::Option::Some(err) => {
                let err: &(dyn ::std::error::Error + 'static) = err;
                $crate::tracing::error!(error = err, $($arg)+)
            }
            ::core::option::Option::None => $crate::tracing::info!($($arg)+),
        }
    };
}

/// Log a fatal record
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)+) => {
        $crate::tracing::error!(severity = "fatal", $($arg)+)
    };
}

/// Log a panic record. Does not panic.
#[macro_export]
macro_rules! log_panic {
    ($($arg:tt)+) => {
        $crate::tracing::error!(severity = "panic", $($arg)+)
    };
}

/// Log a formatted message at debug level
#[macro_export]
macro_rules! log_printf {
    ($($arg:tt)+) => {
        $crate::tracing::debug!($($arg)+)
    };
}

/// Log a formatted message at error level
#[macro_export]
macro_rules! log_errorf {
    ($($arg:tt)+) => {
        $crate::tracing::error!($($arg)+)
    };
}
