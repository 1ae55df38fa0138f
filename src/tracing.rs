use tracing_subscriber::EnvFilter;

pub const LOG_TARGET: &str = "bids_methods";

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{
        ::tracing::debug!(target: $crate::tracing::LOG_TARGET, "{}", format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        ::tracing::info!(target: $crate::tracing::LOG_TARGET, "{}", format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        ::tracing::warn!(target: $crate::tracing::LOG_TARGET, "{}", format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        ::tracing::error!(target: $crate::tracing::LOG_TARGET, "{}", format_args!($($arg)*));
    }};
}

/// Installs the stderr subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
