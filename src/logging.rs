use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter, e.g. `BRAINFK_LOG=debug`.
pub const ENV_LOG: &str = "BRAINFK_LOG";

/// Install a stderr logger.
///
/// Defaults to `warn`, so a successful run writes nothing to stderr.
/// Calling this more than once is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
