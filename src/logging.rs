//! Diagnostic logging setup.
//!
//! Logs go to stderr so stdout stays parseable (`--json`). The level comes
//! from `RUST_LOG`, falling back to `warn`, or `debug` with `--verbose`.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false)
        .try_init();
}
