use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output for
/// this crate and the default is info.
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "clanboard=debug,warn"
    } else {
        "clanboard=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
