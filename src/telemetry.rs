//! Global tracing subscriber setup

use std::io::IsTerminal;
use std::sync::OnceLock;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Returned when the subscriber has already been installed
#[derive(Debug, thiserror::Error)]
#[error("tracing subscriber already initialised")]
pub struct AlreadyInitialised;

/// Install the fmt subscriber. `RUST_LOG` overrides `default_level`.
///
/// Logs go to stderr so they never interleave with snapshot output on stdout.
pub fn init_tracing(default_level: &str) -> Result<(), AlreadyInitialised> {
    INITIALISED.set(()).map_err(|_| AlreadyInitialised)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    Registry::default().with(filter).with(fmt_layer).init();
    Ok(())
}
