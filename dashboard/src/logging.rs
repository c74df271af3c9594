//! Tracing setup
//!
//! Logs go to stderr so `devintel analyze` can print fragments on stdout.
//! Set `LOG_FORMAT=json` for structured JSON output; `RUST_LOG` adds filter
//! directives on top of the `devintel=info` default.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directive for this crate
pub const DEFAULT_DIRECTIVE: &str = "devintel=info";

fn json_requested(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("json"))
}

/// Install the global subscriber. `verbose` lowers this crate to `debug`.
pub fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let directive = if verbose { "devintel=debug" } else { DEFAULT_DIRECTIVE };
    let filter = EnvFilter::from_default_env()
        .add_directive(directive.parse()?)
        .add_directive("tower_http=info".parse()?);

    let use_json = json_requested(std::env::var("LOG_FORMAT").ok().as_deref());

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}
