//! Process-wide tracing subscriber for the server binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info,actix_web=info,mongodb=warn";

/// Install the global subscriber.
///
/// Filtering follows `RUST_LOG` (default [`DEFAULT_FILTER`]). Output is one
/// JSON object per line unless `LOG_FORMAT=pretty`, which is meant for a
/// local terminal.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let pretty = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("pretty"));
    let registry = tracing_subscriber::registry().with(env_filter);

    if pretty {
        registry.with(fmt::layer().with_target(true).pretty()).init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_ansi(false)
                    .json()
                    .flatten_event(true)
                    .with_current_span(true),
            )
            .init();
    }
}
