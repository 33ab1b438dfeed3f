use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "event_advisor_lib=info,event_advisor=info";

/// Console logging on stderr so stdout stays clean for the recommendation text.
/// `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    // a second init (tests, embedding) keeps the existing subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
