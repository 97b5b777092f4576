use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds the filter from `RUST_LOG`, falling back to `LOG_LEVEL` (default
/// `info`) for the application crates with noisy dependencies held at warn.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        EnvFilter::new(format!(
            "alumnitrack={level},alumnitrack_db={level},alumnitrack_observability={level},\
             tower_http=warn,hyper=warn,sqlx=warn"
        ))
    })
}

/// Installs the global subscriber.
///
/// `LOG_FORMAT=json` switches to one JSON object per line with the current
/// span attached; anything else gives compact human-readable output.
/// Calling it twice is harmless: the second install is ignored.
pub fn init_tracing() {
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let layer = if json {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_filter(env_filter())
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter())
            .boxed()
    };

    if tracing_subscriber::registry().with(layer).try_init().is_err() {
        eprintln!("tracing subscriber already installed; keeping the existing one");
    }
}
