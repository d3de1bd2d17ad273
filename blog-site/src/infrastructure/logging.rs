use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Used when `RUST_LOG` is unset. `actix_web` carries the access log lines.
pub const DEFAULT_FILTER: &str = "info,blog_site=debug,actix_web=info,sqlx=warn";

pub fn init_logging() {
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().compact().with_target(true))
        .init();

    tracing::debug!("Log filter fallback: {}", DEFAULT_FILTER);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
