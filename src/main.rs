use anyhow::Result;
use shortlink::config::{self, Config};
use shortlink::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;
    init_tracing(&config)?;
    config.print_summary();

    server::run(config).await
}

/// Installs the global subscriber: JSON lines for `LOG_FORMAT=json`,
/// human-readable text otherwise. `RUST_LOG` directives take precedence
/// over the configured level.
fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if config.log_format == "json" {
        builder
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .try_init()
    } else {
        builder.with_target(false).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}
