use callsheet::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,callsheet=debug")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    if config.airtable.base_id.is_none() || config.airtable.api_key.is_none() {
        tracing::warn!(
            "AIRTABLE_BASE_ID / AIRTABLE_API_KEY not set; table requests will fail until they are"
        );
    }

    if let Err(e) = callsheet::run(config).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
