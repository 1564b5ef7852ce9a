use spacetraveling::app;
use spacetraveling::state::{AppConfig, AppState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_url = std::env::var("PRISMIC_API_URL")
        .map_err(|_| anyhow::anyhow!("PRISMIC_API_URL must be set"))?;
    let access_token = std::env::var("PRISMIC_ACCESS_TOKEN").ok();

    if access_token.is_none() {
        tracing::warn!("No PRISMIC_ACCESS_TOKEN provided. Private repositories will reject queries.");
    }

    let http_client = reqwest::Client::builder()
        .user_agent("spacetraveling/0.1")
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

    let app_state = AppState {
        config: AppConfig {
            api_url,
            access_token,
        },
        http_client,
    };

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("spacetraveling listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let router = app(app_state);
    axum::serve(listener, router).await?;

    Ok(())
}
