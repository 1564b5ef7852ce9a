use serde::Deserialize;

/// Query for the pagination endpoint: the cursor URL handed out by the
/// previous page response, passed through verbatim.
#[derive(Debug, Deserialize)]
pub struct LoadMoreQuery {
    pub next_page: String,
}

pub type SharedState = AppState;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub http_client: reqwest::Client,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_url: String,
    pub access_token: Option<String>,
}
