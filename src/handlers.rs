use crate::error::AppError;
use crate::render;
use crate::state::{LoadMoreQuery, SharedState};
use axum::{
    extract::{Query, State},
    response::{Html, Json},
};
use cms_core::PostPage;
use postlist::{DocumentSource, PrismicSource, SourceConfig};

pub async fn health() -> &'static str {
    "OK"
}

fn content_source(state: &SharedState) -> PrismicSource {
    PrismicSource::new(
        state.http_client.clone(),
        SourceConfig {
            api_url: state.config.api_url.clone(),
            access_token: state.config.access_token.clone(),
        },
    )
}

/// Listing page: fetch the first page of posts ahead of the response and
/// render it with the pagination control.
pub async fn home(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    let source = content_source(&state);
    let listing = postlist::initial_listing(&source)
        .await
        .map_err(AppError::Upstream)?;

    tracing::info!(
        posts = listing.posts.len(),
        has_more = listing.has_more(),
        "Rendering listing page"
    );

    Ok(Html(render::listing_page(&listing)))
}

/// Pagination fetch: follow the cursor URL from a previous page response
/// and hand back the mapped records plus the new cursor. The server fetches
/// with its own client, so only cursors under the configured content source
/// are accepted.
pub async fn load_more(
    State(state): State<SharedState>,
    Query(params): Query<LoadMoreQuery>,
) -> Result<Json<PostPage>, AppError> {
    tracing::info!(next_page = %params.next_page, "Received load-more request");

    if !params.next_page.starts_with(&state.config.api_url) {
        tracing::warn!(next_page = %params.next_page, "Rejected cursor outside the content source");
        return Err(AppError::BadRequest(
            "next_page must point at the configured content source".to_string(),
        ));
    }

    let source = content_source(&state);
    let page = source
        .fetch_page(&params.next_page)
        .await
        .map_err(AppError::Upstream)?;

    Ok(Json(page))
}
