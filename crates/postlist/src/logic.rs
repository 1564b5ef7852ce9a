use crate::source::DocumentSource;
use anyhow::Result;
use cms_core::{PostPage, PostSummary};

/// Listing page size, fixed by the site design.
pub const PAGE_SIZE: usize = 3;

/// Transient listing state: seeded from the first page, extended in place by
/// `load_more`, discarded when the page goes away. Appends only; pages are
/// trusted not to repeat documents.
#[derive(Debug, Default, Clone)]
pub struct ListingState {
    pub posts: Vec<PostSummary>,
    pub next_page: Option<String>,
}

impl ListingState {
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    fn append(&mut self, page: PostPage) -> usize {
        let added = page.results.len();
        self.posts.extend(page.results);
        self.next_page = page.next_page;
        added
    }
}

/// Fetch the first page of posts and seed the listing state with it.
pub async fn initial_listing<S: DocumentSource>(source: &S) -> Result<ListingState> {
    let page = source.query_posts(PAGE_SIZE).await?;

    tracing::debug!(
        posts = page.results.len(),
        has_more = page.next_page.is_some(),
        "Seeded listing from first page"
    );

    Ok(ListingState {
        posts: page.results,
        next_page: page.next_page,
    })
}

/// Follow the current cursor and append the returned records, replacing the
/// cursor with the new one. Issues no request when the listing is already
/// exhausted. Returns the number of appended posts.
pub async fn load_more<S: DocumentSource>(source: &S, state: &mut ListingState) -> Result<usize> {
    let Some(url) = state.next_page.clone() else {
        return Ok(0);
    };

    let page = source.fetch_page(&url).await?;
    Ok(state.append(page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::*;

    mock! {
        pub DocumentSource {}
        #[async_trait::async_trait]
        impl DocumentSource for DocumentSource {
            async fn query_posts(&self, page_size: usize) -> Result<PostPage>;
            async fn fetch_page(&self, url: &str) -> Result<PostPage>;
        }
    }

    fn summary(uid: &str) -> PostSummary {
        PostSummary {
            uid: Some(uid.to_string()),
            first_publication_date: Some("2021-03-15T19:25:28+0000".to_string()),
            title: format!("title {}", uid),
            subtitle: format!("subtitle {}", uid),
            author: "Joseph Oliveira".to_string(),
        }
    }

    fn uids(state: &ListingState) -> Vec<&str> {
        state
            .posts
            .iter()
            .map(|p| p.uid.as_deref().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn initial_listing_seeds_posts_and_cursor() {
        let mut mock = MockDocumentSource::new();
        mock.expect_query_posts()
            .times(1)
            .with(eq(PAGE_SIZE))
            .returning(|_| {
                Ok(PostPage {
                    results: vec![summary("a"), summary("b"), summary("c")],
                    next_page: Some("url1".to_string()),
                })
            });

        let state = initial_listing(&mock).await.unwrap();

        assert_eq!(uids(&state), vec!["a", "b", "c"]);
        assert!(state.has_more());
    }

    #[tokio::test]
    async fn initial_listing_without_cursor_is_exhausted() {
        let mut mock = MockDocumentSource::new();
        mock.expect_query_posts().times(1).returning(|_| {
            Ok(PostPage {
                results: vec![summary("only")],
                next_page: None,
            })
        });

        let state = initial_listing(&mock).await.unwrap();

        assert_eq!(state.posts.len(), 1);
        assert!(!state.has_more());
    }

    // A,B,C + "url1" -> D + null: 4 posts in order, control gone.
    #[tokio::test]
    async fn load_more_appends_in_order_and_updates_cursor() {
        let mut mock = MockDocumentSource::new();
        mock.expect_query_posts().times(1).returning(|_| {
            Ok(PostPage {
                results: vec![summary("a"), summary("b"), summary("c")],
                next_page: Some("url1".to_string()),
            })
        });
        mock.expect_fetch_page()
            .times(1)
            .with(eq("url1"))
            .returning(|_| {
                Ok(PostPage {
                    results: vec![summary("d")],
                    next_page: None,
                })
            });

        let mut state = initial_listing(&mock).await.unwrap();
        let added = load_more(&mock, &mut state).await.unwrap();

        assert_eq!(added, 1);
        assert_eq!(uids(&state), vec!["a", "b", "c", "d"]);
        assert!(!state.has_more());
    }

    #[tokio::test]
    async fn load_more_without_cursor_issues_no_request() {
        let mut mock = MockDocumentSource::new();
        mock.expect_fetch_page().times(0);

        let mut state = ListingState {
            posts: vec![summary("a")],
            next_page: None,
        };

        let added = load_more(&mock, &mut state).await.unwrap();

        assert_eq!(added, 0);
        assert_eq!(uids(&state), vec!["a"]);
    }

    #[tokio::test]
    async fn repeated_load_more_walks_cursors_until_exhausted() {
        let mut mock = MockDocumentSource::new();
        mock.expect_query_posts().times(1).returning(|_| {
            Ok(PostPage {
                results: vec![summary("a"), summary("b"), summary("c")],
                next_page: Some("url1".to_string()),
            })
        });
        mock.expect_fetch_page()
            .times(1)
            .with(eq("url1"))
            .returning(|_| {
                Ok(PostPage {
                    results: vec![summary("d"), summary("e"), summary("f")],
                    next_page: Some("url2".to_string()),
                })
            });
        mock.expect_fetch_page()
            .times(1)
            .with(eq("url2"))
            .returning(|_| {
                Ok(PostPage {
                    results: vec![summary("g")],
                    next_page: None,
                })
            });

        let mut state = initial_listing(&mock).await.unwrap();
        while state.has_more() {
            load_more(&mock, &mut state).await.unwrap();
        }
        // Exhausted: further activations are no-ops.
        load_more(&mock, &mut state).await.unwrap();

        assert_eq!(uids(&state), vec!["a", "b", "c", "d", "e", "f", "g"]);
    }

    #[tokio::test]
    async fn load_more_failure_leaves_state_untouched() {
        let mut mock = MockDocumentSource::new();
        mock.expect_fetch_page()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("source unreachable")));

        let mut state = ListingState {
            posts: vec![summary("a")],
            next_page: Some("url1".to_string()),
        };

        assert!(load_more(&mock, &mut state).await.is_err());
        assert_eq!(uids(&state), vec!["a"]);
        assert_eq!(state.next_page.as_deref(), Some("url1"));
    }
}
