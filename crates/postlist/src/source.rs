use anyhow::{Context, Result};
use cms_core::{PostPage, PostSummary};
use reqwest::Client;
use serde::Deserialize;

/// Raw document as returned by the content source. Anything not named here
/// is dropped during deserialization.
#[derive(Debug, Deserialize, Clone)]
pub struct Document {
    pub uid: Option<String>,
    pub first_publication_date: Option<String>,
    pub data: DocumentData,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DocumentData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QueryResponse {
    pub results: Vec<Document>,
    pub next_page: Option<String>,
}

impl From<Document> for PostSummary {
    fn from(doc: Document) -> Self {
        PostSummary {
            uid: doc.uid,
            first_publication_date: doc.first_publication_date,
            title: doc.data.title,
            subtitle: doc.data.subtitle,
            author: doc.data.author,
        }
    }
}

impl From<QueryResponse> for PostPage {
    fn from(res: QueryResponse) -> Self {
        PostPage {
            results: res.results.into_iter().map(PostSummary::from).collect(),
            next_page: res.next_page,
        }
    }
}

#[async_trait::async_trait]
pub trait DocumentSource {
    /// First page of "posts"-typed documents, newest first.
    async fn query_posts(&self, page_size: usize) -> Result<PostPage>;

    /// Follow a fully formed cursor URL from a previous page.
    async fn fetch_page(&self, url: &str) -> Result<PostPage>;
}

/// Explicit source configuration, passed in rather than read ambiently so
/// the core stays testable against a substitute source.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub api_url: String,
    pub access_token: Option<String>,
}

pub struct PrismicSource {
    client: Client,
    config: SourceConfig,
}

#[derive(Debug, Deserialize)]
struct ApiInfo {
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master: bool,
}

impl PrismicSource {
    pub fn new(client: Client, config: SourceConfig) -> Self {
        Self { client, config }
    }

    /// Every query must carry the repository's current master ref, which the
    /// API root advertises.
    async fn master_ref(&self) -> Result<String> {
        let mut req = self.client.get(&self.config.api_url);
        if let Some(token) = &self.config.access_token {
            req = req.query(&[("access_token", token.as_str())]);
        }

        let res = req.send().await.context("Failed to reach content API")?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            anyhow::bail!("Content API root failed: {} - {}", status, text);
        }

        let info: ApiInfo = res.json().await.context("Failed to parse content API root")?;

        info.refs
            .into_iter()
            .find(|r| r.is_master)
            .map(|r| r.reference)
            .context("Content API advertised no master ref")
    }
}

#[async_trait::async_trait]
impl DocumentSource for PrismicSource {
    async fn query_posts(&self, page_size: usize) -> Result<PostPage> {
        let reference = self.master_ref().await?;
        let url = format!("{}/documents/search", self.config.api_url);

        let mut req = self.client.get(&url).query(&[
            ("ref", reference.as_str()),
            ("q", r#"[[at(document.type,"posts")]]"#),
            ("orderings", "[document.last_publication_date desc]"),
            ("pageSize", &page_size.to_string()),
        ]);
        if let Some(token) = &self.config.access_token {
            req = req.query(&[("access_token", token.as_str())]);
        }

        let res = req.send().await.context("Posts query failed")?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            anyhow::bail!("Posts query failed: {} - {}", status, text);
        }

        let query_res: QueryResponse = res.json().await.context("Failed to parse posts query")?;
        Ok(query_res.into())
    }

    async fn fetch_page(&self, url: &str) -> Result<PostPage> {
        // Cursor URLs arrive fully formed (ref and token included); no
        // parameters are added.
        let res = self.client.get(url).send().await.context("Cursor fetch failed")?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            anyhow::bail!("Cursor fetch failed: {} - {}", status, text);
        }

        let query_res: QueryResponse = res.json().await.context("Failed to parse cursor page")?;
        Ok(query_res.into())
    }
}
