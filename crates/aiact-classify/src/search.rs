//! Optional web-search augmentation.
//!
//! Purely additive: any failure here is logged and swallowed, and the
//! classifier runs with whatever context was gathered (possibly none).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use aiact_core::{HarvestedRecord, SearchSettings, SearchSnippet, SystemDescription};

use crate::error::SearchError;

const DUCKDUCKGO_API_URL: &str = "https://api.duckduckgo.com/";
const SERPER_API_URL: &str = "https://google.serper.dev/search";

#[async_trait]
pub trait Searcher: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchSnippet>, SearchError>;
}

/// Context handed to the classifier, plus the URLs it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Augmentation {
    pub context: String,
    pub sources: Vec<String>,
}

impl Augmentation {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.context.is_empty() && self.sources.is_empty()
    }
}

/// Build the configured searcher, or `None` when search is switched off.
pub fn from_settings(settings: &SearchSettings) -> Result<Option<Arc<dyn Searcher>>, SearchError> {
    let timeout = Duration::from_secs(settings.timeout_secs.max(1));
    match settings.provider.as_str() {
        "" => Ok(None),
        "duckduckgo" => Ok(Some(Arc::new(DuckDuckGo::new(timeout)?))),
        "serper" if settings.api_key.is_empty() => Ok(None),
        "serper" => Ok(Some(Arc::new(Serper::new(settings.api_key.clone(), timeout)?))),
        other => Err(SearchError::Unsupported(other.to_string())),
    }
}

/// Queries derived from the input: company and system name when given,
/// otherwise the harvested purpose.
pub fn queries(desc: &SystemDescription, record: &HarvestedRecord) -> Vec<String> {
    let subject = [desc.company.trim(), desc.name.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if subject.is_empty() {
        return vec![format!("{} AI system", record.primary_purpose.trim())];
    }
    vec![
        format!("{subject} AI system"),
        format!("{subject} use case application"),
    ]
}

/// Run every query, keep unique URLs, and format the hits as context lines.
pub async fn augment(searcher: &dyn Searcher, queries: &[String], limit: usize) -> Augmentation {
    let mut hits: Vec<SearchSnippet> = Vec::new();
    for query in queries {
        match searcher.search(query, limit).await {
            Ok(results) => {
                debug!(query = %query, count = results.len(), "search results");
                for hit in results.into_iter().take(limit) {
                    if !hits.iter().any(|h| h.url == hit.url) {
                        hits.push(hit);
                    }
                }
            }
            Err(e) => {
                warn!(query = %query, error = %e, "search query failed, continuing without it")
            }
        }
    }

    let context = hits
        .iter()
        .filter(|h| !h.snippet.trim().is_empty())
        .map(|h| {
            let title = match h.title.trim() {
                "" => "Source",
                t => t,
            };
            format!("- {}: {}", title, h.snippet.trim())
        })
        .collect::<Vec<_>>()
        .join("\n");
    let sources = hits
        .into_iter()
        .map(|h| h.url)
        .filter(|u| !u.is_empty())
        .collect();

    Augmentation { context, sources }
}

// --- DuckDuckGo Instant Answer API (no key) ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DdgResponse {
    #[serde(default)]
    heading: String,
    #[serde(default)]
    abstract_text: String,
    #[serde(default, rename = "AbstractURL")]
    abstract_url: String,
    #[serde(default)]
    related_topics: Vec<DdgTopic>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DdgTopic {
    Entry {
        #[serde(rename = "Text")]
        text: String,
        #[serde(rename = "FirstURL")]
        first_url: String,
    },
    Group {
        #[serde(rename = "Topics")]
        topics: Vec<DdgTopic>,
    },
}

pub struct DuckDuckGo {
    http: Client,
}

impl DuckDuckGo {
    pub fn new(timeout: Duration) -> Result<Self, SearchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Searcher for DuckDuckGo {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchSnippet>, SearchError> {
        let resp = self
            .http
            .get(DUCKDUCKGO_API_URL)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<DdgResponse>()
            .await?;
        Ok(ddg_snippets(resp, limit))
    }
}

fn ddg_snippets(resp: DdgResponse, limit: usize) -> Vec<SearchSnippet> {
    let mut out = Vec::new();
    if !resp.abstract_text.is_empty() {
        out.push(SearchSnippet {
            title: resp.heading.clone(),
            snippet: resp.abstract_text,
            url: resp.abstract_url,
        });
    }
    let mut stack: Vec<DdgTopic> = resp.related_topics.into_iter().rev().collect();
    while let Some(topic) = stack.pop() {
        if out.len() >= limit {
            break;
        }
        match topic {
            DdgTopic::Entry { text, first_url } => {
                let title = text
                    .split_once(" - ")
                    .map(|(t, _)| t.to_string())
                    .unwrap_or_else(|| resp.heading.clone());
                out.push(SearchSnippet {
                    title,
                    snippet: text,
                    url: first_url,
                });
            }
            DdgTopic::Group { topics } => stack.extend(topics.into_iter().rev()),
        }
    }
    out.truncate(limit);
    out
}

// --- Serper (Google results, needs a key) ---

#[derive(Debug, Deserialize)]
struct SerperItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

#[derive(Debug, Deserialize)]
struct SerperResp {
    #[serde(default)]
    organic: Vec<SerperItem>,
}

pub struct Serper {
    http: Client,
    key: String,
}

impl Serper {
    pub fn new(key: String, timeout: Duration) -> Result<Self, SearchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, key })
    }
}

#[async_trait]
impl Searcher for Serper {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchSnippet>, SearchError> {
        let resp = self
            .http
            .post(SERPER_API_URL)
            .header("X-API-KEY", &self.key)
            .json(&serde_json::json!({ "q": query, "num": limit }))
            .send()
            .await?
            .error_for_status()?
            .json::<SerperResp>()
            .await?;
        Ok(serper_snippets(resp, limit))
    }
}

fn serper_snippets(resp: SerperResp, limit: usize) -> Vec<SearchSnippet> {
    resp.organic
        .into_iter()
        .filter(|i| !i.link.is_empty())
        .take(limit)
        .map(|i| SearchSnippet {
            title: i.title,
            snippet: i.snippet,
            url: i.link,
        })
        .collect()
}
