use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::{Client, Url};
use serde_json::Value;

use coda_config::RetrievalConfig;

const DEFAULT_API_ENDPOINT: &str = "https://customsearch.googleapis.com/customsearch/v1";

/// One retrieval row: the page URL, its serialized schema metadata, the page
/// title, and the owning site domain.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SearchHit {
	pub url: String,
	pub schema_json: String,
	pub title: String,
	pub site: String,
}

/// Read-only web search retrieval client. Search failures degrade to an
/// empty result set; this source is not critical to answering a query.
pub struct WebSearchClient {
	cfg: RetrievalConfig,
	client: Client,
}

impl WebSearchClient {
	pub fn new(cfg: RetrievalConfig) -> Result<Self> {
		if cfg.api_key.trim().is_empty() {
			return Err(eyre::eyre!("Web search api_key must be configured."));
		}
		if cfg.engine_id.trim().is_empty() {
			return Err(eyre::eyre!("Web search engine_id must be configured."));
		}

		let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;

		Ok(Self { cfg, client })
	}

	pub async fn search(&self, query: &str, site: Option<&str>, max_results: u32) -> Vec<SearchHit> {
		match self.try_search(query, site, max_results).await {
			Ok(hits) => hits,
			Err(err) => {
				tracing::error!(error = %err, query, "Web search failed. Returning no results.");

				Vec::new()
			},
		}
	}

	pub async fn search_all_sites(&self, query: &str, max_results: u32) -> Vec<SearchHit> {
		self.search(query, None, max_results).await
	}

	/// Best-effort exact lookup. The API has no id lookup, so search for the
	/// URL and keep the first hit only when it matches the query URL.
	pub async fn search_by_url(&self, url: &str) -> Option<SearchHit> {
		self.search(url, None, 1).await.into_iter().next().filter(|hit| urls_match(&hit.url, url))
	}

	/// Site enumeration is not applicable to a web-wide provider.
	pub fn sites(&self) -> Option<Vec<String>> {
		None
	}

	pub async fn upload_documents(&self, _documents: &[Value]) -> Result<u64> {
		Err(eyre::eyre!("Web search is a read-only provider. Uploading documents is not supported."))
	}

	pub async fn delete_documents_by_site(&self, _site: &str) -> Result<u64> {
		Err(eyre::eyre!("Web search is a read-only provider. Deleting documents is not supported."))
	}

	async fn try_search(
		&self,
		query: &str,
		site: Option<&str>,
		max_results: u32,
	) -> Result<Vec<SearchHit>> {
		let page_size = max_results.min(self.cfg.max_results).max(1);
		let endpoint = self.cfg.api_endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT);
		let search_query = match site.filter(|site| !site.is_empty() && *site != "all") {
			Some(site) => format!("{query} site:{site}"),
			None => query.to_string(),
		};
		let page = page_size.to_string();
		let res = self
			.client
			.get(endpoint)
			.query(&[
				("key", self.cfg.api_key.as_str()),
				("cx", self.cfg.engine_id.as_str()),
				("q", search_query.as_str()),
				("num", page.as_str()),
			])
			.send()
			.await?;
		let json: Value = res.error_for_status()?.json().await?;

		Ok(parse_search_items(&json, page_size as usize))
	}
}

fn parse_search_items(json: &Value, limit: usize) -> Vec<SearchHit> {
	let Some(items) = json.get("items").and_then(Value::as_array) else {
		return Vec::new();
	};

	items
		.iter()
		.take(limit)
		.map(|item| {
			let link = item.get("link").and_then(Value::as_str).unwrap_or_default().to_string();
			let title = item.get("title").and_then(Value::as_str).unwrap_or_default().to_string();
			let snippet = item.get("snippet").and_then(Value::as_str).unwrap_or_default();
			let schema = serde_json::json!({
				"@type": "WebPage",
				"name": title,
				"description": snippet,
				"url": link,
				"displayLink": item.get("displayLink"),
			});

			SearchHit { site: extract_site(&link), schema_json: schema.to_string(), url: link, title }
		})
		.collect()
}

fn extract_site(url: &str) -> String {
	let Some(host) = Url::parse(url).ok().and_then(|url| url.host_str().map(str::to_string))
	else {
		return "unknown".to_string();
	};

	host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
}

fn urls_match(left: &str, right: &str) -> bool {
	left.trim_end_matches('/') == right.trim_end_matches('/')
}
