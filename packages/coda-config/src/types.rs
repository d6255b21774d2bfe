use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub providers: Providers,
	pub retrieval: RetrievalConfig,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub summarize: LlmProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct RetrievalConfig {
	pub provider_id: String,
	/// Optional override for the search API endpoint. Blank values are
	/// normalized to `None`; the provider then falls back to its default.
	#[serde(default)]
	pub api_endpoint: Option<String>,
	pub api_key: String,
	pub engine_id: String,
	pub timeout_ms: u64,
	pub max_results: u32,
}
