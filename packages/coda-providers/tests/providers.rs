use reqwest::header::AUTHORIZATION;
use serde_json::Map;

use coda_config::RetrievalConfig;
use coda_providers::web_search::WebSearchClient;

fn retrieval_config() -> RetrievalConfig {
	RetrievalConfig {
		provider_id: "web_search".to_string(),
		api_endpoint: None,
		api_key: "key".to_string(),
		engine_id: "engine".to_string(),
		timeout_ms: 1_000,
		max_results: 10,
	}
}

#[test]
fn builds_bearer_auth_header() {
	let headers =
		coda_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("x-org".to_string(), serde_json::json!(42));

	assert!(coda_providers::auth_headers("secret", &defaults).is_err());
}

#[test]
fn client_requires_credentials() {
	let mut cfg = retrieval_config();

	cfg.api_key = "   ".to_string();

	assert!(WebSearchClient::new(cfg).is_err());

	let mut cfg = retrieval_config();

	cfg.engine_id = String::new();

	assert!(WebSearchClient::new(cfg).is_err());
}

#[tokio::test]
async fn mutations_are_not_supported() {
	let client = WebSearchClient::new(retrieval_config()).expect("Failed to build client.");

	let err = client.upload_documents(&[]).await.expect_err("Expected upload to be refused.");

	assert!(err.to_string().contains("not supported"), "Unexpected error: {err}");

	let err = client
		.delete_documents_by_site("example.com")
		.await
		.expect_err("Expected delete to be refused.");

	assert!(err.to_string().contains("not supported"), "Unexpected error: {err}");
}

#[test]
fn site_listing_is_unavailable() {
	let client = WebSearchClient::new(retrieval_config()).expect("Failed to build client.");

	assert!(client.sites().is_none());
}
