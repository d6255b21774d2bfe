// std
use std::time::Duration;

// crates.io
use color_eyre::Result;
use reqwest::Client;
use serde_json::Value;

/// Runs a chat-completion prompt and returns its structured payload.
/// `Ok(None)` means the provider produced no usable response within the
/// timeout; transport and protocol failures propagate.
pub async fn run_prompt(
	cfg: &coda_config::LlmProviderConfig,
	messages: &[Value],
	timeout: Duration,
) -> Result<Option<Value>> {
	let client = Client::builder().timeout(timeout).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": messages,
	});
	let res = match client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await
	{
		Ok(res) => res,
		Err(err) if err.is_timeout() => {
			tracing::warn!(error = %err, "Prompt request timed out.");

			return Ok(None);
		},
		Err(err) => return Err(err.into()),
	};
	let json: Value = match res.error_for_status()?.json().await {
		Ok(json) => json,
		Err(err) if err.is_timeout() => {
			tracing::warn!(error = %err, "Prompt response timed out.");

			return Ok(None);
		},
		Err(err) => return Err(err.into()),
	};

	Ok(parse_prompt_response(json))
}

fn parse_prompt_response(json: Value) -> Option<Value> {
	if json.get("choices").is_some() {
		let content = json
			.get("choices")?
			.as_array()?
			.first()?
			.get("message")?
			.get("content")?
			.as_str()?;

		return serde_json::from_str(content).ok();
	}

	// Some providers return the structured payload directly.
	json.is_object().then_some(json)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_choice_content_json() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "{\"summary\": \"Two cafes near the market.\"}" } }
			]
		});
		let parsed = parse_prompt_response(json).expect("Expected parsed payload.");

		assert_eq!(parsed["summary"], "Two cafes near the market.");
	}

	#[test]
	fn passes_through_bare_object_response() {
		let json = serde_json::json!({ "summary": "Direct payload." });
		let parsed = parse_prompt_response(json).expect("Expected parsed payload.");

		assert_eq!(parsed["summary"], "Direct payload.");
	}

	#[test]
	fn non_json_content_yields_none() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "plain prose, not JSON" } }
			]
		});

		assert!(parse_prompt_response(json).is_none());
	}

	#[test]
	fn empty_choices_yield_none() {
		let json = serde_json::json!({ "choices": [] });

		assert!(parse_prompt_response(json).is_none());
	}
}
