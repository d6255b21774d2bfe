mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, LlmProviderConfig, Providers, RetrievalConfig, Service};

use std::{fs, path::Path};

/// One web search page holds at most ten results; larger values cannot be
/// served in a single request.
const MAX_RETRIEVAL_PAGE: u32 = 10;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	let summarize = &cfg.providers.summarize;

	if summarize.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.summarize.api_key must be non-empty.".to_string(),
		});
	}
	if summarize.model.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.summarize.model must be non-empty.".to_string(),
		});
	}
	if !summarize.temperature.is_finite() {
		return Err(Error::Validation {
			message: "providers.summarize.temperature must be a finite number.".to_string(),
		});
	}
	if !(0.0..=2.0).contains(&summarize.temperature) {
		return Err(Error::Validation {
			message: "providers.summarize.temperature must be in the range 0.0-2.0.".to_string(),
		});
	}

	if cfg.retrieval.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "retrieval.api_key must be non-empty.".to_string(),
		});
	}
	if cfg.retrieval.engine_id.trim().is_empty() {
		return Err(Error::Validation {
			message: "retrieval.engine_id must be non-empty.".to_string(),
		});
	}
	if cfg.retrieval.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "retrieval.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.retrieval.max_results == 0 {
		return Err(Error::Validation {
			message: "retrieval.max_results must be greater than zero.".to_string(),
		});
	}
	if cfg.retrieval.max_results > MAX_RETRIEVAL_PAGE {
		return Err(Error::Validation {
			message: "retrieval.max_results must be 10 or less.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg
		.retrieval
		.api_endpoint
		.as_deref()
		.map(|endpoint| endpoint.trim().is_empty())
		.unwrap_or(false)
	{
		cfg.retrieval.api_endpoint = None;
	}
}
