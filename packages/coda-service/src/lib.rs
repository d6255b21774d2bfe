pub mod map_results;
pub mod messages;
pub mod post_ranking;
pub mod time_serde;

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use serde_json::Value;

use coda_config::{Config, LlmProviderConfig};
use coda_domain::RankedAnswer;
pub use messages::{MapLocation, MapMessage, Message, MessageType, SenderType};

pub type ServiceResult<T> = Result<T, ServiceError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Step identifier the owning handler is advanced past after a completed
/// summarize pass.
pub const POST_RANKING_STEP: &str = "post_ranking";

/// Post-processing action requested for a pass. Unknown configuration values
/// land on `Unrecognized` instead of failing deserialization; the router
/// treats them as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerateMode {
	None,
	Summarize,
	#[serde(other)]
	Unrecognized,
}

pub trait SummarizeProvider
where
	Self: Send + Sync,
{
	fn run_prompt<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
		timeout: Duration,
	) -> BoxFuture<'a, color_eyre::Result<Option<Value>>>;
}

pub trait MessageSink
where
	Self: Send + Sync,
{
	fn send<'a>(&'a self, message: &'a Value) -> BoxFuture<'a, color_eyre::Result<()>>;
}

pub trait StepTracker
where
	Self: Send + Sync,
{
	fn mark_step_done<'a>(&'a self, step: &'a str) -> BoxFuture<'a, ()>;
}

#[derive(Debug)]
pub enum ServiceError {
	InvalidRequest { message: String },
	Provider { message: String },
	Delivery { message: String },
}

/// Mutable state of one post-ranking pass. The router is the sole mutator
/// while it runs; callers must serialize passes per handler.
#[derive(Debug)]
pub struct PostRankingContext {
	pub connection_alive: bool,
	pub query_done: bool,
	pub query: String,
	pub conversation_id: String,
	pub generate_mode: GenerateMode,
	pub final_ranked_answers: Vec<RankedAnswer>,
	pub messages: Vec<Message>,
	pub summary: Option<String>,
}

#[derive(Clone)]
pub struct Capabilities {
	pub summarize: Arc<dyn SummarizeProvider>,
	pub sink: Arc<dyn MessageSink>,
	pub steps: Arc<dyn StepTracker>,
}

pub struct CodaService {
	pub cfg: Config,
	pub capabilities: Capabilities,
}

struct DefaultSummarize;

impl std::fmt::Display for ServiceError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidRequest { message } => write!(f, "Invalid request: {message}"),
			Self::Provider { message } => write!(f, "Provider error: {message}"),
			Self::Delivery { message } => write!(f, "Delivery error: {message}"),
		}
	}
}

impl std::error::Error for ServiceError {}

impl From<color_eyre::Report> for ServiceError {
	fn from(err: color_eyre::Report) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<serde_json::Error> for ServiceError {
	fn from(err: serde_json::Error) -> Self {
		Self::InvalidRequest { message: err.to_string() }
	}
}

impl SummarizeProvider for DefaultSummarize {
	fn run_prompt<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
		timeout: Duration,
	) -> BoxFuture<'a, color_eyre::Result<Option<Value>>> {
		Box::pin(coda_providers::summarize::run_prompt(cfg, messages, timeout))
	}
}

impl Capabilities {
	pub fn new(
		summarize: Arc<dyn SummarizeProvider>,
		sink: Arc<dyn MessageSink>,
		steps: Arc<dyn StepTracker>,
	) -> Self {
		Self { summarize, sink, steps }
	}

	/// Handler capabilities plus the stock prompt runner from coda-providers.
	pub fn with_default_summarize(sink: Arc<dyn MessageSink>, steps: Arc<dyn StepTracker>) -> Self {
		Self { summarize: Arc::new(DefaultSummarize), sink, steps }
	}
}

impl CodaService {
	pub fn new(cfg: Config, capabilities: Capabilities) -> Self {
		Self { cfg, capabilities }
	}

	/// Runs one post-ranking pass over the context's ranked answers.
	pub async fn post_ranking(&self, ctx: &mut PostRankingContext) -> ServiceResult<()> {
		post_ranking::run(self, ctx).await
	}
}
