use std::time::Duration;

use serde_json::Value;

use coda_domain::RankedAnswer;

use crate::{
	CodaService, GenerateMode, POST_RANKING_STEP, PostRankingContext, ServiceError, ServiceResult,
	map_results, messages::Message,
};

const SUMMARIZE_RESULTS_PROMPT_NAME: &str = "SummarizeResultsPrompt";
const SUMMARIZE_TIMEOUT: Duration = Duration::from_secs(20);
/// Summarization only ever sees the top ranked answers.
const SUMMARY_TOP_K: usize = 3;

/// One post-ranking pass: classify for the map side-message, then dispatch
/// on the configured generate mode.
pub(crate) async fn run(service: &CodaService, ctx: &mut PostRankingContext) -> ServiceResult<()> {
	if !ctx.connection_alive {
		ctx.query_done = true;

		return Ok(());
	}

	map_results::check_and_send_map(&ctx.final_ranked_answers, &service.capabilities.sink);

	match ctx.generate_mode {
		GenerateMode::None => Ok(()),
		GenerateMode::Summarize => summarize_results(service, ctx).await,
		GenerateMode::Unrecognized => {
			tracing::warn!("Unrecognized generate mode. Skipping post-ranking action.");

			Ok(())
		},
	}
}

async fn summarize_results(
	service: &CodaService,
	ctx: &mut PostRankingContext,
) -> ServiceResult<()> {
	ctx.final_ranked_answers.truncate(SUMMARY_TOP_K);

	let messages =
		build_prompt_messages(SUMMARIZE_RESULTS_PROMPT_NAME, &ctx.query, &ctx.final_ranked_answers)?;
	let response = service
		.capabilities
		.summarize
		.run_prompt(&service.cfg.providers.summarize, &messages, SUMMARIZE_TIMEOUT)
		.await?;
	let Some(response) = response else {
		tracing::error!(
			prompt = SUMMARIZE_RESULTS_PROMPT_NAME,
			"No response from summarize prompt."
		);

		return Ok(());
	};
	let summary = response.get("summary").and_then(Value::as_str).ok_or_else(|| {
		ServiceError::Provider { message: "Summarize response is missing summary.".to_string() }
	})?;

	ctx.summary = Some(summary.to_string());

	let summary_msg = Message::summary(summary, &ctx.conversation_id);
	let payload = summary_msg.to_value()?;

	ctx.messages.push(summary_msg);

	tracing::info!(conversation_id = %ctx.conversation_id, "Sending summary message.");

	// The send is awaited so the transcript entry is delivered before the
	// caller finalizes its response; only then is the step advanced.
	service
		.capabilities
		.sink
		.send(&payload)
		.await
		.map_err(|err| ServiceError::Delivery { message: err.to_string() })?;
	service.capabilities.steps.mark_step_done(POST_RANKING_STEP).await;

	Ok(())
}

fn build_prompt_messages(
	prompt_name: &str,
	query: &str,
	answers: &[RankedAnswer],
) -> ServiceResult<Vec<Value>> {
	match prompt_name {
		SUMMARIZE_RESULTS_PROMPT_NAME => {
			let answers = serde_json::to_value(answers)?;

			Ok(vec![
				serde_json::json!({
					"role": "system",
					"content": "Summarize the ranked answers to the user's question in a few \
						sentences. Respond with a JSON object of the form \
						{\"summary\": \"...\"}.",
				}),
				serde_json::json!({
					"role": "user",
					"content": format!("Question: {query}\nRanked answers: {answers}"),
				}),
			])
		},
		other =>
			Err(ServiceError::InvalidRequest { message: format!("Unknown prompt: {other}.") }),
	}
}
