use std::sync::Arc;

use serde_json::Value;

use coda_domain::{RankedAnswer, address};

use crate::{MapLocation, MapMessage, MessageSink};

/// Scans ranked answers for address metadata and, when enough of them carry
/// one, hands a `results_map` message to the delivery sink without waiting
/// for it. The scan cannot fail the surrounding pass: every malformed shape
/// is skipped and every delivery problem ends up in the log.
pub fn check_and_send_map(answers: &[RankedAnswer], sink: &Arc<dyn MessageSink>) {
	if answers.is_empty() {
		tracing::debug!("No ranked answers to check for addresses.");

		return;
	}

	let locations = collect_locations(answers);
	let total = answers.len();
	let with_address = locations.len();

	tracing::info!(with_address, total, "Checked ranked answers for addresses.");

	if !address::meets_map_quorum(with_address, total) {
		tracing::debug!(with_address, total, "Not sending map message. Too few addresses.");

		return;
	}

	let payload = match serde_json::to_value(MapMessage::new(locations)) {
		Ok(payload) => payload,
		Err(err) => {
			tracing::error!(error = %err, "Failed to encode map message.");

			return;
		},
	};

	tracing::info!(with_address, "Sending results map message.");
	dispatch_detached(Arc::clone(sink), payload);
}

fn collect_locations(answers: &[RankedAnswer]) -> Vec<MapLocation> {
	let mut locations = Vec::new();

	for answer in answers {
		let Some(schema_object) = answer.schema_object.as_ref() else {
			tracing::debug!("Ranked answer missing schema_object. Skipping.");

			continue;
		};
		let Some(resolved) = address::resolve_address(schema_object) else {
			continue;
		};

		locations.push(MapLocation { title: answer.display_name().to_string(), address: resolved });
	}

	locations
}

/// The map message is a side channel: delivery runs as a detached task whose
/// failure never surfaces to the caller.
fn dispatch_detached(sink: Arc<dyn MessageSink>, payload: Value) {
	match tokio::runtime::Handle::try_current() {
		Ok(handle) => {
			handle.spawn(async move {
				if let Err(err) = sink.send(&payload).await {
					tracing::error!(error = %err, "Failed to send results map message.");
				}
			});
		},
		Err(err) => {
			tracing::error!(error = %err, "Failed to schedule map message delivery.");
		},
	}
}
