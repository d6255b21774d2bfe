use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
	User,
	Assistant,
	System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
	Query,
	Result,
	Status,
}

/// One transcript entry. Appended to the handler's message list and sent to
/// the delivery channel as its JSON encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
	pub message_id: Uuid,
	pub sender_type: SenderType,
	pub message_type: MessageType,
	pub content: Vec<Value>,
	pub conversation_id: String,
	#[serde(with = "crate::time_serde")]
	pub timestamp: OffsetDateTime,
}

impl Message {
	/// Builds the assistant summary entry for a conversation. The content
	/// shape is fixed for downstream consumers.
	pub fn summary(text: &str, conversation_id: &str) -> Self {
		Self {
			message_id: Uuid::new_v4(),
			sender_type: SenderType::Assistant,
			message_type: MessageType::Result,
			content: vec![serde_json::json!({ "@type": "Summary", "content": text })],
			conversation_id: conversation_id.to_string(),
			timestamp: OffsetDateTime::now_utc(),
		}
	}

	pub fn to_value(&self) -> serde_json::Result<Value> {
		serde_json::to_value(self)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLocation {
	pub title: String,
	pub address: String,
}

/// The map side-message. Field names are fixed for downstream consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapMessage {
	pub message_type: String,
	#[serde(rename = "@type")]
	pub map_type: String,
	pub locations: Vec<MapLocation>,
}

impl MapMessage {
	pub fn new(locations: Vec<MapLocation>) -> Self {
		Self {
			message_type: "results_map".to_string(),
			map_type: "LocationMap".to_string(),
			locations,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn summary_message_wire_shape() {
		let message = Message::summary("Two cafes near the market.", "conv-1");
		let value = message.to_value().expect("Failed to encode message.");

		assert_eq!(value["sender_type"], "assistant");
		assert_eq!(value["message_type"], "result");
		assert_eq!(value["conversation_id"], "conv-1");
		assert_eq!(value["content"][0]["@type"], "Summary");
		assert_eq!(value["content"][0]["content"], "Two cafes near the market.");

		let timestamp = value["timestamp"].as_str().expect("Expected string timestamp.");

		OffsetDateTime::parse(
			timestamp,
			&time::format_description::well_known::Rfc3339,
		)
		.expect("Expected RFC 3339 timestamp.");
	}

	#[test]
	fn map_message_wire_shape() {
		let message = MapMessage::new(vec![MapLocation {
			title: "Cafe".to_string(),
			address: "1 Main St".to_string(),
		}]);
		let value = serde_json::to_value(&message).expect("Failed to encode map message.");

		assert_eq!(value["message_type"], "results_map");
		assert_eq!(value["@type"], "LocationMap");
		assert_eq!(value["locations"][0]["title"], "Cafe");
		assert_eq!(value["locations"][0]["address"], "1 Main St");
	}

	#[test]
	fn message_round_trips_through_json() {
		let message = Message::summary("Round trip.", "conv-2");
		let encoded = serde_json::to_string(&message).expect("Failed to encode message.");
		let decoded: Message = serde_json::from_str(&encoded).expect("Failed to decode message.");

		assert_eq!(decoded.message_id, message.message_id);
		assert_eq!(decoded.content[0]["content"], "Round trip.");
	}
}
