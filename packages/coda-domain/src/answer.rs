use serde::{Deserialize, Serialize};
use serde_json::Value;

const UNNAMED_TITLE: &str = "Unnamed";

/// One ranked candidate produced by the upstream ranking stage. The shape is
/// tolerant: answers from heterogeneous retrieval sources may omit any field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankedAnswer {
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub site: Option<String>,
	#[serde(default)]
	pub score: Option<f32>,
	#[serde(default)]
	pub schema_object: Option<Value>,
}

impl RankedAnswer {
	pub fn display_name(&self) -> &str {
		self.name.as_deref().filter(|name| !name.is_empty()).unwrap_or(UNNAMED_TITLE)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn falls_back_to_unnamed_title() {
		assert_eq!(RankedAnswer::default().display_name(), "Unnamed");

		let named = RankedAnswer { name: Some("Blue Bottle".to_string()), ..Default::default() };

		assert_eq!(named.display_name(), "Blue Bottle");
	}

	#[test]
	fn deserializes_partial_records() {
		let answer: RankedAnswer =
			serde_json::from_str(r#"{"name": "Cafe"}"#).expect("Failed to parse answer.");

		assert_eq!(answer.name.as_deref(), Some("Cafe"));
		assert!(answer.schema_object.is_none());
	}
}
