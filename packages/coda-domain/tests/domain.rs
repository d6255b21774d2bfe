use serde_json::json;

use coda_domain::{RankedAnswer, address};

#[test]
fn malformed_schema_objects_are_excluded_not_fatal() {
	for schema in [
		json!(null),
		json!("not an object"),
		json!(42),
		json!(["a", "list"]),
		json!({}),
		json!({ "address": 42 }),
		json!({ "address": ["list", "address"] }),
		json!({ "address": {} }),
		json!({ "unrelated": "field" }),
	] {
		assert_eq!(address::resolve_address(&schema), None, "schema: {schema}");
	}
}

#[test]
fn structured_address_skips_nested_values() {
	let schema = json!({
		"address": {
			"streetAddress": { "line1": "1 Main St" },
			"addressLocality": "Springfield",
			"postalCode": 62704
		}
	});

	assert_eq!(address::resolve_address(&schema).as_deref(), Some("Springfield, 62704"));
}

#[test]
fn structured_country_without_name_is_dropped() {
	let schema = json!({
		"address": {
			"addressLocality": "Oslo",
			"addressCountry": { "code": "NO" }
		}
	});

	assert_eq!(address::resolve_address(&schema).as_deref(), Some("Oslo"));
}

#[test]
fn country_string_resembling_object_is_dropped() {
	let schema = json!({ "address": { "addressCountry": "{\"name\":\"USA\"}" } });

	assert_eq!(address::resolve_address(&schema), None);
}

#[test]
fn string_address_with_brace_but_no_separator_is_kept_whole() {
	let schema = json!({ "address": "Suite {B}, 10 Downing St" });

	assert_eq!(address::resolve_address(&schema).as_deref(), Some("Suite {B}, 10 Downing St"));
}

#[test]
fn quorum_requires_at_least_half() {
	for (with_address, total, expected) in [
		(1, 2, true),
		(1, 3, false),
		(2, 3, true),
		(2, 4, true),
		(2, 5, false),
		(3, 5, true),
		(0, 4, false),
		(1, 1, true),
	] {
		assert_eq!(
			address::meets_map_quorum(with_address, total),
			expected,
			"with_address: {with_address}, total: {total}"
		);
	}
}

#[test]
fn ranked_answers_tolerate_unknown_metadata_shapes() {
	let raw = r#"[
		{ "name": "Cafe", "schema_object": { "address": "1 Main St" }, "score": 0.9 },
		{ "url": "https://example.com" },
		{ "name": null, "schema_object": null }
	]"#;
	let answers: Vec<RankedAnswer> = serde_json::from_str(raw).expect("Failed to parse answers.");

	assert_eq!(answers.len(), 3);
	assert_eq!(answers[0].display_name(), "Cafe");
	assert_eq!(answers[2].display_name(), "Unnamed");
}
