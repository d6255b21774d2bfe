use serde_json::{Map, Value};

/// Field names probed for an address-like value, in precedence order.
const ADDRESS_FIELDS: [&str; 4] = ["address", "location", "streetAddress", "postalAddress"];
/// Structured-address parts concatenated before the country, in output order.
const PART_FIELDS: [&str; 4] = ["streetAddress", "addressLocality", "addressRegion", "postalCode"];

enum AddressCandidate<'a> {
	Plain(&'a str),
	Structured(&'a Map<String, Value>),
}

/// Resolves the address-like value of a ranked answer's schema object to a
/// display string. Returns `None` for any shape that does not carry a usable
/// address; malformed metadata is excluded, never an error.
pub fn resolve_address(schema_object: &Value) -> Option<String> {
	match address_candidate(schema_object)? {
		AddressCandidate::Plain(text) => format_plain(text),
		AddressCandidate::Structured(fields) => format_structured(fields),
	}
}

/// The quorum rule gating map emission: at least one address-bearing answer,
/// covering at least half of the total under true (not integer) division.
pub fn meets_map_quorum(with_address: usize, total: usize) -> bool {
	with_address > 0 && with_address as f64 >= total as f64 / 2.0
}

fn address_candidate(schema_object: &Value) -> Option<AddressCandidate<'_>> {
	let schema_object = schema_object.as_object()?;

	ADDRESS_FIELDS.iter().find_map(|field| match schema_object.get(*field) {
		Some(Value::String(text)) if !text.is_empty() => Some(AddressCandidate::Plain(text)),
		Some(Value::Object(fields)) if !fields.is_empty() =>
			Some(AddressCandidate::Structured(fields)),
		_ => None,
	})
}

fn format_plain(text: &str) -> Option<String> {
	// Some sources append a serialized object after the street address; keep
	// only the part before the ", {" separator.
	let text = if text.contains('{') { text.split(", {").next().unwrap_or(text) } else { text };

	if text.is_empty() {
		return None;
	}

	Some(text.to_string())
}

fn format_structured(fields: &Map<String, Value>) -> Option<String> {
	let mut parts = Vec::new();

	for field in PART_FIELDS {
		if let Some(text) = fields.get(field).and_then(scalar_text) {
			parts.push(text);
		}
	}
	if let Some(country) = fields.get("addressCountry") {
		match country {
			Value::Object(country) => {
				if let Some(name) = country.get("name").and_then(scalar_text) {
					parts.push(name);
				}
			},
			Value::String(name) if !name.starts_with('{') => parts.push(name.clone()),
			_ => {},
		}
	}

	if parts.is_empty() {
		return None;
	}

	Some(parts.join(", "))
}

fn scalar_text(value: &Value) -> Option<String> {
	match value {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		Value::Bool(flag) => Some(flag.to_string()),
		_ => None,
	}
}
