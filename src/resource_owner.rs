//! Typed, nullable view over the Kangaroo `/me` response.
//!
//! The document is kept verbatim. Every accessor walks a fixed path and yields `None` as soon
//! as a segment is missing or is not an object. Present-but-falsy leaves (`0`, `""`, `"0"`,
//! `false`, `null`, empty arrays/objects) are treated exactly like missing ones, so an account
//! with `"id": 0` has no id.

// self
use crate::_prelude::*;

/// Resource owner returned by the Kangaroo resource-owner details endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KangarooResourceOwner {
	response: JsonValue,
}
impl KangarooResourceOwner {
	/// Wraps a decoded resource-owner response.
	pub fn new(response: impl Into<JsonValue>) -> Self {
		Self { response: response.into() }
	}

	/// Account identifier (`data.id`).
	pub fn id(&self) -> Option<&JsonValue> {
		self.truthy(&["data", "id"])
	}

	/// Display name composed as `first_name + " " + last_name` from `data.profile`.
	///
	/// Returns `None` only when the profile itself is absent; a missing name part renders as
	/// an empty string, so a profile without names yields `" "`.
	pub fn name(&self) -> Option<String> {
		let profile = self.truthy(&["data", "profile"])?;
		let first = profile.get("first_name").map(render).unwrap_or_default();
		let last = profile.get("last_name").map(render).unwrap_or_default();

		Some(format!("{first} {last}"))
	}

	/// Account email address (`data.profile.email`).
	pub fn email(&self) -> Option<&JsonValue> {
		self.truthy(&["data", "profile", "email"])
	}

	/// Business identifier (`data.business.id`); only present for business owners.
	pub fn business_id(&self) -> Option<&JsonValue> {
		self.truthy(&["data", "business", "id"])
	}

	/// Business name (`data.business.name`); only present for business owners.
	pub fn business_name(&self) -> Option<&JsonValue> {
		self.truthy(&["data", "business", "name"])
	}

	/// Returns the original, unmodified response document.
	pub fn to_raw_document(&self) -> &JsonValue {
		&self.response
	}

	/// Consumes the owner and returns the response document.
	pub fn into_raw_document(self) -> JsonValue {
		self.response
	}

	fn truthy(&self, path: &[&str]) -> Option<&JsonValue> {
		path.iter()
			.try_fold(&self.response, |node, segment| node.as_object()?.get(*segment))
			.filter(|value| !is_falsy(value))
	}
}
impl From<JsonMap<String, JsonValue>> for KangarooResourceOwner {
	fn from(map: JsonMap<String, JsonValue>) -> Self {
		Self::new(JsonValue::Object(map))
	}
}

/// Loose truthiness: values that count as absent even though the key exists.
pub fn is_falsy(value: &JsonValue) -> bool {
	match value {
		JsonValue::Null => true,
		JsonValue::Bool(flag) => !flag,
		JsonValue::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
		JsonValue::String(text) => text.is_empty() || text == "0",
		JsonValue::Array(items) => items.is_empty(),
		JsonValue::Object(fields) => fields.is_empty(),
	}
}

fn render(value: &JsonValue) -> String {
	match value {
		JsonValue::String(text) => text.clone(),
		JsonValue::Number(number) => number.to_string(),
		JsonValue::Bool(true) => "1".into(),
		_ => String::new(),
	}
}
