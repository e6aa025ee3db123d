//! Response parsing and provider error extraction.

// crates.io
use oauth2::{HttpResponse, http::header::CONTENT_TYPE};
// self
use crate::{_prelude::*, error::IdentityProviderError};

/// HTTP statuses treated as success.
pub const ACCEPTABLE_STATUSES: &[u16] = &[200, 201];

/// Decoded provider response.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedResponse {
	/// HTTP status code.
	pub status: u16,
	/// Canonical reason phrase for the status, or an empty string.
	pub reason: &'static str,
	/// Decoded body; non-JSON bodies are kept as a JSON string.
	pub body: JsonValue,
}
impl ParsedResponse {
	/// Fails with [`IdentityProviderError`] unless the status is acceptable.
	pub fn check(&self) -> Result<(), IdentityProviderError> {
		check_response(self.status, self.reason, &self.body)
	}

	/// Consumes the response and returns the body as a JSON object.
	pub fn into_object(self) -> Result<JsonMap<String, JsonValue>> {
		match self.body {
			JsonValue::Object(map) => Ok(map),
			_ => Err(Error::UnexpectedResponse {
				message: "Invalid response received from Authorization Server. Expected JSON"
					.into(),
				status: Some(self.status),
			}),
		}
	}
}

/// Decodes an HTTP response.
///
/// URL-encoded bodies are decoded as forms, everything else is tried as JSON. A body that is
/// not JSON is an error when the content type claims JSON or the status is 500, and is kept as a
/// plain string otherwise.
pub fn parse_response(response: &HttpResponse) -> Result<ParsedResponse> {
	let status = response.status();
	let content_type = response
		.headers()
		.get(CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.unwrap_or_default()
		.to_ascii_lowercase();
	let raw = response.body();
	let body = if content_type.contains("urlencoded") {
		JsonValue::Object(
			url::form_urlencoded::parse(raw)
				.into_owned()
				.map(|(key, value)| (key, JsonValue::String(value)))
				.collect(),
		)
	} else {
		match serde_json::from_slice::<JsonValue>(raw) {
			Ok(value) => value,
			Err(e) if content_type.contains("json") =>
				return Err(Error::UnexpectedResponse {
					message: format!("Failed to parse JSON response: {e}"),
					status: Some(status.as_u16()),
				}),
			Err(_) if status.as_u16() == 500 =>
				return Err(Error::UnexpectedResponse {
					message: "An OAuth server error was encountered that did not contain a JSON body"
						.into(),
					status: Some(500),
				}),
			Err(_) => JsonValue::String(String::from_utf8_lossy(raw).into_owned()),
		}
	};

	Ok(ParsedResponse {
		status: status.as_u16(),
		reason: status.canonical_reason().unwrap_or_default(),
		body,
	})
}

/// Fails with [`IdentityProviderError`] when `status` is not in [`ACCEPTABLE_STATUSES`].
pub fn check_response(
	status: u16,
	reason: &str,
	body: &JsonValue,
) -> Result<(), IdentityProviderError> {
	if ACCEPTABLE_STATUSES.contains(&status) {
		return Ok(());
	}

	let message = extract_error_message(body).unwrap_or_else(|| reason.to_owned());

	Err(IdentityProviderError { message, status, body: body.clone() })
}

/// Picks the provider error message: `error.description`, then `error.message`, then the
/// top-level `message`. Keys holding `null` count as absent.
pub fn extract_error_message(body: &JsonValue) -> Option<String> {
	let error = body.get("error");

	[
		error.and_then(|error| error.get("description")),
		error.and_then(|error| error.get("message")),
		body.get("message"),
	]
	.into_iter()
	.flatten()
	.find(|value| !value.is_null())
	.map(|value| match value {
		JsonValue::String(text) => text.clone(),
		other => other.to_string(),
	})
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::StatusCode;
	use serde_json::json;
	// self
	use super::*;

	fn response(status: u16, content_type: Option<&str>, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() =
			StatusCode::from_u16(status).expect("Status fixture should be valid.");

		if let Some(content_type) = content_type {
			response.headers_mut().insert(
				CONTENT_TYPE,
				content_type.parse().expect("Content type fixture should be valid."),
			);
		}

		response
	}

	#[test]
	fn message_priority_follows_description_message_top_level() {
		let body = json!({
			"error": { "description": "desc", "message": "msg" },
			"message": "top"
		});

		assert_eq!(extract_error_message(&body).as_deref(), Some("desc"));

		let body = json!({ "error": { "message": "msg" }, "message": "top" });

		assert_eq!(extract_error_message(&body).as_deref(), Some("msg"));

		let body = json!({ "error": { "description": null }, "message": "top" });

		assert_eq!(extract_error_message(&body).as_deref(), Some("top"));

		let body = json!({ "error": "invalid_grant" });

		assert_eq!(extract_error_message(&body), None);
		assert_eq!(extract_error_message(&json!("plain text")), None);
	}

	#[test]
	fn check_response_falls_back_to_the_reason_phrase() {
		assert!(check_response(200, "OK", &json!({})).is_ok());
		assert!(check_response(201, "Created", &json!({})).is_ok());

		let err = check_response(204, "No Content", &json!(null))
			.expect_err("204 is not an acceptable status.");

		assert_eq!(err.message, "No Content");
		assert_eq!(err.status, 204);

		let err = check_response(401, "Unauthorized", &json!({ "error": { "message": "bad" } }))
			.expect_err("401 must fail.");

		assert_eq!(err.message, "bad");
	}

	#[test]
	fn parse_response_decodes_json_forms_and_text() {
		let parsed = parse_response(&response(200, Some("application/json"), r#"{"a":1}"#))
			.expect("JSON body should parse.");

		assert_eq!(parsed.body, json!({ "a": 1 }));
		assert_eq!(parsed.reason, "OK");

		let parsed = parse_response(&response(
			200,
			Some("application/x-www-form-urlencoded"),
			"access_token=abc&token_type=bearer",
		))
		.expect("Form body should parse.");

		assert_eq!(parsed.body, json!({ "access_token": "abc", "token_type": "bearer" }));

		let parsed = parse_response(&response(404, Some("text/html"), "<h1>Not Found</h1>"))
			.expect("Text body should be kept.");

		assert_eq!(parsed.body, json!("<h1>Not Found</h1>"));
		assert_eq!(
			parsed.check().expect_err("404 must fail.").message,
			"Not Found"
		);
	}

	#[test]
	fn parse_response_rejects_broken_json() {
		let err = parse_response(&response(200, Some("application/json"), "{"))
			.expect_err("Broken JSON must fail.");

		assert!(matches!(err, Error::UnexpectedResponse { status: Some(200), .. }));

		let err = parse_response(&response(500, None, "oops"))
			.expect_err("Non-JSON 500 responses must fail.");

		assert!(matches!(err, Error::UnexpectedResponse { status: Some(500), .. }));
	}

	#[test]
	fn into_object_requires_a_json_object() {
		let parsed = ParsedResponse { status: 200, reason: "OK", body: json!([1, 2]) };

		assert!(matches!(parsed.into_object(), Err(Error::UnexpectedResponse { .. })));
	}
}
