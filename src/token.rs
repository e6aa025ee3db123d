//! Access tokens issued by the token endpoint.

// self
use crate::_prelude::*;

/// Redacted token secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Epoch of 2012-10-01; `expires` values not later than this are lifetimes, not timestamps.
pub const OAUTH2_INCEPTION_EPOCH: i64 = 1_349_067_600;

/// Access token parsed from a successful token endpoint response.
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessToken {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<TokenSecret>,
	/// Token type reported by the provider (usually `bearer`).
	pub token_type: Option<String>,
	/// Absolute expiry instant, when the provider reported one.
	pub expires: Option<OffsetDateTime>,
	/// Resource owner identifier extracted from the token response, if configured.
	pub resource_owner_id: Option<JsonValue>,
	/// Response fields other than the secrets, lifetimes and owner identifier.
	pub values: JsonMap<String, JsonValue>,
}
impl AccessToken {
	/// Builds a token from a decoded response received at `received_at`.
	///
	/// `expires_in` (seconds, number or numeric string) takes precedence over `expires`, and a
	/// non-numeric `expires_in` is rejected. `expires` is an epoch timestamp unless it is not
	/// later than [`OAUTH2_INCEPTION_EPOCH`], in which case it counts as seconds from receipt.
	/// A zero lifetime means no expiry. `resource_owner_id_key` names the response field
	/// holding the owner identifier.
	pub fn from_response(
		response: JsonValue,
		resource_owner_id_key: Option<&str>,
		received_at: OffsetDateTime,
	) -> Result<Self, serde_path_to_error::Error<serde_json::Error>> {
		let raw: RawTokenResponse = serde_path_to_error::deserialize(response)?;
		let RawTokenResponse { access_token, refresh_token, expires_in, expires, mut values } = raw;
		let expires = match expires_in {
			Some(seconds) => expires_after(received_at, seconds),
			None => expires.as_ref().and_then(as_seconds).and_then(|value| {
				if value > OAUTH2_INCEPTION_EPOCH {
					OffsetDateTime::from_unix_timestamp(value).ok()
				} else {
					expires_after(received_at, value)
				}
			}),
		};
		let token_type =
			values.get("token_type").and_then(JsonValue::as_str).map(ToOwned::to_owned);
		let resource_owner_id = resource_owner_id_key.and_then(|key| values.remove(key));

		Ok(Self {
			access_token: TokenSecret::new(access_token),
			refresh_token: refresh_token.map(TokenSecret::new),
			token_type,
			expires,
			resource_owner_id,
			values,
		})
	}

	/// Returns whether the token is expired at `instant`, or `None` without an expiry.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> Option<bool> {
		self.expires.map(|expires| instant >= expires)
	}

	/// Convenience helper that checks expiry against the current UTC instant.
	pub fn has_expired(&self) -> Option<bool> {
		self.is_expired_at(OffsetDateTime::now_utc())
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("refresh_token_present", &self.refresh_token.is_some())
			.field("token_type", &self.token_type)
			.field("expires", &self.expires)
			.field("resource_owner_id", &self.resource_owner_id)
			.finish()
	}
}

#[derive(Deserialize)]
struct RawTokenResponse {
	access_token: String,
	#[serde(default)]
	refresh_token: Option<String>,
	#[serde(default, deserialize_with = "deserialize_expires_in")]
	expires_in: Option<i64>,
	#[serde(default)]
	expires: Option<JsonValue>,
	#[serde(flatten)]
	values: JsonMap<String, JsonValue>,
}

fn deserialize_expires_in<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	match Option::<JsonValue>::deserialize(deserializer)? {
		None | Some(JsonValue::Null) => Ok(None),
		Some(value) => as_seconds(&value)
			.map(Some)
			.ok_or_else(|| serde::de::Error::custom("expires_in value must be an integer")),
	}
}

fn as_seconds(value: &JsonValue) -> Option<i64> {
	match value {
		JsonValue::Number(number) =>
			number.as_i64().or_else(|| number.as_f64().map(|seconds| seconds as i64)),
		JsonValue::String(text) => {
			let text = text.trim();

			text.parse().ok().or_else(|| {
				text.parse::<f64>().ok().filter(|seconds| seconds.is_finite()).map(|s| s as i64)
			})
		},
		_ => None,
	}
}

fn expires_after(received_at: OffsetDateTime, seconds: i64) -> Option<OffsetDateTime> {
	if seconds == 0 { None } else { received_at.checked_add(Duration::seconds(seconds)) }
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn relative_expiry_is_anchored_at_receipt() {
		let received_at = datetime!(2025-01-01 00:00 UTC);
		let token = AccessToken::from_response(
			json!({
				"access_token": "mock_access_token",
				"token_type": "bearer",
				"expires_in": 3600,
				"scope": "manage-all"
			}),
			None,
			received_at,
		)
		.expect("Token response should parse.");

		assert_eq!(token.access_token.expose(), "mock_access_token");
		assert_eq!(token.token_type.as_deref(), Some("bearer"));
		assert_eq!(token.expires, Some(datetime!(2025-01-01 01:00 UTC)));
		assert_eq!(token.is_expired_at(datetime!(2025-01-01 00:59 UTC)), Some(false));
		assert_eq!(token.is_expired_at(datetime!(2025-01-01 01:00 UTC)), Some(true));
		assert_eq!(token.values.get("scope"), Some(&json!("manage-all")));
		assert_eq!(token.values.get("token_type"), Some(&json!("bearer")));
		assert!(!token.values.contains_key("expires_in"));
		assert!(token.refresh_token.is_none());
	}

	#[test]
	fn small_expires_values_are_lifetimes() {
		let received_at = datetime!(2025-01-01 00:00 UTC);
		let token = AccessToken::from_response(
			json!({ "access_token": "abc", "expires": 600 }),
			None,
			received_at,
		)
		.expect("Token response should parse.");

		assert_eq!(token.expires, Some(datetime!(2025-01-01 00:10 UTC)));

		let token = AccessToken::from_response(
			json!({ "access_token": "abc", "expires": OAUTH2_INCEPTION_EPOCH + 1 }),
			None,
			received_at,
		)
		.expect("Token response should parse.");

		assert_eq!(
			token.expires.map(OffsetDateTime::unix_timestamp),
			Some(OAUTH2_INCEPTION_EPOCH + 1)
		);

		let token = AccessToken::from_response(
			json!({ "access_token": "abc", "expires_in": "0", "expires": 600 }),
			None,
			received_at,
		)
		.expect("Token response should parse.");

		assert_eq!(token.expires, None);
	}

	#[test]
	fn non_numeric_expires_in_is_rejected() {
		let err = AccessToken::from_response(
			json!({ "access_token": "abc", "expires_in": "soon" }),
			None,
			OffsetDateTime::now_utc(),
		)
		.expect_err("Non-numeric lifetimes must fail.");

		assert!(err.to_string().contains("expires_in value must be an integer"));
	}

	#[test]
	fn absolute_expiry_and_owner_id_are_extracted() {
		let token = AccessToken::from_response(
			json!({
				"access_token": "abc",
				"refresh_token": "def",
				"expires": "1735693200",
				"user_id": 4821
			}),
			Some("user_id"),
			datetime!(2025-01-01 00:00 UTC),
		)
		.expect("Token response should parse.");

		assert_eq!(token.expires, Some(datetime!(2025-01-01 01:00 UTC)));
		assert_eq!(token.resource_owner_id, Some(json!(4821)));
		assert_eq!(token.refresh_token.as_ref().map(TokenSecret::expose), Some("def"));
		assert!(!token.values.contains_key("user_id"));
	}

	#[test]
	fn missing_access_token_is_rejected() {
		let err = AccessToken::from_response(
			json!({ "token_type": "bearer" }),
			None,
			OffsetDateTime::now_utc(),
		)
		.expect_err("Responses without access_token must fail.");

		assert!(err.to_string().contains("access_token"));
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let token = AccessToken::from_response(
			json!({ "access_token": "super-secret" }),
			None,
			OffsetDateTime::now_utc(),
		)
		.expect("Token response should parse.");

		assert!(!format!("{token:?}").contains("super-secret"));
		assert_eq!(token.has_expired(), None);
	}
}
