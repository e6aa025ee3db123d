//! Per-client credentials and provider-specific options.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	provider::{ProviderConfig, RequiredOption},
};

/// Business identifier as supplied by configuration, before integer coercion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BusinessIdInput {
	/// Already numeric.
	Integer(i64),
	/// Textual form, e.g. read from an environment variable.
	Text(String),
}
impl BusinessIdInput {
	/// Coerces the input into an integer identifier.
	///
	/// Text keeps its leading integer (after optional whitespace and sign); text without one
	/// coerces to `0`. Out-of-range values saturate.
	pub fn coerce(&self) -> i64 {
		match self {
			BusinessIdInput::Integer(id) => *id,
			BusinessIdInput::Text(text) => leading_integer(text),
		}
	}
}
impl From<i64> for BusinessIdInput {
	fn from(id: i64) -> Self {
		Self::Integer(id)
	}
}
impl From<&str> for BusinessIdInput {
	fn from(text: &str) -> Self {
		Self::Text(text.to_owned())
	}
}
impl From<String> for BusinessIdInput {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

/// Per-client credentials and provider-specific options.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOptions {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Client secret for confidential clients.
	#[serde(default)]
	pub client_secret: Option<String>,
	/// Redirect URI registered with the provider.
	#[serde(default)]
	pub redirect_uri: Option<String>,
	/// Merchant business identifier.
	#[serde(default)]
	pub business_id: Option<BusinessIdInput>,
}
impl ProviderOptions {
	/// Creates options for the provided client identifier.
	pub fn new(client_id: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: None, redirect_uri: None, business_id: None }
	}

	/// Sets the client secret.
	pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Sets the redirect URI.
	pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
		self.redirect_uri = Some(redirect_uri.into());

		self
	}

	/// Sets the business identifier.
	pub fn with_business_id(mut self, business_id: impl Into<BusinessIdInput>) -> Self {
		self.business_id = Some(business_id.into());

		self
	}

	/// Checks the options against `config` and returns the coerced business identifier.
	///
	/// A business identifier is coerced whenever it is supplied; it is an error to omit it
	/// only when the configuration requires it.
	pub fn validate(&self, config: &ProviderConfig) -> Result<Option<i64>, ConfigError> {
		match &self.business_id {
			Some(input) => Ok(Some(input.coerce())),
			None if config.requires(RequiredOption::BusinessId) =>
				Err(ConfigError::MissingConfiguration {
					option: RequiredOption::BusinessId.as_str(),
				}),
			None => Ok(None),
		}
	}
}
impl Debug for ProviderOptions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProviderOptions")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("redirect_uri", &self.redirect_uri)
			.field("business_id", &self.business_id)
			.finish()
	}
}

fn leading_integer(text: &str) -> i64 {
	let text = text.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
	let (negative, digits) = match text.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, text.strip_prefix('+').unwrap_or(text)),
	};

	digits.bytes().take_while(|byte| byte.is_ascii_digit()).fold(0_i64, |acc, byte| {
		let digit = i64::from(byte - b'0');
		let acc = acc.saturating_mul(10);

		if negative { acc.saturating_sub(digit) } else { acc.saturating_add(digit) }
	})
}
