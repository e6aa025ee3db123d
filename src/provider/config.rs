//! Validated provider configuration and its serde-friendly builder.

// std
use std::net::IpAddr;
// crates.io
use url::Host;
// self
use crate::{_prelude::*, error::ConfigError};

/// Options a provider can demand from every client configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequiredOption {
	/// Numeric business identifier of the merchant account.
	BusinessId,
}
impl RequiredOption {
	/// Returns the option name as it appears in configuration sources.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequiredOption::BusinessId => "businessId",
		}
	}
}
impl Display for RequiredOption {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Endpoint set declared by a provider configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderEndpoints {
	/// Authorization endpoint end-users are redirected to.
	pub authorize: Url,
	/// Token endpoint used for every grant.
	pub token: Url,
	/// Endpoint returning the authenticated resource owner.
	pub resource_owner_details: Url,
}

/// Immutable, validated provider configuration consumed by clients.
///
/// Deserializing goes through [`ProviderConfigBuilder`], so every deserialized value is
/// validated exactly like a built one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProviderConfigBuilder", into = "ProviderConfigBuilder")]
pub struct ProviderConfig {
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Scopes requested when the caller does not ask for any.
	pub default_scopes: Vec<String>,
	/// Character used to join scopes in the `scope` parameter.
	pub scope_separator: char,
	/// Options every client of this provider must supply.
	pub required_options: Vec<RequiredOption>,
	/// Token response field holding the resource owner identifier, if any.
	pub access_token_resource_owner_id: Option<String>,
}
impl ProviderConfig {
	/// Scope separator used when none is configured.
	pub const DEFAULT_SCOPE_SEPARATOR: char = ',';

	/// Creates an empty builder.
	pub fn builder() -> ProviderConfigBuilder {
		ProviderConfigBuilder::default()
	}

	/// Returns true if clients must supply `option`.
	pub fn requires(&self, option: RequiredOption) -> bool {
		self.required_options.contains(&option)
	}

	/// Joins scopes with the configured separator.
	pub fn format_scopes<I, S>(&self, scopes: I) -> String
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut buf = String::new();

		for (idx, scope) in scopes.into_iter().enumerate() {
			if idx > 0 {
				buf.push(self.scope_separator);
			}

			buf.push_str(scope.as_ref());
		}

		buf
	}
}
impl TryFrom<ProviderConfigBuilder> for ProviderConfig {
	type Error = ConfigError;

	fn try_from(builder: ProviderConfigBuilder) -> Result<Self, Self::Error> {
		builder.build()
	}
}

/// Builder (and serde shape) for [`ProviderConfig`] values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderConfigBuilder {
	/// Authorization endpoint.
	pub authorize_url: Option<Url>,
	/// Token endpoint.
	pub token_url: Option<Url>,
	/// Resource-owner details endpoint.
	pub resource_owner_details_url: Option<Url>,
	/// Scopes requested by default.
	pub default_scopes: Vec<String>,
	/// Scope separator; defaults to [`ProviderConfig::DEFAULT_SCOPE_SEPARATOR`].
	pub scope_separator: Option<char>,
	/// Options clients must supply.
	pub required_options: Vec<RequiredOption>,
	/// Token response field holding the resource owner identifier.
	pub access_token_resource_owner_id: Option<String>,
}
impl ProviderConfigBuilder {
	/// Sets the authorization endpoint.
	pub fn authorize_url(mut self, url: Url) -> Self {
		self.authorize_url = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn token_url(mut self, url: Url) -> Self {
		self.token_url = Some(url);

		self
	}

	/// Sets the resource-owner details endpoint.
	pub fn resource_owner_details_url(mut self, url: Url) -> Self {
		self.resource_owner_details_url = Some(url);

		self
	}

	/// Replaces the default scopes.
	pub fn default_scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.default_scopes = scopes.into_iter().map(Into::into).collect();

		self
	}

	/// Overrides the scope separator.
	pub fn scope_separator(mut self, separator: char) -> Self {
		self.scope_separator = Some(separator);

		self
	}

	/// Marks an option as required for every client.
	pub fn require_option(mut self, option: RequiredOption) -> Self {
		if !self.required_options.contains(&option) {
			self.required_options.push(option);
		}

		self
	}

	/// Names the token response field holding the resource owner identifier.
	pub fn access_token_resource_owner_id(mut self, key: impl Into<String>) -> Self {
		self.access_token_resource_owner_id = Some(key.into());

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ProviderConfig, ConfigError> {
		let authorize = self
			.authorize_url
			.ok_or(ConfigError::MissingConfiguration { option: "authorizeUrl" })?;
		let token = self.token_url.ok_or(ConfigError::MissingConfiguration { option: "tokenUrl" })?;
		let resource_owner_details = self
			.resource_owner_details_url
			.ok_or(ConfigError::MissingConfiguration { option: "resourceOwnerDetailsUrl" })?;
		let scope_separator =
			self.scope_separator.unwrap_or(ProviderConfig::DEFAULT_SCOPE_SEPARATOR);

		validate_endpoint("authorize", &authorize)?;
		validate_endpoint("token", &token)?;
		validate_endpoint("resource owner details", &resource_owner_details)?;
		validate_scope_separator(scope_separator)?;

		Ok(ProviderConfig {
			endpoints: ProviderEndpoints { authorize, token, resource_owner_details },
			default_scopes: self.default_scopes,
			scope_separator,
			required_options: self.required_options,
			access_token_resource_owner_id: self.access_token_resource_owner_id,
		})
	}
}
impl From<ProviderConfig> for ProviderConfigBuilder {
	fn from(config: ProviderConfig) -> Self {
		let ProviderEndpoints { authorize, token, resource_owner_details } = config.endpoints;

		Self {
			authorize_url: Some(authorize),
			token_url: Some(token),
			resource_owner_details_url: Some(resource_owner_details),
			default_scopes: config.default_scopes,
			scope_separator: Some(config.scope_separator),
			required_options: config.required_options,
			access_token_resource_owner_id: config.access_token_resource_owner_id,
		}
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ConfigError> {
	if url.scheme() == "https" || (url.scheme() == "http" && is_loopback(url)) {
		Ok(())
	} else {
		Err(ConfigError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(Host::Ipv4(addr)) => IpAddr::V4(addr).is_loopback(),
		Some(Host::Ipv6(addr)) => IpAddr::V6(addr).is_loopback(),
		None => false,
	}
}

fn validate_scope_separator(separator: char) -> Result<(), ConfigError> {
	if separator.is_control() {
		Err(ConfigError::InvalidScopeSeparator { separator })
	} else {
		Ok(())
	}
}
