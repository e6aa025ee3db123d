//! Canonical Kangaroo Rewards preset.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	provider::{ProviderConfig, RequiredOption},
};

/// Production API host.
pub const KANGAROO_API_HOST: &str = "https://api.kangaroorewards.com";
/// Authorization endpoint path relative to the API host.
pub const KANGAROO_AUTHORIZE_PATH: &str = "/oauth/authorize";
/// Token endpoint path relative to the API host.
pub const KANGAROO_TOKEN_PATH: &str = "/oauth/token";
/// Resource-owner details endpoint path relative to the API host.
pub const KANGAROO_RESOURCE_OWNER_PATH: &str = "/me";
/// Scopes requested when the caller does not ask for any.
pub const KANGAROO_DEFAULT_SCOPES: &[&str] = &["manage-all"];

/// Builds the Kangaroo configuration against the production API host.
pub fn kangaroo() -> Result<ProviderConfig, ConfigError> {
	let host = Url::parse(KANGAROO_API_HOST)
		.map_err(|source| ConfigError::InvalidUrl { option: "apiHost", source })?;

	kangaroo_with_host(&host)
}

/// Builds the Kangaroo configuration against a custom API host (staging, mocks).
///
/// Endpoint paths are appended to whatever path the host already carries, so
/// `https://staging.example.com/api` yields `https://staging.example.com/api/oauth/token`.
pub fn kangaroo_with_host(api_host: &Url) -> Result<ProviderConfig, ConfigError> {
	ProviderConfig::builder()
		.authorize_url(endpoint(api_host, KANGAROO_AUTHORIZE_PATH)?)
		.token_url(endpoint(api_host, KANGAROO_TOKEN_PATH)?)
		.resource_owner_details_url(endpoint(api_host, KANGAROO_RESOURCE_OWNER_PATH)?)
		.default_scopes(KANGAROO_DEFAULT_SCOPES.iter().copied())
		.require_option(RequiredOption::BusinessId)
		.build()
}

fn endpoint(api_host: &Url, path: &str) -> Result<Url, ConfigError> {
	let base = api_host.as_str().trim_end_matches('/');

	Url::parse(&format!("{base}{path}"))
		.map_err(|source| ConfigError::InvalidUrl { option: "apiHost", source })
}
