//! Authorization URL construction and `state` round-trip checks.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{_prelude::*, client::ProviderClient, http::ProviderHttpClient};

const STATE_LEN: usize = 32;

/// Caller-supplied inputs for [`ProviderClient::authorization_url`].
#[derive(Clone, Debug, Default)]
pub struct AuthorizationParams {
	/// Explicit `state`; falls back to a `state` entry in `extra`, then to a random value.
	pub state: Option<String>,
	/// Requested scopes; the configured defaults are used when absent or empty.
	pub scopes: Option<Vec<String>>,
	/// Redirect URI overriding the client's.
	pub redirect_uri: Option<String>,
	/// Additional query parameters; they win over the standard ones on key collisions, except
	/// `state`, which always matches [`AuthorizationRequest::state`].
	pub extra: BTreeMap<String, String>,
}
impl AuthorizationParams {
	/// Uses an explicit `state` value.
	pub fn with_state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Requests explicit scopes.
	pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes = Some(scopes.into_iter().map(Into::into).collect());

		self
	}

	/// Overrides the redirect URI.
	pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
		self.redirect_uri = Some(redirect_uri.into());

		self
	}

	/// Adds a provider-specific query parameter.
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra.insert(key.into(), value.into());

		self
	}
}

/// Authorization redirect returned by [`ProviderClient::authorization_url`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRequest {
	/// Fully-formed authorize URL that callers should send end-users to.
	pub url: Url,
	/// Opaque state value that must round-trip via the redirect handler.
	pub state: String,
}
impl AuthorizationRequest {
	/// Validates the returned `state` parameter after the authorization redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state { Ok(()) } else { Err(Error::StateMismatch) }
	}
}

impl<C> ProviderClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Builds the authorize URL end-users are redirected to.
	///
	/// The query carries `state`, `scope`, `response_type=code`, `approval_prompt=auto`
	/// (dropped when the caller passes `prompt`), `redirect_uri` (when known) and `client_id`,
	/// followed by any extra parameters.
	pub fn authorization_url(&self, params: AuthorizationParams) -> AuthorizationRequest {
		let AuthorizationParams { state, scopes, redirect_uri, mut extra } = params;
		let extra_state = extra.remove("state");
		let state = state
			.filter(|value| !value.is_empty())
			.or(extra_state.filter(|value| !value.is_empty()))
			.unwrap_or_else(random_state);
		let scope = match scopes.filter(|scopes| !scopes.is_empty()) {
			Some(scopes) => self.config.format_scopes(&scopes),
			None => self.config.format_scopes(&self.config.default_scopes),
		};
		let mut query = vec![
			("state".to_owned(), state.clone()),
			("scope".to_owned(), scope),
			("response_type".to_owned(), "code".to_owned()),
		];

		if !extra.contains_key("prompt") {
			query.push(("approval_prompt".into(), "auto".into()));
		}
		if let Some(redirect_uri) = redirect_uri.or_else(|| self.redirect_uri.clone()) {
			query.push(("redirect_uri".into(), redirect_uri));
		}

		query.push(("client_id".into(), self.client_id.clone()));

		for (key, value) in extra {
			match query.iter_mut().find(|(existing, _)| *existing == key) {
				Some(slot) => slot.1 = value,
				None => query.push((key, value)),
			}
		}

		let mut url = self.config.endpoints.authorize.clone();

		url.query_pairs_mut().extend_pairs(query);

		AuthorizationRequest { url, state }
	}
}

fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::provider::{self, ProviderOptions};

	fn client() -> ProviderClient<crate::http::ReqwestHttpClient> {
		ProviderClient::new(
			provider::kangaroo().expect("Production preset should build."),
			ProviderOptions::new("mock_client_id")
				.with_client_secret("mock_secret")
				.with_redirect_uri("none")
				.with_business_id("42"),
		)
		.expect("Client fixture should build.")
	}

	fn query(request: &AuthorizationRequest) -> HashMap<String, String> {
		request.url.query_pairs().into_owned().collect()
	}

	#[test]
	fn authorization_url_carries_standard_parameters() {
		let request = client().authorization_url(AuthorizationParams::default());
		let pairs = query(&request);

		assert_eq!(request.url.path(), "/oauth/authorize");
		assert_eq!(pairs.get("client_id").map(String::as_str), Some("mock_client_id"));
		assert_eq!(pairs.get("redirect_uri").map(String::as_str), Some("none"));
		assert_eq!(pairs.get("scope").map(String::as_str), Some("manage-all"));
		assert_eq!(pairs.get("response_type").map(String::as_str), Some("code"));
		assert_eq!(pairs.get("approval_prompt").map(String::as_str), Some("auto"));
		assert_eq!(pairs.get("state"), Some(&request.state));
		assert_eq!(request.state.len(), STATE_LEN);
		assert!(request.validate_state(&request.state).is_ok());
		assert!(matches!(request.validate_state("forged"), Err(Error::StateMismatch)));
	}

	#[test]
	fn caller_parameters_override_defaults() {
		let request = client().authorization_url(
			AuthorizationParams::default()
				.with_state("fixed")
				.with_scopes(["admin", "full-access"])
				.with_redirect_uri("https://app.example.com/cb")
				.with_param("prompt", "consent")
				.with_param("response_type", "token"),
		);
		let pairs = query(&request);

		assert_eq!(request.state, "fixed");
		assert_eq!(pairs.get("scope").map(String::as_str), Some("admin,full-access"));
		assert_eq!(pairs.get("redirect_uri").map(String::as_str), Some("https://app.example.com/cb"));
		assert_eq!(pairs.get("prompt").map(String::as_str), Some("consent"));
		assert_eq!(pairs.get("response_type").map(String::as_str), Some("token"));
		assert!(!pairs.contains_key("approval_prompt"));
	}

	#[test]
	fn state_passed_as_extra_parameter_is_tracked() {
		let request = client()
			.authorization_url(AuthorizationParams::default().with_param("state", "from-extra"));
		let pairs = query(&request);

		assert_eq!(request.state, "from-extra");
		assert_eq!(pairs.get("state").map(String::as_str), Some("from-extra"));
		assert_eq!(request.url.query_pairs().filter(|(key, _)| key == "state").count(), 1);
		assert!(request.validate_state("from-extra").is_ok());

		let request = client().authorization_url(
			AuthorizationParams::default().with_state("explicit").with_param("state", "ignored"),
		);

		assert_eq!(request.state, "explicit");
		assert_eq!(query(&request).get("state").map(String::as_str), Some("explicit"));
	}

	#[test]
	fn states_are_unique_per_request() {
		let client = client();
		let first = client.authorization_url(AuthorizationParams::default());
		let second = client.authorization_url(AuthorizationParams::default());

		assert_ne!(first.state, second.state);
	}
}
