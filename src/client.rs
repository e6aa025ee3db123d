//! Generic provider client driven by a [`ProviderConfig`].
//!
//! One client type serves every provider; what differs between providers lives in the
//! configuration (endpoints, default scopes, required options). The client owns its
//! [`GrantFactory`], so grant handlers are cached per client rather than per process.

pub mod access_token;
pub mod authorization;
pub mod resource_owner;
pub mod response;

pub use authorization::*;
pub use response::*;

// self
use crate::{
	_prelude::*,
	grant::GrantFactory,
	http::ProviderHttpClient,
	provider::{ProviderConfig, ProviderOptions},
};
#[cfg(feature = "reqwest")] use crate::{http::ReqwestHttpClient, provider};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestProviderClient = ProviderClient<ReqwestHttpClient>;

/// OAuth 2.0 client for a single provider configuration.
///
/// Cloning is cheap and shares the transport and the grant registry, so clones behave as one
/// logical client.
pub struct ProviderClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Provider configuration (endpoints, scopes, required options).
	pub config: ProviderConfig,
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Optional client secret for confidential clients.
	pub client_secret: Option<String>,
	/// Redirect URI sent with authorization and token requests.
	pub redirect_uri: Option<String>,
	business_id: Option<i64>,
	grants: Arc<GrantFactory>,
}
impl<C> ProviderClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	///
	/// Fails when `options` lack an option the configuration requires.
	pub fn with_http_client(
		config: ProviderConfig,
		options: ProviderOptions,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		let business_id = options.validate(&config)?;
		let ProviderOptions { client_id, client_secret, redirect_uri, .. } = options;

		Ok(Self {
			http_client: http_client.into(),
			config,
			client_id,
			client_secret,
			redirect_uri,
			business_id,
			grants: Default::default(),
		})
	}

	/// Business identifier coerced from the options, if supplied.
	pub fn business_id(&self) -> Option<i64> {
		self.business_id
	}

	/// Scopes requested when authorization parameters do not name any.
	pub fn default_scopes(&self) -> &[String] {
		&self.config.default_scopes
	}

	/// Grant registry owned by this client.
	pub fn grant_factory(&self) -> &GrantFactory {
		&self.grants
	}
}
#[cfg(feature = "reqwest")]
impl ProviderClient<ReqwestHttpClient> {
	/// Creates a client with its own reqwest-backed transport.
	pub fn new(config: ProviderConfig, options: ProviderOptions) -> Result<Self> {
		Self::with_http_client(config, options, ReqwestHttpClient::default())
	}

	/// Creates a client for the production Kangaroo Rewards API.
	pub fn kangaroo(options: ProviderOptions) -> Result<Self> {
		Self::new(provider::kangaroo()?, options)
	}
}
impl<C> Clone for ProviderClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			config: self.config.clone(),
			client_id: self.client_id.clone(),
			client_secret: self.client_secret.clone(),
			redirect_uri: self.redirect_uri.clone(),
			business_id: self.business_id,
			grants: self.grants.clone(),
		}
	}
}
impl<C> Debug for ProviderClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProviderClient")
			.field("config", &self.config)
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("redirect_uri", &self.redirect_uri)
			.field("business_id", &self.business_id)
			.field("grants", &self.grants)
			.finish()
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::error::ConfigError;

	#[test]
	fn kangaroo_client_requires_business_id() {
		let err = ProviderClient::kangaroo(ProviderOptions::new("mock_client_id"))
			.expect_err("Kangaroo clients must carry a business id.");

		assert!(matches!(
			err,
			Error::Config(ConfigError::MissingConfiguration { option: "businessId" })
		));

		let client = ProviderClient::kangaroo(
			ProviderOptions::new("mock_client_id")
				.with_client_secret("mock_secret")
				.with_business_id("42"),
		)
		.expect("Numeric business ids should be accepted.");

		assert_eq!(client.business_id(), Some(42));
		assert_eq!(client.default_scopes(), ["manage-all".to_owned()]);
	}

	#[test]
	fn clones_share_the_grant_registry() {
		let client = ProviderClient::kangaroo(ProviderOptions::new("c").with_business_id(1))
			.expect("Client should build.");
		let clone = client.clone();
		let a = client.grant_factory().get_grant("password").expect("Grant should resolve.");
		let b = clone.grant_factory().get_grant("password").expect("Grant should resolve.");

		assert!(Arc::ptr_eq(&a, &b));
		assert!(!format!("{client:?}").contains("mock_secret"));
	}
}
