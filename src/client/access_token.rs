//! Token endpoint exchanges driven by grant handlers.
//!
//! [`ProviderClient::get_access_token`] looks the grant up in the client's registry (resolving
//! and caching it on first use), lets the handler validate and assemble the form, POSTs it to
//! the token endpoint, and turns the checked response into an [`AccessToken`].

// crates.io
use oauth2::http::{Method, Request, header::CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	client::{ProviderClient, response},
	error::ConfigError,
	grant::{Grant, GrantParameters},
	http::{self, ProviderHttpClient},
	obs::{self, RequestKind, RequestOutcome, RequestSpan},
	token::AccessToken,
};

impl<C> ProviderClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Requests an access token using the grant registered under `grant`.
	///
	/// Unknown grant names fail with [`GrantError::UnknownGrant`](crate::error::GrantError)
	/// before any request is made.
	pub async fn get_access_token<I, K, V>(&self, grant: &str, params: I) -> Result<AccessToken>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let handler = self.grants.get_grant(grant)?;

		self.get_access_token_with(handler.as_ref(), params).await
	}

	/// Requests an access token using an explicit grant handler.
	pub async fn get_access_token_with<I, K, V>(
		&self,
		grant: &dyn Grant,
		params: I,
	) -> Result<AccessToken>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		const KIND: RequestKind = RequestKind::AccessToken;

		let span = RequestSpan::new(KIND, "get_access_token");
		let options = params
			.into_iter()
			.map(|(key, value)| (key.into(), value.into()))
			.collect::<GrantParameters>();

		obs::record_request_outcome(KIND, RequestOutcome::Attempt);

		let result = span
			.instrument(async move {
				let form = grant.prepare_request_parameters(self.token_defaults(), &options)?;
				let body = url::form_urlencoded::Serializer::new(String::new())
					.extend_pairs(form.iter())
					.finish();
				let request = Request::builder()
					.method(Method::POST)
					.uri(self.config.endpoints.token.as_str())
					.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
					.body(body.into_bytes())
					.map_err(ConfigError::from)?;
				let http_response = http::send(self.http_client.as_ref(), request).await?;
				let received_at = OffsetDateTime::now_utc();
				let parsed = response::parse_response(&http_response)?;

				parsed.check()?;

				let status = parsed.status;
				let body = JsonValue::Object(parsed.into_object()?);

				AccessToken::from_response(
					body,
					self.config.access_token_resource_owner_id.as_deref(),
					received_at,
				)
				.map_err(|source| Error::TokenResponseParse { source, status })
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(KIND, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(KIND, RequestOutcome::Failure),
		}

		result
	}

	fn token_defaults(&self) -> GrantParameters {
		let mut defaults = GrantParameters::new();

		defaults.insert("client_id".into(), self.client_id.clone());

		if let Some(secret) = &self.client_secret {
			defaults.insert("client_secret".into(), secret.clone());
		}
		if let Some(redirect_uri) = &self.redirect_uri {
			defaults.insert("redirect_uri".into(), redirect_uri.clone());
		}

		defaults
	}
}
