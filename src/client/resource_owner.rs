//! Resource-owner details fetch.

// crates.io
use oauth2::http::{Method, Request, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	client::{ProviderClient, response},
	error::ConfigError,
	http::{self, ProviderHttpClient},
	obs::{self, RequestKind, RequestOutcome, RequestSpan},
	resource_owner::KangarooResourceOwner,
	token::AccessToken,
};

impl<C> ProviderClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Fetches the raw resource-owner document with bearer authorization.
	///
	/// The response must be a JSON object; anything else is an
	/// [`Error::UnexpectedResponse`].
	pub async fn fetch_resource_owner_details(
		&self,
		token: &AccessToken,
	) -> Result<JsonMap<String, JsonValue>> {
		const KIND: RequestKind = RequestKind::ResourceOwner;

		let span = RequestSpan::new(KIND, "fetch_resource_owner_details");

		obs::record_request_outcome(KIND, RequestOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = Request::builder()
					.method(Method::GET)
					.uri(self.config.endpoints.resource_owner_details.as_str())
					.header(AUTHORIZATION, format!("Bearer {}", token.access_token.expose()))
					.body(Vec::new())
					.map_err(ConfigError::from)?;
				let http_response = http::send(self.http_client.as_ref(), request).await?;
				let parsed = response::parse_response(&http_response)?;

				parsed.check()?;
				parsed.into_object()
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(KIND, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(KIND, RequestOutcome::Failure),
		}

		result
	}

	/// Fetches and wraps the resource owner tied to `token`.
	pub async fn get_resource_owner(&self, token: &AccessToken) -> Result<KangarooResourceOwner> {
		let details = self.fetch_resource_owner_details(token).await?;

		Ok(KangarooResourceOwner::from(details))
	}
}
