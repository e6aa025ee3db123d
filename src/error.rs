//! Crate-level error types shared by grants, provider configuration, and the client.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Grant lookup or parameter validation failure.
	#[error(transparent)]
	Grant(#[from] GrantError),
	/// Identity provider answered with a non-success status.
	#[error(transparent)]
	IdentityProvider(#[from] IdentityProviderError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Provider answered with a payload the client cannot interpret.
	#[error("Provider returned an unexpected response: {message}.")]
	UnexpectedResponse {
		/// Summary of what was wrong with the payload.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint answered with JSON that does not describe an access token.
	#[error("Token endpoint returned a malformed token response.")]
	TokenResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// The `state` returned through the redirect does not match the issued one.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}

/// Configuration and validation failures raised while building providers and clients.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required option or endpoint was not supplied.
	#[error("Required option not defined: {option}.")]
	MissingConfiguration {
		/// Option name as it appears in configuration sources.
		option: &'static str,
	},
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Scope separators must be printable.
	#[error("Scope separator must be a printable character.")]
	InvalidScopeSeparator {
		/// Invalid separator that was supplied.
		separator: char,
	},
	/// A URL could not be parsed or joined.
	#[error("Option `{option}` is not a valid URL.")]
	InvalidUrl {
		/// Option name as it appears in configuration sources.
		option: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Grant resolution and request-parameter failures.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum GrantError {
	/// The grant name did not resolve to a known grant handler.
	#[error("Grant `{type_name}` must be a known grant handler (requested `{name}`).")]
	UnknownGrant {
		/// Qualified type identifier that was looked up.
		type_name: String,
		/// Grant name as supplied by the caller.
		name: String,
	},
	/// A parameter required by the grant was not supplied.
	#[error("Required parameter not passed for the {grant} grant: {parameter}.")]
	MissingParameter {
		/// Wire name of the grant.
		grant: &'static str,
		/// Missing parameter name.
		parameter: &'static str,
	},
}

/// Non-success answer from the identity provider.
#[derive(Clone, Debug, ThisError)]
#[error("Identity provider responded with HTTP {status}: {message}.")]
pub struct IdentityProviderError {
	/// Message extracted from the response body, or the HTTP reason phrase.
	pub message: String,
	/// HTTP status code returned by the provider.
	pub status: u16,
	/// Parsed response body.
	pub body: JsonValue,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
	/// HTTP client failure that carries only a message.
	#[error("HTTP client error occurred while calling the provider: {message}.")]
	Other {
		/// Message supplied by the HTTP client.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
