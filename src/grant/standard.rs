//! RFC 6749 grants shared by every provider.

// self
use crate::grant::Grant;

/// Authorization Code grant (RFC 6749 §4.1).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuthorizationCode;
impl Grant for AuthorizationCode {
	fn name(&self) -> &'static str {
		"authorization_code"
	}

	fn required_request_parameters(&self) -> &'static [&'static str] {
		&["code"]
	}
}

/// Client Credentials grant (RFC 6749 §4.4).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClientCredentials;
impl Grant for ClientCredentials {
	fn name(&self) -> &'static str {
		"client_credentials"
	}

	fn required_request_parameters(&self) -> &'static [&'static str] {
		&[]
	}
}

/// Resource Owner Password Credentials grant (RFC 6749 §4.3).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Password;
impl Grant for Password {
	fn name(&self) -> &'static str {
		"password"
	}

	fn required_request_parameters(&self) -> &'static [&'static str] {
		&["username", "password"]
	}
}

/// Refresh Token grant (RFC 6749 §6).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshToken;
impl Grant for RefreshToken {
	fn name(&self) -> &'static str {
		"refresh_token"
	}

	fn required_request_parameters(&self) -> &'static [&'static str] {
		&["refresh_token"]
	}
}
