//! Kangaroo-specific social sign-in grants.
//!
//! Both grants exchange a token minted by a third-party identity provider for a Kangaroo
//! access token, in the shape of the password grant.

// self
use crate::grant::Grant;

/// Facebook sign-in grant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Facebook;
impl Grant for Facebook {
	fn name(&self) -> &'static str {
		"facebook"
	}

	fn required_request_parameters(&self) -> &'static [&'static str] {
		&["username", "facebook_token"]
	}
}

/// Google sign-in grant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Google;
impl Grant for Google {
	fn name(&self) -> &'static str {
		"google"
	}

	fn required_request_parameters(&self) -> &'static [&'static str] {
		&["username", "google_token"]
	}
}
