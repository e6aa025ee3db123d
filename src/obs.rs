//! Optional observability helpers for provider requests.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_kangaroo.request` with the `request`
//!   (operation) and `stage` (call site) fields, plus `debug` events whenever a grant handler is
//!   registered.
//! - Enable `metrics` to increment the `oauth2_kangaroo_request_total` counter for every
//!   attempt/success/failure, labeled by `request` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Provider operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
	/// Token endpoint exchange.
	AccessToken,
	/// Resource-owner details fetch.
	ResourceOwner,
}
impl RequestKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestKind::AccessToken => "access_token",
			RequestKind::ResourceOwner => "resource_owner",
		}
	}
}
impl Display for RequestKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
