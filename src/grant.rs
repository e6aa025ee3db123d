//! Grant handlers and the per-client grant registry.
//!
//! `standard` holds the RFC 6749 grants every provider understands, `custom` holds the
//! Kangaroo-specific social grants. `resolver` turns a grant name into a handler using a
//! PascalCase naming convention and a static constructor table, and `factory` caches one
//! handler per name for the lifetime of the owning client.

pub mod custom;
pub mod factory;
pub mod resolver;
pub mod standard;

pub use custom::*;
pub use factory::*;
pub use resolver::*;
pub use standard::*;

// self
use crate::{_prelude::*, error::GrantError};

/// Request parameters exchanged with the token endpoint.
pub type GrantParameters = BTreeMap<String, String>;

/// Grant handler capable of preparing token endpoint parameters.
///
/// Handlers are stateless; a registry hands out shared `Arc<dyn Grant>` instances, so
/// implementors must be `Send + Sync`.
pub trait Grant: Send + Sync {
	/// Wire value sent as `grant_type`.
	fn name(&self) -> &'static str;

	/// Parameters that must be present once defaults and caller options are merged.
	fn required_request_parameters(&self) -> &'static [&'static str];

	/// Merges caller options over `defaults`, stamps `grant_type`, and verifies that every
	/// required parameter is present.
	fn prepare_request_parameters(
		&self,
		defaults: GrantParameters,
		options: &GrantParameters,
	) -> Result<GrantParameters, GrantError> {
		let mut provided = defaults;

		provided.insert("grant_type".into(), self.name().into());
		provided.extend(options.iter().map(|(key, value)| (key.clone(), value.clone())));

		for parameter in self.required_request_parameters().iter().copied() {
			if !provided.contains_key(parameter) {
				return Err(GrantError::MissingParameter { grant: self.name(), parameter });
			}
		}

		Ok(provided)
	}
}
impl Debug for dyn Grant {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Grant").field(&self.name()).finish()
	}
}
impl Display for dyn Grant {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.name())
	}
}
