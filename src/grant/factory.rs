//! Per-client grant registry with lazy, singleton-per-name registration.

// self
use crate::{
	_prelude::*,
	error::GrantError,
	grant::{Grant, resolver},
	obs,
};

/// Registry mapping grant names to shared handler instances.
///
/// Each client owns one registry. The first lookup of a name resolves it through
/// [`resolver::resolve`] and caches the handler; later lookups of the same name return the
/// identical `Arc`. Resolution and insertion happen under one write lock, so concurrent first
/// lookups of a name never construct two handlers.
#[derive(Default)]
pub struct GrantFactory {
	grants: RwLock<HashMap<String, Arc<dyn Grant>>>,
}
impl GrantFactory {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers (or replaces) the handler used for `name`.
	pub fn set_grant(&self, name: impl Into<String>, grant: Arc<dyn Grant>) -> &Self {
		self.grants.write().insert(name.into(), grant);

		self
	}

	/// Returns the handler registered for `name`, resolving and caching it on first use.
	pub fn get_grant(&self, name: &str) -> Result<Arc<dyn Grant>, GrantError> {
		if let Some(grant) = self.grants.read().get(name) {
			return Ok(grant.clone());
		}

		let mut grants = self.grants.write();

		if let Some(grant) = grants.get(name) {
			return Ok(grant.clone());
		}

		let resolved = resolver::resolve(name)?;
		let grant = resolved.instantiate();

		obs::record_grant_registration(name, &resolved.qualified_type_name());
		grants.insert(name.to_owned(), grant.clone());

		Ok(grant)
	}

	/// Returns true when a handler is already registered for `name`.
	pub fn is_registered(&self, name: &str) -> bool {
		self.grants.read().contains_key(name)
	}

	/// Number of registered handlers.
	pub fn len(&self) -> usize {
		self.grants.read().len()
	}

	/// Returns true if no handler has been registered yet.
	pub fn is_empty(&self) -> bool {
		self.grants.read().is_empty()
	}
}
impl Debug for GrantFactory {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let grants = self.grants.read();
		let mut names = grants.keys().map(String::as_str).collect::<Vec<_>>();

		names.sort_unstable();

		f.debug_struct("GrantFactory").field("grants", &names).finish()
	}
}
