//! Grant name resolution against static constructor tables.
//!
//! A grant name is PascalCased (`authorization_code` becomes `AuthorizationCode`) and looked up
//! in one of two namespaces: names listed in [`CUSTOM_GRANT_OVERRIDES`] go to the Kangaroo
//! grant set, everything else goes to the standard RFC 6749 set. A miss in the consulted
//! namespace is an [`GrantError::UnknownGrant`]; the other namespace is never consulted.

// self
use crate::{
	_prelude::*,
	error::GrantError,
	grant::{
		AuthorizationCode, ClientCredentials, Facebook, Google, Grant, Password, RefreshToken,
	},
};

/// Grant names routed to the Kangaroo grant set instead of the standard one.
pub const CUSTOM_GRANT_OVERRIDES: &[&str] = &["facebook"];

type GrantConstructor = fn() -> Arc<dyn Grant>;

const STANDARD_GRANTS: &[(&str, GrantConstructor)] = &[
	("AuthorizationCode", construct::<AuthorizationCode>),
	("ClientCredentials", construct::<ClientCredentials>),
	("Password", construct::<Password>),
	("RefreshToken", construct::<RefreshToken>),
];
const CUSTOM_GRANTS: &[(&str, GrantConstructor)] =
	&[("Facebook", construct::<Facebook>), ("Google", construct::<Google>)];

/// Namespace a grant type identifier is looked up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GrantNamespace {
	/// RFC 6749 grants shared by every provider.
	Standard,
	/// Kangaroo-specific grants.
	Custom,
}
impl GrantNamespace {
	/// Returns a stable label used when qualifying type identifiers.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantNamespace::Standard => "standard",
			GrantNamespace::Custom => "kangaroo",
		}
	}

	/// Picks the namespace consulted for a grant name.
	pub fn for_grant(name: &str) -> Self {
		if CUSTOM_GRANT_OVERRIDES.contains(&name) {
			GrantNamespace::Custom
		} else {
			GrantNamespace::Standard
		}
	}

	fn table(self) -> &'static [(&'static str, GrantConstructor)] {
		match self {
			GrantNamespace::Standard => STANDARD_GRANTS,
			GrantNamespace::Custom => CUSTOM_GRANTS,
		}
	}
}
impl Display for GrantNamespace {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome of a successful lookup; [`instantiate`](Self::instantiate) builds the handler.
#[derive(Clone)]
pub struct ResolvedGrant {
	/// Grant name as supplied by the caller.
	pub name: String,
	/// Namespace the type was found in.
	pub namespace: GrantNamespace,
	/// Unqualified PascalCase type identifier.
	pub type_name: String,
	constructor: GrantConstructor,
}
impl ResolvedGrant {
	/// Type identifier qualified by its namespace, e.g. `standard::AuthorizationCode`.
	pub fn qualified_type_name(&self) -> String {
		qualify(self.namespace, &self.type_name)
	}

	/// Builds a fresh handler instance.
	pub fn instantiate(&self) -> Arc<dyn Grant> {
		(self.constructor)()
	}
}
impl Debug for ResolvedGrant {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ResolvedGrant")
			.field("name", &self.name)
			.field("namespace", &self.namespace)
			.field("type_name", &self.type_name)
			.finish()
	}
}

/// PascalCases a grant name: `-`, `_` and spaces act as word separators and are dropped, the
/// first character of each word is upper-cased (ASCII only), and characters inside a word keep
/// their case. Other word-breaking whitespace (tab, newline, carriage return, vertical tab,
/// form feed) starts a new word but is kept.
pub fn grant_type_name(name: &str) -> String {
	let mut type_name = String::with_capacity(name.len());
	let mut word_start = true;

	for ch in name.chars() {
		match ch {
			'-' | '_' | ' ' => word_start = true,
			'\t' | '\n' | '\r' | '\x0b' | '\x0c' => {
				type_name.push(ch);

				word_start = true;
			},
			_ if word_start => {
				type_name.push(ch.to_ascii_uppercase());

				word_start = false;
			},
			_ => type_name.push(ch),
		}
	}

	type_name
}

/// Resolves a grant name to a constructible handler type.
pub fn resolve(name: &str) -> Result<ResolvedGrant, GrantError> {
	let namespace = GrantNamespace::for_grant(name);
	let type_name = grant_type_name(name);
	let constructor = namespace
		.table()
		.iter()
		.find(|(candidate, _)| *candidate == type_name)
		.map(|(_, constructor)| *constructor)
		.ok_or_else(|| GrantError::UnknownGrant {
			type_name: qualify(namespace, &type_name),
			name: name.to_owned(),
		})?;

	Ok(ResolvedGrant { name: name.to_owned(), namespace, type_name, constructor })
}

fn construct<G>() -> Arc<dyn Grant>
where
	G: 'static + Default + Grant,
{
	Arc::new(G::default())
}

fn qualify(namespace: GrantNamespace, type_name: &str) -> String {
	format!("{namespace}::{type_name}")
}
