//! Provider configuration (data) consumed by the generic [`ProviderClient`](crate::client::ProviderClient).
//!
//! `config` exposes validated endpoint/scope metadata ([`ProviderConfig`]) and its serde-friendly
//! builder, `options` holds the per-client credentials and provider-specific options, and
//! `kangaroo` ships the canonical Kangaroo Rewards preset.

pub mod config;
pub mod kangaroo;
pub mod options;

pub use config::*;
pub use kangaroo::*;
pub use options::*;
