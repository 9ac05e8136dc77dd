//! # Values, shallow equality, and stable identity
//!
//! folio-core holds the leaf primitives the composition engine is built on:
//!
//! - `Value` — opaque dynamic value; aggregate variants are `Rc`-backed so
//!   a clone shares identity with its source.
//! - `ShallowEq` — the one-level equality used for every reuse decision.
//! - `StableCache` — keyed store whose `get_or_set` hands back the stored
//!   value when the candidate is shallow-equal, preserving identity.
//! - `merge_by_key` — keyed list reconciliation that substitutes previous
//!   items wherever the fresh item is unchanged.
//!
//! The contract running through all of it:
//!
//! ```rust
//! use folio_core::*;
//!
//! let mut cache = StableCache::new();
//! let first = cache.get_or_set("item", Value::list(vec![Value::Int(1)]));
//!
//! // A freshly built but shallow-equal value observes the stored identity.
//! let second = cache.get_or_set("item", Value::list(vec![Value::Int(1)]));
//! assert!(first.same_ref(&second));
//! ```
//!
//! Equality is deliberately *not* semantic: two different callbacks that
//! compute the same thing are unequal, and a nested map only matches itself.
//! Unequal at worst loses a caching opportunity; it never reuses a stale
//! identity.

pub mod cache;
pub mod equality;
pub mod error;
pub mod merge;
pub mod tests;
pub mod value;

pub use cache::*;
pub use equality::*;
pub use error::*;
pub use merge::*;
pub use value::*;
