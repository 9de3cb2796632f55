//! # scopekit
//!
//! Scope set-algebra core for token-based authorization decisions.
//!
//! A decoded access token carries a mapping from resource id to a
//! whitespace-separated scope string. This crate is the decision core that
//! answers containment queries over that mapping and composes grants from
//! multiple sources while keeping them in canonical, minimal form. It
//! performs no I/O and knows nothing about tokens themselves; unpacking
//! claims, verifying signatures, and serving HTTP belong to the layers
//! above.
//!
//! ## Features
//!
//! - **Normalized atoms**: ids, namespaces, and scopes are lower-cased
//!   and hyphen-folded at every entry point, so `123`/`"123"` and
//!   `"Top-Up"`/`"top_up"` compare equal
//! - **Namespace fallback**: an unnamespaced grant of a scope satisfies
//!   a request for that scope in any namespace
//! - **Wildcard resource**: the reserved `"*"` id grants additively to
//!   every other resource
//! - **Set algebra**: union, difference, intersection, and condensation
//!   over scope lists and whole resource maps, with redundancy
//!   elimination
//!
//! ## Example
//!
//! ```rust
//! use scopekit::ResourceMap;
//!
//! let claim = ResourceMap::new([
//!     ("*", "peek"),
//!     ("123", "admin ns1:read"),
//! ]);
//!
//! assert!(claim.contains_scope(123, "admin"));
//! assert!(claim.contains_scope(789, "peek"));
//! assert!(claim.contains_scope_in(123, "ns1", "read"));
//! assert!(!claim.contains(789).unwrap());
//! ```
//!
//! All values are immutable; the algebra allocates fresh results, so
//! constructed lists and maps are safe to share across threads. The few
//! in-place mutators take `&mut self` and are therefore confined to the
//! exclusive owner by the borrow checker.

pub mod atom;
pub mod error;
pub mod resource;
pub mod scope;

// Re-export commonly used types
pub use atom::Atom;
pub use error::{QueryError, Result};
pub use resource::{ResourceMap, WILDCARD_KEY};
pub use scope::{ScopeEntry, ScopeList};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
