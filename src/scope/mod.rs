//! Scope grants and their set algebra
//!
//! A scope list is parsed from the whitespace-separated token form carried
//! in access-token claims: each token is either `scope` or
//! `namespace:scope`, split at the first colon. Lists compose with union,
//! difference, and intersection, and condense to a canonical minimal form.
//!
//! # Examples
//!
//! ```
//! use scopekit::ScopeList;
//!
//! let admin = ScopeList::parse("read write admin");
//! let readonly = ScopeList::parse("read");
//! assert_eq!(admin.intersection(&readonly), readonly);
//! ```

mod list;
mod types;


pub use list::{ScopeList, SCOPE_SEPARATOR};
pub use types::{ScopeEntry, NAMESPACE_SEPARATOR};
