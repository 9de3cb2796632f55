//! Scope entry parsing and identity

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::atom::Atom;

/// Separator between a namespace and its scope within one token
pub const NAMESPACE_SEPARATOR: char = ':';

/// A single parsed grant: an optionally-namespaced scope
///
/// An entry keeps the token text it was parsed from so serialized output
/// round-trips caller casing, but its identity is the normalized
/// `(namespace, scope)` pair alone. `None` is the no-namespace sentinel;
/// no normalized user namespace can collide with it.
#[derive(Debug, Clone)]
pub struct ScopeEntry {
    namespace: Option<Atom>,
    scope: Atom,
    source: String,
}

impl ScopeEntry {
    /// Parses one whitespace-free token
    ///
    /// The token is split at the FIRST `:` only: `ns:read` is the scope
    /// `read` in namespace `ns`, while `a:b:c` is the scope `b:c` in
    /// namespace `a`. A token with no separator is a bare (global) scope.
    pub fn parse(token: &str) -> Self {
        match token.split_once(NAMESPACE_SEPARATOR) {
            Some((namespace, scope)) => Self {
                namespace: Some(Atom::new(namespace)),
                scope: Atom::new(scope),
                source: token.to_string(),
            },
            None => Self {
                namespace: None,
                scope: Atom::new(token),
                source: token.to_string(),
            },
        }
    }

    /// The normalized namespace, or `None` for a bare scope
    pub fn namespace(&self) -> Option<&Atom> {
        self.namespace.as_ref()
    }

    /// The normalized scope
    pub fn scope(&self) -> &Atom {
        &self.scope
    }

    /// The original token text
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl PartialEq for ScopeEntry {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.scope == other.scope
    }
}

impl Eq for ScopeEntry {}

impl Hash for ScopeEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.scope.hash(state);
    }
}

impl fmt::Display for ScopeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
