//! Scope lists and their set algebra

use std::fmt;
use std::ops::{Add, BitAnd, Sub};

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::atom::Atom;
use crate::scope::types::ScopeEntry;

/// Separator between tokens in the serialized form
pub const SCOPE_SEPARATOR: &str = " ";

/// An immutable, deduplicated set of scope grants
///
/// A list is built from the whitespace-separated token string carried in a
/// token claim and keeps its entries in first-occurrence order. Every
/// operation returns a fresh list; nothing mutates in place, so shared
/// instances are safe to read concurrently.
///
/// Containment applies the global-fallback rule: a scope granted without a
/// namespace satisfies a request for that scope in ANY namespace, while a
/// namespaced grant satisfies only its own namespace.
///
/// # Examples
///
/// ```
/// use scopekit::ScopeList;
///
/// let granted = ScopeList::parse("read write ns1:sell");
/// assert!(granted.contains("write"));
/// assert!(granted.contains_in("ns1", "sell"));
/// assert!(granted.contains_in("ns2", "read"));
/// assert!(!granted.contains_in("ns2", "sell"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScopeList {
    entries: Vec<ScopeEntry>,
}

impl ScopeList {
    /// Parses a whitespace-separated scope string
    ///
    /// Empty tokens produced by repeated whitespace are skipped, and
    /// duplicate entries keep their first occurrence, tolerating loosely
    /// formatted upstream claims. An empty string yields the empty list.
    pub fn parse(input: &str) -> Self {
        let mut list = Self::default();
        for token in input.split_whitespace() {
            list.push(ScopeEntry::parse(token));
        }
        list
    }

    /// Appends an entry unless an equal one is already present
    fn push(&mut self, entry: ScopeEntry) {
        if !self.entries.contains(&entry) {
            self.entries.push(entry);
        }
    }

    /// Exact lookup of the normalized `(namespace, scope)` pair
    fn find(&self, namespace: Option<&Atom>, scope: &Atom) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.namespace() == namespace && entry.scope() == scope)
    }

    /// Containment with the global-fallback rule applied
    pub(crate) fn lookup(&self, namespace: Option<&Atom>, scope: &Atom) -> bool {
        match namespace {
            Some(_) => self.find(namespace, scope) || self.find(None, scope),
            None => self.find(None, scope),
        }
    }

    /// True iff the bare (unnamespaced) scope was granted
    pub fn contains(&self, scope: impl fmt::Display) -> bool {
        self.lookup(None, &Atom::new(scope))
    }

    /// True iff the scope was granted in this namespace, or globally
    ///
    /// An unnamespaced grant of the scope satisfies the request for every
    /// namespace.
    pub fn contains_in(&self, namespace: impl fmt::Display, scope: impl fmt::Display) -> bool {
        self.lookup(Some(&Atom::new(namespace)), &Atom::new(scope))
    }

    /// Drops namespaced entries whose scope is also granted bare
    ///
    /// Keeping `ns1:foo` next to `foo` changes no answer, so the entry is
    /// removed. Order-preserving, deterministic for any input order, and
    /// idempotent.
    pub fn condense(&self) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|entry| entry.namespace().is_none() || !self.find(None, entry.scope()))
            .cloned()
            .collect();
        Self { entries }
    }

    /// Set union: both sides' entries, deduplicated and condensed
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for entry in &other.entries {
            merged.push(entry.clone());
        }
        merged.condense()
    }

    /// Set difference
    ///
    /// An entry is dropped when the right side holds it exactly, or holds
    /// its bare form: a bare scope on the right revokes namespaced and
    /// bare occurrences alike. The result is not condensed.
    pub fn difference(&self, other: &Self) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|entry| {
                !(other.find(entry.namespace(), entry.scope()) || other.find(None, entry.scope()))
            })
            .cloned()
            .collect();
        Self { entries }
    }

    /// Set intersection honoring the fallback rule from both sides
    ///
    /// `{foo:bar} & {bar}` keeps `foo:bar`: the bare grant on one side
    /// covers the namespaced grant on the other, whichever side holds
    /// which. The result is condensed.
    pub fn intersection(&self, other: &Self) -> Self {
        self.difference(&self.difference(other))
            .union(&other.difference(&other.difference(self)))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no scopes were granted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = &ScopeEntry> {
        self.entries.iter()
    }
}

impl PartialEq for ScopeList {
    /// Semantic equality: condensed entry sets compared as sets
    fn eq(&self, other: &Self) -> bool {
        let ours = self.condense();
        let theirs = other.condense();
        ours.entries.len() == theirs.entries.len()
            && ours
                .entries
                .iter()
                .all(|entry| theirs.find(entry.namespace(), entry.scope()))
    }
}

impl Eq for ScopeList {}

impl fmt::Display for ScopeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(SCOPE_SEPARATOR)?;
            }
            f.write_str(entry.source())?;
        }
        Ok(())
    }
}

impl From<&str> for ScopeList {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for ScopeList {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&ScopeList> for ScopeList {
    fn from(value: &ScopeList) -> Self {
        value.clone()
    }
}

impl Add<&ScopeList> for &ScopeList {
    type Output = ScopeList;

    fn add(self, other: &ScopeList) -> ScopeList {
        self.union(other)
    }
}

impl Add for ScopeList {
    type Output = ScopeList;

    fn add(self, other: ScopeList) -> ScopeList {
        self.union(&other)
    }
}

impl Sub<&ScopeList> for &ScopeList {
    type Output = ScopeList;

    fn sub(self, other: &ScopeList) -> ScopeList {
        self.difference(other)
    }
}

impl Sub for ScopeList {
    type Output = ScopeList;

    fn sub(self, other: ScopeList) -> ScopeList {
        self.difference(&other)
    }
}

impl BitAnd<&ScopeList> for &ScopeList {
    type Output = ScopeList;

    fn bitand(self, other: &ScopeList) -> ScopeList {
        self.intersection(other)
    }
}

impl BitAnd for ScopeList {
    type Output = ScopeList;

    fn bitand(self, other: ScopeList) -> ScopeList {
        self.intersection(&other)
    }
}

impl Serialize for ScopeList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScopeList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
