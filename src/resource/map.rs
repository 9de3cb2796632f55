//! Resource-to-scope grant mapping with a wildcard resource

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, BitAnd, Sub};

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, trace};

use crate::atom::Atom;
use crate::error::{QueryError, Result};
use crate::scope::ScopeList;

/// Reserved resource id whose grants apply to every other resource
pub const WILDCARD_KEY: &str = "*";

/// Immutable mapping from resource id to granted scopes
///
/// This is the shape an unpacked token claim takes: every resource the
/// caller was granted anything on, each with its own [`ScopeList`]. The
/// reserved `"*"` id is held apart from the ordinary mapping; its list
/// grants additively to every resource and never shows up in enumeration.
///
/// Equality is semantic: two maps are equal when every resource carries
/// semantically equal scope lists and the wildcards match, regardless of
/// entry order or original token casing.
///
/// The algebra operators allocate fresh maps. The only in-place methods,
/// [`insert`](Self::insert) and [`except_mut`](Self::except_mut), take
/// `&mut self`, so exclusive ownership of a freshly built map is enforced
/// by the borrow checker before it can be shared.
///
/// # Examples
///
/// ```
/// use scopekit::ResourceMap;
///
/// let claim = ResourceMap::new([("*", "peek"), ("123", "admin")]);
/// assert!(claim.contains_scope(123, "admin"));
/// assert!(claim.contains_scope(789, "peek"));
/// assert!(!claim.contains(789).unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceMap {
    resources: BTreeMap<Atom, ScopeList>,
    wildcard: ScopeList,
}

impl ResourceMap {
    /// Builds a map from `(resource id, scopes)` pairs
    ///
    /// Ids are normalized; a `"*"` entry becomes the wildcard list. When
    /// two pairs normalize to the same id the later one wins.
    pub fn new<I, K, V>(grants: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: fmt::Display,
        V: Into<ScopeList>,
    {
        let mut map = Self::default();
        for (id, scopes) in grants {
            map.insert(id, scopes);
        }
        map
    }

    /// Replaces the grants for a resource
    ///
    /// `"*"` routes to the wildcard list. Requires exclusive ownership,
    /// as does [`except_mut`](Self::except_mut).
    pub fn insert(&mut self, resource: impl fmt::Display, scopes: impl Into<ScopeList>) {
        let id = Atom::new(resource);
        let list = scopes.into();
        if id.as_str() == WILDCARD_KEY {
            self.wildcard = list;
        } else {
            self.resources.insert(id, list);
        }
    }

    /// The scope list for a resource, or the wildcard list for `"*"`
    pub fn get(&self, resource: impl fmt::Display) -> Option<&ScopeList> {
        let id = Atom::new(resource);
        if id.as_str() == WILDCARD_KEY {
            Some(&self.wildcard)
        } else {
            self.resources.get(&id)
        }
    }

    /// The wildcard scope list
    pub fn wildcard(&self) -> &ScopeList {
        &self.wildcard
    }

    /// True iff the resource id has an explicit entry
    ///
    /// The wildcard is not consulted: key existence says whether this
    /// exact resource was granted anything, not whether some scope would
    /// be satisfied. Asking this of `"*"` itself is a contract violation
    /// and yields [`QueryError::UnscopedWildcard`].
    pub fn contains(&self, resource: impl fmt::Display) -> Result<bool> {
        let id = Atom::new(resource);
        if id.as_str() == WILDCARD_KEY {
            return Err(QueryError::UnscopedWildcard);
        }
        Ok(self.resources.contains_key(&id))
    }

    /// True iff the bare scope is granted on the resource
    ///
    /// Wildcard grants are additive: the resource's own list and the
    /// wildcard list both satisfy the query. A resource with no entry
    /// falls back to the wildcard alone.
    pub fn contains_scope(&self, resource: impl fmt::Display, scope: impl fmt::Display) -> bool {
        self.lookup(&Atom::new(resource), None, &Atom::new(scope))
    }

    /// True iff the scope is granted on the resource within the namespace
    ///
    /// Applies the same wildcard additivity as
    /// [`contains_scope`](Self::contains_scope) and the namespace
    /// fallback of [`ScopeList::contains_in`].
    pub fn contains_scope_in(
        &self,
        resource: impl fmt::Display,
        namespace: impl fmt::Display,
        scope: impl fmt::Display,
    ) -> bool {
        self.lookup(
            &Atom::new(resource),
            Some(&Atom::new(namespace)),
            &Atom::new(scope),
        )
    }

    fn lookup(&self, id: &Atom, namespace: Option<&Atom>, scope: &Atom) -> bool {
        let granted = if id.as_str() == WILDCARD_KEY {
            self.wildcard.lookup(namespace, scope)
        } else if let Some(own) = self.resources.get(id) {
            own.lookup(namespace, scope) || self.wildcard.lookup(namespace, scope)
        } else {
            self.wildcard.lookup(namespace, scope)
        };
        trace!(resource = %id, scope = %scope, granted, "resource scope lookup");
        granted
    }

    /// All ordinary resource ids; the wildcard never appears
    pub fn resources(&self) -> Vec<&Atom> {
        self.resources.keys().collect()
    }

    /// Ordinary ids on which the bare scope is granted
    ///
    /// An id qualifies when its own list or the wildcard satisfies the
    /// query, so a non-empty wildcard grant admits every id.
    pub fn resources_with_scope(&self, scope: impl fmt::Display) -> Vec<&Atom> {
        self.filter_resources(None, &Atom::new(scope))
    }

    /// Ordinary ids on which the scope is granted within the namespace
    pub fn resources_with_scope_in(
        &self,
        namespace: impl fmt::Display,
        scope: impl fmt::Display,
    ) -> Vec<&Atom> {
        self.filter_resources(Some(&Atom::new(namespace)), &Atom::new(scope))
    }

    fn filter_resources(&self, namespace: Option<&Atom>, scope: &Atom) -> Vec<&Atom> {
        self.resources
            .iter()
            .filter(|(_, list)| {
                list.lookup(namespace, scope) || self.wildcard.lookup(namespace, scope)
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Returns a copy with the given ids removed from the ordinary map
    ///
    /// The wildcard list is untouched.
    pub fn except<I, K>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: fmt::Display,
    {
        let mut trimmed = self.clone();
        trimmed.except_mut(ids);
        trimmed
    }

    /// Removes the given ids from the ordinary map in place
    ///
    /// Requires exclusive ownership; use [`except`](Self::except) on a
    /// shared instance.
    pub fn except_mut<I, K>(&mut self, ids: I) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: fmt::Display,
    {
        for id in ids {
            self.resources.remove(Atom::new(id).as_str());
        }
        self
    }

    /// Rewrites every resource list without the grants the wildcard covers
    ///
    /// The wildcard is condensed first; each resource list then drops the
    /// entries the condensed wildcard already grants. Resource ids are
    /// kept even when nothing of their list survives.
    pub fn condense(&self) -> Self {
        let wildcard = self.wildcard.condense();
        let resources = self
            .resources
            .iter()
            .map(|(id, list)| (id.clone(), list.difference(&wildcard)))
            .collect();
        debug!(wildcard = %wildcard, "condensed resource map");
        Self { resources, wildcard }
    }

    /// Per-resource union of both maps, condensed
    ///
    /// Every id from either side appears in the result with the union of
    /// both sides' lists for it; the wildcards union as well.
    pub fn union(&self, other: &Self) -> Self {
        let empty = ScopeList::default();
        let mut resources = BTreeMap::new();
        for id in self.resources.keys().chain(other.resources.keys()) {
            if resources.contains_key(id.as_str()) {
                continue;
            }
            let ours = self.resources.get(id).unwrap_or(&empty);
            let theirs = other.resources.get(id).unwrap_or(&empty);
            resources.insert(id.clone(), ours.union(theirs));
        }
        let wildcard = self.wildcard.union(&other.wildcard);
        Self { resources, wildcard }.condense()
    }

    /// Per-resource subtraction
    ///
    /// Each of the left side's lists loses what the right side grants for
    /// that id, through its explicit list and its wildcard alike; the
    /// wildcards subtract directly. The result is not condensed.
    pub fn difference(&self, other: &Self) -> Self {
        let resources = self
            .resources
            .iter()
            .map(|(id, list)| {
                let revoked = match other.resources.get(id) {
                    Some(theirs) => other.wildcard.union(theirs),
                    None => other.wildcard.clone(),
                };
                (id.clone(), list.difference(&revoked))
            })
            .collect();
        let wildcard = self.wildcard.difference(&other.wildcard);
        Self { resources, wildcard }
    }

    /// Per-resource intersection with wildcard folding
    ///
    /// When both sides list a resource, each list is widened by its own
    /// side's wildcard before intersecting; a resource listed on only one
    /// side intersects against the other side's wildcard alone. The
    /// wildcards intersect directly. The result is condensed.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut resources = BTreeMap::new();
        for id in self.resources.keys().chain(other.resources.keys()) {
            if resources.contains_key(id.as_str()) {
                continue;
            }
            let shared = match (self.resources.get(id), other.resources.get(id)) {
                (Some(ours), Some(theirs)) => ours
                    .union(&self.wildcard)
                    .intersection(&theirs.union(&other.wildcard)),
                (Some(ours), None) => ours.intersection(&other.wildcard),
                (None, Some(theirs)) => theirs.intersection(&self.wildcard),
                (None, None) => continue,
            };
            resources.insert(id.clone(), shared);
        }
        let wildcard = self.wildcard.intersection(&other.wildcard);
        Self { resources, wildcard }.condense()
    }

    /// Number of ordinary resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// True when no ordinary resource has an entry
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Iterates ordinary `(id, list)` entries in id order
    pub fn iter(&self) -> impl Iterator<Item = (&Atom, &ScopeList)> {
        self.resources.iter()
    }

    /// Serializable claim shape: resource id to scope string
    ///
    /// The wildcard id appears only when its list is non-empty.
    pub fn as_map(&self) -> BTreeMap<String, String> {
        let mut out: BTreeMap<String, String> = self
            .resources
            .iter()
            .map(|(id, list)| (id.to_string(), list.to_string()))
            .collect();
        if !self.wildcard.is_empty() {
            out.insert(WILDCARD_KEY.to_string(), self.wildcard.to_string());
        }
        out
    }
}

impl Add<&ResourceMap> for &ResourceMap {
    type Output = ResourceMap;

    fn add(self, other: &ResourceMap) -> ResourceMap {
        self.union(other)
    }
}

impl Add for ResourceMap {
    type Output = ResourceMap;

    fn add(self, other: ResourceMap) -> ResourceMap {
        self.union(&other)
    }
}

impl Sub<&ResourceMap> for &ResourceMap {
    type Output = ResourceMap;

    fn sub(self, other: &ResourceMap) -> ResourceMap {
        self.difference(other)
    }
}

impl Sub for ResourceMap {
    type Output = ResourceMap;

    fn sub(self, other: ResourceMap) -> ResourceMap {
        self.difference(&other)
    }
}

impl BitAnd<&ResourceMap> for &ResourceMap {
    type Output = ResourceMap;

    fn bitand(self, other: &ResourceMap) -> ResourceMap {
        self.intersection(other)
    }
}

impl BitAnd for ResourceMap {
    type Output = ResourceMap;

    fn bitand(self, other: ResourceMap) -> ResourceMap {
        self.intersection(&other)
    }
}

impl Serialize for ResourceMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = self.as_map();
        let mut state = serializer.serialize_map(Some(entries.len()))?;
        for (id, scopes) in &entries {
            state.serialize_entry(id, scopes)?;
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for ResourceMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}
