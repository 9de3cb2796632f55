//! Property tests for the scope algebra
//!
//! Random scope strings are drawn from a small alphabet so that entries
//! collide often enough to exercise deduplication, condensation, and the
//! namespace-fallback rule.

use proptest::prelude::*;
use scopekit::{ResourceMap, ScopeList};

fn token_from(scope_pattern: &'static str) -> impl Strategy<Value = String> {
    prop_oneof![
        scope_pattern,
        ("[a-z][a-z0-9]{0,3}", scope_pattern).prop_map(|(ns, scope)| format!("{}:{}", ns, scope)),
    ]
}

fn scope_string_from(scope_pattern: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(token_from(scope_pattern), 0..8).prop_map(|tokens| tokens.join(" "))
}

fn scope_string() -> impl Strategy<Value = String> {
    scope_string_from("[a-d][a-z0-9_]{0,5}")
}

proptest! {
    #[test]
    fn prop_bare_grants_satisfy_every_namespace(
        scopes in scope_string(),
        namespace in "[a-z][a-z0-9]{0,5}",
    ) {
        let granted = ScopeList::parse(&scopes);
        for entry in granted.iter().filter(|e| e.namespace().is_none()) {
            prop_assert!(granted.contains_in(&namespace, entry.scope()));
        }
    }

    #[test]
    fn prop_condense_is_idempotent_and_semantically_neutral(scopes in scope_string()) {
        let granted = ScopeList::parse(&scopes);
        let once = granted.condense();
        prop_assert_eq!(once.condense(), once.clone());
        prop_assert_eq!(once, granted);
    }

    #[test]
    fn prop_union_contains_both_operands(a in scope_string(), b in scope_string()) {
        let left = ScopeList::parse(&a);
        let right = ScopeList::parse(&b);
        let merged = left.union(&right);
        for entry in left.iter().chain(right.iter()) {
            match entry.namespace() {
                Some(ns) => prop_assert!(merged.contains_in(ns, entry.scope())),
                None => prop_assert!(merged.contains(entry.scope())),
            }
        }
    }

    #[test]
    fn prop_union_with_empty_is_identity(scopes in scope_string()) {
        let granted = ScopeList::parse(&scopes);
        prop_assert_eq!(granted.union(&ScopeList::default()), granted);
    }

    #[test]
    fn prop_difference_recovers_disjoint_union(
        a in scope_string(),
        b in scope_string_from("[w-z][a-z0-9_]{0,5}"),
    ) {
        let left = ScopeList::parse(&a);
        let right = ScopeList::parse(&b);
        let recovered = left.union(&right).difference(&right);
        prop_assert_eq!(recovered, left);
    }

    #[test]
    fn prop_intersection_commutes(a in scope_string(), b in scope_string()) {
        let left = ScopeList::parse(&a);
        let right = ScopeList::parse(&b);
        prop_assert_eq!(left.intersection(&right), right.intersection(&left));
    }

    #[test]
    fn prop_wildcard_grants_reach_every_resource(
        grants in prop::collection::vec(("[0-9]{1,3}", scope_string()), 0..5),
        wildcard in scope_string(),
    ) {
        let mut claim = grants;
        claim.push(("*".to_string(), wildcard));
        let map = ResourceMap::new(claim.clone());

        for entry in map.wildcard().iter().filter(|e| e.namespace().is_none()) {
            for (id, _) in &claim {
                prop_assert!(map.contains_scope(id, entry.scope()));
            }
            prop_assert!(map.contains_scope("unseen-resource", entry.scope()));
        }
    }

    #[test]
    fn prop_resource_condense_is_idempotent(
        grants in prop::collection::vec(("[0-9]{1,2}", scope_string()), 0..4),
        wildcard in scope_string(),
    ) {
        let mut claim = grants;
        claim.push(("*".to_string(), wildcard));
        let map = ResourceMap::new(claim);
        let once = map.condense();
        prop_assert_eq!(once.condense(), once.clone());
    }

    #[test]
    fn prop_condense_preserves_decisions(
        grants in prop::collection::vec(("[0-9]{1,2}", scope_string()), 0..4),
        wildcard in scope_string(),
    ) {
        let mut claim = grants;
        claim.push(("*".to_string(), wildcard));
        let map = ResourceMap::new(claim.clone());
        let condensed = map.condense();

        for (id, scopes) in &claim {
            for entry in ScopeList::parse(scopes).iter() {
                match entry.namespace() {
                    Some(ns) => prop_assert_eq!(
                        map.contains_scope_in(id, ns, entry.scope()),
                        condensed.contains_scope_in(id, ns, entry.scope())
                    ),
                    None => prop_assert_eq!(
                        map.contains_scope(id, entry.scope()),
                        condensed.contains_scope(id, entry.scope())
                    ),
                }
            }
        }
    }
}
