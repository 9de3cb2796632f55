//! Resource-level grant mapping
//!
//! A [`ResourceMap`] is the unpacked form of a token's authorization
//! claim: each resource id maps to the scopes granted on it, and the
//! reserved `"*"` id carries grants that apply to every resource.

mod map;


pub use map::{ResourceMap, WILDCARD_KEY};
