//! Typosquat candidate generation
//!
//! Phase 1: mutate the base label (deletion, duplication, transposition, ...)
//! Phase 2: cross every variant with the configured suffix list

mod candidates;
mod mutations;

pub use candidates::{candidate_domains, expand};
pub use mutations::{
    deletions, digit_substitutions, duplications, generate_variants, keyboard_neighbors,
    keyboard_substitutions, transpositions, MutationKind, DIGIT_RULES,
};

use std::collections::BTreeSet;

/// Deduplicated set of mutated labels
pub type VariantSet = BTreeSet<String>;

/// Default suffixes checked for every variant
pub const DEFAULT_SUFFIXES: &[&str] = &[
    ".com", ".org", ".net", ".info", ".co", ".us", ".uk", ".ca", ".de", ".jp",
];

/// Default suffix list as owned strings
pub fn default_suffixes() -> Vec<String> {
    DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect()
}
