//! Candidate domain aggregation

use std::collections::BTreeSet;

use super::{generate_variants, VariantSet};
use crate::domain::BaseName;

/// Cartesian product of variants and suffixes
pub fn expand(variants: &VariantSet, suffixes: &[String]) -> BTreeSet<String> {
    variants
        .iter()
        .flat_map(|variant| {
            suffixes
                .iter()
                .map(move |suffix| format!("{}{}", variant, suffix))
        })
        .collect()
}

/// Every candidate domain for `base`, the original label included.
///
/// Deleting the only character of a one-letter label leaves an empty
/// variant; it is dropped here so no bare suffix is ever queried.
pub fn candidate_domains(base: &BaseName, suffixes: &[String]) -> BTreeSet<String> {
    let mut variants = generate_variants(base);
    variants.insert(base.as_str().to_string());
    variants.retain(|variant| !variant.is_empty());

    let candidates = expand(&variants, suffixes);
    tracing::debug!(
        base = %base,
        variants = variants.len(),
        suffixes = suffixes.len(),
        candidates = candidates.len(),
        "Generated typosquat candidates"
    );
    candidates
}
