//! Mutation strategies for a base label
//!
//! Every strategy is a pure function returning the raw (not yet deduplicated)
//! list of variants, so callers can observe per-strategy counts.

use super::VariantSet;
use crate::domain::BaseName;

/// Look-alike digit substitutions, applied one rule at a time
pub const DIGIT_RULES: &[(char, char)] = &[('o', '0'), ('i', '1'), ('e', '3')];

/// Mutation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    DigitSubstitution,
    Deletion,
    Duplication,
    Transposition,
    KeyboardAdjacency,
}

impl MutationKind {
    /// All strategies in application order
    pub const ALL: [MutationKind; 5] = [
        MutationKind::DigitSubstitution,
        MutationKind::Deletion,
        MutationKind::Duplication,
        MutationKind::Transposition,
        MutationKind::KeyboardAdjacency,
    ];

    /// Apply this strategy to a label
    pub fn apply(&self, label: &str) -> Vec<String> {
        match self {
            MutationKind::DigitSubstitution => digit_substitutions(label),
            MutationKind::Deletion => deletions(label),
            MutationKind::Duplication => duplications(label),
            MutationKind::Transposition => transpositions(label),
            MutationKind::KeyboardAdjacency => keyboard_substitutions(label),
        }
    }
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationKind::DigitSubstitution => write!(f, "digit-substitution"),
            MutationKind::Deletion => write!(f, "deletion"),
            MutationKind::Duplication => write!(f, "duplication"),
            MutationKind::Transposition => write!(f, "transposition"),
            MutationKind::KeyboardAdjacency => write!(f, "keyboard-adjacency"),
        }
    }
}

/// Union of every strategy's output for `base`.
///
/// The base itself is only present when a strategy happens to reproduce it;
/// [`candidate_domains`](super::candidate_domains) adds it explicitly.
pub fn generate_variants(base: &BaseName) -> VariantSet {
    MutationKind::ALL
        .iter()
        .flat_map(|kind| kind.apply(base.as_str()))
        .collect()
}

/// One string per rule, all occurrences replaced at once
pub fn digit_substitutions(label: &str) -> Vec<String> {
    DIGIT_RULES
        .iter()
        .map(|&(from, to)| label.replace(from, &to.to_string()))
        .collect()
}

/// Drop one character at every position
pub fn deletions(label: &str) -> Vec<String> {
    let chars: Vec<char> = label.chars().collect();
    (0..chars.len())
        .map(|i| {
            chars[..i]
                .iter()
                .chain(chars[i + 1..].iter())
                .collect::<String>()
        })
        .collect()
}

/// Insert a copy of the character at `i` right before position `i`
pub fn duplications(label: &str) -> Vec<String> {
    let chars: Vec<char> = label.chars().collect();
    (0..chars.len())
        .map(|i| {
            chars[..i]
                .iter()
                .chain(std::iter::once(&chars[i]))
                .chain(chars[i..].iter())
                .collect::<String>()
        })
        .collect()
}

/// Swap every adjacent pair
pub fn transpositions(label: &str) -> Vec<String> {
    let chars: Vec<char> = label.chars().collect();
    (0..chars.len().saturating_sub(1))
        .map(|i| {
            let mut swapped = chars.clone();
            swapped.swap(i, i + 1);
            swapped.into_iter().collect::<String>()
        })
        .collect()
}

/// QWERTY neighbours of a lowercase key
pub fn keyboard_neighbors(c: char) -> Option<&'static str> {
    let neighbors = match c {
        'a' => "qs",
        's' => "ad",
        'd' => "sf",
        'f' => "dg",
        'g' => "fh",
        'h' => "gj",
        'j' => "hk",
        'k' => "jl",
        'l' => "k;",
        'q' => "wa",
        'w' => "qe",
        'e' => "wr",
        'r' => "et",
        't' => "ry",
        'y' => "tu",
        'u' => "yi",
        'i' => "uo",
        'o' => "ip",
        'p' => "o",
        'z' => "as",
        'x' => "zs",
        'c' => "xv",
        'v' => "cb",
        'b' => "vn",
        'n' => "bm",
        'm' => "n",
        _ => return None,
    };
    Some(neighbors)
}

/// Replace each key by each of its neighbours
pub fn keyboard_substitutions(label: &str) -> Vec<String> {
    let chars: Vec<char> = label.chars().collect();
    let mut out = Vec::new();

    for (i, &c) in chars.iter().enumerate() {
        let Some(neighbors) = keyboard_neighbors(c) else {
            continue;
        };
        for replacement in neighbors.chars() {
            let mut typo = chars.clone();
            typo[i] = replacement;
            out.push(typo.into_iter().collect());
        }
    }

    out
}
