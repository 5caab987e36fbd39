//! Branch pair generation.
//!
//! Pairs are every 2-combination of the branch list in nested-loop order, so
//! once the branch order is fixed the pair sequence is fixed too. Rooms take
//! pairs cyclically by index.

use std::collections::{BTreeSet, HashSet};

use crate::domain::{BranchPair, Candidate};

/// Distinct branch labels present in `candidates`, sorted.
pub fn distinct_branches<'a>(candidates: impl IntoIterator<Item = &'a Candidate>) -> Vec<String> {
    candidates
        .into_iter()
        .map(|c| c.branch.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// All unordered pairs over `branches`, outer index before inner index.
///
/// Repeated labels are ignored after their first occurrence. Fewer than two
/// distinct branches yield an empty list.
pub fn generate_branch_pairs(branches: &[String]) -> Vec<BranchPair> {
    let mut seen = HashSet::new();
    let unique: Vec<&String> = branches.iter().filter(|b| seen.insert(*b)).collect();

    let mut pairs = Vec::with_capacity(unique.len() * unique.len().saturating_sub(1) / 2);
    for (i, first) in unique.iter().enumerate() {
        for second in &unique[i + 1..] {
            pairs.push(BranchPair::new(first.as_str(), second.as_str()));
        }
    }
    pairs
}

/// Preferred pair for the room at `index`, wrapping around the sequence.
pub fn pair_for_room(pairs: &[BranchPair], index: usize) -> Option<&BranchPair> {
    if pairs.is_empty() {
        None
    } else {
        pairs.get(index % pairs.len())
    }
}
