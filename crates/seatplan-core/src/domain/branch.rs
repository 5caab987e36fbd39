use std::fmt;

use serde::{Deserialize, Serialize};

/// Unordered pair of two distinct branches that a room prefers to seat.
///
/// The order of `first`/`second` reflects generation order only; membership
/// checks treat the pair as unordered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchPair {
    pub first: String,
    pub second: String,
}

impl BranchPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        let pair = Self {
            first: first.into(),
            second: second.into(),
        };
        debug_assert_ne!(pair.first, pair.second, "branch pair must be distinct");
        pair
    }

    pub fn contains(&self, branch: &str) -> bool {
        self.first == branch || self.second == branch
    }

    /// Slot (0 or 1) of `branch` within the pair.
    pub fn slot_of(&self, branch: &str) -> Option<usize> {
        if self.first == branch {
            Some(0)
        } else if self.second == branch {
            Some(1)
        } else {
            None
        }
    }

    /// True when both pairs name the same two branches, in either order.
    pub fn same_branches(&self, other: &BranchPair) -> bool {
        self.contains(&other.first) && self.contains(&other.second)
    }
}

impl fmt::Display for BranchPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_unordered_for_membership() {
        let ab = BranchPair::new("A", "B");
        let ba = BranchPair::new("B", "A");
        assert!(ab.same_branches(&ba));
        assert!(ab.contains("B"));
        assert!(!ab.contains("C"));
    }

    #[test]
    fn test_slot_of() {
        let pair = BranchPair::new("CSE", "ECE");
        assert_eq!(pair.slot_of("CSE"), Some(0));
        assert_eq!(pair.slot_of("ECE"), Some(1));
        assert_eq!(pair.slot_of("ME"), None);
        assert_eq!(pair.to_string(), "CSE+ECE");
    }
}
