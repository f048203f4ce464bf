//! Nondominated solution archive.

use crate::solution::{Dominance, Solution};
use serde::{Deserialize, Serialize};

/// A set of mutually nondominated solutions with unique decision vectors.
///
/// Member order is unspecified and may change across insertions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Archive {
    members: Vec<Solution>,
}

impl Archive {
    /// Create an empty archive.
    pub fn new() -> Self {
        Archive::default()
    }

    /// Insert a solution if it is not dominated by, nor a decision-level
    /// duplicate of, any member. Members the incoming solution dominates
    /// are pruned. Returns whether the solution was inserted.
    pub fn insert(&mut self, solution: Solution) -> bool {
        let mut i = 0;
        while i < self.members.len() {
            match solution.dominance(&self.members[i]) {
                Dominance::Equal => {
                    if solution.decision() == self.members[i].decision() {
                        return false;
                    }
                    // Distinct decisions may share an objective vector,
                    // but the same decision must not appear twice.
                    for member in &self.members[i + 1..] {
                        if solution.decision() == member.decision() {
                            return false;
                        }
                    }
                    break;
                }
                Dominance::Dominates => {
                    self.members.swap_remove(i);
                }
                Dominance::Dominated => return false,
                Dominance::Incomparable => i += 1,
            }
        }
        self.members.push(solution);
        true
    }

    /// Remove and return the member at `index`, filling the hole with
    /// the last member.
    pub fn swap_remove(&mut self, index: usize) -> Solution {
        self.members.swap_remove(index)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the archive holds no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The current members.
    pub fn solutions(&self) -> &[Solution] {
        &self.members
    }

    /// Iterate over the members.
    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.members.iter()
    }
}

impl<'a> IntoIterator for &'a Archive {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
