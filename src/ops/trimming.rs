//! Reachability analysis and in-place restriction to useful states.

use std::collections::{BTreeSet, VecDeque};

use bit_set::BitSet;
use tracing::trace;

use crate::{Nfa, State};

impl Nfa {
    fn reachable_mask(&self) -> BitSet {
        let mut reachable = BitSet::with_capacity(self.size());
        let mut worklist: VecDeque<State> = self.initial_states().iter().copied().collect();
        for &q in self.initial_states() {
            reachable.insert(q);
        }
        while let Some(state) = worklist.pop_front() {
            for sp in self.symbol_posts(state) {
                for &target in sp.targets() {
                    if reachable.insert(target) {
                        worklist.push_back(target);
                    }
                }
            }
        }
        reachable
    }

    /// The states reachable from an initial state by forward search.
    pub fn reachable_states(&self) -> BTreeSet<State> {
        self.reachable_mask().iter().collect()
    }

    /// The states lying on some path from an initial to a final state:
    /// the intersection of forward reachability with backward
    /// reachability from the final set.
    pub fn useful_states(&self) -> BTreeSet<State> {
        let mut forward = self.reachable_mask();
        let backward = self.revert().reachable_mask();
        forward.intersect_with(&backward);
        forward.iter().collect()
    }

    /// Restricts the automaton in place to its useful states, renumbering
    /// them densely from 0 in increasing order of their old indices.
    /// Returns the renaming from old to new indices. An automaton without
    /// useful states collapses to size 0.
    pub fn trim(&mut self) -> crate::Map<State, State> {
        let useful = self.useful_states();
        let renaming: crate::Map<State, State> = useful
            .iter()
            .enumerate()
            .map(|(new, &old)| (old, new))
            .collect();
        trace!(
            "Trimming automaton from {} to {} states",
            self.size(),
            useful.len()
        );

        let mut trimmed = Nfa::with_size(useful.len());
        for &old in &useful {
            if self.has_initial(old) {
                trimmed.set_initial(renaming[&old]);
            }
            if self.has_final(old) {
                trimmed.set_final(renaming[&old]);
            }
            for sp in self.symbol_posts(old) {
                for &target in sp.targets() {
                    if let Some(&new_target) = renaming.get(&target) {
                        trimmed.add_transition(renaming[&old], sp.symbol(), new_target);
                    }
                }
            }
        }
        *self = trimmed;
        renaming
    }
}
