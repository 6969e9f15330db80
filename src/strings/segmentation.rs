//! Stratification of an automaton by separator depth.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::{Error, Map, Nfa, Result, State, Symbol, Transition};

/// Partitions the transitions labelled with separator symbols by their
/// depth: the number of separator transitions crossed on the way from an
/// initial state to the transition's source.
///
/// Only automata where the separators form a consistent layering can be
/// segmented (concatenations with explicit boundary markers have this
/// shape); reaching a state at two different depths fails with
/// [`Error::InconsistentDepth`].
#[derive(Debug, Clone)]
pub struct Segmentation {
    automaton: Nfa,
    separators: BTreeSet<Symbol>,
    epsilon_depths: BTreeMap<usize, Vec<Transition>>,
}

impl Segmentation {
    /// Computes the depth stratification of `aut` with respect to the
    /// given separator symbols.
    pub fn new<I: IntoIterator<Item = Symbol>>(aut: &Nfa, separators: I) -> Result<Self> {
        let separators: BTreeSet<Symbol> = separators.into_iter().collect();
        let mut epsilon_depths: BTreeMap<usize, Vec<Transition>> = BTreeMap::new();

        let mut depths: Map<State, usize> = Map::default();
        let mut worklist: VecDeque<(State, usize)> = aut
            .initial_states()
            .iter()
            .map(|&q| (q, 0))
            .collect();

        while let Some((state, depth)) = worklist.pop_front() {
            if let Some(&recorded) = depths.get(&state) {
                if recorded != depth {
                    return Err(Error::InconsistentDepth {
                        state,
                        first: recorded,
                        second: depth,
                    });
                }
                continue;
            }
            depths.insert(state, depth);

            for sp in aut.symbol_posts(state) {
                let is_separator = separators.contains(&sp.symbol());
                for &target in sp.targets() {
                    if is_separator {
                        epsilon_depths
                            .entry(depth)
                            .or_default()
                            .push(Transition::new(state, sp.symbol(), target));
                        worklist.push_back((target, depth + 1));
                    } else {
                        worklist.push_back((target, depth));
                    }
                }
            }
        }

        Ok(Self {
            automaton: aut.clone(),
            separators,
            epsilon_depths,
        })
    }

    /// The separator transitions grouped by depth.
    pub fn epsilon_depths(&self) -> &BTreeMap<usize, Vec<Transition>> {
        &self.epsilon_depths
    }

    /// The separator symbols this segmentation was computed with.
    pub fn separators(&self) -> &BTreeSet<Symbol> {
        &self.separators
    }

    /// Splits the automaton into `depths + 1` segment automata without
    /// trimming them. Segment `d` keeps the original structure but is
    /// entered at the targets of the depth `d - 1` separators and accepts
    /// at the sources of the depth `d` separators (the outermost segments
    /// keep the original initial and final states); the depth `d`
    /// separator transitions themselves are removed from segment `d`.
    pub fn untrimmed_segments(&self) -> Vec<Nfa> {
        let count = self.epsilon_depths.len() + 1;
        let mut segments = vec![self.automaton.clone(); count];
        for (index, segment) in segments.iter_mut().enumerate() {
            if index > 0 {
                segment.clear_initial();
            }
            if index + 1 < count {
                segment.clear_final();
            }
        }

        for (&depth, transitions) in &self.epsilon_depths {
            for t in transitions {
                segments[depth].set_final(t.source);
                segments[depth].remove_transition(t.source, t.symbol, t.target);
                segments[depth + 1].set_initial(t.target);
            }
        }
        segments
    }

    /// The segment automata, trimmed to their useful states.
    pub fn segments(&self) -> Vec<Nfa> {
        let mut segments = self.untrimmed_segments();
        for segment in &mut segments {
            segment.trim();
        }
        segments
    }
}
