//! Noodlification: enumerating the consistent ways to thread a word
//! through a separator-layered automaton, used to decompose word
//! equations.

use std::collections::BTreeSet;

use itertools::Itertools;
use tracing::{debug, trace};

use super::segmentation::Segmentation;
use crate::ops::{concatenate, intersection_eps, is_lang_empty};
use crate::{Map, Nfa, Result, State, Symbol, EPSILON};

/// A noodle: one segment automaton per layer of the segmented input.
pub type Noodle = Vec<Nfa>;

/// Enumerates the noodles of a separator-layered automaton.
///
/// Every noodle picks exactly one `epsilon` transition per depth and
/// keeps the sub-automaton between consecutive picks: the first segment
/// is restricted to the chosen entry's source as its only final state,
/// inner segments to a single initial and final state, the last segment
/// to a single initial state. Combinations whose restricted segments
/// have an empty language are dropped unless `include_empty` is set.
pub fn noodlify(aut: &Nfa, epsilon: Symbol, include_empty: bool) -> Result<Vec<Noodle>> {
    let segmentation = Segmentation::new(aut, [epsilon])?;
    let segments = segmentation.untrimmed_segments();

    if segments.len() == 1 {
        let mut segment = segments.into_iter().next().expect("one segment");
        segment.trim();
        if segment.size() > 0 || include_empty {
            return Ok(vec![vec![segment]]);
        }
        return Ok(Vec::new());
    }

    // Restrictions of each segment to one entry and one exit state,
    // keyed by (initial, final). The first and last segments keep their
    // full initial resp. final set, marked with a state id no segment
    // uses.
    let unused_state: State = aut.size();
    let mut restricted: Map<(State, State), Nfa> = Map::default();
    let last_index = segments.len() - 1;
    for (index, segment) in segments.iter().enumerate() {
        let entries: Vec<State> = if index == 0 {
            vec![unused_state]
        } else {
            segment.initial_states().iter().copied().collect()
        };
        let exits: Vec<State> = if index == last_index {
            vec![unused_state]
        } else {
            segment.final_states().iter().copied().collect()
        };
        for &entry in &entries {
            for &exit in &exits {
                let mut piece = segment.clone();
                if entry != unused_state {
                    piece.clear_initial();
                    piece.set_initial(entry);
                }
                if exit != unused_state {
                    piece.clear_final();
                    piece.set_final(exit);
                }
                piece.trim();
                if piece.size() > 0 || include_empty {
                    restricted.insert((entry, exit), piece);
                }
            }
        }
    }

    let depth_transitions: Vec<_> = segmentation.epsilon_depths().values().collect();
    let num_of_permutations: usize = depth_transitions.iter().map(|level| level.len()).product();
    trace!(
        "Enumerating {} noodle candidates over {} depths",
        num_of_permutations,
        depth_transitions.len()
    );

    let mut noodles: Vec<Noodle> = Vec::new();
    for index in 0..num_of_permutations {
        // Mixed-radix decoding of the choice of one transition per depth.
        let mut remainder = index;
        let picks: Vec<_> = depth_transitions
            .iter()
            .map(|level| {
                let pick = level[remainder % level.len()];
                remainder /= level.len();
                pick
            })
            .collect();

        let mut noodle: Noodle = Vec::with_capacity(picks.len() + 1);
        let Some(first) = restricted.get(&(unused_state, picks[0].source)) else {
            continue;
        };
        noodle.push(first.clone());

        let mut connected = true;
        for (previous, next) in picks.iter().tuple_windows() {
            match restricted.get(&(previous.target, next.source)) {
                Some(piece) => noodle.push(piece.clone()),
                None => {
                    connected = false;
                    break;
                }
            }
        }
        if !connected {
            continue;
        }

        let last_pick = picks.last().expect("at least two segments");
        let Some(last) = restricted.get(&(last_pick.target, unused_state)) else {
            continue;
        };
        noodle.push(last.clone());
        noodles.push(noodle);
    }
    Ok(noodles)
}

/// Solves the alignment side of a word equation: `left` holds automata
/// for the pieces `L1 … Lk`, `right` constrains their concatenation.
/// Returns, per consistent alignment, the k sub-automata restricting
/// each piece to the word fragments compatible with `right`.
///
/// The inputs are not modified; the pieces are concatenated over
/// explicit [`EPSILON`] boundaries, intersected with `right` while
/// preserving those boundaries, and the trimmed product is noodlified.
pub fn noodlify_for_equation(left: &[Nfa], right: &Nfa) -> Result<Vec<Noodle>> {
    if left.is_empty() || is_lang_empty(right) {
        return Ok(Vec::new());
    }

    let mut pieces: Vec<Nfa> = left.to_vec();
    for piece in &mut pieces {
        piece.unify_initial();
        piece.unify_final();
    }

    let mut concatenated = pieces[0].clone();
    for next in &pieces[1..] {
        concatenated = concatenate(&concatenated, next, true);
    }

    let (mut product, _) = intersection_eps(&concatenated, right, &BTreeSet::from([EPSILON]));
    product.trim();
    if is_lang_empty(&product) {
        return Ok(Vec::new());
    }
    debug!(
        "Noodlifying equation product of {} states over {} pieces",
        product.size(),
        left.len()
    );
    noodlify(&product, EPSILON, false)
}
