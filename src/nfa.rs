//! The dense automaton core: state arena, initial/final sets and grouped
//! transition storage.

use std::collections::BTreeSet;

use crate::{Alphabet, Error, Result, State, Symbol, Word, EPSILON};

/// All transitions leaving one state on one symbol: the symbol paired with
/// the ordered, duplicate-free set of target states.
///
/// Ordering is lexicographic on (symbol, targets), so the epsilon group
/// (symbol [`EPSILON`]) always sorts last within a state's post.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolPost {
    symbol: Symbol,
    targets: Vec<State>,
}

impl SymbolPost {
    /// Creates a grouped post; targets are sorted and deduplicated.
    pub fn new<I: IntoIterator<Item = State>>(symbol: Symbol, targets: I) -> Self {
        let mut targets: Vec<State> = targets.into_iter().collect();
        targets.sort_unstable();
        targets.dedup();
        Self { symbol, targets }
    }

    /// The symbol all grouped transitions are labelled with.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// The ordered target states.
    pub fn targets(&self) -> &[State] {
        &self.targets
    }
}

/// A single (source, symbol, target) triple; a view over the grouped
/// storage, not the storage itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    /// State the transition leaves.
    pub source: State,
    /// Symbol consumed.
    pub symbol: Symbol,
    /// State the transition enters.
    pub target: State,
}

impl Transition {
    /// Creates a transition triple.
    pub fn new(source: State, symbol: Symbol, target: State) -> Self {
        Self {
            source,
            symbol,
            target,
        }
    }
}

/// A witness run: the word read and the state sequence traversed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    /// Symbols consumed along the run.
    pub word: Word,
    /// States visited, including the starting state.
    pub path: Vec<State>,
}

/// A nondeterministic finite automaton over integer symbols.
///
/// States are indices into a dense arena `0..size`. The transition
/// relation is stored per source state as a list of [`SymbolPost`]s sorted
/// by symbol. Mutation that mentions a state beyond the current size grows
/// the automaton implicitly; states are only ever removed wholesale, by
/// [`Nfa::trim`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Nfa {
    num_states: usize,
    initial: BTreeSet<State>,
    finals: BTreeSet<State>,
    delta: Vec<Vec<SymbolPost>>,
}

impl Nfa {
    /// Creates an empty automaton with no states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an automaton with `size` states and no transitions.
    pub fn with_size(size: usize) -> Self {
        Self {
            num_states: size,
            initial: BTreeSet::new(),
            finals: BTreeSet::new(),
            delta: vec![Vec::new(); size],
        }
    }

    /// Number of states in the arena.
    pub fn size(&self) -> usize {
        self.num_states
    }

    /// Removes all states, transitions and initial/final markings.
    pub fn clear(&mut self) {
        self.num_states = 0;
        self.initial.clear();
        self.finals.clear();
        self.delta.clear();
    }

    /// Appends a fresh state and returns its index.
    pub fn add_state(&mut self) -> State {
        let state = self.num_states;
        self.num_states += 1;
        self.delta.push(Vec::new());
        state
    }

    /// Grows the automaton to `size` states. Shrinking is refused with
    /// [`Error::InvalidSize`] since transitions could be left dangling.
    pub fn resize(&mut self, size: usize) -> Result<()> {
        if size < self.num_states {
            return Err(Error::InvalidSize {
                current: self.num_states,
                requested: size,
            });
        }
        self.num_states = size;
        self.delta.resize_with(size, Vec::new);
        Ok(())
    }

    /// True iff `state` lies inside the arena.
    pub fn is_state(&self, state: State) -> bool {
        state < self.num_states
    }

    fn ensure_state(&mut self, state: State) {
        if state >= self.num_states {
            self.num_states = state + 1;
            self.delta.resize_with(self.num_states, Vec::new);
        }
    }

    /// Marks `state` initial, growing the automaton if needed.
    pub fn set_initial(&mut self, state: State) {
        self.ensure_state(state);
        self.initial.insert(state);
    }

    /// Removes the initial marking of `state`.
    pub fn unset_initial(&mut self, state: State) {
        self.initial.remove(&state);
    }

    /// True iff `state` is initial.
    pub fn has_initial(&self, state: State) -> bool {
        self.initial.contains(&state)
    }

    /// Drops all initial markings.
    pub fn clear_initial(&mut self) {
        self.initial.clear();
    }

    /// The set of initial states.
    pub fn initial_states(&self) -> &BTreeSet<State> {
        &self.initial
    }

    /// Marks `state` final, growing the automaton if needed.
    pub fn set_final(&mut self, state: State) {
        self.ensure_state(state);
        self.finals.insert(state);
    }

    /// Removes the final marking of `state`.
    pub fn unset_final(&mut self, state: State) {
        self.finals.remove(&state);
    }

    /// True iff `state` is final.
    pub fn has_final(&self, state: State) -> bool {
        self.finals.contains(&state)
    }

    /// Drops all final markings.
    pub fn clear_final(&mut self) {
        self.finals.clear();
    }

    /// The set of final states.
    pub fn final_states(&self) -> &BTreeSet<State> {
        &self.finals
    }

    /// Adds the transition (source, symbol, target), growing the automaton
    /// so both endpoints exist. Transitions form a set: re-adding an
    /// existing triple is a no-op.
    pub fn add_transition(&mut self, source: State, symbol: Symbol, target: State) {
        self.ensure_state(source.max(target));
        let post = &mut self.delta[source];
        match post.binary_search_by_key(&symbol, SymbolPost::symbol) {
            Ok(i) => {
                let targets = &mut post[i].targets;
                if let Err(j) = targets.binary_search(&target) {
                    targets.insert(j, target);
                }
            }
            Err(i) => post.insert(
                i,
                SymbolPost {
                    symbol,
                    targets: vec![target],
                },
            ),
        }
    }

    /// Removes the transition (source, symbol, target) if present.
    pub fn remove_transition(&mut self, source: State, symbol: Symbol, target: State) {
        let Some(post) = self.delta.get_mut(source) else {
            return;
        };
        if let Ok(i) = post.binary_search_by_key(&symbol, SymbolPost::symbol) {
            if let Ok(j) = post[i].targets.binary_search(&target) {
                post[i].targets.remove(j);
                if post[i].targets.is_empty() {
                    post.remove(i);
                }
            }
        }
    }

    /// True iff the transition (source, symbol, target) exists.
    pub fn has_transition(&self, source: State, symbol: Symbol, target: State) -> bool {
        self.symbol_post(source, symbol)
            .is_some_and(|sp| sp.targets.binary_search(&target).is_ok())
    }

    /// The grouped posts of `source`, sorted by symbol.
    pub fn symbol_posts(&self, source: State) -> &[SymbolPost] {
        self.delta.get(source).map_or(&[], Vec::as_slice)
    }

    /// The grouped post of `source` on `symbol`, if any transition exists.
    pub fn symbol_post(&self, source: State, symbol: Symbol) -> Option<&SymbolPost> {
        let post = self.delta.get(source)?;
        post.binary_search_by_key(&symbol, SymbolPost::symbol)
            .ok()
            .map(|i| &post[i])
    }

    /// The grouped epsilon transitions of `source`, if any.
    pub fn epsilon_symbol_posts(&self, source: State) -> Option<&SymbolPost> {
        self.symbol_post(source, EPSILON)
    }

    /// True iff `symbol` is the reserved epsilon value.
    pub fn is_epsilon(&self, symbol: Symbol) -> bool {
        symbol == EPSILON
    }

    /// Iterates over every transition in the stable total order
    /// (source, symbol, target).
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.delta.iter().enumerate().flat_map(|(source, post)| {
            post.iter().flat_map(move |sp| {
                sp.targets
                    .iter()
                    .map(move |&target| Transition::new(source, sp.symbol, target))
            })
        })
    }

    /// The transitions leaving `source`, ordered by (symbol, target).
    pub fn transitions_from(&self, source: State) -> impl Iterator<Item = Transition> + '_ {
        self.symbol_posts(source).iter().flat_map(move |sp| {
            sp.targets
                .iter()
                .map(move |&target| Transition::new(source, sp.symbol, target))
        })
    }

    /// The transitions entering `target`, ordered by (source, symbol).
    pub fn transitions_to(&self, target: State) -> Vec<Transition> {
        self.transitions().filter(|t| t.target == target).collect()
    }

    /// Total number of (source, symbol, target) triples.
    pub fn num_of_transitions(&self) -> usize {
        self.delta
            .iter()
            .flat_map(|post| post.iter())
            .map(|sp| sp.targets.len())
            .sum()
    }

    /// The union of targets reachable from any state of `states` on
    /// `symbol`.
    pub fn post<'a, I: IntoIterator<Item = &'a State>>(
        &self,
        states: I,
        symbol: Symbol,
    ) -> BTreeSet<State> {
        let mut result = BTreeSet::new();
        for &state in states {
            if let Some(sp) = self.symbol_post(state, symbol) {
                result.extend(sp.targets.iter().copied());
            }
        }
        result
    }

    /// Per-symbol posts of `source`, restricted to the symbols `alphabet`
    /// knows; symbols without outgoing transitions are omitted.
    pub fn post_map(
        &self,
        source: State,
        alphabet: &Alphabet,
    ) -> std::collections::BTreeMap<Symbol, BTreeSet<State>> {
        alphabet
            .known_symbols()
            .into_iter()
            .filter_map(|symbol| {
                self.symbol_post(source, symbol)
                    .map(|sp| (symbol, sp.targets.iter().copied().collect()))
            })
            .collect()
    }

    /// Every symbol that labels at least one transition, in increasing
    /// order.
    pub fn used_symbols(&self) -> Vec<Symbol> {
        let symbols: BTreeSet<Symbol> = self
            .delta
            .iter()
            .flat_map(|post| post.iter().map(SymbolPost::symbol))
            .collect();
        symbols.into_iter().collect()
    }

    /// True iff there is at most one initial state and every
    /// (state, symbol) pair has at most one target. An automaton without
    /// exactly one initial state is not considered deterministic.
    pub fn is_deterministic(&self) -> bool {
        self.initial.len() == 1
            && self
                .delta
                .iter()
                .flat_map(|post| post.iter())
                .all(|sp| sp.targets.len() <= 1)
    }

    /// Replaces multiple initial states by a single fresh one carrying the
    /// union of their outgoing transitions (and their finality, if any).
    /// Does nothing when at most one initial state exists.
    pub fn unify_initial(&mut self) {
        if self.initial.len() <= 1 {
            return;
        }
        let unified = self.add_state();
        let old_initial: Vec<State> = self.initial.iter().copied().collect();
        for state in old_initial {
            let moves: Vec<Transition> = self.transitions_from(state).collect();
            for t in moves {
                self.add_transition(unified, t.symbol, t.target);
            }
            if self.has_final(state) {
                self.set_final(unified);
            }
        }
        self.clear_initial();
        self.set_initial(unified);
    }

    /// Dual of [`Nfa::unify_initial`]: replaces multiple final states by a
    /// single fresh one receiving a copy of every incoming transition.
    pub fn unify_final(&mut self) {
        if self.finals.len() <= 1 {
            return;
        }
        let unified = self.add_state();
        let old_finals: Vec<State> = self.finals.iter().copied().collect();
        for state in old_finals {
            let moves = self.transitions_to(state);
            for t in moves {
                self.add_transition(t.source, t.symbol, unified);
            }
            if self.has_initial(state) {
                self.set_initial(unified);
            }
        }
        self.clear_final();
        self.set_final(unified);
    }

    /// The symbol-agnostic digraph view: same states and initial/final
    /// sets, with every distinct (source, target) edge collapsed to a
    /// single transition on `abstract_symbol`.
    pub fn one_letter_aut(&self, abstract_symbol: Symbol) -> Nfa {
        let mut digraph = Nfa::with_size(self.num_states);
        digraph.initial = self.initial.clone();
        digraph.finals = self.finals.clone();
        for t in self.transitions() {
            digraph.add_transition(t.source, abstract_symbol, t.target);
        }
        digraph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::divisible_by;
    use pretty_assertions::assert_eq;

    #[test]
    fn state_arena_grows_and_never_shrinks() {
        let mut aut = Nfa::with_size(5);
        assert_eq!(aut.size(), 5);
        assert!(!aut.has_initial(0));
        aut.set_initial(0);
        assert!(aut.has_initial(0));

        let mut other = Nfa::new();
        assert_eq!(other.size(), 0);
        assert_eq!(other.add_state(), 0);
        assert_eq!(other.add_state(), 1);
        other.set_final(9);
        assert_eq!(other.size(), 10);
        assert!((0..10).all(|q| other.is_state(q)));
        assert!(!other.is_state(10));

        assert_eq!(
            other.resize(3),
            Err(Error::InvalidSize {
                current: 10,
                requested: 3
            })
        );
        other.resize(12).unwrap();
        assert!(other.is_state(11));

        other.clear();
        assert_eq!(other.size(), 0);
    }

    #[test]
    fn initial_and_final_markings_are_independent() {
        let mut nfa = Nfa::with_size(10);
        nfa.set_initial(0);
        nfa.set_final(0);
        for q in [1, 2, 3] {
            nfa.set_initial(q);
            nfa.set_final(q);
        }
        assert_eq!(nfa.initial_states().len(), 4);
        assert_eq!(nfa.final_states().len(), 4);

        nfa.unset_initial(0);
        assert!(!nfa.has_initial(0));
        assert!(nfa.has_final(0));
        nfa.unset_final(0);
        nfa.unset_final(1);
        assert_eq!(nfa.final_states().len(), 2);

        nfa.clear_initial();
        assert!(nfa.initial_states().is_empty());
        nfa.clear_final();
        assert!(nfa.final_states().is_empty());
    }

    #[test]
    fn transitions_are_a_set_with_stable_order() {
        let mut nfa = Nfa::with_size(10);
        nfa.add_transition(3, 2, 4);
        nfa.add_transition(3, 2, 4);
        assert!(nfa.has_transition(3, 2, 4));
        assert_eq!(nfa.num_of_transitions(), 1);

        nfa.add_transition(3, 1, 5);
        nfa.add_transition(0, 7, 1);
        let all: Vec<Transition> = nfa.transitions().collect();
        assert_eq!(
            all,
            vec![
                Transition::new(0, 7, 1),
                Transition::new(3, 1, 5),
                Transition::new(3, 2, 4),
            ]
        );

        nfa.remove_transition(3, 2, 4);
        assert!(!nfa.has_transition(3, 2, 4));
        assert_eq!(nfa.num_of_transitions(), 2);

        // Growth through a transition endpoint.
        nfa.add_transition(2, 0, 11);
        assert_eq!(nfa.size(), 12);
    }

    #[test]
    fn post_unions_targets_over_sources() {
        let mut aut = Nfa::with_size(3);
        aut.set_initial(0);
        aut.add_transition(0, 0, 1);
        aut.add_transition(1, 1, 2);
        aut.add_transition(0, 1, 2);
        aut.add_transition(1, 0, 0);
        aut.add_transition(2, 1, 2);
        aut.add_transition(2, 0, 2);
        aut.set_final(2);

        assert_eq!(aut.post(&BTreeSet::from([0]), 0), BTreeSet::from([1]));
        assert_eq!(aut.post(&BTreeSet::from([0, 1]), 0), BTreeSet::from([0, 1]));
        assert_eq!(
            aut.post(&BTreeSet::from([0, 1, 2]), 1),
            BTreeSet::from([2])
        );
        assert_eq!(
            aut.post(&BTreeSet::from([0, 1, 2]), 0),
            BTreeSet::from([0, 1, 2])
        );

        let mut alphabet = Alphabet::on_the_fly();
        alphabet.translate("0").unwrap();
        alphabet.translate("1").unwrap();
        let map = aut.post_map(0, &alphabet);
        assert_eq!(map[&0], BTreeSet::from([1]));
        assert_eq!(map[&1], BTreeSet::from([2]));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn grouped_posts_are_ordered_by_symbol() {
        let aut = divisible_by(2);
        assert_eq!(
            aut.symbol_posts(0),
            &[SymbolPost::new(0, [0]), SymbolPost::new(1, [1])]
        );
        assert_eq!(
            aut.symbol_posts(1),
            &[SymbolPost::new(0, [1]), SymbolPost::new(1, [2])]
        );
    }

    #[test]
    fn epsilon_posts_group_silent_moves() {
        let mut nfa = Nfa::with_size(10);
        nfa.set_initial(0);
        nfa.set_final(1);
        nfa.add_transition(1, 1, 2);
        nfa.add_transition(1, 2, 2);
        nfa.add_transition(1, EPSILON, 2);
        nfa.add_transition(1, EPSILON, 3);
        let eps = nfa.epsilon_symbol_posts(1).unwrap();
        assert_eq!(eps.symbol(), EPSILON);
        assert_eq!(eps.targets(), &[2, 3]);

        nfa.add_transition(0, 8, 5);
        nfa.add_transition(0, 8, 6);
        let post = nfa.symbol_post(0, 8).unwrap();
        assert_eq!(post.targets(), &[5, 6]);

        assert!(nfa.epsilon_symbol_posts(5).is_none());
        assert!(nfa.is_epsilon(EPSILON));
        assert!(!nfa.is_epsilon(0));
    }

    #[test]
    fn transitions_to_collects_incoming_edges() {
        let aut = crate::tests::automaton_a();
        assert_eq!(
            aut.transitions_to(9),
            vec![
                Transition::new(3, b'b'.into(), 9),
                Transition::new(5, b'c'.into(), 9),
                Transition::new(9, b'a'.into(), 9),
            ]
        );
    }

    #[test]
    fn determinism_requires_single_initial_and_single_targets() {
        let mut nfa = Nfa::with_size(2);
        nfa.set_initial(0);
        nfa.add_transition(0, 0, 0);
        nfa.add_transition(0, 1, 0);
        nfa.add_transition(0, 0, 1);
        assert!(!nfa.is_deterministic());

        let mut dfa = Nfa::with_size(1);
        dfa.set_initial(0);
        dfa.add_transition(0, 0, 0);
        dfa.add_transition(0, 1, 0);
        assert!(dfa.is_deterministic());

        dfa.set_initial(0);
        assert!(dfa.is_deterministic());
    }

    #[test]
    fn unify_initial_merges_outgoing_moves() {
        let mut nfa = Nfa::with_size(10);
        nfa.set_initial(0);
        nfa.set_initial(1);
        nfa.add_transition(0, 1, 2);
        nfa.unify_initial();
        assert!(nfa.has_initial(10));
        assert!(nfa.has_transition(10, 1, 2));
        assert_eq!(nfa.initial_states().len(), 1);
    }

    #[test]
    fn unify_final_merges_incoming_moves() {
        let mut nfa = Nfa::with_size(4);
        nfa.set_initial(0);
        nfa.set_final(2);
        nfa.set_final(3);
        nfa.add_transition(0, 5, 2);
        nfa.add_transition(1, 6, 3);
        nfa.unify_final();
        assert_eq!(nfa.final_states(), &BTreeSet::from([4]));
        assert!(nfa.has_transition(0, 5, 4));
        assert!(nfa.has_transition(1, 6, 4));
    }

    #[test]
    fn one_letter_aut_collapses_parallel_edges() {
        let abstract_symbol: Symbol = b'x'.into();
        let aut = crate::tests::automaton_a();
        let digraph = aut.one_letter_aut(abstract_symbol);

        assert_eq!(digraph.size(), aut.size());
        assert_eq!(digraph.num_of_transitions(), 12);
        assert!(digraph.has_transition(1, abstract_symbol, 10));
        assert!(digraph.has_transition(10, abstract_symbol, 7));
        assert!(!digraph.has_transition(10, b'a'.into(), 7));
        assert!(!digraph.has_transition(10, b'b'.into(), 7));
        assert!(!digraph.has_transition(10, b'c'.into(), 7));
    }
}
