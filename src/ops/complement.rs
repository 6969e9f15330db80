//! Completion over an alphabet and language complement.

use std::collections::BTreeSet;

use super::determinization::{determinize, SubsetMap};
use crate::{Alphabet, Nfa, State, Symbol};

/// True iff every reachable state has an outgoing transition on every
/// symbol the alphabet knows.
pub fn is_complete(aut: &Nfa, alphabet: &Alphabet) -> bool {
    let symbols = alphabet.known_symbols();
    aut.reachable_states().iter().all(|&state| {
        let outgoing: BTreeSet<Symbol> = aut
            .symbol_posts(state)
            .iter()
            .map(|sp| sp.symbol())
            .collect();
        symbols.iter().all(|sym| outgoing.contains(sym))
    })
}

/// Completes `aut` in place over `alphabet`: the sink state is added if
/// absent and self-looped on every symbol, and every state receives a
/// transition to the sink on each symbol it has no outgoing transition
/// for.
pub fn make_complete(aut: &mut Nfa, sink: State, alphabet: &Alphabet) {
    make_complete_over(aut, sink, &alphabet.known_symbols());
}

pub(crate) fn make_complete_over(aut: &mut Nfa, sink: State, symbols: &[Symbol]) {
    let original_size = aut.size();
    for state in 0..original_size {
        let outgoing: BTreeSet<Symbol> = aut
            .symbol_posts(state)
            .iter()
            .map(|sp| sp.symbol())
            .collect();
        for &symbol in symbols {
            if !outgoing.contains(&symbol) {
                aut.add_transition(state, symbol, sink);
            }
        }
    }
    if sink >= original_size {
        for &symbol in symbols {
            aut.add_transition(sink, symbol, sink);
        }
    }
}

/// Complements the language of `aut` over `alphabet`: determinize,
/// complete with a fresh sink, then flip the acceptance status of every
/// state. The returned map is the determinization's subset map; the empty
/// subset maps to the sink introduced by completion.
pub fn complement(aut: &Nfa, alphabet: &Alphabet) -> (Nfa, SubsetMap) {
    complement_over(aut, &alphabet.known_symbols())
}

pub(crate) fn complement_over(aut: &Nfa, symbols: &[Symbol]) -> (Nfa, SubsetMap) {
    let (mut dfa, mut subset_map) = determinize(aut);
    let sink = dfa.size();
    make_complete_over(&mut dfa, sink, symbols);
    subset_map.entry(Vec::new()).or_insert(sink);

    let accepting: BTreeSet<State> = dfa.final_states().clone();
    for state in 0..dfa.size() {
        if accepting.contains(&state) {
            dfa.unset_final(state);
        } else {
            dfa.set_final(state);
        }
    }
    (dfa, subset_map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::divisible_by;
    use crate::{ops, Alphabet, Nfa};

    fn ab_alphabet() -> Alphabet {
        let mut alphabet = Alphabet::on_the_fly();
        alphabet.translate("a").unwrap();
        alphabet.translate("b").unwrap();
        alphabet
    }

    #[test]
    fn chain_automata_are_complete() {
        let alphabet = ab_alphabet();
        for k in [2, 4, 8] {
            assert!(is_complete(&divisible_by(k), &alphabet));
        }

        let mut partial = Nfa::with_size(1);
        partial.set_initial(0);
        partial.add_transition(0, 0, 0);
        assert!(!is_complete(&partial, &alphabet));
        partial.add_transition(0, 1, 0);
        assert!(is_complete(&partial, &alphabet));
    }

    #[test]
    fn make_complete_adds_a_sink() {
        let alphabet = ab_alphabet();
        let mut aut = Nfa::with_size(1);
        aut.set_initial(0);
        aut.add_transition(0, 0, 0);
        assert!(!is_complete(&aut, &alphabet));

        make_complete(&mut aut, 1, &alphabet);
        assert!(is_complete(&aut, &alphabet));
        assert!(aut.has_transition(0, 1, 1));
        assert!(aut.has_transition(1, 0, 1));
        assert!(aut.has_transition(1, 1, 1));
    }

    #[test]
    fn complement_flips_membership() {
        let alphabet = ab_alphabet();
        let (res, _) = complement(&divisible_by(2), &alphabet);
        assert!(!ops::is_in_lang(&res, &[1, 1]));
        assert!(ops::is_in_lang(&res, &[1, 1, 1]));
        assert!(!ops::is_in_lang(&res, &[1, 1, 1, 1]));
    }

    #[test]
    fn complement_maps_the_empty_subset_to_the_sink() {
        let alphabet = ab_alphabet();
        let aut = divisible_by(2);
        let (res, subset_map) = complement(&aut, &alphabet);
        let &sink = subset_map.get(&Vec::new()).unwrap();
        assert!(res.is_state(sink));
        // The sink rejects in the original, so it accepts here.
        assert!(res.has_final(sink));
    }

    #[test]
    fn double_complement_restores_the_language() {
        let alphabet = ab_alphabet();
        let aut = divisible_by(4);
        let (once, _) = complement(&aut, &alphabet);
        let (twice, _) = complement(&once, &alphabet);
        assert!(ops::equivalence_check(&aut, &twice, Some(&alphabet)));
    }
}
