//! Universality, language inclusion and equivalence, decided through
//! complementation.

use itertools::Itertools;
use tracing::debug;

use super::complement::complement_over;
use super::emptiness::lang_empty_with_witness;
use super::product::intersection;
use crate::{Alphabet, Nfa, Symbol, Word};

fn decision_symbols(alphabet: Option<&Alphabet>, automata: &[&Nfa]) -> Vec<Symbol> {
    match alphabet {
        Some(alphabet) => alphabet.known_symbols(),
        None => automata
            .iter()
            .flat_map(|aut| aut.used_symbols())
            .sorted_unstable()
            .dedup()
            .collect(),
    }
}

/// True iff `aut` accepts every word over `alphabet`, i.e. its complement
/// is empty.
pub fn is_universal(aut: &Nfa, alphabet: &Alphabet) -> bool {
    is_universal_with_cex(aut, alphabet).0
}

/// Universality check that also returns a shortest rejected word when the
/// automaton is not universal.
pub fn is_universal_with_cex(aut: &Nfa, alphabet: &Alphabet) -> (bool, Word) {
    let (complemented, _) = complement_over(aut, &alphabet.known_symbols());
    let (empty, witness) = lang_empty_with_witness(&complemented);
    (empty, witness.word)
}

/// Decides language inclusion of `lhs` in `rhs` by checking that
/// `lhs ∩ complement(rhs)` is empty. Returns a shortest word accepted by
/// `lhs` but not `rhs` as the counterexample; the word is empty when the
/// inclusion holds. With no alphabet given, the union of symbols used by
/// the operands is taken.
pub fn is_included(lhs: &Nfa, rhs: &Nfa, alphabet: Option<&Alphabet>) -> (bool, Word) {
    let symbols = decision_symbols(alphabet, &[lhs, rhs]);
    let (rhs_complement, _) = complement_over(rhs, &symbols);
    let (difference, _) = intersection(lhs, &rhs_complement);
    let (empty, witness) = lang_empty_with_witness(&difference);
    debug!("Inclusion check finished, included: {}", empty);
    (empty, witness.word)
}

/// True iff `lhs` and `rhs` accept the same language.
pub fn equivalence_check(lhs: &Nfa, rhs: &Nfa, alphabet: Option<&Alphabet>) -> bool {
    is_included(lhs, rhs, alphabet).0 && is_included(rhs, lhs, alphabet).0
}
