//! Language union by disjoint juxtaposition.

use crate::Nfa;

/// Unites the languages of `lhs` and `rhs` by placing both automata side
/// by side: `lhs` keeps its state ids, `rhs` is shifted by `lhs.size()`.
/// No new states or epsilon transitions are introduced.
pub fn union(lhs: &Nfa, rhs: &Nfa) -> Nfa {
    let offset = lhs.size();
    let mut result = lhs.clone();
    result.resize(offset + rhs.size()).expect("growing never fails");

    for t in rhs.transitions() {
        result.add_transition(t.source + offset, t.symbol, t.target + offset);
    }
    for &q in rhs.initial_states() {
        result.set_initial(q + offset);
    }
    for &q in rhs.final_states() {
        result.set_final(q + offset);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::divisible_by;
    use crate::{ops, Alphabet};

    #[test]
    fn union_accepts_words_of_either_operand() {
        let by_two = divisible_by(2);
        let by_four = divisible_by(4);
        assert!(ops::is_in_lang(&by_two, &[1, 1]));
        assert!(!ops::is_in_lang(&by_four, &[1, 1]));

        let uni = union(&by_two, &by_four);
        for ones in [2, 4, 6, 8] {
            assert!(
                ops::is_in_lang(&uni, &vec![1; ones]),
                "{ones} ones should be accepted"
            );
        }
        assert!(!ops::is_in_lang(&uni, &[1]));

        let mut alphabet = Alphabet::on_the_fly();
        alphabet.translate("a").unwrap();
        alphabet.translate("b").unwrap();
        assert!(ops::is_included(&by_two, &uni, Some(&alphabet)).0);
        assert!(ops::is_included(&by_four, &uni, Some(&alphabet)).0);
        assert!(ops::is_included(&by_two, &uni, None).0);
        assert!(ops::is_included(&by_four, &uni, None).0);
    }

    #[test]
    fn union_keeps_operands_disjoint() {
        let by_two = divisible_by(2);
        let by_four = divisible_by(4);
        let uni = union(&by_two, &by_four);
        assert_eq!(uni.size(), by_two.size() + by_four.size());
        assert_eq!(
            uni.num_of_transitions(),
            by_two.num_of_transitions() + by_four.num_of_transitions()
        );
        assert!(uni.has_initial(0));
        assert!(uni.has_initial(by_two.size()));
    }
}
