//! Product construction: plain and epsilon-preserving intersection.

use std::collections::BTreeSet;

use tracing::trace;

use crate::{Map, Nfa, State, Symbol};

/// Maps each constructed pair of operand states to its product state.
pub type ProductMap = Map<(State, State), State>;

/// Classic synchronized product: a transition fires only when both
/// components agree on the symbol; a pair is final iff both components
/// are. The returned map covers exactly the pairs that were constructed,
/// keeping the state count bounded by reachable pairs.
pub fn intersection(lhs: &Nfa, rhs: &Nfa) -> (Nfa, ProductMap) {
    product(lhs, rhs, &BTreeSet::new())
}

/// Epsilon-preserving product: transitions on a symbol from `epsilons` may
/// fire alone, advancing one component while the other stays put, in
/// addition to the synchronized moves.
pub fn intersection_eps(lhs: &Nfa, rhs: &Nfa, epsilons: &BTreeSet<Symbol>) -> (Nfa, ProductMap) {
    product(lhs, rhs, epsilons)
}

fn product(lhs: &Nfa, rhs: &Nfa, epsilons: &BTreeSet<Symbol>) -> (Nfa, ProductMap) {
    let mut result = Nfa::new();
    let mut product_map = ProductMap::default();
    let mut worklist: Vec<(State, State)> = Vec::new();

    for &l in lhs.initial_states() {
        for &r in rhs.initial_states() {
            let id = result.add_state();
            result.set_initial(id);
            if lhs.has_final(l) && rhs.has_final(r) {
                result.set_final(id);
            }
            product_map.insert((l, r), id);
            worklist.push((l, r));
        }
    }

    while let Some((l, r)) = worklist.pop() {
        let source = product_map[&(l, r)];

        // Synchronized moves on symbols both components can take.
        for sp in lhs.symbol_posts(l) {
            let Some(rhs_sp) = rhs.symbol_post(r, sp.symbol()) else {
                continue;
            };
            for &lt in sp.targets() {
                for &rt in rhs_sp.targets() {
                    let target = discover(
                        &mut result,
                        &mut product_map,
                        &mut worklist,
                        lhs,
                        rhs,
                        (lt, rt),
                    );
                    result.add_transition(source, sp.symbol(), target);
                }
            }
        }

        // Lone epsilon moves advance a single component.
        for &epsilon in epsilons {
            if let Some(sp) = lhs.symbol_post(l, epsilon) {
                for &lt in sp.targets() {
                    let target = discover(
                        &mut result,
                        &mut product_map,
                        &mut worklist,
                        lhs,
                        rhs,
                        (lt, r),
                    );
                    result.add_transition(source, epsilon, target);
                }
            }
            if let Some(sp) = rhs.symbol_post(r, epsilon) {
                for &rt in sp.targets() {
                    let target = discover(
                        &mut result,
                        &mut product_map,
                        &mut worklist,
                        lhs,
                        rhs,
                        (l, rt),
                    );
                    result.add_transition(source, epsilon, target);
                }
            }
        }
    }

    trace!("Built product automaton with {} states", result.size());
    (result, product_map)
}

fn discover(
    result: &mut Nfa,
    product_map: &mut ProductMap,
    worklist: &mut Vec<(State, State)>,
    lhs: &Nfa,
    rhs: &Nfa,
    pair: (State, State),
) -> State {
    if let Some(&id) = product_map.get(&pair) {
        return id;
    }
    let id = result.add_state();
    if lhs.has_final(pair.0) && rhs.has_final(pair.1) {
        result.set_final(id);
    }
    product_map.insert(pair, id);
    worklist.push(pair);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::divisible_by;
    use crate::{ops, EPSILON};
    use pretty_assertions::assert_eq;

    #[test]
    fn intersection_of_divisibility_chains() {
        let by_two = divisible_by(2);
        let by_four = divisible_by(4);
        let (inter, product_map) = intersection(&by_two, &by_four);

        assert!(!ops::is_in_lang(&inter, &[1, 1]));
        assert!(ops::is_in_lang(&inter, &[1, 1, 1, 1]));
        assert!(!ops::is_in_lang(&inter, &[1; 6]));
        assert!(ops::is_in_lang(&inter, &[1; 8]));
        assert!(ops::is_included(&inter, &by_two, None).0);
        assert!(ops::is_included(&inter, &by_four, None).0);

        let mut expected = ProductMap::default();
        for (pair, id) in [((0, 0), 0), ((1, 1), 1), ((1, 3), 3), ((2, 2), 2), ((2, 4), 4)] {
            expected.insert(pair, id);
        }
        assert_eq!(product_map, expected);
    }

    #[test]
    fn epsilon_preserving_product_advances_components_independently() {
        let mut a = Nfa::with_size(6);
        a.set_initial(0);
        for q in [1, 4, 5] {
            a.set_final(q);
        }
        a.add_transition(0, EPSILON, 1);
        a.add_transition(1, b'a'.into(), 1);
        a.add_transition(1, b'b'.into(), 1);
        a.add_transition(1, b'c'.into(), 2);
        a.add_transition(2, b'b'.into(), 4);
        a.add_transition(2, EPSILON, 3);
        a.add_transition(3, b'a'.into(), 5);

        let mut b = Nfa::with_size(10);
        b.set_initial(0);
        for q in [2, 4, 8, 7] {
            b.set_final(q);
        }
        b.add_transition(0, b'b'.into(), 1);
        b.add_transition(0, b'a'.into(), 2);
        b.add_transition(2, b'a'.into(), 4);
        b.add_transition(2, EPSILON, 3);
        b.add_transition(3, b'b'.into(), 4);
        b.add_transition(0, b'c'.into(), 5);
        b.add_transition(5, b'a'.into(), 8);
        b.add_transition(5, EPSILON, 6);
        b.add_transition(6, b'a'.into(), 9);
        b.add_transition(6, b'b'.into(), 7);

        let (result, product_map) =
            intersection_eps(&a, &b, &BTreeSet::from([EPSILON]));

        assert_eq!(result.size(), 13);
        for pair in [
            (0, 0),
            (1, 0),
            (1, 1),
            (1, 2),
            (1, 3),
            (1, 4),
            (2, 5),
            (3, 5),
            (2, 6),
            (3, 6),
            (4, 7),
            (5, 9),
            (5, 8),
        ] {
            assert!(
                result.is_state(product_map[&pair]),
                "missing product state for {pair:?}"
            );
        }

        assert!(result.has_initial(product_map[&(0, 0)]));
        assert_eq!(result.initial_states().len(), 1);
        for pair in [(1, 2), (1, 4), (4, 7), (5, 8)] {
            assert!(result.has_final(product_map[&pair]));
        }
        assert_eq!(result.final_states().len(), 4);

        assert_eq!(result.num_of_transitions(), 15);

        let outdegree = |pair: (usize, usize)| {
            result
                .transitions_from(product_map[&pair])
                .count()
        };

        assert!(result.has_transition(
            product_map[&(0, 0)],
            EPSILON,
            product_map[&(1, 0)]
        ));
        assert_eq!(outdegree((0, 0)), 1);

        assert!(result.has_transition(product_map[&(1, 0)], b'b'.into(), product_map[&(1, 1)]));
        assert!(result.has_transition(product_map[&(1, 0)], b'a'.into(), product_map[&(1, 2)]));
        assert!(result.has_transition(product_map[&(1, 0)], b'c'.into(), product_map[&(2, 5)]));
        assert_eq!(outdegree((1, 0)), 3);

        assert_eq!(outdegree((1, 1)), 0);

        assert!(result.has_transition(product_map[&(1, 2)], EPSILON, product_map[&(1, 3)]));
        assert!(result.has_transition(product_map[&(1, 2)], b'a'.into(), product_map[&(1, 4)]));
        assert_eq!(outdegree((1, 2)), 2);

        assert!(result.has_transition(product_map[&(1, 3)], b'b'.into(), product_map[&(1, 4)]));
        assert_eq!(outdegree((1, 3)), 1);

        assert_eq!(outdegree((1, 4)), 0);

        assert!(result.has_transition(product_map[&(2, 5)], EPSILON, product_map[&(3, 5)]));
        assert!(result.has_transition(product_map[&(2, 5)], EPSILON, product_map[&(2, 6)]));
        assert!(result.has_transition(product_map[&(2, 5)], EPSILON, product_map[&(3, 6)]));
        assert_eq!(outdegree((2, 5)), 3);

        assert!(result.has_transition(product_map[&(3, 5)], b'a'.into(), product_map[&(5, 8)]));
        assert!(result.has_transition(product_map[&(3, 5)], EPSILON, product_map[&(3, 6)]));
        assert_eq!(outdegree((3, 5)), 2);

        assert!(result.has_transition(product_map[&(2, 6)], b'b'.into(), product_map[&(4, 7)]));
        assert!(result.has_transition(product_map[&(2, 6)], EPSILON, product_map[&(3, 6)]));
        assert_eq!(outdegree((2, 6)), 2);

        assert!(result.has_transition(product_map[&(3, 6)], b'a'.into(), product_map[&(5, 9)]));
        assert_eq!(outdegree((3, 6)), 1);

        assert_eq!(outdegree((4, 7)), 0);
        assert_eq!(outdegree((5, 9)), 0);
        assert_eq!(outdegree((5, 8)), 0);
    }
}
