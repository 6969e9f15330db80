//! Epsilon elimination via closure computation.

use std::collections::BTreeSet;

use crate::{Nfa, State, Symbol};

impl Nfa {
    /// The epsilon closure of every state: the least fixpoint of following
    /// transitions on `epsilon`, including the state itself.
    fn epsilon_closures(&self, epsilon: Symbol) -> Vec<BTreeSet<State>> {
        let mut closures: Vec<BTreeSet<State>> = (0..self.size())
            .map(|q| {
                let mut closure = BTreeSet::from([q]);
                if let Some(sp) = self.symbol_post(q, epsilon) {
                    closure.extend(sp.targets().iter().copied());
                }
                closure
            })
            .collect();

        let mut changed = true;
        while changed {
            changed = false;
            for q in 0..self.size() {
                let Some(sp) = self.symbol_post(q, epsilon) else {
                    continue;
                };
                let mut extended = closures[q].clone();
                for &target in sp.targets() {
                    extended.extend(closures[target].iter().copied());
                }
                if extended.len() > closures[q].len() {
                    closures[q] = extended;
                    changed = true;
                }
            }
        }
        closures
    }

    /// Builds an equivalent automaton without transitions on `epsilon`:
    /// every non-epsilon transition (p, a, q) is re-rooted at each state
    /// whose closure contains p, and a state becomes final when its
    /// closure meets the final set.
    pub fn remove_epsilon(&self, epsilon: Symbol) -> Nfa {
        let closures = self.epsilon_closures(epsilon);

        let mut result = Nfa::with_size(self.size());
        for &q in self.initial_states() {
            result.set_initial(q);
        }
        for &q in self.final_states() {
            result.set_final(q);
        }
        for (source, closure) in closures.iter().enumerate() {
            for &reached in closure {
                if self.has_final(reached) {
                    result.set_final(source);
                }
                for sp in self.symbol_posts(reached) {
                    if sp.symbol() == epsilon {
                        continue;
                    }
                    for &target in sp.targets() {
                        result.add_transition(source, sp.symbol(), target);
                    }
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::{ops, Nfa, EPSILON};

    #[test]
    fn epsilon_transitions_are_rewritten_away() {
        let mut lhs = Nfa::with_size(3);
        lhs.set_initial(0);
        lhs.add_transition(0, 0, 1);
        lhs.add_transition(1, 1, 2);
        lhs.add_transition(0, 2, 2);
        lhs.set_final(2);

        let rhs = lhs.remove_epsilon(2);
        assert!(rhs.has_transition(0, 0, 1));
        assert!(rhs.has_transition(1, 1, 2));
        assert!(!rhs.has_transition(0, 2, 2));
    }

    #[test]
    fn closure_propagates_finality_and_moves() {
        // 0 -eps-> 1 -a-> 2, with 2 -eps-> 3 final.
        let mut aut = Nfa::with_size(4);
        aut.set_initial(0);
        aut.add_transition(0, EPSILON, 1);
        aut.add_transition(1, 0, 2);
        aut.add_transition(2, EPSILON, 3);
        aut.set_final(3);

        let cleaned = aut.remove_epsilon(EPSILON);
        assert!(cleaned.used_symbols().iter().all(|&s| s != EPSILON));
        assert!(cleaned.has_transition(0, 0, 2));
        assert!(cleaned.has_final(2));
        assert!(ops::is_in_lang(&cleaned, &[0]));
        assert!(!ops::is_in_lang(&cleaned, &[]));
    }

    #[test]
    fn chained_epsilons_close_transitively() {
        let mut aut = Nfa::with_size(4);
        aut.set_initial(0);
        aut.add_transition(0, EPSILON, 1);
        aut.add_transition(1, EPSILON, 2);
        aut.add_transition(2, 5, 3);
        aut.set_final(3);

        let cleaned = aut.remove_epsilon(EPSILON);
        assert!(cleaned.has_transition(0, 5, 3));
        assert!(cleaned.has_transition(1, 5, 3));
        assert!(ops::is_in_lang(&cleaned, &[5]));
    }
}
