//! Transition reversal.

use crate::Nfa;

impl Nfa {
    /// Reverses every transition and swaps the initial and final sets.
    /// State numbering is preserved.
    pub fn revert(&self) -> Nfa {
        let mut result = Nfa::with_size(self.size());
        for t in self.transitions() {
            result.add_transition(t.target, t.symbol, t.source);
        }
        for &q in self.initial_states() {
            result.set_final(q);
        }
        for &q in self.final_states() {
            result.set_initial(q);
        }
        result
    }
}
