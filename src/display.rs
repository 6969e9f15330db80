//! Textual views of an automaton: a line-oriented `Display` impl and DOT
//! emission for graph tooling. Rendering the DOT output is left to the
//! consumer.

use std::fmt::{Display, Formatter, Write as _};

use itertools::Itertools;

use crate::Nfa;

impl Display for Nfa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "initial_states: [{}]",
            self.initial_states().iter().join(", ")
        )?;
        writeln!(
            f,
            "final_states: [{}]",
            self.final_states().iter().join(", ")
        )?;
        writeln!(f, "transitions:")?;
        for t in self.transitions() {
            writeln!(f, "{}-[{}]\u{2192}{}", t.source, t.symbol, t.target)?;
        }
        Ok(())
    }
}

impl Nfa {
    /// Emits the automaton as a DOT digraph. Final states are drawn as
    /// double circles and initial states receive an unlabelled entry
    /// arrow.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        out.push_str("digraph finiteAutomaton {\n");
        out.push_str("node [shape=circle];\n");
        for &state in self.final_states() {
            let _ = writeln!(out, "{state} [shape=doublecircle];");
        }
        for source in 0..self.size() {
            for sp in self.symbol_posts(source) {
                let _ = writeln!(
                    out,
                    "{source} -> {{{} }} [label={}];",
                    sp.targets().iter().join(" "),
                    sp.symbol()
                );
            }
        }
        out.push_str("node [shape=none, label=\"\"];\n");
        for &state in self.initial_states() {
            let _ = writeln!(out, "i{state} -> {state};");
        }
        out.push_str("}\n");
        out
    }
}
