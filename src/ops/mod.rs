//! Language-theoretic operations over [`crate::Nfa`].
//!
//! Structural cleanup (`trim`, `make_complete`) mutates in place; all
//! cross-automaton algebra returns freshly allocated automata and never
//! aliases its inputs.

mod trimming;

mod revert;

mod remove_epsilon;

mod determinization;
pub use determinization::{determinize, SubsetMap};

mod union;
pub use union::union;

mod product;
pub use product::{intersection, intersection_eps, ProductMap};

mod complement;
pub use complement::{complement, is_complete, make_complete};

mod concatenation;
pub use concatenation::concatenate;

mod emptiness;
pub use emptiness::{is_lang_empty, lang_empty_with_witness, word_for_path};

mod inclusion;
pub use inclusion::{equivalence_check, is_included, is_universal, is_universal_with_cex};

mod membership;
pub use membership::{accepts_epsilon, is_in_lang, is_prefix_in_lang};

mod reduction;
pub use reduction::{minimize, reduce, StateRenaming};
