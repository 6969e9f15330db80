//! Library for working with nondeterministic finite automata in Rust.
//!
//! The centerpiece is [`Nfa`], a dense, index-based automaton over `u32`
//! symbols. On top of it sit the classic language-theoretic constructions
//! (determinization, Boolean combination, inclusion and equivalence
//! checking), a simulation-based reduction engine built around
//! [`BinaryRelation`], and the string-constraint layer in [`strings`]
//! (segmentation and noodlification, used for solving word equations).
//!
//! Automata are built through the mutation API and consumed by value-level
//! algorithms; combinators never alias their inputs, so callers may keep
//! and mutate operands after a call returns.

/// A [`std::collections::HashMap`] keyed with the ahash hasher, which is
/// faster than the std default.
#[cfg(feature = "ahash")]
pub type Map<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;
/// A [`std::collections::HashMap`] with the std hasher.
#[cfg(not(feature = "ahash"))]
pub type Map<K, V> = std::collections::HashMap<K, V>;

/// A [`std::collections::HashSet`] hashed with ahash.
#[cfg(feature = "ahash")]
pub type Set<S> = std::collections::HashSet<S, ahash::RandomState>;
/// A [`std::collections::HashSet`] with the std hasher.
#[cfg(not(feature = "ahash"))]
pub type Set<S> = std::collections::HashSet<S>;

/// Index of a state in an automaton. States form a dense arena starting at
/// zero; removing states is only possible by renumbering the whole
/// automaton (see [`Nfa::trim`]).
pub type State = usize;

/// A symbol labelling transitions. Symbols are plain integers; the
/// translation from user-facing labels lives in [`alphabet`].
pub type Symbol = u32;

/// A finite word over [`Symbol`]s.
pub type Word = Vec<Symbol>;

/// The reserved symbol value for silent (epsilon) transitions.
///
/// It is the maximum symbol value, so epsilon transitions always sort after
/// every ordinary symbol in a state's grouped post. Operations that need a
/// different separator value accept it explicitly.
pub const EPSILON: Symbol = Symbol::MAX;

mod error;
pub use error::{Error, Result};

pub mod alphabet;
pub use alphabet::Alphabet;

mod nfa;
pub use nfa::{Nfa, Run, SymbolPost, Transition};

mod display;

pub mod ops;

mod relation;
pub use relation::BinaryRelation;

mod simulation;
pub use simulation::compute_relation;

pub mod strings;

/// Commonly used types and operations, for glob import.
pub mod prelude {
    pub use crate::alphabet::Alphabet;
    pub use crate::ops::*;
    pub use crate::{
        compute_relation, BinaryRelation, Error, Nfa, Result, Run, State, Symbol, SymbolPost,
        Transition, Word, EPSILON,
    };
}
