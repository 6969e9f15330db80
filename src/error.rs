use crate::Symbol;

/// Errors surfaced by the automaton core, the alphabets and the
/// segmentation layer. Algorithms never retry and never return partial
/// results; a failing call leaves its output untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A resize would shrink the automaton below its current state count,
    /// which would leave dangling transition endpoints.
    #[error("cannot resize automaton of size {current} to {requested}")]
    InvalidSize {
        /// Current number of states.
        current: usize,
        /// Requested number of states.
        requested: usize,
    },

    /// A closed alphabet was asked to translate a label it does not list.
    #[error("symbol {0:?} is not part of the alphabet")]
    UnknownSymbol(String),

    /// A closed alphabet was constructed from a list with repeated labels.
    #[error("duplicate symbol {0:?} in alphabet construction")]
    DuplicateSymbol(String),

    /// Reverse lookup of a symbol value that no label maps to.
    #[error("no label is mapped to symbol value {0}")]
    NotFound(Symbol),

    /// Segmentation found two paths reaching the same state that disagree
    /// on the number of separator transitions along the way.
    #[error("state {state} is reachable at separator depths {first} and {second}")]
    InconsistentDepth {
        /// The state with ambiguous depth.
        state: crate::State,
        /// Depth recorded first.
        first: usize,
        /// Conflicting depth.
        second: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
