//! Translation between user-facing symbol labels and the integer
//! [`Symbol`]s that transitions carry.
//!
//! Three strategies exist: an on-the-fly alphabet that hands out the next
//! free value the first time it sees a label, a closed alphabet built from
//! a fixed list that rejects anything else, and a direct alphabet that
//! computes values from the labels themselves without keeping any state.
//! Algorithms that must reason about symbols absent from their operands
//! (complement, universality, inclusion) borrow an alphabet; they never
//! own one.

use std::collections::BTreeMap;

use crate::{Error, Result, Symbol, Word};

/// An alphabet strategy. Constructed through [`Alphabet::on_the_fly`],
/// [`Alphabet::enumerated`] or [`Alphabet::direct`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alphabet {
    /// Assigns increasing symbol values as labels are first encountered.
    OnTheFly(OnTheFlyAlphabet),
    /// A closed set of labels fixed at construction.
    Enumerated(EnumeratedAlphabet),
    /// Stateless translation computed from the label itself.
    Direct(DirectAlphabet),
}

/// State of the on-the-fly strategy: the label map and the next value to
/// hand out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnTheFlyAlphabet {
    symbol_map: BTreeMap<String, Symbol>,
    next_value: Symbol,
}

/// A closed alphabet; label values are positions in the defining list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumeratedAlphabet {
    symbol_map: BTreeMap<String, Symbol>,
}

/// The direct strategy carries no state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectAlphabet;

impl Alphabet {
    /// Creates an on-the-fly alphabet starting at symbol value 0.
    pub fn on_the_fly() -> Self {
        Self::on_the_fly_from(0)
    }

    /// Creates an on-the-fly alphabet whose first label receives `offset`.
    pub fn on_the_fly_from(offset: Symbol) -> Self {
        Alphabet::OnTheFly(OnTheFlyAlphabet {
            symbol_map: BTreeMap::new(),
            next_value: offset,
        })
    }

    /// Creates an on-the-fly alphabet seeded with an existing label map.
    /// Later unseen labels continue one past the largest seeded value.
    pub fn from_symbol_map<L: Into<String>, I: IntoIterator<Item = (L, Symbol)>>(map: I) -> Self {
        let symbol_map: BTreeMap<String, Symbol> =
            map.into_iter().map(|(l, v)| (l.into(), v)).collect();
        let next_value = symbol_map.values().max().map_or(0, |max| max + 1);
        Alphabet::OnTheFly(OnTheFlyAlphabet {
            symbol_map,
            next_value,
        })
    }

    /// Creates a closed alphabet from an ordered list of labels; the i-th
    /// label translates to symbol value i. Fails with
    /// [`Error::DuplicateSymbol`] on repeated labels.
    pub fn enumerated<L: Into<String>, I: IntoIterator<Item = L>>(labels: I) -> Result<Self> {
        let mut symbol_map = BTreeMap::new();
        for (value, label) in labels.into_iter().enumerate() {
            let label = label.into();
            if symbol_map.contains_key(&label) {
                return Err(Error::DuplicateSymbol(label));
            }
            symbol_map.insert(label, value as Symbol);
        }
        Ok(Alphabet::Enumerated(EnumeratedAlphabet { symbol_map }))
    }

    /// Creates a direct alphabet.
    pub fn direct() -> Self {
        Alphabet::Direct(DirectAlphabet)
    }

    /// Translates a label to its symbol value.
    ///
    /// On-the-fly alphabets assign the next free value on first sight.
    /// Enumerated alphabets fail with [`Error::UnknownSymbol`] for labels
    /// outside their fixed set. Direct alphabets never fail: a label of the
    /// form `'c'` translates to the code point of `c`, an integer label to
    /// its value, and anything else to 0.
    pub fn translate(&mut self, label: &str) -> Result<Symbol> {
        match self {
            Alphabet::OnTheFly(alphabet) => {
                if let Some(&value) = alphabet.symbol_map.get(label) {
                    return Ok(value);
                }
                let value = alphabet.next_value;
                alphabet.symbol_map.insert(label.to_string(), value);
                alphabet.next_value += 1;
                Ok(value)
            }
            Alphabet::Enumerated(alphabet) => alphabet
                .symbol_map
                .get(label)
                .copied()
                .ok_or_else(|| Error::UnknownSymbol(label.to_string())),
            Alphabet::Direct(_) => Ok(direct_value(label)),
        }
    }

    /// Looks up the label mapped to `symbol`.
    ///
    /// Only the invertible strategies support this; a direct alphabet and
    /// any unmapped value fail with [`Error::NotFound`].
    pub fn reverse_translate(&self, symbol: Symbol) -> Result<String> {
        let symbol_map = match self {
            Alphabet::OnTheFly(alphabet) => &alphabet.symbol_map,
            Alphabet::Enumerated(alphabet) => &alphabet.symbol_map,
            Alphabet::Direct(_) => return Err(Error::NotFound(symbol)),
        };
        symbol_map
            .iter()
            .find(|(_, &value)| value == symbol)
            .map(|(label, _)| label.clone())
            .ok_or(Error::NotFound(symbol))
    }

    /// All symbol values the alphabet currently knows, in increasing
    /// order: the values assigned so far for on-the-fly, the fixed set for
    /// enumerated. A direct alphabet cannot enumerate its symbols and
    /// returns an empty list.
    pub fn known_symbols(&self) -> Vec<Symbol> {
        let symbol_map = match self {
            Alphabet::OnTheFly(alphabet) => &alphabet.symbol_map,
            Alphabet::Enumerated(alphabet) => &alphabet.symbol_map,
            Alphabet::Direct(_) => return Vec::new(),
        };
        let mut symbols: Vec<Symbol> = symbol_map.values().copied().collect();
        symbols.sort_unstable();
        symbols.dedup();
        symbols
    }

    /// The label-to-value map, where one exists.
    pub fn symbol_map(&self) -> Option<&BTreeMap<String, Symbol>> {
        match self {
            Alphabet::OnTheFly(alphabet) => Some(&alphabet.symbol_map),
            Alphabet::Enumerated(alphabet) => Some(&alphabet.symbol_map),
            Alphabet::Direct(_) => None,
        }
    }
}

fn direct_value(label: &str) -> Symbol {
    let chars: Vec<char> = label.chars().collect();
    if let ['\'', c, '\''] = chars[..] {
        return c as Symbol;
    }
    label.parse().unwrap_or(0)
}

/// Translates a sequence of labels into a [`Word`] through `alphabet`.
pub fn encode_word<'a, I: IntoIterator<Item = &'a str>>(
    alphabet: &mut Alphabet,
    labels: I,
) -> Result<Word> {
    labels
        .into_iter()
        .map(|label| alphabet.translate(label))
        .collect()
}
