use indexmap::{IndexMap, IndexSet};

use super::{Error, Result, END_MARK, EPSILON};

pub type Production = Vec<String>;

/// Context-free grammar keyed by non-terminal.
///
/// A symbol is a non-terminal iff it is a key of the rule map, every other
/// symbol is a terminal. Declaration order of non-terminals and of their
/// productions is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    rules: IndexMap<String, Vec<Production>>,
}

impl Grammar {
    /// Validates `rules` and wraps them. A production must be non-empty, may
    /// hold `ε` only as its single symbol, and never mentions `$`.
    pub fn new(rules: IndexMap<String, Vec<Production>>) -> Result<Self> {
        for (left, productions) in &rules {
            if left == EPSILON || left == END_MARK {
                return Err(Error::malformed(
                    left,
                    format!("\"{}\" is reserved and cannot be a non-terminal", left),
                ));
            }
            for production in productions {
                if production.is_empty() {
                    return Err(Error::malformed(
                        left,
                        format!("empty production, write {} instead", EPSILON),
                    ));
                }
                if production.len() > 1 && production.iter().any(|s| s == EPSILON) {
                    return Err(Error::malformed(
                        left,
                        format!(
                            "{} mixed with other symbols in \"{}\"",
                            EPSILON,
                            production.join(" ")
                        ),
                    ));
                }
                if production.iter().any(|s| s == END_MARK) {
                    return Err(Error::malformed(
                        left,
                        format!("end mark {} used inside a production", END_MARK),
                    ));
                }
            }
        }
        Ok(Self { rules })
    }

    pub fn from_rules<'a, I, P>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, P)>,
        P: IntoIterator<Item = Vec<&'a str>>,
    {
        let mut map: IndexMap<String, Vec<Production>> = IndexMap::new();
        for (left, productions) in rules {
            map.entry(left.to_string()).or_default().extend(
                productions
                    .into_iter()
                    .map(|p| p.into_iter().map(str::to_string).collect::<Production>()),
            );
        }
        Self::new(map)
    }

    pub fn is_non_terminal(&self, symbol: &str) -> bool {
        self.rules.contains_key(symbol)
    }

    pub fn productions_of(&self, non_terminal: &str) -> Result<&[Production]> {
        self.rules
            .get(non_terminal)
            .map(|p| p.as_slice())
            .ok_or_else(|| Error::UnknownSymbol(non_terminal.to_string()))
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(|s| s.as_str())
    }

    pub fn non_terminal_count(&self) -> usize {
        self.rules.len()
    }

    /// Every `(left, production)` pair in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.rules.iter().flat_map(|(left, productions)| {
            productions
                .iter()
                .map(move |production| (left.as_str(), production.as_slice()))
        })
    }

    /// Terminals in order of first appearance, `ε` excluded.
    pub fn terminals(&self) -> Vec<&str> {
        self.rules()
            .flat_map(|(_, production)| production.iter())
            .map(|s| s.as_str())
            .filter(|s| *s != EPSILON && !self.is_non_terminal(s))
            .collect::<IndexSet<&str>>()
            .into_iter()
            .collect()
    }

    /// The first declared non-terminal.
    pub fn default_start_symbol(&self) -> Option<&str> {
        self.rules.keys().next().map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
