use std::collections::BTreeSet;

use indexmap::IndexMap;
use log::{debug, trace};
use serde::Serialize;

use super::{Grammar, EPSILON};

pub type SymbolSet = BTreeSet<String>;

/// FIRST set of every non-terminal, in grammar order. Sets hold terminals
/// and possibly `ε`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FirstSets {
    pub(super) map: IndexMap<String, SymbolSet>,
}

impl FirstSets {
    pub fn get(&self, non_terminal: &str) -> Option<&SymbolSet> {
        self.map.get(non_terminal)
    }

    /// A non-terminal is nullable iff `ε` is in its FIRST set.
    pub fn is_nullable(&self, non_terminal: &str) -> bool {
        self.map
            .get(non_terminal)
            .map_or(false, |first| first.contains(EPSILON))
    }

    pub fn contains_key(&self, non_terminal: &str) -> bool {
        self.map.contains_key(non_terminal)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SymbolSet)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Grammar {
    pub fn compute_first(&self) -> FirstSets {
        let mut map: IndexMap<String, SymbolSet> = self
            .non_terminals()
            .map(|nt| (nt.to_string(), SymbolSet::new()))
            .collect();

        let mut passes = 0;
        let mut changed = true;
        while changed {
            changed = self.first_pass(&mut map);
            passes += 1;
            trace!("FIRST pass {}: changed = {}", passes, changed);
        }
        debug!("FIRST sets converged after {} passes", passes);

        FirstSets { map }
    }

    /// One sweep over all productions. Returns whether any set grew.
    fn first_pass(&self, map: &mut IndexMap<String, SymbolSet>) -> bool {
        let mut changed = false;
        for (left, production) in self.rules() {
            let first = self.first_of_symbols(production, map);
            if let Some(set) = map.get_mut(left) {
                for symbol in first {
                    changed |= set.insert(symbol);
                }
            }
        }
        changed
    }

    /// FIRST of an arbitrary symbol string, given completed FIRST sets.
    /// The empty string yields `{ε}`.
    pub fn first_of_sequence<S: AsRef<str>>(&self, symbols: &[S], first: &FirstSets) -> SymbolSet {
        self.first_of_symbols(symbols, &first.map)
    }

    pub(super) fn first_of_symbols<S: AsRef<str>>(
        &self,
        symbols: &[S],
        first: &IndexMap<String, SymbolSet>,
    ) -> SymbolSet {
        let mut result = SymbolSet::new();
        for symbol in symbols.iter().map(|s| s.as_ref()) {
            if symbol == EPSILON {
                continue;
            }
            if !self.is_non_terminal(symbol) {
                result.insert(symbol.to_string());
                return result;
            }
            let nullable = match first.get(symbol) {
                Some(set) => {
                    result.extend(set.iter().filter(|s| s.as_str() != EPSILON).cloned());
                    set.contains(EPSILON)
                }
                None => false,
            };
            if !nullable {
                return result;
            }
        }
        result.insert(EPSILON.to_string());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_grammars::{expression, expression_permuted, left_recursive, set};
    use super::*;

    #[test]
    fn expression_first_sets() {
        let first = expression().compute_first();
        assert_eq!(first.get("F"), Some(&set(&["(", "id"])));
        assert_eq!(first.get("T"), Some(&set(&["(", "id"])));
        assert_eq!(first.get("T'"), Some(&set(&["*", "ε"])));
        assert_eq!(first.get("E"), Some(&set(&["(", "id"])));
        assert_eq!(first.get("E'"), Some(&set(&["+", "ε"])));
        assert!(first.is_nullable("E'"));
        assert!(!first.is_nullable("E"));
    }

    #[test]
    fn left_recursion_and_nullable_chain() {
        let first = left_recursive().compute_first();
        assert_eq!(first.get("A"), Some(&set(&["x", "ε"])));
        assert_eq!(first.get("B"), Some(&set(&["x", "y", "ε"])));
        assert_eq!(first.get("S"), Some(&set(&["c", "x", "y"])));
    }

    #[test]
    fn all_nullable_production_adds_epsilon() {
        let g = Grammar::from_rules([
            ("S", vec![vec!["A", "B"]]),
            ("A", vec![vec!["ε"]]),
            ("B", vec![vec!["A"], vec!["b"]]),
        ])
        .unwrap();
        let first = g.compute_first();
        assert_eq!(first.get("S"), Some(&set(&["b", "ε"])));
    }

    #[test]
    fn no_productions_gives_empty_set() {
        let g = Grammar::from_rules([("S", vec![vec!["A", "s"]]), ("A", vec![])]).unwrap();
        let first = g.compute_first();
        assert_eq!(first.get("A"), Some(&SymbolSet::new()));
        assert_eq!(first.get("S"), Some(&SymbolSet::new()));
    }

    #[test]
    fn first_never_contains_non_terminals() {
        for g in [expression(), left_recursive()] {
            let first = g.compute_first();
            assert_eq!(first.len(), g.non_terminal_count());
            for (_, set) in first.iter() {
                assert!(set.iter().all(|s| !g.is_non_terminal(s)));
            }
        }
    }

    #[test]
    fn passes_are_monotone_and_bounded() {
        let g = left_recursive();
        let final_sets = g.compute_first();
        let bound = g.non_terminal_count() * (g.terminals().len() + 1);

        let mut map: IndexMap<String, SymbolSet> = g
            .non_terminals()
            .map(|nt| (nt.to_string(), SymbolSet::new()))
            .collect();
        let mut previous = map.clone();
        let mut passes = 0;
        while g.first_pass(&mut map) {
            passes += 1;
            for (nt, set) in &map {
                assert!(previous[nt].is_subset(set));
                assert!(set.is_subset(&final_sets.map[nt]));
            }
            previous = map.clone();
        }
        assert!(passes <= bound);
        assert_eq!(map, final_sets.map);
    }

    #[test]
    fn idempotent_and_order_independent() {
        let g = expression();
        assert_eq!(g.compute_first(), g.compute_first());
        // IndexMap equality ignores key order
        assert_eq!(g.compute_first(), expression_permuted().compute_first());
    }

    #[test]
    fn first_of_sequence() {
        let g = expression();
        let first = g.compute_first();
        let empty: [&str; 0] = [];
        assert_eq!(g.first_of_sequence(&empty, &first), set(&["ε"]));
        assert_eq!(g.first_of_sequence(&["E'"], &first), set(&["+", "ε"]));
        assert_eq!(g.first_of_sequence(&["E'", "T'"], &first), set(&["+", "*", "ε"]));
        assert_eq!(g.first_of_sequence(&["T'", ")", "E'"], &first), set(&["*", ")"]));
        assert_eq!(g.first_of_sequence(&["F", "T'"], &first), set(&["(", "id"]));
        assert_eq!(g.first_of_sequence(&["ε"], &first), set(&["ε"]));
    }
}
