use indexmap::IndexMap;
use log::{debug, trace};
use serde::Serialize;

use super::{Error, FirstSets, Grammar, Result, SymbolSet, END_MARK, EPSILON};

/// FOLLOW set of every non-terminal, in grammar order. Sets hold terminals
/// and possibly `$`, never `ε`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowSets {
    start_symbol: String,
    #[serde(rename = "sets")]
    map: IndexMap<String, SymbolSet>,
}

impl FollowSets {
    pub fn get(&self, non_terminal: &str) -> Option<&SymbolSet> {
        self.map.get(non_terminal)
    }

    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
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
    /// Computes FOLLOW sets from FIRST sets of the same grammar. `$` seeds
    /// the set of `start_symbol`.
    pub fn compute_follow(&self, first: &FirstSets, start_symbol: &str) -> Result<FollowSets> {
        if !self.is_non_terminal(start_symbol) {
            return Err(Error::UnknownSymbol(start_symbol.to_string()));
        }
        let missing: Vec<String> = self
            .non_terminals()
            .filter(|nt| !first.contains_key(nt))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(Error::InconsistentInput { missing });
        }

        let mut map: IndexMap<String, SymbolSet> = self
            .non_terminals()
            .map(|nt| (nt.to_string(), SymbolSet::new()))
            .collect();
        if let Some(set) = map.get_mut(start_symbol) {
            set.insert(END_MARK.to_string());
        }

        let mut passes = 0;
        let mut changed = true;
        while changed {
            changed = self.follow_pass(first, &mut map);
            passes += 1;
            trace!("FOLLOW pass {}: changed = {}", passes, changed);
        }
        debug!("FOLLOW sets converged after {} passes", passes);

        Ok(FollowSets {
            start_symbol: start_symbol.to_string(),
            map,
        })
    }

    /// One sweep over every non-terminal occurrence on a right side.
    fn follow_pass(&self, first: &FirstSets, map: &mut IndexMap<String, SymbolSet>) -> bool {
        let mut changed = false;
        for (left, production) in self.rules() {
            for (i, symbol) in production.iter().enumerate() {
                if !self.is_non_terminal(symbol) {
                    continue;
                }
                let mut follow = self.first_of_sequence(&production[i + 1..], first);
                if follow.remove(EPSILON) {
                    if let Some(left_follow) = map.get(left) {
                        follow.extend(left_follow.iter().cloned());
                    }
                }
                if let Some(set) = map.get_mut(symbol.as_str()) {
                    for s in follow {
                        changed |= set.insert(s);
                    }
                }
            }
        }
        changed
    }
}
