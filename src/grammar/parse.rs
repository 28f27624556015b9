use indexmap::IndexMap;

use super::{grammar::Production, Error, Grammar, Result};

impl Grammar {
    /// Reads rules written as `A -> x B | ε`, one left side per line. A line
    /// starting with `|` adds alternatives to the previous left side.
    pub fn parse(grammar: &str) -> Result<Self> {
        let mut rules: IndexMap<String, Vec<Production>> = IndexMap::new();

        let mut previous_left: Option<&str> = None;
        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let parts: Vec<&str> = line.split("->").collect();
            if parts.len() > 2 {
                return Err(Error::parse(i + 1, "too many \"->\""));
            }
            let (left, rights): (&str, &str) = if parts.len() == 2 {
                let left_str = parts[0].trim();
                if left_str.is_empty() {
                    return Err(Error::parse(i + 1, "empty left side"));
                } else if left_str.split_whitespace().count() != 1 {
                    return Err(Error::parse(i + 1, "left side contains whitespace"));
                }
                (left_str, parts[1].trim())
            } else {
                let continuation = parts[0].trim();
                match (previous_left, continuation.strip_prefix('|')) {
                    (Some(left), Some(rest)) => (left, rest.trim()),
                    (None, _) => return Err(Error::parse(i + 1, "cannot find left side")),
                    (Some(_), None) => {
                        return Err(Error::parse(i + 1, "expected \"->\" or \"|\""))
                    }
                }
            };

            previous_left = Some(left);

            let productions = rules.entry(left.to_string()).or_default();
            for right in rights.split('|') {
                let symbols: Production = right.split_whitespace().map(str::to_string).collect();
                if symbols.is_empty() {
                    return Err(Error::parse(
                        i + 1,
                        format!("empty alternative for {}, write {}", left, super::EPSILON),
                    ));
                }
                productions.push(symbols);
            }
        }

        Self::new(rules)
    }

    /// Reads a JSON object mapping each non-terminal to its productions,
    /// e.g. `{"S": [["a", "S"], ["ε"]]}`. Key order is kept.
    pub fn from_json(grammar: &str) -> Result<Self> {
        let rules: IndexMap<String, Vec<Production>> = serde_json::from_str(grammar)?;
        Self::new(rules)
    }

    /// JSON when the input starts with `{`, the arrow notation otherwise.
    pub fn load(input: &str) -> Result<Self> {
        if input.trim_start().starts_with('{') {
            Self::from_json(input)
        } else {
            Self::parse(input)
        }
    }
}
