use super::Grammar;

/// E -> T E', E' -> + T E' | ε, T -> F T', T' -> * F T' | ε, F -> ( E ) | id
pub fn expression() -> Grammar {
    Grammar::from_rules([
        ("E", vec![vec!["T", "E'"]]),
        ("E'", vec![vec!["+", "T", "E'"], vec!["ε"]]),
        ("T", vec![vec!["F", "T'"]]),
        ("T'", vec![vec!["*", "F", "T'"], vec!["ε"]]),
        ("F", vec![vec!["(", "E", ")"], vec!["id"]]),
    ])
    .unwrap()
}

/// The expression grammar with non-terminals and alternatives reversed.
pub fn expression_permuted() -> Grammar {
    Grammar::from_rules([
        ("F", vec![vec!["id"], vec!["(", "E", ")"]]),
        ("T'", vec![vec!["ε"], vec!["*", "F", "T'"]]),
        ("T", vec![vec!["F", "T'"]]),
        ("E'", vec![vec!["ε"], vec!["+", "T", "E'"]]),
        ("E", vec![vec!["T", "E'"]]),
    ])
    .unwrap()
}

/// Left recursive and with a nullable chain: S -> S a | A B c, A -> ε | x, B -> A | y
pub fn left_recursive() -> Grammar {
    Grammar::from_rules([
        ("S", vec![vec!["S", "a"], vec!["A", "B", "c"]]),
        ("A", vec![vec!["ε"], vec!["x"]]),
        ("B", vec![vec!["A"], vec!["y"]]),
    ])
    .unwrap()
}

pub fn set(symbols: &[&str]) -> super::SymbolSet {
    symbols.iter().map(|s| s.to_string()).collect()
}
