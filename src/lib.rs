extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod grammar;
pub use grammar::{Error, FirstSets, FollowSets, Grammar, Result, SymbolSet, END_MARK, EPSILON};

/// FIRST set of every non-terminal of `grammar`.
pub fn compute_first(grammar: &Grammar) -> FirstSets {
    grammar.compute_first()
}

/// FOLLOW set of every non-terminal of `grammar`, seeded with `$` at
/// `start_symbol`. `first` must come from the same grammar.
pub fn compute_follow(
    grammar: &Grammar,
    first: &FirstSets,
    start_symbol: &str,
) -> Result<FollowSets> {
    grammar.compute_follow(first, start_symbol)
}

fn report_json(grammar: &str, start_symbol: Option<&str>) -> Result<String> {
    let g = Grammar::load(grammar)?;
    let start = match start_symbol.or_else(|| g.default_start_symbol()) {
        Some(start) => start,
        None => return Ok(g.to_non_terminal_output_vec(None, None).to_json()),
    };
    let first = g.compute_first();
    let follow = g.compute_follow(&first, start)?;
    Ok(g.to_non_terminal_output_vec(Some(&first), Some(&follow)).to_json())
}

fn error_json(e: Error) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

#[wasm_bindgen]
pub fn first_follow_to_json(grammar: &str) -> String {
    report_json(grammar, None).unwrap_or_else(error_json)
}

#[wasm_bindgen]
pub fn first_follow_to_json_with_start(grammar: &str, start_symbol: &str) -> String {
    report_json(grammar, Some(start_symbol)).unwrap_or_else(error_json)
}
