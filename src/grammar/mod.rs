pub mod error;
pub mod first;
pub mod follow;
pub mod grammar;
pub mod parse;
pub mod pretty_print;
pub use error::{Error, Result};
pub use first::{FirstSets, SymbolSet};
pub use follow::FollowSets;
pub use grammar::Grammar;

pub const EPSILON: &str = "ε";
pub const END_MARK: &str = "$";

#[cfg(test)]
pub(crate) mod test_grammars;
