use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The rules violate a structural invariant of the grammar.
    MalformedGrammar { non_terminal: String, reason: String },
    /// A symbol handed in by the caller is not a non-terminal of the grammar.
    UnknownSymbol(String),
    /// The FIRST sets were computed for another grammar.
    InconsistentInput { missing: Vec<String> },
    /// Syntax error in a textual grammar, `line` is 1-based.
    Parse { line: usize, reason: String },
    Json(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn malformed(non_terminal: &str, reason: impl Into<String>) -> Self {
        Error::MalformedGrammar {
            non_terminal: non_terminal.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        Error::Parse {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedGrammar {
                non_terminal,
                reason,
            } => write!(f, "malformed grammar at {}: {}", non_terminal, reason),
            Error::UnknownSymbol(symbol) => {
                write!(f, "\"{}\" is not a non-terminal of the grammar", symbol)
            }
            Error::InconsistentInput { missing } => write!(
                f,
                "FIRST sets do not cover non-terminals: {}",
                missing.join(", ")
            ),
            Error::Parse { line, reason } => write!(f, "Line {}: {}", line, reason),
            Error::Json(reason) => write!(f, "invalid JSON grammar: {}", reason),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}
