use crowbook_text_processing::escape;
use serde::Serialize;

use super::{FirstSets, FollowSets, Grammar, SymbolSet, END_MARK, EPSILON};

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize) -> String {
        self.rights
            .iter()
            .map(|right| right.join(" "))
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} -> {}", self.left, right, width = left_width)
                } else {
                    format!("{:>width$}  | {}", "", right, width = left_width)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        if self.rights.is_empty() {
            return String::new();
        }

        let left = format!("{} & \\rightarrow &", escape::tex(self.left));
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|s| escape::tex(*s))
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        (left + &right).replace(EPSILON, "\\epsilon")
    }
}

#[derive(Serialize)]
#[serde(transparent)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.chars().count())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex()))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl Grammar {
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let mut productions: Vec<ProductionOutput> = Vec::new();
        for (left, right) in self.rules() {
            let right = right.iter().map(|s| s.as_str()).collect();
            match productions.last_mut() {
                Some(last) if last.left == left => last.rights.push(right),
                _ => productions.push(ProductionOutput {
                    left,
                    rights: vec![right],
                }),
            }
        }
        ProductionOutputVec { productions }
    }
}

/// Sorted symbols with `sentinel` moved to the end.
fn sorted_symbols<'a>(set: &'a SymbolSet, sentinel: &'a str) -> Vec<&'a str> {
    let mut symbols: Vec<&str> = set
        .iter()
        .map(|s| s.as_str())
        .filter(|s| *s != sentinel)
        .collect();
    if set.contains(sentinel) {
        symbols.push(sentinel);
    }
    symbols
}

#[derive(Serialize)]
struct NonTerminalOutput<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    nullable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    follow: Option<Vec<&'a str>>,
}

impl NonTerminalOutput<'_> {
    fn columns(&self) -> Vec<String> {
        let mut columns = vec![self.name.to_string()];
        if let Some(nullable) = self.nullable {
            columns.push(nullable.to_string());
        }
        if let Some(first) = &self.first {
            columns.push(first.join(", "));
        }
        if let Some(follow) = &self.follow {
            columns.push(follow.join(", "));
        }
        columns
    }

    fn to_plaintext(&self) -> String {
        self.columns().join(" | ")
    }

    fn to_latex(&self) -> String {
        fn f(a: &[&str]) -> String {
            a.iter()
                .map(|s| escape::tex(*s))
                .collect::<Vec<_>>()
                .join(r"\ ")
                .replace(EPSILON, r"$\epsilon$")
        }

        let mut columns = vec![escape::tex(self.name).to_string()];
        if let Some(nullable) = self.nullable {
            columns.push(nullable.to_string());
        }
        if let Some(first) = &self.first {
            columns.push(f(first));
        }
        if let Some(follow) = &self.follow {
            columns.push(f(follow));
        }
        columns.join(" & ")
    }
}

#[derive(Serialize)]
pub struct NonTerminalOutputVec<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    start_symbol: Option<&'a str>,
    data: Vec<NonTerminalOutput<'a>>,
}

impl NonTerminalOutputVec<'_> {
    fn header(&self) -> Vec<&'static str> {
        let mut header = vec!["Symbol"];
        if let Some(row) = self.data.first() {
            if row.nullable.is_some() {
                header.push("Nullable");
            }
            if row.first.is_some() {
                header.push("First");
            }
            if row.follow.is_some() {
                header.push("Follow");
            }
        }
        header
    }

    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| s.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn to_latex(&self) -> String {
        let header = self.header();
        let content = self
            .data
            .iter()
            .map(|e| e.to_latex())
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        format!(
            "\\begin{{tabular}}{{{}}}\n{}\\\\\\hline\n{}\\\\\n\\end{{tabular}}",
            vec!["c"; header.len()].join("|"),
            header.join(" & "),
            content
        )
    }
}

impl Grammar {
    /// Per non-terminal report. With `follow` absent only nullable and
    /// FIRST columns are filled, with `first` absent only FOLLOW.
    pub fn to_non_terminal_output_vec<'a>(
        &'a self,
        first: Option<&'a FirstSets>,
        follow: Option<&'a FollowSets>,
    ) -> NonTerminalOutputVec<'a> {
        let data = self
            .non_terminals()
            .map(|name| NonTerminalOutput {
                name,
                nullable: first.map(|sets| sets.is_nullable(name)),
                first: first
                    .and_then(|sets| sets.get(name))
                    .map(|set| sorted_symbols(set, EPSILON)),
                follow: follow
                    .and_then(|sets| sets.get(name))
                    .map(|set| sorted_symbols(set, END_MARK)),
            })
            .collect();
        NonTerminalOutputVec {
            start_symbol: follow.map(|sets| sets.start_symbol()),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_grammars::expression;

    #[test]
    fn productions_plaintext() {
        let g = expression();
        let expected = [
            " E -> T E'",
            "E' -> + T E'",
            "    | ε",
            " T -> F T'",
            "T' -> * F T'",
            "    | ε",
            " F -> ( E )",
            "    | id",
        ]
        .join("\n");
        assert_eq!(g.to_production_output_vec().to_plaintext(), expected);
    }

    #[test]
    fn productions_latex_uses_epsilon_command() {
        let latex = expression().to_production_output_vec().to_latex();
        assert!(latex.starts_with("\\[\\begin{array}{cll}"));
        assert!(latex.contains("\\epsilon"));
        assert!(!latex.contains("ε"));
    }

    #[test]
    fn first_follow_plaintext() {
        let g = expression();
        let first = g.compute_first();
        let follow = g.compute_follow(&first, "E").unwrap();
        let table = g.to_non_terminal_output_vec(Some(&first), Some(&follow));
        let lines: Vec<String> = table.to_plaintext().lines().map(str::to_string).collect();
        assert_eq!(lines[0], "E | false | (, id | ), $");
        assert_eq!(lines[1], "E' | true | +, ε | ), $");
        assert_eq!(lines[4], "F | false | (, id | ), *, +, $");
    }

    #[test]
    fn first_only_table() {
        let g = expression();
        let first = g.compute_first();
        let table = g.to_non_terminal_output_vec(Some(&first), None);
        assert_eq!(table.to_plaintext().lines().nth(3), Some("T' | true | *, ε"));
        assert_eq!(table.header(), vec!["Symbol", "Nullable", "First"]);
        assert!(table.to_latex().contains("& true & *\\ $\\epsilon$"));
    }

    #[test]
    fn follow_json() {
        let g = expression();
        let first = g.compute_first();
        let follow = g.compute_follow(&first, "E").unwrap();
        let json = g.to_non_terminal_output_vec(None, Some(&follow)).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["start_symbol"], "E");
        assert_eq!(value["data"][0]["name"], "E");
        assert_eq!(value["data"][0]["follow"], serde_json::json!([")", "$"]));
        assert!(value["data"][0].get("first").is_none());
    }
}
