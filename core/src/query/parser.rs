//! Single-clause query grammar.
//!
//! ```text
//! query      := fieldQuery | simpleQuery
//! fieldQuery := IDENT SP* OPERATOR SP* REST
//! OPERATOR   := "!=" | ">=" | "<=" | "=" | ">" | "<"
//! simpleQuery:= any text not matching fieldQuery
//! ```
//!
//! There is no AND/OR composition. Input that does not fit `fieldQuery` is not an
//! error, it is searched as plain text.

use std::fmt;

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    Gt,
    Lt,
    Ge,
    Le,
    /// Substring containment, used for any operator text that is not recognized.
    Contains,
}

/// Two-character operators come first so `>=` is never read as `>` followed by `=`.
const OPERATORS: [(&str, Operator); 6] = [
    ("!=", Operator::NotEq),
    (">=", Operator::Ge),
    ("<=", Operator::Le),
    ("=", Operator::Eq),
    (">", Operator::Gt),
    ("<", Operator::Lt),
];

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Contains => "~",
        }
    }

    pub fn is_ordering(&self) -> bool {
        matches!(self, Operator::Gt | Operator::Lt | Operator::Ge | Operator::Le)
    }
}

impl From<&str> for Operator {
    fn from(s: &str) -> Self {
        OPERATORS
            .iter()
            .find(|(text, _)| *text == s)
            .map(|(_, op)| *op)
            .unwrap_or(Operator::Contains)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryExpression {
    Simple(String),
    FieldQuery {
        field: String,
        operator: Operator,
        value: String,
    },
}

impl QueryExpression {
    pub fn field_query(field: &str, operator: Operator, value: &str) -> Self {
        QueryExpression::FieldQuery {
            field: field.to_string(),
            operator,
            value: value.to_string(),
        }
    }
}

pub fn parse(input: &str) -> QueryExpression {
    let trimmed = input.trim();
    match parse_field_query(trimmed) {
        Some(expression) => expression,
        None => {
            trace!(query = trimmed, "not a field query, searching as text");
            QueryExpression::Simple(trimmed.to_string())
        }
    }
}

fn parse_field_query(input: &str) -> Option<QueryExpression> {
    let ident_len = identifier_len(input);
    if ident_len == 0 {
        return None;
    }
    let (field, rest) = input.split_at(ident_len);
    let rest = rest.trim_start_matches(' ');

    let (operator, value) = OPERATORS
        .iter()
        .find_map(|(text, op)| rest.strip_prefix(text).map(|value| (*op, value)))?;

    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    Some(QueryExpression::field_query(field, operator, value))
}

/// Byte length of a leading `[A-Za-z_][A-Za-z0-9_.]*`, or 0.
fn identifier_len(input: &str) -> usize {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return 0,
    }
    chars
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '.'))
        .map(|(idx, _)| idx)
        .unwrap_or(input.len())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
