use super::{Expression, Position};

/// An insertion-ordered list of (string key, value expression) pairs (spec.md §3.2). Keys are
/// taken literally from source text, never evaluated as expressions.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MapLiteral {
    pub entries: Vec<(String, Expression)>,
    pub position: Position,
}
