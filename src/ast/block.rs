use super::{Position, Statement};

/// A sequence of statements introducing a new enclosed environment on evaluation (spec.md
/// §4.3.1).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub position: Position,
}
