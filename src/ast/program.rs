use super::Statement;

/// The root AST node: an ordered list of top-level statements (spec.md §2 data flow).
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}
