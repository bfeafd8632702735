use super::{Block, Expression, Position, Statement};

/// `ghuriye (init; cond; post) { body }`, where any of the three header parts may be absent
/// (spec.md §4.2).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ForStmt {
    pub init: Option<Box<Statement>>,
    pub condition: Option<Expression>,
    pub post: Option<Expression>,
    pub body: Block,
    pub position: Position,
}
