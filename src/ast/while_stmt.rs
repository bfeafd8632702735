use super::{Block, Expression, Position};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WhileStmt {
    pub condition: Expression,
    pub body: Block,
    pub position: Position,
}
