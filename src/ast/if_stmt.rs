use super::{Block, Expression, Position};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct IfStmt {
    pub condition: Expression,
    pub then_block: Block,
    pub else_block: Option<Block>,
    pub position: Position,
}
