use super::{Block, Position};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TryStmt {
    pub try_block: Block,
    pub catch_param: Option<String>,
    pub catch_block: Option<Block>,
    pub finally_block: Option<Block>,
    pub position: Position,
}
