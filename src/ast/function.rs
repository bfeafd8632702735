use super::{Block, Position};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FunctionLiteral {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub rest_param: Option<String>,
    pub body: Block,
    pub is_async: bool,
    pub position: Position,
}
