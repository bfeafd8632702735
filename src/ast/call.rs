use super::{Expression, Position};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CallExpr {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub position: Position,
}
