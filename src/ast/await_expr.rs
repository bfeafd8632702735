use super::{Expression, Position};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AwaitExpr {
    pub inner: Box<Expression>,
    pub position: Position,
}
