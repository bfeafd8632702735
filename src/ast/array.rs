use super::{Expression, Position};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ArrayLiteral {
    pub elements: Vec<Expression>,
    pub position: Position,
}
