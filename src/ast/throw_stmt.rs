use super::{Expression, Position};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ThrowStmt {
    pub value: Expression,
    pub position: Position,
}
