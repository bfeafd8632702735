use super::{Expression, Position};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct VarDeclStmt {
    pub name: String,
    pub value: Expression,
    pub position: Position,
}
