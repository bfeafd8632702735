use super::Position;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NumberLiteral {
    pub value: f64,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StringLiteral {
    pub value: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BooleanLiteral {
    pub value: bool,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NullLiteral {
    pub position: Position,
}
