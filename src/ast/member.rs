use super::{Expression, Position};

/// `object.property` or `object[expr]`, distinguished by `computed` (spec.md §3.2).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MemberExpr {
    pub object: Box<Expression>,
    pub property: Box<Expression>,
    pub computed: bool,
    pub position: Position,
}
