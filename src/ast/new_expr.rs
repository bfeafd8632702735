use super::{Expression, Position};

/// `notun ClassExpr(args...)`. `class_expr` is usually an identifier naming a class but is
/// stored as a full expression since the grammar only restricts it at evaluation time
/// (spec.md §4.3.2: "the result must be a Class").
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NewExpr {
    pub class_expr: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub position: Position,
}
