use super::{Expression, Position};

/// Compound-assignment tag. Plain `=` carries no combining operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

/// An assignment's left-hand side. Parsing restricts this to an identifier or a member
/// expression (spec.md §4.2); any other left-hand side is a syntax error raised at parse time.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum AssignTarget {
    Ident(super::Ident),
    Member(super::MemberExpr),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AssignmentExpr {
    pub target: Box<AssignTarget>,
    pub op: AssignOp,
    pub value: Box<Expression>,
    pub position: Position,
}
