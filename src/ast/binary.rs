use std::fmt::{self, Display};

use super::{Expression, Position};

/// Binary operators, including the two short-circuiting logical forms (`ebong`/`ba`), which
/// participate in binary expressions rather than a separate AST family (spec.md §3.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    Gt,
    Lte,
    Gte,
    And,
    Or,
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Lte => "<=",
            BinaryOp::Gte => ">=",
            BinaryOp::And => "ebong",
            BinaryOp::Or => "ba",
        })
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub lhs: Box<Expression>,
    pub rhs: Box<Expression>,
    pub position: Position,
}
