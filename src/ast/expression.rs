use super::{
    ArrayLiteral, AwaitExpr, BinaryExpr, BooleanLiteral, CallExpr, FunctionLiteral, Ident,
    MapLiteral, MemberExpr, NewExpr, NullLiteral, NumberLiteral, Position, StringLiteral,
    UnaryExpr,
};
use crate::ast::AssignmentExpr;

/// Every expression form in spec.md §3.2. Every variant evaluates to exactly one runtime
/// value (spec.md §3.2 invariant).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum Expression {
    Number(NumberLiteral),
    Str(StringLiteral),
    Boolean(BooleanLiteral),
    Null(NullLiteral),
    Ident(Ident),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Assignment(AssignmentExpr),
    Member(MemberExpr),
    Call(CallExpr),
    Array(ArrayLiteral),
    Map(MapLiteral),
    Function(FunctionLiteral),
    Await(AwaitExpr),
    New(NewExpr),
}

impl Expression {
    pub fn position(&self) -> Position {
        match self {
            Expression::Number(n) => n.position,
            Expression::Str(s) => s.position,
            Expression::Boolean(b) => b.position,
            Expression::Null(n) => n.position,
            Expression::Ident(i) => i.position,
            Expression::Unary(u) => u.position,
            Expression::Binary(b) => b.position,
            Expression::Assignment(a) => a.position,
            Expression::Member(m) => m.position,
            Expression::Call(c) => c.position,
            Expression::Array(a) => a.position,
            Expression::Map(m) => m.position,
            Expression::Function(f) => f.position,
            Expression::Await(a) => a.position,
            Expression::New(n) => n.position,
        }
    }
}
