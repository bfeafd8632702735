use super::{
    Block, ClassDecl, Expression, ExportStmt, ForStmt, FunctionLiteral, IfStmt, ImportStmt,
    Position, ThrowStmt, TryStmt, VarDeclStmt, WhileStmt,
};

/// Every statement form in spec.md §3.2.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum Statement {
    VarDecl(VarDeclStmt),
    Return {
        value: Option<Expression>,
        position: Position,
    },
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Break(Position),
    Continue(Position),
    Throw(ThrowStmt),
    Try(TryStmt),
    ClassDecl(ClassDecl),
    /// A named function-literal expression promoted to a statement (spec.md §3.2); the
    /// evaluator binds `literal.name` in the surrounding environment before evaluating it, so
    /// recursive self-reference works even for the function's own closure.
    FunctionDecl(FunctionLiteral),
    Block(Block),
    Expression(Expression),
    Import(ImportStmt),
    Export(ExportStmt),
}

impl Statement {
    pub fn position(&self) -> Position {
        match self {
            Statement::VarDecl(s) => s.position,
            Statement::Return { position, .. } => *position,
            Statement::If(s) => s.position,
            Statement::While(s) => s.position,
            Statement::For(s) => s.position,
            Statement::Break(p) => *p,
            Statement::Continue(p) => *p,
            Statement::Throw(s) => s.position,
            Statement::Try(s) => s.position,
            Statement::ClassDecl(s) => s.position,
            Statement::FunctionDecl(s) => s.position,
            Statement::Block(s) => s.position,
            Statement::Expression(e) => e.position(),
            Statement::Import(s) => s.position,
            Statement::Export(s) => s.position,
        }
    }
}
