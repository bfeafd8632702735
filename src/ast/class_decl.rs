use super::{FunctionLiteral, Position};

/// `sreni Name { shuru(params) { ... } method(params) { ... } ... }`. The constructor (if
/// present) is the method whose `name` field is `Some("shuru")`, same as any other method;
/// the evaluator singles it out by name rather than the AST carrying a separate slot.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ClassDecl {
    pub name: String,
    pub methods: Vec<FunctionLiteral>,
    pub position: Position,
}
