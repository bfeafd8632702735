use super::{Position, Statement};

/// `ano "path" hisabe name;` — parsed as syntax only; THE CORE has no module loader
/// (spec.md §1 Non-goals), so this node is never resolved by the evaluator beyond raising a
/// runtime error if one is evaluated directly.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ImportStmt {
    pub path: String,
    pub alias: String,
    pub position: Position,
}

/// `pathao <statement>` — marks a declaration as exported. THE CORE records the marking but
/// performs no cross-module linking.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ExportStmt {
    pub inner: Box<Statement>,
    pub position: Position,
}
