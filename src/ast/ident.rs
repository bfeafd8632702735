use super::Position;

/// An identifier reference, e.g. `x` in `dhoro x = 1;` or `foo` in `foo();`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Ident {
    pub name: String,
    pub position: Position,
}

impl Ident {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}
