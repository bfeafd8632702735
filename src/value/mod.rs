//! The runtime value model (spec.md §3.3, §9).
//!
//! Every case that other languages would model as a host-language exception or an `enum
//! ControlFlow` is instead a first-class [`Value`] variant (`ReturnValue`, `Break`, `Continue`,
//! `Exception`, `Error`): the evaluator propagates all of them through the same `Value` return
//! channel, so one `match` at each statement boundary is the only place control flow is
//! special-cased. Collections and callables are `Arc`-wrapped rather than `Rc`-wrapped because
//! async functions run on worker tasks (spec.md §7) and so every `Value` must be `Send + Sync`.

mod promise;

pub use promise::{Promise, PromiseState};

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::ast::{Block, FunctionLiteral, Position};
use crate::environment::Environment;

pub type BuiltinFn = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// A user-defined function: its parameter list and body (shared, never mutated after parsing)
/// plus the environment it closed over at definition time.
#[derive(Clone)]
pub struct FunctionData {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub rest_param: Option<String>,
    pub body: Arc<Block>,
    pub closure: Environment,
    pub is_async: bool,
}

impl FunctionData {
    pub fn from_literal(literal: &FunctionLiteral, closure: Environment) -> Self {
        Self {
            name: literal.name.clone(),
            params: literal.params.clone(),
            rest_param: literal.rest_param.clone(),
            body: Arc::new(literal.body.clone()),
            closure,
            is_async: literal.is_async,
        }
    }
}

pub struct BuiltinData {
    pub name: String,
    pub func: BuiltinFn,
}

/// A class declaration: its method table, keyed by name, with the constructor (named `shuru`
/// in source, spec.md §3.4) pulled out for fast dispatch by `notun`.
pub struct ClassData {
    pub name: String,
    pub constructor: Option<Arc<FunctionData>>,
    pub methods: IndexMap<String, Arc<FunctionData>>,
}

/// A `notun`-constructed object: its class (for method lookup) and its own field table.
pub struct InstanceData {
    pub class: Arc<ClassData>,
    pub fields: Mutex<IndexMap<String, Value>>,
}

#[derive(Clone)]
pub enum Value {
    Number(f64),
    Str(Arc<str>),
    Boolean(bool),
    Null,
    Array(Arc<Mutex<Vec<Value>>>),
    Map(Arc<Mutex<IndexMap<String, Value>>>),
    Function(Arc<FunctionData>),
    Builtin(Arc<BuiltinData>),
    Class(Arc<ClassData>),
    Instance(Arc<InstanceData>),
    Promise(Arc<Promise>),
    /// Carries a `ferao` value up through block/statement evaluation to the enclosing call.
    ReturnValue(Box<Value>),
    /// Carries a `thamo` signal up to the nearest enclosing loop.
    Break,
    /// Carries a `chharo` signal up to the nearest enclosing loop.
    Continue,
    /// A user-thrown value (`felo`), unwound up to the nearest `chesta`/`dhoro_bhul`.
    Exception(Box<Value>),
    /// A runtime error raised by the evaluator itself (type mismatch, undefined variable, ...).
    /// Carries a source position when one is available (spec.md §3.3, §7); builtin-raised
    /// errors have no AST node to point at and so carry `None`.
    Error {
        message: Arc<str>,
        position: Option<Position>,
    },
}

impl Value {
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Value::Error {
            message: Arc::from(message.into()),
            position: None,
        }
    }

    pub fn error_at(message: impl Into<String>, position: Position) -> Self {
        Value::Error {
            message: Arc::from(message.into()),
            position: Some(position),
        }
    }

    /// Attaches `position` to this value if it is a positionless [`Value::Error`]; otherwise
    /// returns it unchanged. Lets evaluator call sites that build errors through a shared helper
    /// (which has no AST node in scope) still end up positioned by the nearest enclosing
    /// expression.
    pub fn with_position(self, position: Position) -> Self {
        match self {
            Value::Error { message, position: None } => Value::Error {
                message,
                position: Some(position),
            },
            other => other,
        }
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(Mutex::new(items)))
    }

    pub fn map(entries: IndexMap<String, Value>) -> Self {
        Value::Map(Arc::new(Mutex::new(entries)))
    }

    /// Truthiness used by `jodi`/`jotokkhon`/`ebong`/`ba` conditions (spec.md §3.3): only
    /// `mittha` and `khali` are falsy, everything else (including `0` and `""`) is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    /// Any of the control-flow/error sentinels that must short-circuit statement and
    /// expression evaluation instead of being used as an ordinary value.
    pub fn is_signal(&self) -> bool {
        matches!(
            self,
            Value::ReturnValue(_) | Value::Break | Value::Continue | Value::Exception(_) | Value::Error { .. }
        )
    }

    pub fn is_exception_like(&self) -> bool {
        matches!(self, Value::Exception(_) | Value::Error { .. })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Function(_) => "function",
            Value::Builtin(_) => "function",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
            Value::Promise(_) => "promise",
            Value::ReturnValue(_) => "return",
            Value::Break => "break",
            Value::Continue => "continue",
            Value::Exception(_) => "exception",
            Value::Error { .. } => "error",
        }
    }
}

/// Structural equality for primitives, reference identity for everything reference-like
/// (spec.md leaves deep array/map equality out of scope; `==` on two distinct arrays compares
/// identity, same as function/class/instance values).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => Arc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Arc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Arc::ptr_eq(a, b),
            (Value::Promise(a), Value::Promise(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Null => write!(f, "null"),
            Value::Array(items) => {
                let items = items.lock();
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                let entries = entries.lock();
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Function(func) => match &func.name {
                Some(name) => write!(f, "<function {name}>"),
                None => write!(f, "<anonymous function>"),
            },
            Value::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name),
            Value::Class(class) => write!(f, "<class {}>", class.name),
            Value::Instance(instance) => write!(f, "<instance of {}>", instance.class.name),
            Value::Promise(_) => write!(f, "<promise>"),
            Value::ReturnValue(inner) => write!(f, "{inner}"),
            Value::Break => write!(f, "<break>"),
            Value::Continue => write!(f, "<continue>"),
            Value::Exception(inner) => write!(f, "uncaught exception: {inner}"),
            Value::Error {
                message,
                position: Some((line, col)),
            } => write!(f, "{message} (at {line}:{col})"),
            Value::Error { message, position: None } => write!(f, "{message}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(Value::Number(0.0).is_truthy());
        assert!(Value::string("").is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(!Value::Null.is_truthy());
    }

    #[test]
    fn test_number_display_trims_trailing_zero() {
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(3.5).to_string(), "3.5");
    }

    #[test]
    fn test_array_equality_is_by_identity() {
        let a = Value::array(vec![Value::Number(1.0)]);
        let b = Value::array(vec![Value::Number(1.0)]);
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn test_signal_detection() {
        assert!(Value::Break.is_signal());
        assert!(Value::ReturnValue(Box::new(Value::Null)).is_signal());
        assert!(!Value::Number(1.0).is_signal());
    }

    #[test]
    fn test_error_display_includes_position_when_present() {
        let positionless = Value::error("boom");
        assert_eq!(positionless.to_string(), "boom");

        let positioned = positionless.with_position((3, 7));
        assert_eq!(positioned.to_string(), "boom (at 3:7)");
    }

    #[test]
    fn test_with_position_does_not_override_an_existing_position() {
        let err = Value::error_at("boom", (1, 1)).with_position((9, 9));
        assert_eq!(err.to_string(), "boom (at 1:1)");
    }
}
