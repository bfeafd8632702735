//! Host entry point: wires the lexer, parser, and evaluator together and owns the root
//! [`Environment`] that builtins are registered into.

use thiserror::Error;

use crate::ast::Program;
use crate::builtins;
use crate::environment::Environment;
use crate::parser::{ParseError, Parser};
use crate::value::Value;

/// Errors surfaced by the driver layer (CLI, embedding) rather than by evaluation itself;
/// evaluation failures are `Value::Error`/`Value::Exception`, not this type (spec.md §9).
#[derive(Debug, Error)]
pub enum InterpreterError {
    #[error("failed to read source file: {0}")]
    Io(#[from] std::io::Error),

    #[error("{} syntax error(s) found", .0.len())]
    Parse(Vec<ParseError>),
}

/// A reusable interpreter instance: one root environment with builtins registered, which
/// `run`/`eval` share so successive top-level statements can see each other's declarations.
pub struct Interpreter {
    root: Environment,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let root = Environment::root();
        builtins::register_all(&root);
        Self { root }
    }

    pub fn root_env(&self) -> &Environment {
        &self.root
    }

    pub fn parse(&self, source: &str) -> Result<Program, InterpreterError> {
        let mut parser = Parser::new(source);
        let program = parser.parse_program();
        if !parser.errors().is_empty() {
            return Err(InterpreterError::Parse(parser.errors().to_vec()));
        }
        Ok(program)
    }

    /// Parses and evaluates `source` against this interpreter's root environment, so
    /// subsequent calls see variables and functions declared by earlier ones (a REPL-style
    /// session, or a `--dump-ast`-then-`run` pair sharing one parse).
    pub fn eval(&self, source: &str) -> Result<Value, InterpreterError> {
        let program = self.parse(source)?;
        Ok(crate::evaluator::eval_program(&program, &self.root))
    }
}

/// Convenience wrapper for one-shot evaluation against a fresh interpreter.
pub fn run_source(source: &str) -> Result<Value, InterpreterError> {
    Interpreter::new().eval(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_source_evaluates_last_expression() {
        let result = run_source("1 + 1;").unwrap();
        assert_eq!(result, Value::Number(2.0));
    }

    #[test]
    fn test_run_source_reports_parse_errors() {
        let err = run_source("dhoro = 1;").unwrap_err();
        assert!(matches!(err, InterpreterError::Parse(_)));
    }

    #[test]
    fn test_interpreter_shares_environment_across_eval_calls() {
        let interpreter = Interpreter::new();
        interpreter.eval("dhoro x = 10;").unwrap();
        let result = interpreter.eval("x + 5;").unwrap();
        assert_eq!(result, Value::Number(15.0));
    }
}
