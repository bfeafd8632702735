//! # Katha
//!
//! This binary is the interpreter for Katha. It lexes, parses, and directly evaluates a
//! source file — there is no separate compile step.

use std::fs;
use std::process::ExitCode;

use clap::{Parser as ClapParser, ValueEnum};
use log::{error, info};

use katha::ast::Program;
use katha::interpreter::{Interpreter, InterpreterError};

/// CLI configuration for Katha.
#[derive(ClapParser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The path to the Katha source file to run.
    #[arg(index = 1)]
    pub file: std::path::PathBuf,

    /// Specify the log level of the interpreter.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,

    /// Dump the token stream before running (for debugging).
    #[arg(long)]
    pub dump_tokens: bool,

    /// Dump the parsed AST before running (for debugging).
    #[arg(long)]
    pub dump_ast: bool,
}

/// Log level of Katha, mirroring the verbosity levels of the rest of the toolchain.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    #[default]
    #[value(alias("0"))]
    Error,
    #[value(alias("1"))]
    Warn,
    #[value(alias("2"))]
    Info,
    #[value(alias("3"))]
    Debug,
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

fn dump_tokens(source: &str) {
    use katha::token::TokenKind;
    let mut lexer = katha::lexer::Lexer::new(source);
    let mut tokens = vec![];
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    match serde_json::to_string_pretty(&tokens) {
        Ok(json) => info!("Tokens:\n{json}"),
        Err(err) => error!("failed to serialize tokens: {err}"),
    }
}

fn dump_ast(program: &Program) {
    match serde_json::to_string_pretty(&program.statements) {
        Ok(json) => info!("Parsed AST:\n{json}"),
        Err(err) => error!("failed to serialize AST: {err}"),
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();
    simple_logger::init_with_level((&args.verbosity).into()).unwrap();

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(err) => {
            error!("could not read {}: {err}", args.file.display());
            return ExitCode::FAILURE;
        }
    };

    if args.dump_tokens {
        dump_tokens(&source);
    }

    let interpreter = Interpreter::new();

    let program = match interpreter.parse(&source) {
        Ok(program) => program,
        Err(InterpreterError::Parse(errors)) => {
            for parse_error in &errors {
                error!("{parse_error}");
            }
            return ExitCode::FAILURE;
        }
        Err(other) => {
            error!("{other}");
            return ExitCode::FAILURE;
        }
    };

    if args.dump_ast {
        dump_ast(&program);
    }

    let result = katha::evaluator::eval_program(&program, interpreter.root_env());
    if result.is_exception_like() {
        error!("{result}");
        return ExitCode::FAILURE;
    }

    println!("{result}");
    ExitCode::SUCCESS
}
