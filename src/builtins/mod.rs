//! Core builtin functions (spec.md §6 supplemented from `original_source`'s
//! `test/parser_test.go` usage of `dekho(...)` and the networking builtins' demonstrated
//! shape of variadic, host-provided functions). Registered into the root [`Environment`] by
//! [`crate::interpreter::Interpreter::new`].

use std::sync::Arc;

use log::info;

use crate::environment::Environment;
use crate::value::{BuiltinData, Value};

fn builtin(name: &'static str, func: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Value {
    Value::Builtin(Arc::new(BuiltinData {
        name: name.to_string(),
        func: Arc::new(func),
    }))
}

/// Registers every core builtin into `env`. Keeps the registry as one flat function (rather
/// than a lazily-built table) since the set is small and fixed at startup.
pub fn register_all(env: &Environment) {
    env.define("dekho", dekho());
    env.define("line", line());
    env.define("dhoron", dhoron());
    env.define("sonkha", sonkha());
    env.define("pathh", pathh());
    env.define("jog", jog());
    env.define("opekkhay", opekkhay());
}

/// `dekho(...)` — prints every argument, space-separated, to stdout. The language's print
/// builtin (`original_source/test/parser_test.go` exercises it inside a `dhoro_bhul` block).
fn dekho() -> Value {
    builtin("dekho", |args| {
        let rendered: Vec<String> = args.iter().map(|v| v.to_string()).collect();
        println!("{}", rendered.join(" "));
        info!(target: "katha::builtins", "dekho: {}", rendered.join(" "));
        Value::Null
    })
}

/// `line(array_or_string)` — length of an array, map, or string; mirrors the `.length`
/// member already readable on those values, exposed as a callable for pipeline-style code.
fn line() -> Value {
    builtin("line", |args| match args.first() {
        Some(Value::Array(items)) => Value::Number(items.lock().len() as f64),
        Some(Value::Map(entries)) => Value::Number(entries.lock().len() as f64),
        Some(Value::Str(s)) => Value::Number(s.chars().count() as f64),
        Some(other) => Value::error(format!("line() expects an array, map or string, found {}", other.type_name())),
        None => Value::error("line() expects one argument"),
    })
}

/// `dhoron(value)` — returns the runtime type name of a value, for diagnostics and tests.
fn dhoron() -> Value {
    builtin("dhoron", |args| match args.first() {
        Some(value) => Value::string(value.type_name()),
        None => Value::error("dhoron() expects one argument"),
    })
}

/// `sonkha(value)` — coerces a string (or boolean) to a number.
fn sonkha() -> Value {
    builtin("sonkha", |args| match args.first() {
        Some(Value::Number(n)) => Value::Number(*n),
        Some(Value::Str(s)) => s
            .trim()
            .parse::<f64>()
            .map(Value::Number)
            .unwrap_or_else(|_| Value::error(format!("cannot convert '{s}' to a number"))),
        Some(Value::Boolean(b)) => Value::Number(if *b { 1.0 } else { 0.0 }),
        Some(other) => Value::error(format!("cannot convert {} to a number", other.type_name())),
        None => Value::error("sonkha() expects one argument"),
    })
}

/// `pathh(value)` — renders any value as its display string, the same formatting `+`
/// concatenation and `dekho` use.
fn pathh() -> Value {
    builtin("pathh", |args| match args.first() {
        Some(value) => Value::string(value.to_string()),
        None => Value::error("pathh() expects one argument"),
    })
}

/// `jog(array, separator)` — joins an array's elements with `separator` (default `","`).
fn jog() -> Value {
    builtin("jog", |args| {
        let Some(Value::Array(items)) = args.first() else {
            return Value::error("jog() expects an array as its first argument");
        };
        let separator = match args.get(1) {
            Some(Value::Str(s)) => s.to_string(),
            Some(_) => return Value::error("jog() separator must be a string"),
            None => ",".to_string(),
        };
        let rendered: Vec<String> = items.lock().iter().map(|v| v.to_string()).collect();
        Value::string(rendered.join(&separator))
    })
}

/// `opekkhay(value)` — returns a promise that resolves to `value` after a short delay on a
/// worker task; a stand-in `opekha`-able demo for the real networking builtins
/// (`builtins_tcp.go`/`builtins_udp.go`/`builtins_websocket.go`) that are out of scope here.
fn opekkhay() -> Value {
    use crate::value::Promise;
    use std::thread;
    use std::time::Duration;

    builtin("opekkhay", |args| {
        let value = args.first().cloned().unwrap_or(Value::Null);
        let promise = Arc::new(Promise::pending());
        let promise_for_task = Arc::clone(&promise);
        rayon::spawn(move || {
            thread::sleep(Duration::from_millis(1));
            promise_for_task.resolve(value);
        });
        Value::Promise(promise)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(value: &Value, args: &[Value]) -> Value {
        match value {
            Value::Builtin(b) => (b.func)(args),
            _ => panic!("not a builtin"),
        }
    }

    #[test]
    fn test_line_counts_array() {
        let result = call(&line(), &[Value::array(vec![Value::Number(1.0), Value::Number(2.0)])]);
        assert_eq!(result, Value::Number(2.0));
    }

    #[test]
    fn test_dhoron_reports_type_name() {
        assert_eq!(call(&dhoron(), &[Value::Boolean(true)]), Value::string("boolean"));
    }

    #[test]
    fn test_sonkha_parses_numeric_string() {
        assert_eq!(call(&sonkha(), &[Value::string("3.5")]), Value::Number(3.5));
    }

    #[test]
    fn test_sonkha_rejects_garbage() {
        assert!(matches!(call(&sonkha(), &[Value::string("nope")]), Value::Error { .. }));
    }

    #[test]
    fn test_jog_default_separator() {
        let arr = Value::array(vec![Value::Number(1.0), Value::Number(2.0)]);
        assert_eq!(call(&jog(), &[arr]), Value::string("1,2"));
    }

    #[test]
    fn test_register_all_binds_every_name() {
        let env = Environment::root();
        register_all(&env);
        for name in ["dekho", "line", "dhoron", "sonkha", "pathh", "jog", "opekkhay"] {
            assert!(env.get(name).is_some(), "{name} should be registered");
        }
    }
}
