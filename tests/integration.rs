//! End-to-end scenarios run through the public `katha::run_source` entry point, covering the
//! walkthroughs from the specification (factorial, closures, try/catch/finally, classes,
//! loops, async/await).

use pretty_assertions::assert_eq;

use katha::interpreter::run_source;
use katha::value::Value;

#[test]
fn test_factorial() {
    let src = r#"
        kaj fact(n) {
            jodi (n <= 1) { ferao 1; }
            ferao n * fact(n - 1);
        }
        fact(6);
    "#;
    assert_eq!(run_source(src).unwrap(), Value::Number(720.0));
}

#[test]
fn test_closure_counter_is_independent_per_instance() {
    let src = r#"
        kaj makeCounter() {
            dhoro n = 0;
            ferao kaj() {
                n = n + 1;
                ferao n;
            };
        }
        dhoro a = makeCounter();
        dhoro b = makeCounter();
        a();
        a();
        b();
        a();
    "#;
    assert_eq!(run_source(src).unwrap(), Value::Number(3.0));
}

#[test]
fn test_try_catch_finally_runs_in_order_even_without_exception() {
    let src = r#"
        dhoro trace = "";
        chesta {
            trace = trace + "try;";
        } dhoro_bhul (e) {
            trace = trace + "catch;";
        } shesh {
            trace = trace + "finally;";
        }
        trace;
    "#;
    assert_eq!(run_source(src).unwrap(), Value::string("try;finally;"));
}

#[test]
fn test_finally_runs_even_when_exception_is_uncaught() {
    let src = r#"
        dhoro trace = "";
        chesta {
            chesta {
                felo "boom";
            } shesh {
                trace = trace + "inner-finally;";
            }
        } dhoro_bhul (e) {
            trace = trace + "outer-catch:" + e + ";";
        }
        trace;
    "#;
    assert_eq!(run_source(src).unwrap(), Value::string("inner-finally;outer-catch:boom;"));
}

#[test]
fn test_class_inheritance_style_method_chaining() {
    let src = r#"
        sreni Stack {
            shuru() { ei.items = []; }
            push(value) {
                ei.items[ei.items.length] = value;
                ferao ei;
            }
            pop() {
                dhoro last = ei.items[ei.items.length - 1];
                ferao last;
            }
        }
        dhoro s = notun Stack();
        s.push(1).push(2).push(3);
        s.pop();
    "#;
    assert_eq!(run_source(src).unwrap(), Value::Number(3.0));
}

#[test]
fn test_for_loop_with_break_stops_early() {
    let src = r#"
        dhoro found = -1;
        ghuriye (dhoro i = 0; i < 100; i = i + 1) {
            jodi (i == 7) {
                found = i;
                thamo;
            }
        }
        found;
    "#;
    assert_eq!(run_source(src).unwrap(), Value::Number(7.0));
}

#[test]
fn test_async_function_reject_surfaces_as_exception_on_await() {
    let src = r#"
        osinkrono kaj boom() {
            felo "async failure";
        }
        dhoro trace = "ok";
        chesta {
            opekha boom();
        } dhoro_bhul (e) {
            trace = e;
        }
        trace;
    "#;
    assert_eq!(run_source(src).unwrap(), Value::string("async failure"));
}

#[test]
fn test_environment_shadowing_does_not_leak_across_blocks() {
    let src = r#"
        dhoro x = 1;
        jodi (sotti) {
            dhoro x = 2;
        }
        x;
    "#;
    assert_eq!(run_source(src).unwrap(), Value::Number(1.0));
}

#[test]
fn test_undefined_variable_is_a_runtime_error_not_a_panic() {
    let result = run_source("missing + 1;").unwrap();
    assert!(result.is_exception_like());
}

#[test]
fn test_parse_errors_are_collected_not_just_the_first() {
    let src = "dhoro = 1; dhoro y = ;";
    let err = run_source(src).unwrap_err();
    match err {
        katha::interpreter::InterpreterError::Parse(errors) => {
            assert!(errors.len() >= 2, "expected multiple parse errors, got {errors:?}");
        }
        other => panic!("expected Parse error, got {other:?}"),
    }
}
