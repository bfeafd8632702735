//! Tree-walking evaluator (spec.md §5): walks the AST directly, with no intermediate bytecode
//! stage. Every statement and expression evaluator returns a [`Value`]; control-flow sentinels
//! (`ReturnValue`, `Break`, `Continue`, `Exception`, `Error`) ride the same channel and are
//! checked with [`Value::is_signal`] at each statement boundary rather than via a separate
//! `Result`/exception mechanism (spec.md §9).

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::ast::*;
use crate::environment::Environment;
use crate::value::{ClassData, FunctionData, InstanceData, Promise, Value};

enum MemberKey {
    Index(usize),
    Name(String),
}

pub fn eval_program(program: &Program, env: &Environment) -> Value {
    eval_statements(&program.statements, env)
}

fn eval_statements(statements: &[Statement], env: &Environment) -> Value {
    let mut result = Value::Null;
    for statement in statements {
        result = eval_statement(statement, env);
        if result.is_signal() {
            return result;
        }
    }
    result
}

fn eval_block_scoped(block: &Block, parent: &Environment) -> Value {
    let scope = Environment::child(parent);
    eval_statements(&block.statements, &scope)
}

fn eval_expr_list(exprs: &[Expression], env: &Environment) -> Result<Vec<Value>, Value> {
    let mut out = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let value = eval_expression(expr, env);
        if value.is_signal() {
            return Err(value);
        }
        out.push(value);
    }
    Ok(out)
}

fn exception_payload(value: &Value) -> Option<Value> {
    match value {
        Value::Exception(inner) => Some((**inner).clone()),
        Value::Error { message, .. } => Some(Value::Str(message.clone())),
        _ => None,
    }
}

fn eval_statement(statement: &Statement, env: &Environment) -> Value {
    match statement {
        Statement::VarDecl(decl) => {
            let value = eval_expression(&decl.value, env);
            if value.is_signal() {
                return value;
            }
            env.define(decl.name.clone(), value);
            Value::Null
        }
        Statement::Return { value, .. } => {
            let value = match value {
                Some(expr) => eval_expression(expr, env),
                None => Value::Null,
            };
            if value.is_signal() {
                return value;
            }
            Value::ReturnValue(Box::new(value))
        }
        Statement::If(stmt) => {
            let condition = eval_expression(&stmt.condition, env);
            if condition.is_signal() {
                return condition;
            }
            if condition.is_truthy() {
                eval_block_scoped(&stmt.then_block, env)
            } else if let Some(else_block) = &stmt.else_block {
                eval_block_scoped(else_block, env)
            } else {
                Value::Null
            }
        }
        Statement::While(stmt) => eval_while(stmt, env),
        Statement::For(stmt) => eval_for(stmt, env),
        Statement::Break(_) => Value::Break,
        Statement::Continue(_) => Value::Continue,
        Statement::Throw(stmt) => {
            let value = eval_expression(&stmt.value, env);
            if value.is_signal() {
                return value;
            }
            Value::Exception(Box::new(value))
        }
        Statement::Try(stmt) => eval_try(stmt, env),
        Statement::ClassDecl(decl) => {
            eval_class_decl(decl, env);
            Value::Null
        }
        Statement::FunctionDecl(literal) => {
            if let Some(name) = &literal.name {
                let data = FunctionData::from_literal(literal, env.clone());
                env.define(name.clone(), Value::Function(Arc::new(data)));
            }
            Value::Null
        }
        Statement::Block(block) => eval_block_scoped(block, env),
        Statement::Expression(expr) => eval_expression(expr, env),
        Statement::Import(_) => {
            Value::error("module imports are not supported outside a host embedding")
        }
        Statement::Export(stmt) => eval_statement(&stmt.inner, env),
    }
}

fn eval_while(stmt: &WhileStmt, env: &Environment) -> Value {
    loop {
        let condition = eval_expression(&stmt.condition, env);
        if condition.is_signal() {
            return condition;
        }
        if !condition.is_truthy() {
            return Value::Null;
        }
        match eval_block_scoped(&stmt.body, env) {
            Value::Break => return Value::Null,
            Value::Continue => continue,
            signal if signal.is_signal() => return signal,
            _ => {}
        }
    }
}

fn eval_for(stmt: &ForStmt, env: &Environment) -> Value {
    let loop_env = Environment::child(env);

    if let Some(init) = &stmt.init {
        let result = eval_statement(init, &loop_env);
        if result.is_signal() {
            return result;
        }
    }

    loop {
        if let Some(condition) = &stmt.condition {
            let value = eval_expression(condition, &loop_env);
            if value.is_signal() {
                return value;
            }
            if !value.is_truthy() {
                return Value::Null;
            }
        }

        match eval_block_scoped(&stmt.body, &loop_env) {
            Value::Break => return Value::Null,
            signal @ (Value::ReturnValue(_) | Value::Exception(_) | Value::Error { .. }) => return signal,
            _ => {}
        }

        if let Some(post) = &stmt.post {
            let value = eval_expression(post, &loop_env);
            if value.is_signal() {
                return value;
            }
        }
    }
}

fn eval_try(stmt: &TryStmt, env: &Environment) -> Value {
    let mut result = eval_block_scoped(&stmt.try_block, env);

    if let Some(payload) = exception_payload(&result) {
        if let Some(catch_block) = &stmt.catch_block {
            let catch_env = Environment::child(env);
            if let Some(param) = &stmt.catch_param {
                catch_env.define(param.clone(), payload);
            }
            result = eval_statements(&catch_block.statements, &catch_env);
        }
    }

    if let Some(finally_block) = &stmt.finally_block {
        let finally_result = eval_block_scoped(finally_block, env);
        if finally_result.is_signal() {
            return finally_result;
        }
    }

    result
}

fn eval_class_decl(decl: &ClassDecl, env: &Environment) {
    let mut methods = IndexMap::new();
    for method in &decl.methods {
        let name = method.name.clone().unwrap_or_default();
        let data = Arc::new(FunctionData::from_literal(method, env.clone()));
        methods.insert(name, data);
    }
    let constructor = methods.get("shuru").cloned();

    let class = Arc::new(ClassData {
        name: decl.name.clone(),
        constructor,
        methods,
    });
    env.define(decl.name.clone(), Value::Class(class));
}

/// Evaluates `expr`, then attaches `expr`'s own source position to the result if it came back
/// as a positionless [`Value::Error`] (spec.md §3.3/§7: runtime errors carry a position). A
/// signal propagated up from a nested expression already carries the position of whichever
/// inner expression actually raised it, since [`Value::with_position`] never overrides an
/// already-set position.
fn eval_expression(expr: &Expression, env: &Environment) -> Value {
    let position = expr.position();
    let value = match expr {
        Expression::Number(lit) => Value::Number(lit.value),
        Expression::Str(lit) => Value::string(lit.value.clone()),
        Expression::Boolean(lit) => Value::Boolean(lit.value),
        Expression::Null(_) => Value::Null,
        Expression::Ident(ident) => env
            .get(&ident.name)
            .unwrap_or_else(|| Value::error(format!("undefined variable '{}'", ident.name))),
        Expression::Unary(expr) => eval_unary(expr, env),
        Expression::Binary(expr) => eval_binary(expr, env),
        Expression::Assignment(expr) => eval_assignment(expr, env),
        Expression::Member(expr) => eval_member_expr(expr, env),
        Expression::Call(expr) => eval_call_expr(expr, env),
        Expression::Array(lit) => {
            let items = match eval_expr_list(&lit.elements, env) {
                Ok(items) => items,
                Err(signal) => return signal,
            };
            Value::array(items)
        }
        Expression::Map(lit) => {
            let mut entries = IndexMap::new();
            for (key, value_expr) in &lit.entries {
                let value = eval_expression(value_expr, env);
                if value.is_signal() {
                    return value;
                }
                entries.insert(key.clone(), value);
            }
            Value::map(entries)
        }
        Expression::Function(literal) => {
            Value::Function(Arc::new(FunctionData::from_literal(literal, env.clone())))
        }
        Expression::Await(expr) => {
            let inner = eval_expression(&expr.inner, env);
            match inner {
                Value::Promise(promise) => promise.await_value(),
                other => other,
            }
        }
        Expression::New(expr) => eval_new_expr(expr, env),
    };
    value.with_position(position)
}

fn eval_unary(expr: &UnaryExpr, env: &Environment) -> Value {
    let operand = eval_expression(&expr.operand, env);
    if operand.is_signal() {
        return operand;
    }
    match expr.op {
        UnaryOp::Negate => match operand {
            Value::Number(n) => Value::Number(-n),
            other => Value::error(format!("unary '-' requires a number, found {}", other.type_name())),
        },
        UnaryOp::Not => Value::Boolean(!operand.is_truthy()),
    }
}

fn binary_add(lhs: &Value, rhs: &Value) -> Value {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
        (Value::Str(_), _) | (_, Value::Str(_)) => Value::string(format!("{lhs}{rhs}")),
        _ => Value::error(format!("cannot add {} and {}", lhs.type_name(), rhs.type_name())),
    }
}

fn numeric_op(lhs: &Value, rhs: &Value, symbol: &str, f: impl Fn(f64, f64) -> f64) -> Value {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Value::Number(f(*a, *b)),
        _ => Value::error(format!(
            "operator '{symbol}' requires two numbers, found {} and {}",
            lhs.type_name(),
            rhs.type_name()
        )),
    }
}

fn compare_op(lhs: &Value, rhs: &Value, f: impl Fn(f64, f64) -> bool) -> Value {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Value::Boolean(f(*a, *b)),
        _ => Value::error(format!("cannot compare {} and {}", lhs.type_name(), rhs.type_name())),
    }
}

fn eval_binary(expr: &BinaryExpr, env: &Environment) -> Value {
    if matches!(expr.op, BinaryOp::And | BinaryOp::Or) {
        let lhs = eval_expression(&expr.lhs, env);
        if lhs.is_signal() {
            return lhs;
        }
        match expr.op {
            BinaryOp::And if !lhs.is_truthy() => return lhs,
            BinaryOp::Or if lhs.is_truthy() => return lhs,
            _ => {}
        }
        return eval_expression(&expr.rhs, env);
    }

    let lhs = eval_expression(&expr.lhs, env);
    if lhs.is_signal() {
        return lhs;
    }
    let rhs = eval_expression(&expr.rhs, env);
    if rhs.is_signal() {
        return rhs;
    }

    match expr.op {
        BinaryOp::Add => binary_add(&lhs, &rhs),
        BinaryOp::Sub => numeric_op(&lhs, &rhs, "-", |a, b| a - b),
        BinaryOp::Mul => numeric_op(&lhs, &rhs, "*", |a, b| a * b),
        BinaryOp::Div => match (&lhs, &rhs) {
            (Value::Number(_), Value::Number(b)) if *b == 0.0 => Value::error("division by zero"),
            (Value::Number(a), Value::Number(b)) => Value::Number(a / b),
            _ => Value::error(format!("cannot divide {} by {}", lhs.type_name(), rhs.type_name())),
        },
        BinaryOp::Mod => numeric_op(&lhs, &rhs, "%", |a, b| a % b),
        BinaryOp::Eq => Value::Boolean(lhs == rhs),
        BinaryOp::NotEq => Value::Boolean(lhs != rhs),
        BinaryOp::Lt => compare_op(&lhs, &rhs, |a, b| a < b),
        BinaryOp::Gt => compare_op(&lhs, &rhs, |a, b| a > b),
        BinaryOp::Lte => compare_op(&lhs, &rhs, |a, b| a <= b),
        BinaryOp::Gte => compare_op(&lhs, &rhs, |a, b| a >= b),
        BinaryOp::And | BinaryOp::Or => unreachable!("short-circuit ops handled above"),
    }
}

fn apply_compound(op: AssignOp, current: &Value, rhs: &Value) -> Value {
    match op {
        AssignOp::Assign => rhs.clone(),
        AssignOp::AddAssign => binary_add(current, rhs),
        AssignOp::SubAssign => numeric_op(current, rhs, "-=", |a, b| a - b),
        AssignOp::MulAssign => numeric_op(current, rhs, "*=", |a, b| a * b),
        AssignOp::DivAssign => match (current, rhs) {
            (Value::Number(_), Value::Number(b)) if *b == 0.0 => Value::error("division by zero"),
            (Value::Number(a), Value::Number(b)) => Value::Number(a / b),
            _ => Value::error("'/=' requires two numbers"),
        },
    }
}

fn member_key(member: &MemberExpr, env: &Environment) -> Result<MemberKey, Value> {
    if member.computed {
        let value = eval_expression(&member.property, env);
        if value.is_signal() {
            return Err(value);
        }
        match value {
            Value::Number(n) if n >= 0.0 && n.fract() == 0.0 => Ok(MemberKey::Index(n as usize)),
            Value::Number(n) => Err(Value::error(format!("invalid array index {n}"))),
            Value::Str(s) => Ok(MemberKey::Name(s.to_string())),
            other => Err(Value::error(format!("invalid index type '{}'", other.type_name()))),
        }
    } else {
        match &*member.property {
            Expression::Ident(ident) => Ok(MemberKey::Name(ident.name.clone())),
            _ => Err(Value::error("invalid member access")),
        }
    }
}

fn read_member(object: &Value, key: &MemberKey) -> Value {
    match (object, key) {
        (Value::Array(items), MemberKey::Index(i)) => items
            .lock()
            .get(*i)
            .cloned()
            .unwrap_or_else(|| Value::error(format!("array index {i} out of range"))),
        (Value::Array(items), MemberKey::Name(name)) if name == "length" => {
            Value::Number(items.lock().len() as f64)
        }
        (Value::Map(entries), MemberKey::Name(name)) => {
            entries.lock().get(name).cloned().unwrap_or(Value::Null)
        }
        (Value::Map(entries), MemberKey::Index(i)) => entries
            .lock()
            .get_index(*i)
            .map(|(_, v)| v.clone())
            .unwrap_or(Value::Null),
        (Value::Str(s), MemberKey::Name(name)) if name == "length" => {
            Value::Number(s.chars().count() as f64)
        }
        (Value::Instance(instance), MemberKey::Name(name)) => {
            if let Some(field) = instance.fields.lock().get(name) {
                return field.clone();
            }
            instance
                .class
                .methods
                .get(name)
                .map(|m| Value::Function(m.clone()))
                .unwrap_or(Value::Null)
        }
        (Value::Class(class), MemberKey::Name(name)) => class
            .methods
            .get(name)
            .map(|m| Value::Function(m.clone()))
            .unwrap_or(Value::Null),
        _ => Value::error(format!("cannot read property of {}", object.type_name())),
    }
}

fn assign_member(object: &Value, key: &MemberKey, op: AssignOp, rhs: Value) -> Value {
    match object {
        Value::Array(items) => {
            let MemberKey::Index(i) = key else {
                return Value::error("array index must be a number");
            };
            let mut items = items.lock();
            if *i >= items.len() {
                items.resize(*i + 1, Value::Null);
            }
            let current = items[*i].clone();
            let final_value = apply_compound(op, &current, &rhs);
            if final_value.is_signal() {
                return final_value;
            }
            items[*i] = final_value.clone();
            final_value
        }
        Value::Map(entries) => {
            let name = match key {
                MemberKey::Name(n) => n.clone(),
                MemberKey::Index(i) => i.to_string(),
            };
            let mut entries = entries.lock();
            let current = entries.get(&name).cloned().unwrap_or(Value::Null);
            let final_value = apply_compound(op, &current, &rhs);
            if final_value.is_signal() {
                return final_value;
            }
            entries.insert(name, final_value.clone());
            final_value
        }
        Value::Instance(instance) => {
            let name = match key {
                MemberKey::Name(n) => n.clone(),
                MemberKey::Index(i) => i.to_string(),
            };
            let mut fields = instance.fields.lock();
            let current = fields.get(&name).cloned().unwrap_or(Value::Null);
            let final_value = apply_compound(op, &current, &rhs);
            if final_value.is_signal() {
                return final_value;
            }
            fields.insert(name, final_value.clone());
            final_value
        }
        _ => Value::error(format!("cannot assign a property on {}", object.type_name())),
    }
}

fn eval_assignment(expr: &AssignmentExpr, env: &Environment) -> Value {
    let rhs = eval_expression(&expr.value, env);
    if rhs.is_signal() {
        return rhs;
    }

    match &*expr.target {
        AssignTarget::Ident(ident) => {
            let final_value = match env.get(&ident.name) {
                Some(current) => apply_compound(expr.op, &current, &rhs),
                None if expr.op == AssignOp::Assign => rhs,
                None => return Value::error(format!("undefined variable '{}'", ident.name)),
            };
            if final_value.is_signal() {
                return final_value;
            }
            env.update(&ident.name, final_value.clone());
            final_value
        }
        AssignTarget::Member(member) => {
            let object = eval_expression(&member.object, env);
            if object.is_signal() {
                return object;
            }
            let key = match member_key(member, env) {
                Ok(key) => key,
                Err(signal) => return signal,
            };
            assign_member(&object, &key, expr.op, rhs)
        }
    }
}

fn eval_member_expr(expr: &MemberExpr, env: &Environment) -> Value {
    let object = eval_expression(&expr.object, env);
    if object.is_signal() {
        return object;
    }
    let key = match member_key(expr, env) {
        Ok(key) => key,
        Err(signal) => return signal,
    };
    read_member(&object, &key)
}

fn eval_call_expr(expr: &CallExpr, env: &Environment) -> Value {
    if let Expression::Member(member) = &*expr.callee {
        if !member.computed {
            let object = eval_expression(&member.object, env);
            if object.is_signal() {
                return object;
            }
            let name = match &*member.property {
                Expression::Ident(ident) => ident.name.clone(),
                _ => return Value::error("invalid method name"),
            };
            let args = match eval_expr_list(&expr.arguments, env) {
                Ok(args) => args,
                Err(signal) => return signal,
            };

            if let Value::Instance(instance) = &object {
                if let Some(method) = instance.class.methods.get(&name) {
                    return call_function(method, args, Some(object.clone()));
                }
                let field = instance.fields.lock().get(&name).cloned();
                if let Some(field) = field {
                    return call_value(field, args);
                }
                return Value::error(format!("undefined method '{name}'"));
            }

            let callee_value = read_member(&object, &MemberKey::Name(name));
            if callee_value.is_signal() {
                return callee_value;
            }
            return call_value(callee_value, args);
        }
    }

    let callee_value = eval_expression(&expr.callee, env);
    if callee_value.is_signal() {
        return callee_value;
    }
    let args = match eval_expr_list(&expr.arguments, env) {
        Ok(args) => args,
        Err(signal) => return signal,
    };
    call_value(callee_value, args)
}

fn eval_new_expr(expr: &NewExpr, env: &Environment) -> Value {
    let class_value = eval_expression(&expr.class_expr, env);
    if class_value.is_signal() {
        return class_value;
    }
    let Value::Class(class) = class_value else {
        return Value::error(format!(
            "cannot instantiate non-class value of type {}",
            class_value.type_name()
        ));
    };

    let args = match eval_expr_list(&expr.arguments, env) {
        Ok(args) => args,
        Err(signal) => return signal,
    };

    construct_instance(&class, args)
}

fn construct_instance(class: &Arc<ClassData>, args: Vec<Value>) -> Value {
    let instance = Arc::new(InstanceData {
        class: class.clone(),
        fields: Mutex::new(IndexMap::new()),
    });
    let instance_value = Value::Instance(instance);

    if let Some(constructor) = &class.constructor {
        let result = call_function(constructor, args, Some(instance_value.clone()));
        if result.is_exception_like() {
            return result;
        }
    }

    instance_value
}

fn bind_params(func: &FunctionData, args: &[Value], env: &Environment) {
    for (i, name) in func.params.iter().enumerate() {
        env.define(name.clone(), args.get(i).cloned().unwrap_or(Value::Null));
    }
    if let Some(rest) = &func.rest_param {
        let extra = if args.len() > func.params.len() {
            args[func.params.len()..].to_vec()
        } else {
            vec![]
        };
        env.define(rest.clone(), Value::array(extra));
    }
}

/// Invokes a function or method. Async functions (`osinkrono kaj`) run their body on a rayon
/// worker task and return immediately with a pending [`Promise`] (spec.md §7); synchronous
/// functions run inline and return their unwrapped `ferao` value (or `khali` if control falls
/// off the end of the body).
pub fn call_function(func: &Arc<FunctionData>, args: Vec<Value>, bind_this: Option<Value>) -> Value {
    let call_env = Environment::child(&func.closure);
    bind_params(func, &args, &call_env);
    if let Some(this_value) = bind_this {
        call_env.define("ei", this_value);
    }

    if func.is_async {
        let body = Arc::clone(&func.body);
        let promise = Arc::new(Promise::pending());
        let promise_for_task = Arc::clone(&promise);
        rayon::spawn(move || {
            let result = eval_statements(&body.statements, &call_env);
            match result {
                Value::ReturnValue(v) => promise_for_task.resolve(*v),
                Value::Exception(v) => promise_for_task.reject(*v),
                Value::Error { message, .. } => promise_for_task.reject(Value::Str(message)),
                other => promise_for_task.resolve(other),
            }
        });
        return Value::Promise(promise);
    }

    match eval_statements(&func.body.statements, &call_env) {
        Value::ReturnValue(v) => *v,
        signal @ (Value::Exception(_) | Value::Error { .. }) => signal,
        Value::Break | Value::Continue => Value::error("'thamo'/'chharo' used outside of a loop"),
        _ => Value::Null,
    }
}

/// Invokes a value as a callee (spec.md §4.3.2). A bare `Function` or `Builtin` is invoked
/// directly; a `Class` is sugar for `notun Class(...)`; an `Instance` dispatches to its own
/// `call` method (if its class defines one), bound with `ei` the same way `obj.method(...)`
/// binds it, so an instance can be called like `k()`.
pub fn call_value(callee: Value, args: Vec<Value>) -> Value {
    match callee {
        Value::Function(func) => call_function(&func, args, None),
        Value::Builtin(builtin) => (builtin.func)(&args),
        Value::Class(class) => construct_instance(&class, args),
        Value::Instance(instance) => match instance.class.methods.get("call") {
            Some(method) => call_function(method, args, Some(Value::Instance(instance.clone()))),
            None => Value::error(format!("instance of {} is not callable", instance.class.name)),
        },
        other => Value::error(format!("value of type {} is not callable", other.type_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn eval_source(source: &str) -> Value {
        let mut parser = Parser::new(source);
        let program = parser.parse_program();
        assert!(parser.errors().is_empty(), "parse errors: {:?}", parser.errors());
        let env = Environment::root();
        eval_program(&program, &env)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval_source("1 + 2 * 3;"), Value::Number(7.0));
    }

    #[test]
    fn test_string_concatenation_coerces_numbers() {
        assert_eq!(eval_source(r#""n=" + 3;"#), Value::string("n=3"));
    }

    #[test]
    fn test_var_decl_and_identifier_lookup() {
        assert_eq!(eval_source("dhoro x = 41; x + 1;"), Value::Number(42.0));
    }

    #[test]
    fn test_if_else() {
        assert_eq!(
            eval_source("dhoro x = 0; jodi (sotti) { x = 1; } nahole { x = 2; } x;"),
            Value::Number(1.0)
        );
    }

    #[test]
    fn test_while_loop_with_break() {
        let src = "dhoro i = 0; jotokkhon (sotti) { jodi (i == 3) { thamo; } i = i + 1; } i;";
        assert_eq!(eval_source(src), Value::Number(3.0));
    }

    #[test]
    fn test_for_loop_accumulates() {
        let src = "dhoro total = 0; ghuriye (dhoro i = 0; i < 5; i = i + 1) { total = total + i; } total;";
        assert_eq!(eval_source(src), Value::Number(10.0));
    }

    #[test]
    fn test_function_closure_counter() {
        let src = r#"
            kaj makeCounter() {
                dhoro n = 0;
                ferao kaj() {
                    n = n + 1;
                    ferao n;
                };
            }
            dhoro counter = makeCounter();
            counter();
            counter();
            counter();
        "#;
        assert_eq!(eval_source(src), Value::Number(3.0));
    }

    #[test]
    fn test_recursive_factorial() {
        let src = r#"
            kaj fact(n) {
                jodi (n <= 1) { ferao 1; }
                ferao n * fact(n - 1);
            }
            fact(5);
        "#;
        assert_eq!(eval_source(src), Value::Number(120.0));
    }

    #[test]
    fn test_try_catch_finally_ordering() {
        let src = r#"
            dhoro log = [];
            chesta {
                felo "boom";
            } dhoro_bhul (e) {
                log[log.length] = e;
            } shesh {
                log[log.length] = "done";
            }
            log;
        "#;
        let result = eval_source(src);
        assert_eq!(result.to_string(), r#"[boom, done]"#);
    }

    #[test]
    fn test_class_method_dispatch_binds_this() {
        let src = r#"
            sreni Counter {
                shuru() { ei.n = 0; }
                inc() { ei.n = ei.n + 1; ferao ei.n; }
            }
            dhoro c = notun Counter();
            c.inc();
            c.inc();
        "#;
        assert_eq!(eval_source(src), Value::Number(2.0));
    }

    #[test]
    fn test_array_and_map_literals() {
        assert_eq!(eval_source("[1, 2, 3].length;"), Value::Number(3.0));
        assert_eq!(eval_source(r#"{a: 1, b: 2}.b;"#), Value::Number(2.0));
    }

    #[test]
    fn test_logical_short_circuit() {
        assert_eq!(eval_source("mittha ebong (1 / 0);"), Value::Boolean(false));
    }

    #[test]
    fn test_instance_with_call_method_is_directly_callable() {
        let src = r#"
            sreni Adder {
                shuru(n) { ei.n = n; }
                call(x) { ferao ei.n + x; }
            }
            dhoro add5 = notun Adder(5);
            add5(3);
        "#;
        assert_eq!(eval_source(src), Value::Number(8.0));
    }

    #[test]
    fn test_plain_assignment_to_never_declared_name_defines_it() {
        assert_eq!(eval_source("x = 5; x;"), Value::Number(5.0));
    }

    #[test]
    fn test_array_index_out_of_range_is_an_error() {
        assert!(eval_source("[1, 2][5];").is_exception_like());
    }

    #[test]
    fn test_uncaught_exception_propagates_to_program_result() {
        assert!(eval_source(r#"felo "bad";"#).is_exception_like());
    }

    #[test]
    fn test_async_function_resolves_promise() {
        let src = r#"
            osinkrono kaj identity(x) {
                ferao x;
            }
            dhoro p = identity(9);
            opekha p;
        "#;
        assert_eq!(eval_source(src), Value::Number(9.0));
    }
}
