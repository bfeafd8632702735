//! Lexical environments (spec.md §3.5): a chain of frames, one per block/function/class-method
//! activation, each holding its own bindings and a link to its defining (not calling) parent.
//! `Arc<RwLock<_>>` rather than `Rc<RefCell<_>>` because closures captured by an async function
//! literal are handed to a worker task (spec.md §7) and must be `Send + Sync`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::value::Value;

struct EnvironmentInner {
    bindings: RwLock<HashMap<String, Value>>,
    parent: Option<Environment>,
}

#[derive(Clone)]
pub struct Environment(Arc<EnvironmentInner>);

impl Environment {
    pub fn root() -> Self {
        Self(Arc::new(EnvironmentInner {
            bindings: RwLock::new(HashMap::new()),
            parent: None,
        }))
    }

    pub fn child(parent: &Environment) -> Self {
        Self(Arc::new(EnvironmentInner {
            bindings: RwLock::new(HashMap::new()),
            parent: Some(parent.clone()),
        }))
    }

    /// `dhoro name = value;` — always creates a new binding in the current frame, shadowing
    /// any binding of the same name in an enclosing frame.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.0.bindings.write().insert(name.into(), value);
    }

    /// Identifier lookup: walks from the current frame outward to the root.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.0.bindings.read().get(name) {
            return Some(value.clone());
        }
        self.0.parent.as_ref().and_then(|parent| parent.get(name))
    }

    /// Plain (non-`dhoro`) assignment: finds the nearest frame that already binds `name` and
    /// updates it there, so assignment mutates the existing binding rather than shadowing it.
    /// If no frame binds `name`, defines it in the original (current) frame instead (spec.md
    /// §3.5: `update` "defines in the current frame" when nothing already binds the name).
    pub fn update(&self, name: &str, value: Value) {
        if !self.try_update(name, value.clone()) {
            self.define(name.to_string(), value);
        }
    }

    fn try_update(&self, name: &str, value: Value) -> bool {
        if self.0.bindings.read().contains_key(name) {
            self.0.bindings.write().insert(name.to_string(), value);
            return true;
        }
        match &self.0.parent {
            Some(parent) => parent.try_update(name, value),
            None => false,
        }
    }

    /// A snapshot of only the current frame's bindings, used by the evaluator when binding `ei`
    /// for a freshly-entered method activation.
    pub fn snapshot_current(&self) -> HashMap<String, Value> {
        self.0.bindings.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let env = Environment::root();
        env.define("x", Value::Number(1.0));
        assert_eq!(env.get("x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn test_get_walks_parent_chain() {
        let parent = Environment::root();
        parent.define("x", Value::Number(1.0));
        let child = Environment::child(&parent);
        assert_eq!(child.get("x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn test_define_in_child_shadows_parent() {
        let parent = Environment::root();
        parent.define("x", Value::Number(1.0));
        let child = Environment::child(&parent);
        child.define("x", Value::Number(2.0));
        assert_eq!(child.get("x"), Some(Value::Number(2.0)));
        assert_eq!(parent.get("x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn test_update_mutates_parent_binding() {
        let parent = Environment::root();
        parent.define("x", Value::Number(1.0));
        let child = Environment::child(&parent);
        child.update("x", Value::Number(9.0));
        assert_eq!(parent.get("x"), Some(Value::Number(9.0)));
        assert_eq!(child.get("x"), Some(Value::Number(9.0)));
    }

    #[test]
    fn test_update_undefined_variable_defines_in_current_frame() {
        let parent = Environment::root();
        let child = Environment::child(&parent);
        child.update("missing", Value::Number(1.0));
        assert_eq!(child.get("missing"), Some(Value::Number(1.0)));
        assert_eq!(parent.get("missing"), None);
    }

    #[test]
    fn test_snapshot_current_excludes_parent() {
        let parent = Environment::root();
        parent.define("x", Value::Number(1.0));
        let child = Environment::child(&parent);
        child.define("y", Value::Number(2.0));
        let snapshot = child.snapshot_current();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains_key("y"));
    }
}
