//! Promises (spec.md §7): a one-shot PENDING → RESOLVED/REJECTED cell. `opekha` blocks the
//! calling worker task until the terminal state lands; resolving/rejecting an already-terminal
//! promise is a no-op, and awaiting a terminal promise repeatedly always returns the same value.

use parking_lot::{Condvar, Mutex};

use super::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum PromiseState {
    Pending,
    Resolved(Value),
    Rejected(Value),
}

pub struct Promise {
    state: Mutex<PromiseState>,
    settled: Condvar,
}

impl Promise {
    pub fn pending() -> Self {
        Self {
            state: Mutex::new(PromiseState::Pending),
            settled: Condvar::new(),
        }
    }

    pub fn resolved(value: Value) -> Self {
        Self {
            state: Mutex::new(PromiseState::Resolved(value)),
            settled: Condvar::new(),
        }
    }

    pub fn rejected(value: Value) -> Self {
        Self {
            state: Mutex::new(PromiseState::Rejected(value)),
            settled: Condvar::new(),
        }
    }

    /// Transition PENDING -> RESOLVED. A promise that has already settled keeps its first
    /// outcome; this is a no-op rather than an error, since a worker task racing a cancellation
    /// must not be able to observe a torn transition.
    pub fn resolve(&self, value: Value) {
        let mut state = self.state.lock();
        if matches!(*state, PromiseState::Pending) {
            *state = PromiseState::Resolved(value);
            self.settled.notify_all();
        }
    }

    pub fn reject(&self, value: Value) {
        let mut state = self.state.lock();
        if matches!(*state, PromiseState::Pending) {
            *state = PromiseState::Rejected(value);
            self.settled.notify_all();
        }
    }

    /// Block the calling thread until this promise settles, then return its terminal value.
    /// Idempotent: awaiting an already-settled promise returns immediately without blocking.
    pub fn await_value(&self) -> Value {
        let mut state = self.state.lock();
        while matches!(*state, PromiseState::Pending) {
            self.settled.wait(&mut state);
        }
        match &*state {
            PromiseState::Resolved(v) => v.clone(),
            PromiseState::Rejected(v) => Value::Exception(Box::new(v.clone())),
            PromiseState::Pending => unreachable!("loop only exits once settled"),
        }
    }

    pub fn state(&self) -> PromiseState {
        self.state.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_resolve_then_await_returns_value() {
        let promise = Promise::pending();
        promise.resolve(Value::Number(42.0));
        assert_eq!(promise.await_value(), Value::Number(42.0));
    }

    #[test]
    fn test_second_resolve_is_ignored() {
        let promise = Promise::pending();
        promise.resolve(Value::Number(1.0));
        promise.resolve(Value::Number(2.0));
        assert_eq!(promise.await_value(), Value::Number(1.0));
    }

    #[test]
    fn test_reject_surfaces_as_exception_on_await() {
        let promise = Promise::pending();
        promise.reject(Value::string("boom"));
        assert!(matches!(promise.await_value(), Value::Exception(_)));
    }

    #[test]
    fn test_await_blocks_until_resolved_from_another_thread() {
        let promise = Arc::new(Promise::pending());
        let worker = {
            let promise = Arc::clone(&promise);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                promise.resolve(Value::Boolean(true));
            })
        };
        assert_eq!(promise.await_value(), Value::Boolean(true));
        worker.join().unwrap();
    }

    #[test]
    fn test_repeated_await_is_idempotent() {
        let promise = Promise::pending();
        promise.resolve(Value::Number(7.0));
        assert_eq!(promise.await_value(), Value::Number(7.0));
        assert_eq!(promise.await_value(), Value::Number(7.0));
    }
}
