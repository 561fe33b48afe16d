//! Reentrant busy indicator.
//!
//! Every claim pushes an entry identified by a unique token. The visible
//! message is the most recent live entry; the system is idle only when no
//! entry remains.

use std::sync::{Arc, Mutex};

pub const IDLE_MESSAGE: &str = "Idle";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BusyToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyState {
    pub busy: bool,
    pub message: String,
    pub depth: usize,
}

type Observer = Box<dyn Fn(&BusyState) + Send + Sync>;

#[derive(Default)]
struct Stack {
    entries: Vec<(BusyToken, String)>,
    next: u64,
}

impl Stack {
    fn claim(&mut self, label: String) -> BusyToken {
        self.next += 1;
        let token = BusyToken(self.next);
        self.entries.push((token, label));
        token
    }

    fn state(&self) -> BusyState {
        match self.entries.last() {
            Some((_, label)) => BusyState {
                busy: true,
                message: label.clone(),
                depth: self.entries.len(),
            },
            None => BusyState {
                busy: false,
                message: IDLE_MESSAGE.to_string(),
                depth: 0,
            },
        }
    }
}

#[derive(Clone, Default)]
pub struct BusyStack {
    stack: Arc<Mutex<Stack>>,
    observers: Arc<Mutex<Vec<Observer>>>,
}

impl BusyStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, label: impl Into<String>) -> BusyToken {
        let (token, state) = {
            let mut stack = self.stack.lock().unwrap_or_else(|e| e.into_inner());
            let token = stack.claim(label.into());
            (token, stack.state())
        };
        self.notify(&state);
        token
    }

    /// Remove the entry for `token`, wherever it sits in the stack.
    ///
    /// Returns false when the token was already released.
    pub fn pop(&self, token: BusyToken) -> bool {
        let (removed, state) = {
            let mut stack = self.stack.lock().unwrap_or_else(|e| e.into_inner());
            let position = stack.entries.iter().rposition(|(t, _)| *t == token);
            if let Some(position) = position {
                stack.entries.remove(position);
            }
            (position.is_some(), stack.state())
        };
        if removed {
            self.notify(&state);
        }
        removed
    }

    /// Change the label of a live entry.
    pub fn relabel(&self, token: BusyToken, label: impl Into<String>) {
        let state = {
            let mut stack = self.stack.lock().unwrap_or_else(|e| e.into_inner());
            match stack.entries.iter_mut().find(|(t, _)| *t == token) {
                Some(entry) => entry.1 = label.into(),
                None => return,
            }
            stack.state()
        };
        self.notify(&state);
    }

    /// Push a guarded entry only if `admit` accepts the current state.
    ///
    /// The check and the push happen under one lock, so two callers cannot
    /// both see an idle stack. On rejection the state that was seen is returned.
    pub fn guard_if<F>(
        &self,
        label: impl Into<String>,
        admit: F,
    ) -> std::result::Result<BusyGuard, BusyState>
    where
        F: FnOnce(&BusyState) -> bool,
    {
        let (token, state) = {
            let mut stack = self.stack.lock().unwrap_or_else(|e| e.into_inner());
            let current = stack.state();
            if !admit(&current) {
                return Err(current);
            }
            let token = stack.claim(label.into());
            (token, stack.state())
        };
        self.notify(&state);
        Ok(BusyGuard {
            token,
            stack: self.clone(),
        })
    }

    pub fn is_busy(&self) -> bool {
        !self
            .stack
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .is_empty()
    }

    pub fn message(&self) -> String {
        self.snapshot().message
    }

    pub fn snapshot(&self) -> BusyState {
        self.stack.lock().unwrap_or_else(|e| e.into_inner()).state()
    }

    /// Called after every push, pop and relabel with the new state.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&BusyState) + Send + Sync + 'static,
    {
        self.observers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Box::new(observer));
    }

    fn notify(&self, state: &BusyState) {
        let observers = self.observers.lock().unwrap_or_else(|e| e.into_inner());
        for observer in observers.iter() {
            observer(state);
        }
    }
}

/// Entry that is popped when dropped.
pub struct BusyGuard {
    token: BusyToken,
    stack: BusyStack,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.stack.pop(self.token);
    }
}
