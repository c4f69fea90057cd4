//! Lexical scope tracking for bytecode generation
//!
//! Resolves local variable names to `(slot index, scope depth)` pairs.
//! Method bodies open a fresh scope that cannot see enclosing locals;
//! block bodies nest inside their enclosing scope and reach outer locals
//! at increasing depth.

use std::collections::HashMap;

struct Frame {
    locals: HashMap<String, usize>,
    next_slot: usize,
    /// Barrier frames (method and program scopes) stop outward lookup
    barrier: bool,
}

/// Stack of lexical scopes during compilation
#[derive(Default)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    /// Create an empty scope stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a method or program scope
    pub fn push_method(&mut self) {
        self.frames.push(Frame {
            locals: HashMap::new(),
            next_slot: 0,
            barrier: true,
        });
    }

    /// Open a block scope nested in the current one
    pub fn push_block(&mut self) {
        self.frames.push(Frame {
            locals: HashMap::new(),
            next_slot: 0,
            barrier: false,
        });
    }

    /// Close the innermost scope
    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Define a new local in the innermost scope, returning its slot
    pub fn define(&mut self, name: &str) -> usize {
        let frame = self.frames.last_mut().expect("no open scope");
        if let Some(&slot) = frame.locals.get(name) {
            return slot;
        }
        let slot = frame.next_slot;
        frame.next_slot += 1;
        frame.locals.insert(name.to_string(), slot);
        slot
    }

    /// Resolve a name to `(slot, depth)`, walking outward through block
    /// scopes until a barrier is crossed
    pub fn resolve(&self, name: &str) -> Option<(usize, usize)> {
        for (depth, frame) in self.frames.iter().rev().enumerate() {
            if let Some(&slot) = frame.locals.get(name) {
                return Some((slot, depth));
            }
            if frame.barrier {
                return None;
            }
        }
        None
    }

    /// Resolve a name for assignment, defining it in the innermost scope
    /// when unseen
    pub fn assign(&mut self, name: &str) -> (usize, usize) {
        if let Some(found) = self.resolve(name) {
            found
        } else {
            (self.define(name), 0)
        }
    }
}
