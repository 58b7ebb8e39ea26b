//! Named subroutines: the registry consulted by `(name)` calls.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::tape::Tape;

/// Host-provided function body. Runs directly against the caller's tape.
pub type NativeFn = Arc<dyn Fn(&mut Tape) + Send + Sync>;

/// What a registry entry runs when called.
#[derive(Clone)]
pub enum Function {
    /// Brainfunc source, interpreted on the caller's tape.
    Source(String),
    /// A native hook.
    Native(NativeFn),
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Source(body) => f.debug_tuple("Source").field(body).finish(),
            Function::Native(_) => f.write_str("Native(..)"),
        }
    }
}

/// Name to [`Function`] table.
///
/// Supplied when an interpreter is built and extended by every `$name{...}`
/// definition it executes. Resetting the interpreter does not clear it.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    entries: HashMap<String, Function>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in helpers:
    ///
    /// | name | effect |
    /// |---|---|
    /// | `pushR` | add the current cell onto its right neighbour, zeroing it |
    /// | `pushL` | add the current cell onto its left neighbour, zeroing it |
    /// | `255` | set a non-negative current cell to exactly 255 (never returns on a negative cell) |
    /// | `newline` | print `\n` using the cell to the right as scratch |
    /// | `resetPointer` | move the pointer back to cell 0 (native) |
    pub fn with_presets() -> Self {
        let mut registry = Self::new();
        registry.define("pushR", "[->+<]");
        registry.define("pushL", "[-<+>]");
        // Counts up from 1 until the break fires at 256, then steps back once.
        registry.define("255", "[-]+[+~]-");
        registry.define("newline", ">[-]++++++++++.[-]<");
        registry.define_native("resetPointer", |tape: &mut Tape| tape.rewind());
        registry
    }

    /// Register (or replace) a source-code function.
    pub fn define(&mut self, name: impl Into<String>, body: impl Into<String>) {
        self.entries.insert(name.into(), Function::Source(body.into()));
    }

    /// Register (or replace) a native hook.
    pub fn define_native<F>(&mut self, name: impl Into<String>, hook: F)
    where
        F: Fn(&mut Tape) + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Function::Native(Arc::new(hook)));
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Function> {
        self.entries.remove(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// True when `name` matches `[A-Za-z0-9_]+`.
pub fn is_valid_function_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_name_char)
}

/// `name` with every character outside `[A-Za-z0-9_]` replaced by `_`.
pub fn suggest_function_name(name: &str) -> String {
    name.chars()
        .map(|ch| if is_name_char(ch) { ch } else { '_' })
        .collect()
}
