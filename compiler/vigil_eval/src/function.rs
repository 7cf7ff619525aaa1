//! Built-in function registry and the call contract.
//!
//! A built-in receives the evaluation state, the timer, and its resolved
//! arguments, and returns one result per group. The registry also serves
//! as the parser's signature table, so a name is known to the parser
//! exactly when it can be called.

use crate::errors::argument_mismatch;
use crate::{EvalResult, EvalState, GroupResult, Timer};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use vigil_ir::{FuncSignature, Signatures};

/// A resolved function argument.
#[derive(Clone, Debug, PartialEq)]
pub enum FuncArg {
    /// String literal, verbatim.
    Text(String),
    /// Number literal, or a subexpression that produced one scalar.
    Number(f64),
    /// Any other subexpression's results.
    Results(Vec<GroupResult>),
}

impl FuncArg {
    pub const fn kind_name(&self) -> &'static str {
        match self {
            FuncArg::Text(_) => "string",
            FuncArg::Number(_) => "number",
            FuncArg::Results(_) => "results",
        }
    }

    pub fn as_text(&self) -> EvalResult<&str> {
        match self {
            FuncArg::Text(s) => Ok(s.as_str()),
            other => Err(argument_mismatch("string", other.kind_name())),
        }
    }

    pub fn as_number(&self) -> EvalResult<f64> {
        match self {
            FuncArg::Number(n) => Ok(*n),
            other => Err(argument_mismatch("number", other.kind_name())),
        }
    }

    /// Per-group results. A bare number becomes one group-free scalar.
    pub fn into_results(self) -> EvalResult<Vec<GroupResult>> {
        match self {
            FuncArg::Results(results) => Ok(results),
            FuncArg::Number(n) => Ok(vec![GroupResult::scalar(n)]),
            FuncArg::Text(_) => Err(argument_mismatch("results", "string")),
        }
    }
}

/// Implementation of a built-in function.
///
/// Any backend request the function depends on must be registered through
/// `state` (`EvalState::query` does this). Closures of the right shape
/// implement this trait.
pub trait Builtin: Send + Sync {
    fn call(&self, state: &mut EvalState<'_>, timer: &mut dyn Timer, args: Vec<FuncArg>) -> EvalResult;
}

impl<F> Builtin for F
where
    F: Fn(&mut EvalState<'_>, &mut dyn Timer, Vec<FuncArg>) -> EvalResult + Send + Sync,
{
    fn call(&self, state: &mut EvalState<'_>, timer: &mut dyn Timer, args: Vec<FuncArg>) -> EvalResult {
        self(state, timer, args)
    }
}

/// A registered function: its declared shape and its implementation.
#[derive(Clone)]
pub struct FunctionEntry {
    pub signature: FuncSignature,
    pub builtin: Arc<dyn Builtin>,
}

impl fmt::Debug for FunctionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionEntry")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Name-to-function table.
#[derive(Clone, Debug, Default)]
pub struct FunctionRegistry {
    functions: FxHashMap<String, FunctionEntry>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closure. A later registration under the same name
    /// replaces the earlier one.
    pub fn register<F>(&mut self, name: impl Into<String>, signature: FuncSignature, f: F)
    where
        F: Fn(&mut EvalState<'_>, &mut dyn Timer, Vec<FuncArg>) -> EvalResult + Send + Sync + 'static,
    {
        self.register_builtin(name, signature, f);
    }

    pub fn register_builtin(
        &mut self,
        name: impl Into<String>,
        signature: FuncSignature,
        builtin: impl Builtin + 'static,
    ) {
        self.functions.insert(
            name.into(),
            FunctionEntry {
                signature,
                builtin: Arc::new(builtin),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&FunctionEntry> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Signatures for FunctionRegistry {
    fn signature(&self, name: &str) -> Option<&FuncSignature> {
        self.get(name).map(|entry| &entry.signature)
    }
}
