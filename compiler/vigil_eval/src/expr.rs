//! Parsed expressions bound to a function registry.

use crate::{execute, EvalResult, Execution, FunctionRegistry, NoopTimer, Timer};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;
use vigil_ir::Node;
use vigil_tsdb::Context;

/// An expression ready to execute.
///
/// Serializes as its canonical text, which parses back to the same tree.
#[derive(Clone, Debug)]
pub struct Expr {
    root: Node,
    functions: Arc<FunctionRegistry>,
}

impl Expr {
    /// Parse `text`, resolving calls against `functions`.
    pub fn new(text: &str, functions: Arc<FunctionRegistry>) -> EvalResult<Self> {
        let root = vigil_parse::parse(text, functions.as_ref())?;
        Ok(Expr { root, functions })
    }

    /// Wrap an already-built tree.
    pub fn from_node(root: Node, functions: Arc<FunctionRegistry>) -> Self {
        Expr { root, functions }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Evaluate against `context`, returning one result per group and the
    /// backend requests the expression depends on. `timer` may be `None`.
    pub fn execute(&self, context: &dyn Context, timer: Option<&mut dyn Timer>) -> EvalResult<Execution> {
        match timer {
            Some(timer) => execute(&self.root, &self.functions, context, timer),
            None => execute(&self.root, &self.functions, context, &mut NoopTimer),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
