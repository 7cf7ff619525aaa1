//! Command handlers for the `vigil` CLI.

mod debug;
mod eval;

pub use debug::{format_expr, parse_expr};
pub use eval::{evaluate_all, render_json, render_text, run_eval, EvalOptions, Outcome};

use std::sync::Arc;
use vigil_eval::FunctionRegistry;

/// Functions available to expressions given on the command line.
///
/// No built-in library ships with the CLI, so calls are rejected at parse
/// time and only arithmetic evaluates.
pub fn cli_functions() -> Arc<FunctionRegistry> {
    Arc::new(FunctionRegistry::new())
}
