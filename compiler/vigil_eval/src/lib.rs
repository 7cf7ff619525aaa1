//! Vigil Eval - the alert-expression evaluation engine.
//!
//! Evaluates a `vigil_ir::Node` tree to one result per tag group:
//! - `value`: `Value` (scalar, per-group number, per-group series)
//! - `result`: `GroupResult` and its computation trace
//! - `union`: the group join that decides which operand results combine
//! - `operators` / `unary_operators`: operator semantics and broadcasting
//! - `function`: the built-in registry and call contract
//! - `interpreter`: the tree walker and `execute`
//! - `expr`: `Expr`, a parsed tree bound to its registry
//!
//! The engine never queries a store itself. Built-ins do, through the
//! `EvalState` they are handed, and every request they register comes back
//! in the `Execution`.

pub mod errors;
mod expr;
mod function;
mod interpreter;
pub mod operators;
mod result;
mod state;
mod timer;
pub mod unary_operators;
mod union;
mod value;

pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use expr::Expr;
pub use function::{Builtin, FuncArg, FunctionEntry, FunctionRegistry};
pub use interpreter::{execute, extract_scalar, Execution};
pub use result::{Computation, Computations, GroupResult};
pub use state::EvalState;
pub use timer::{NoopTimer, RecordingTimer, Step, Timer};
pub use union::{resolve_group, union, Union};
pub use value::{Series, Value};
