//! Tree walker and `execute` entrypoint.
//!
//! Every step returns `EvalResult`; the first error short-circuits the
//! rest of the walk, so operands to the right of a failing subexpression
//! are never evaluated and `execute` never returns partial results.

use crate::errors::{arity_mismatch, return_type_mismatch, undefined_function, unexpected_node};
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;
use crate::union::union_owned;
use crate::{EvalResult, EvalState, FuncArg, FunctionRegistry, GroupResult, Timer, Value};
use tracing::{debug, trace};
use vigil_ir::{BinaryOp, FuncCall, Node, ReturnType, UnaryOp};
use vigil_stack::ensure_sufficient_stack;
use vigil_tsdb::{Context, Request};

/// Everything one successful execution produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Execution {
    /// One result per group.
    pub results: Vec<GroupResult>,
    /// Backend requests the built-ins registered, in call order.
    pub requests: Vec<Request>,
}

/// Evaluate `root` against `context`.
///
/// Function calls resolve through `functions`. The walk runs inside a
/// timer step named `expr execute`.
pub fn execute(
    root: &Node,
    functions: &FunctionRegistry,
    context: &dyn Context,
    timer: &mut dyn Timer,
) -> EvalResult<Execution> {
    let mut interpreter = Interpreter {
        functions,
        state: EvalState::new(context),
    };
    let walked = timer.step("expr execute", |timer| interpreter.eval(root, timer));
    match walked {
        Ok(results) => {
            let requests = interpreter.state.into_requests();
            debug!(results = results.len(), requests = requests.len(), "expr executed");
            Ok(Execution { results, requests })
        }
        Err(err) => {
            debug!(error = %err, "expr failed");
            Err(err)
        }
    }
}

/// Collapse a single scalar result to its bare value.
///
/// Any other shape (no results, several, or a grouped value) is passed on
/// unchanged.
pub fn extract_scalar(results: Vec<GroupResult>) -> FuncArg {
    if let [GroupResult {
        value: Value::Scalar(n),
        ..
    }] = results.as_slice()
    {
        return FuncArg::Number(*n);
    }
    FuncArg::Results(results)
}

struct Interpreter<'a, 'c> {
    functions: &'a FunctionRegistry,
    state: EvalState<'c>,
}

impl Interpreter<'_, '_> {
    fn eval(&mut self, node: &Node, timer: &mut dyn Timer) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_node(node, timer))
    }

    fn eval_node(&mut self, node: &Node, timer: &mut dyn Timer) -> EvalResult {
        trace!(kind = node.kind_name(), "eval");
        match node {
            Node::Number(n) => Ok(vec![GroupResult::scalar(*n)]),
            Node::Binary { op, left, right } => self.eval_binary(node, *op, left, right, timer),
            Node::Unary { op, arg } => self.eval_unary(*op, arg, timer),
            Node::Func(call) => self.eval_func(call, timer),
            Node::String(_) => Err(unexpected_node(node.kind_name())),
        }
    }

    fn eval_binary(
        &mut self,
        node: &Node,
        op: BinaryOp,
        left: &Node,
        right: &Node,
        timer: &mut dyn Timer,
    ) -> EvalResult {
        let a = self.eval(left, timer)?;
        let b = self.eval(right, timer)?;
        let text = node.to_string();
        union_owned(a, b)
            .into_iter()
            .map(|u| evaluate_binary(u, op, &text))
            .collect()
    }

    fn eval_unary(&mut self, op: UnaryOp, arg: &Node, timer: &mut dyn Timer) -> EvalResult {
        let mut results = self.eval(arg, timer)?;
        for result in &mut results {
            result.value = evaluate_unary(&result.value, op);
        }
        Ok(results)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(name = %call.name))]
    fn eval_func(&mut self, call: &FuncCall, timer: &mut dyn Timer) -> EvalResult {
        let functions = self.functions;
        let entry = functions
            .get(&call.name)
            .ok_or_else(|| undefined_function(&call.name))?;
        if call.args.len() != entry.signature.arity() {
            return Err(arity_mismatch(&call.name, entry.signature.arity(), call.args.len()));
        }

        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.resolve_arg(arg, timer)?);
        }
        let mut results = entry.builtin.call(&mut self.state, timer, args)?;
        trace!(results = results.len(), "builtin returned");

        if entry.signature.returns == ReturnType::Number {
            let text = call.to_string();
            for result in &mut results {
                let Value::Number(n) = result.value else {
                    return Err(return_type_mismatch(
                        &call.name,
                        ReturnType::Number,
                        result.value.type_name(),
                    ));
                };
                result.add_computation(&text, n);
            }
        }
        Ok(results)
    }

    fn resolve_arg(&mut self, arg: &Node, timer: &mut dyn Timer) -> EvalResult<FuncArg> {
        match arg {
            Node::String(text) => Ok(FuncArg::Text(text.clone())),
            Node::Number(n) => Ok(FuncArg::Number(*n)),
            _ => Ok(extract_scalar(self.eval(arg, timer)?)),
        }
    }
}
