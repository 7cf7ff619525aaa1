//! Unary operator implementations for the evaluator.
//!
//! Both operators apply to every value variant, elementwise for series, so
//! unary evaluation cannot fail.

use crate::Value;
use vigil_ir::UnaryOp;

/// Apply `op` to one float. `!` yields `1.0` for zero and `0.0` otherwise.
pub fn uoperate(op: UnaryOp, a: f64) -> f64 {
    match op {
        UnaryOp::Neg => -a,
        UnaryOp::Not => f64::from(u8::from(a == 0.0)),
    }
}

/// Apply `op` to a value, keeping its variant.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> Value {
    match value {
        Value::Scalar(n) => Value::Scalar(uoperate(op, *n)),
        Value::Number(n) => Value::Number(uoperate(op, *n)),
        Value::Series(s) => Value::Series(s.map(|p| uoperate(op, p))),
    }
}
