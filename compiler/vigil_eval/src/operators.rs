//! Binary operator implementations for the evaluator.
//!
//! Dispatch is a direct match over the closed `(Value, Value)` pairs. A
//! scalar or number paired with a series is broadcast across the series'
//! samples; two series never combine.

use crate::errors::unsupported_operand_types;
use crate::{EvalResult, GroupResult, Union, Value};
use vigil_ir::BinaryOp;

/// Apply `op` to two floats.
///
/// Arithmetic follows IEEE-754, so division by zero yields an infinity or
/// NaN rather than an error. Comparisons and logical operators yield
/// `1.0` or `0.0`; logical operators treat any nonzero operand as true.
pub fn operate(op: BinaryOp, a: f64, b: f64) -> f64 {
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Eq => truth(a == b),
        BinaryOp::NotEq => truth(a != b),
        BinaryOp::Lt => truth(a < b),
        BinaryOp::LtEq => truth(a <= b),
        BinaryOp::Gt => truth(a > b),
        BinaryOp::GtEq => truth(a >= b),
        BinaryOp::And => truth(a != 0.0 && b != 0.0),
        BinaryOp::Or => truth(a != 0.0 || b != 0.0),
    }
}

#[inline]
fn truth(b: bool) -> f64 {
    f64::from(u8::from(b))
}

/// Combine one matched pair into a result.
///
/// The result takes the union's group and computations. Scalar and number
/// outputs also log `text` (the operator expression) with their value.
pub fn evaluate_binary(union: Union, op: BinaryOp, text: &str) -> EvalResult<GroupResult> {
    let Union {
        a,
        b,
        group,
        computations,
    } = union;

    let (value, logged) = match (&a, &b) {
        (Value::Scalar(x), Value::Scalar(y)) => {
            let n = operate(op, *x, *y);
            (Value::Scalar(n), Some(n))
        }
        (Value::Scalar(x) | Value::Number(x), Value::Number(y)) | (Value::Number(x), Value::Scalar(y)) => {
            let n = operate(op, *x, *y);
            (Value::Number(n), Some(n))
        }
        (Value::Scalar(x) | Value::Number(x), Value::Series(s)) => {
            (Value::Series(s.map(|p| operate(op, *x, p))), None)
        }
        (Value::Series(s), Value::Scalar(y) | Value::Number(y)) => {
            (Value::Series(s.map(|p| operate(op, p, *y))), None)
        }
        (Value::Series(_), Value::Series(_)) => {
            return Err(unsupported_operand_types(op, a.type_name(), b.type_name()));
        }
    };

    let mut result = GroupResult {
        value,
        group,
        computations,
    };
    if let Some(n) = logged {
        result.add_computation(text, n);
    }
    Ok(result)
}
