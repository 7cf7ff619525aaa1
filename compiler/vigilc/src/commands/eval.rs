//! `eval`: evaluate expressions and print their per-group results.
//!
//! Expressions are independent, so they are evaluated in parallel and
//! printed in the order given.

use rayon::prelude::*;
use serde_json::json;
use std::fmt::Write as _;
use std::sync::Arc;
use vigil_eval::{EvalResult, Execution, Expr, FunctionRegistry, RecordingTimer, Step, Timer, Value};
use vigil_tsdb::EmptyContext;

#[derive(Copy, Clone, Debug, Default)]
pub struct EvalOptions {
    /// Print one JSON object per expression instead of text.
    pub json: bool,
    /// Include the timer steps of each execution.
    pub timings: bool,
}

/// One evaluated expression.
#[derive(Debug)]
pub struct Outcome {
    pub source: String,
    pub result: EvalResult<Execution>,
    pub steps: Vec<Step>,
}

/// Evaluate every source against an empty context.
pub fn evaluate_all(sources: &[String], functions: &Arc<FunctionRegistry>) -> Vec<Outcome> {
    sources
        .par_iter()
        .map(|source| evaluate_one(source, functions))
        .collect()
}

fn evaluate_one(source: &str, functions: &Arc<FunctionRegistry>) -> Outcome {
    let mut timer = RecordingTimer::new();
    let result = Expr::new(source, Arc::clone(functions))
        .and_then(|expr| expr.execute(&EmptyContext, Some(&mut timer as &mut dyn Timer)));
    if let Err(err) = &result {
        tracing::debug!(%source, error = %err, "evaluation failed");
    }
    Outcome {
        source: source.to_string(),
        result,
        steps: timer.steps().to_vec(),
    }
}

/// Evaluate and print. Returns `false` if any expression failed.
pub fn run_eval(sources: &[String], functions: &Arc<FunctionRegistry>, options: EvalOptions) -> bool {
    let outcomes = evaluate_all(sources, functions);
    for outcome in &outcomes {
        if options.json {
            println!("{}", render_json(outcome, options.timings));
        } else {
            print!("{}", render_text(outcome, options.timings));
        }
    }
    outcomes.iter().all(|outcome| outcome.result.is_ok())
}

/// Human-readable rendering: the expression, then one line per group
/// followed by its computation trace.
pub fn render_text(outcome: &Outcome, timings: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", outcome.source);
    match &outcome.result {
        Ok(execution) => {
            if execution.results.is_empty() {
                let _ = writeln!(out, "  (no results)");
            }
            for result in &execution.results {
                let _ = writeln!(out, "  {} = {}", result.group, describe(&result.value));
                for computation in &result.computations {
                    let _ = writeln!(out, "    {} = {}", computation.text, computation.value);
                }
            }
            for request in &execution.requests {
                for query in &request.queries {
                    let _ = writeln!(out, "  query {} from {}", query, request.start);
                }
            }
        }
        Err(err) => {
            let _ = writeln!(out, "  error: {err}");
        }
    }
    if timings {
        for step in &outcome.steps {
            let indent = "  ".repeat(step.depth + 1);
            let _ = writeln!(out, "{indent}[{}: {:?}]", step.name, step.duration);
        }
    }
    out
}

pub fn render_json(outcome: &Outcome, timings: bool) -> serde_json::Value {
    let mut value = match &outcome.result {
        Ok(execution) => json!({
            "expr": outcome.source,
            "results": execution.results,
            "requests": execution.requests,
        }),
        Err(err) => json!({
            "expr": outcome.source,
            "error": err.message,
        }),
    };
    if timings {
        value["timings"] = outcome
            .steps
            .iter()
            .map(|step| {
                json!({
                    "step": step.name,
                    "depth": step.depth,
                    "micros": u64::try_from(step.duration.as_micros()).unwrap_or(u64::MAX),
                })
            })
            .collect();
    }
    value
}

fn describe(value: &Value) -> String {
    match value {
        Value::Scalar(n) => format!("{n}"),
        Value::Number(n) => format!("{n} (number)"),
        Value::Series(series) => format!("series of {} points", series.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cli_functions;
    use pretty_assertions::assert_eq;

    fn outcomes(sources: &[&str]) -> Vec<Outcome> {
        let sources: Vec<String> = sources.iter().map(ToString::to_string).collect();
        evaluate_all(&sources, &cli_functions())
    }

    #[test]
    fn outcomes_keep_input_order() {
        let results = outcomes(&["1", "2", "3", "4"]);
        let sources: Vec<_> = results.iter().map(|o| o.source.as_str()).collect();
        assert_eq!(sources, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn text_shows_trace() {
        let outcome = &outcomes(&["1 + 2"])[0];
        assert_eq!(render_text(outcome, false), "1 + 2\n  {} = 3\n    1 + 2 = 3\n");
    }

    #[test]
    fn text_shows_errors() {
        let outcome = &outcomes(&["1 +"])[0];
        assert_eq!(
            render_text(outcome, false),
            "1 +\n  error: unexpected end of expression, expected expression at 3..3\n"
        );
    }

    #[test]
    fn timings_include_execute_step() {
        let outcome = &outcomes(&["2 * 2"])[0];
        assert_eq!(outcome.steps.len(), 1);
        assert!(render_text(outcome, true).contains("[expr execute: "));
        let json = render_json(outcome, true);
        assert_eq!(json["timings"][0]["step"], "expr execute");
    }

    #[test]
    fn json_output() {
        let outcome = &outcomes(&["1 / 0"])[0];
        assert_eq!(
            render_json(outcome, false),
            json!({
                "expr": "1 / 0",
                "results": [{
                    "Value": "+Inf",
                    "Group": {},
                    "Computations": [{ "Text": "1 / 0", "Value": "+Inf" }],
                }],
                "requests": [],
            })
        );

        let outcome = &outcomes(&["x"])[0];
        assert_eq!(render_json(outcome, false)["error"], "unknown function `x` at 0..1");
    }
}
