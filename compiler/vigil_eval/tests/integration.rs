//! End-to-end tests: expression text through `Expr` to serialized results.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use vigil_eval::{EvalErrorKind, Expr, FunctionRegistry, GroupResult, RecordingTimer, Timer, Value};
use vigil_ir::{ArgKind, FuncSignature, ReturnType};
use vigil_tsdb::{EmptyContext, Query, Request, Response, ResponseSet, TagSet, TsdbError};

fn store(request: &Request) -> Result<ResponseSet, TsdbError> {
    let query = &request.queries[0];
    let hosts = match query.tags.get("host") {
        Some("*") | None => vec!["web01", "web02"],
        Some(host) => vec![host],
    };
    Ok(hosts
        .into_iter()
        .enumerate()
        .map(|(i, host)| Response {
            metric: query.metric.clone(),
            tags: TagSet::new().with("host", host),
            dps: [(60, 1.0), (120, if i == 0 { 3.0 } else { 5.0 })].into_iter().collect(),
        })
        .collect())
}

fn functions() -> Arc<FunctionRegistry> {
    let mut registry = FunctionRegistry::new();
    registry.register(
        "q",
        FuncSignature::new([ArgKind::Text, ArgKind::Text], ReturnType::Series),
        |state, timer, args| {
            let query: Query = args[0].as_text()?.parse()?;
            let request = Request::new(args[1].as_text()?, query);
            let responses = timer.step("query", |_| state.query(request))?;
            Ok(responses
                .into_iter()
                .map(|r| GroupResult::new(Value::Series(r.dps.into()), r.tags))
                .collect())
        },
    );
    registry.register(
        "last",
        FuncSignature::new([ArgKind::Results], ReturnType::Number),
        |_, _, args| {
            let results = args.into_iter().next().unwrap().into_results()?;
            Ok(results
                .into_iter()
                .map(|r| {
                    let last = match &r.value {
                        Value::Series(s) => s.iter().last().map_or(f64::NAN, |(_, p)| p),
                        Value::Scalar(n) | Value::Number(n) => *n,
                    };
                    GroupResult::new(Value::Number(last), r.group)
                })
                .collect())
        },
    );
    Arc::new(registry)
}

#[test]
fn alert_condition_per_host() {
    let expr = Expr::new(r#"last(q("avg:cpu{host=*}", "5m-ago")) / 0 > 4"#, functions()).unwrap();
    let execution = expr.execute(&store, None).unwrap();

    assert_eq!(
        serde_json::to_value(&execution.results).unwrap(),
        json!([
            {
                "Value": 1.0,
                "Group": { "host": "web01" },
                "Computations": [
                    { "Text": r#"last(q("avg:cpu{host=web01}", "5m-ago"))"#, "Value": 3.0 },
                    { "Text": r#"last(q("avg:cpu{host=web01}", "5m-ago")) / 0"#, "Value": "+Inf" },
                    { "Text": r#"last(q("avg:cpu{host=web01}", "5m-ago")) / 0 > 4"#, "Value": 1.0 },
                ],
            },
            {
                "Value": 1.0,
                "Group": { "host": "web02" },
                "Computations": [
                    { "Text": r#"last(q("avg:cpu{host=web02}", "5m-ago"))"#, "Value": 5.0 },
                    { "Text": r#"last(q("avg:cpu{host=web02}", "5m-ago")) / 0"#, "Value": "+Inf" },
                    { "Text": r#"last(q("avg:cpu{host=web02}", "5m-ago")) / 0 > 4"#, "Value": 1.0 },
                ],
            },
        ])
    );
    assert_eq!(
        serde_json::to_value(&execution.requests).unwrap(),
        json!([{
            "start": "5m-ago",
            "queries": [{ "aggregator": "avg", "metric": "cpu", "tags": { "host": "*" } }],
        }])
    );
}

#[test]
fn zero_over_zero_serializes_as_nan() {
    let expr = Expr::new("0 / 0", functions()).unwrap();
    let execution = expr.execute(&EmptyContext, None).unwrap();
    assert_eq!(serde_json::to_string(&execution.results[0].value).unwrap(), r#""NaN""#);
}

#[test]
fn expr_serializes_as_canonical_text() {
    let functions = functions();
    let expr = Expr::new(r#"last(q("sum:cpu", "1h"))>(1+2)*3"#, Arc::clone(&functions)).unwrap();
    let text = serde_json::to_value(&expr).unwrap();
    assert_eq!(text, json!(r#"last(q("sum:cpu", "1h")) > (1 + 2) * 3"#));

    let reparsed = Expr::new(text.as_str().unwrap(), functions).unwrap();
    assert_eq!(reparsed.root(), expr.root());
}

#[test]
fn timer_sees_nested_query_steps() {
    let expr = Expr::new(r#"q("sum:cpu{host=web01}", "1h") + 1"#, functions()).unwrap();
    let mut timer = RecordingTimer::new();
    let execution = expr.execute(&store, Some(&mut timer as &mut dyn Timer)).unwrap();
    assert_eq!(execution.results.len(), 1);

    let steps: Vec<_> = timer.steps().iter().map(|s| (s.name.as_str(), s.depth)).collect();
    assert_eq!(steps, vec![("expr execute", 0), ("query", 1)]);
}

#[test]
fn parse_errors_surface_through_expr() {
    let err = Expr::new("1 +", functions()).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::Parse(_)));

    let err = Expr::new("1 =< 2", functions()).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnknownOperator {
            symbol: "=<".to_string(),
        }
    );

    let err = Expr::new("nope(1)", functions()).unwrap_err();
    assert_eq!(err.message, "unknown function `nope` at 0..4");
}

#[test]
fn series_pair_is_an_error_not_a_panic() {
    let expr = Expr::new(r#"q("sum:cpu", "1h") - q("sum:cpu", "1h")"#, functions()).unwrap();
    let err = expr.execute(&store, None).unwrap_err();
    assert_eq!(err.message, "unsupported operand types for `-`: series and series");
}

#[test]
fn executions_run_in_parallel() {
    let expr = Expr::new(r#"last(q("sum:cpu{host=*}", "1h"))"#, functions()).unwrap();
    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| expr.execute(&store, None).unwrap().results.len()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(counts, vec![2; 4]);
}

#[test]
fn deeply_nested_text_executes() {
    let parens = format!("{}1{}", "(".repeat(20_000), ")".repeat(20_000));
    let expr = Expr::new(&parens, functions()).unwrap();
    assert_eq!(expr.to_string(), "1");

    let chain = format!("1{}", " + 1".repeat(2_000));
    let expr = Expr::new(&chain, functions()).unwrap();
    let execution = expr.execute(&EmptyContext, None).unwrap();
    assert_eq!(execution.results[0].value, Value::Scalar(2_001.0));
    assert_eq!(serde_json::to_value(&expr).unwrap(), json!(chain));
}

#[test]
fn overflowing_literal_is_a_parse_error() {
    let err = Expr::new("1e400 > 0", functions()).unwrap_err();
    assert_eq!(err.message, "invalid token `1e400` at 0..5");
}
