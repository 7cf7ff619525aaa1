//! `parse` and `fmt`: inspect an expression without evaluating it.

use super::cli_functions;
use vigil_eval::{EvalResult, Expr};

/// The parsed tree, pretty-printed.
pub fn parse_expr(source: &str) -> EvalResult<String> {
    let expr = Expr::new(source, cli_functions())?;
    Ok(format!("{:#?}", expr.root()))
}

/// The canonical text of `source`.
pub fn format_expr(source: &str) -> EvalResult<String> {
    Ok(Expr::new(source, cli_functions())?.to_string())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fmt_normalizes_spacing_and_parens() {
        assert_eq!(format_expr("((1+2))*-3").unwrap(), "(1 + 2) * -3");
        assert_eq!(format_expr("1-(2-3)").unwrap(), "1 - (2 - 3)");
    }

    #[test]
    fn parse_shows_tree() {
        let tree = parse_expr("!1").unwrap();
        assert!(tree.starts_with("Unary {"));
        assert!(tree.contains("Not"));
    }

    #[test]
    fn unknown_function_is_rejected() {
        let err = format_expr("avg(1)").unwrap_err();
        assert_eq!(err.message, "unknown function `avg` at 0..3");
    }
}
