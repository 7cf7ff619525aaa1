use super::*;
use crate::{ArgKind, ReturnType};

fn num(n: f64) -> Node {
    Node::Number(n)
}

fn call(name: &str, args: Vec<Node>) -> Node {
    Node::Func(FuncCall {
        name: name.to_string(),
        signature: FuncSignature::new(vec![ArgKind::Text, ArgKind::Text], ReturnType::Series),
        args,
    })
}

mod operators {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn symbols_parse_back() {
        for op in BinaryOp::ALL {
            assert_eq!(op.as_symbol().parse::<BinaryOp>(), Ok(op));
        }
        assert_eq!("-".parse::<UnaryOp>(), Ok(UnaryOp::Neg));
        assert_eq!("!".parse::<UnaryOp>(), Ok(UnaryOp::Not));
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let err = "=<".parse::<BinaryOp>().unwrap_err();
        assert_eq!(err.symbol, "=<");
        assert_eq!(err.to_string(), "unknown operator `=<`");
        assert!("~".parse::<UnaryOp>().is_err());
    }

    #[test]
    fn precedence_order() {
        assert!(BinaryOp::Mul.precedence() < BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() < BinaryOp::Lt.precedence());
        assert!(BinaryOp::Lt.precedence() < BinaryOp::Eq.precedence());
        assert!(BinaryOp::Eq.precedence() < BinaryOp::And.precedence());
        assert!(BinaryOp::And.precedence() < BinaryOp::Or.precedence());
        assert_eq!(BinaryOp::Or.precedence(), BinaryOp::LOWEST_PRECEDENCE);
    }

    #[test]
    fn builders_reject_unknown_tokens() {
        assert!(Node::binary_from_symbol("**", num(1.0), num(2.0)).is_err());
        assert_eq!(
            Node::binary_from_symbol("+", num(1.0), num(2.0)),
            Ok(Node::binary(BinaryOp::Add, num(1.0), num(2.0)))
        );
        assert!(Node::unary_from_symbol("+", num(1.0)).is_err());
    }
}

mod display {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers() {
        assert_eq!(num(3.0).to_string(), "3");
        assert_eq!(num(0.25).to_string(), "0.25");
        assert_eq!(num(f64::NAN).to_string(), "NaN");
        assert_eq!(num(f64::INFINITY).to_string(), "+Inf");
        assert_eq!(num(f64::NEG_INFINITY).to_string(), "-Inf");
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(Node::String("a\"b\\c".into()).to_string(), r#""a\"b\\c""#);
    }

    #[test]
    fn minimal_parentheses() {
        // (1 + 2) * 3
        let node = Node::binary(
            BinaryOp::Mul,
            Node::binary(BinaryOp::Add, num(1.0), num(2.0)),
            num(3.0),
        );
        assert_eq!(node.to_string(), "(1 + 2) * 3");

        // 1 + 2 * 3
        let node = Node::binary(
            BinaryOp::Add,
            num(1.0),
            Node::binary(BinaryOp::Mul, num(2.0), num(3.0)),
        );
        assert_eq!(node.to_string(), "1 + 2 * 3");
    }

    #[test]
    fn left_associativity() {
        // (1 - 2) - 3 needs no parentheses, 1 - (2 - 3) does.
        let left = Node::binary(
            BinaryOp::Sub,
            Node::binary(BinaryOp::Sub, num(1.0), num(2.0)),
            num(3.0),
        );
        assert_eq!(left.to_string(), "1 - 2 - 3");

        let right = Node::binary(
            BinaryOp::Sub,
            num(1.0),
            Node::binary(BinaryOp::Sub, num(2.0), num(3.0)),
        );
        assert_eq!(right.to_string(), "1 - (2 - 3)");
    }

    #[test]
    fn unary_operands() {
        let node = Node::unary(UnaryOp::Not, Node::binary(BinaryOp::Gt, num(1.0), num(2.0)));
        assert_eq!(node.to_string(), "!(1 > 2)");
        assert_eq!(Node::unary(UnaryOp::Neg, num(4.0)).to_string(), "-4");
    }

    #[test]
    fn function_calls() {
        let node = Node::binary(
            BinaryOp::Gt,
            call(
                "q",
                vec![
                    Node::String("sum:cpu{host=*}".into()),
                    Node::String("1h".into()),
                ],
            ),
            num(10.0),
        );
        assert_eq!(node.to_string(), r#"q("sum:cpu{host=*}", "1h") > 10"#);
    }

    #[test]
    fn deep_chain_renders() {
        let mut node = num(1.0);
        for _ in 0..20_000 {
            node = Node::binary(BinaryOp::Add, node, num(1.0));
        }
        assert_eq!(node.to_string(), format!("1{}", " + 1".repeat(20_000)));

        // Take the chain apart one level at a time; dropping it whole
        // recurses once per level.
        while let Node::Binary { left, .. } = node {
            node = *left;
        }
    }

    #[test]
    fn kind_names() {
        assert_eq!(num(1.0).kind_name(), "number literal");
        assert_eq!(Node::String(String::new()).kind_name(), "string literal");
        assert_eq!(call("q", vec![]).kind_name(), "function call");
    }
}
