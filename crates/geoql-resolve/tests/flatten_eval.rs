//! Flattening and evaluation tests over parsed triggers.

use geoql_ast::{BinaryOp, Expr, ExprKind, Trigger};
use geoql_parser::parse;
use geoql_resolve::{EvalError, LeafError, evaluate, flatten};
use std::collections::HashMap;

fn parse_ok(source: &str) -> Trigger {
    parse(source).unwrap_or_else(|err| panic!("Parse should succeed for {:?}: {}", source, err))
}

/// Comparator over integer selector values.
fn comparator<'a>(
    values: &'a HashMap<&'a str, i64>,
) -> impl FnMut(&Expr, &Expr, BinaryOp) -> Result<bool, LeafError> + 'a {
    move |left, right, op| {
        let ExprKind::Selector(selector) = &left.kind else {
            return Err(format!("unsupported left operand {:?}", left.kind).into());
        };
        let value = *values
            .get(selector.name.as_str())
            .ok_or_else(|| format!("no value for {}", selector.name))?;
        let ExprKind::Int(limit) = right.kind else {
            return Err(format!("unsupported right operand {:?}", right.kind).into());
        };
        match op {
            BinaryOp::Gt => Ok(value > limit),
            BinaryOp::Lt => Ok(value < limit),
            BinaryOp::Eq => Ok(value == limit),
            BinaryOp::Ne => Ok(value != limit),
            other => Err(format!("unsupported operator {}", other).into()),
        }
    }
}

fn flattened(source: &str) -> Trigger {
    let mut trigger = parse_ok(source);
    flatten(&mut trigger).unwrap();
    trigger
}

// =============================================================================
// Flattening
// =============================================================================

#[test]
fn test_flat_length_is_odd() {
    for source in [
        "trigger when a > 1",
        "trigger when a > 1 and b > 2",
        "trigger when (a > 1 or b > 2) and (c > 3 or (d > 4 and e > 5))",
        "trigger when ((a > 1))",
    ] {
        let trigger = flattened(source);
        let len = trigger.when_flat().unwrap().len();
        assert_eq!(len % 2, 1, "{} flattened to {} items", source, len);
    }
}

#[test]
fn test_flat_alternates_leaves_and_logic() {
    let trigger = flattened("trigger when a > 1 and (b < 2 or c == 3) or d != 4");
    for (index, item) in trigger.when_flat().unwrap().iter().enumerate() {
        match &item.kind {
            ExprKind::Operator(op) => {
                assert_eq!(index % 2, 1);
                assert!(op.is_logical());
            }
            ExprKind::Binary { op, .. } => {
                assert_eq!(index % 2, 0);
                assert!(op.is_relational());
            }
            other => panic!("unexpected flat item {:?}", other),
        }
    }
}

#[test]
fn test_flatten_is_a_no_op_the_second_time() {
    let mut trigger = flattened("trigger when a > 1 or b > 2");
    let before = trigger.clone();
    flatten(&mut trigger).unwrap();
    assert_eq!(trigger, before);
}

// =============================================================================
// Evaluation
// =============================================================================

#[test]
fn test_tree_and_flat_agree() {
    let sources = [
        "trigger when a > 1",
        "trigger when a > 1 and b > 1",
        "trigger when a > 10 or b > 1",
        "trigger when a > 10 or b > 10 or c == 3",
        "trigger when a > 1 and b < 100 and c != 3",
        "trigger when (a > 1 and b > 1) and c == 3",
        "trigger when (a > 10 or b > 1) or (c == 4 or a < 0)",
    ];
    let mut values = HashMap::new();
    for (a, b, c) in [(5, 5, 3), (0, 0, 0), (11, 0, 4), (5, 200, 3)] {
        values.insert("a", a);
        values.insert("b", b);
        values.insert("c", c);
        for source in sources {
            let tree = parse_ok(source);
            let flat = flattened(source);
            let from_tree = evaluate(&tree, comparator(&values)).unwrap();
            let from_flat = evaluate(&flat, comparator(&values)).unwrap();
            assert_eq!(from_tree, from_flat, "{} with {:?}", source, values);
        }
    }
}

#[test]
fn test_flat_form_drops_precedence() {
    // a or (b and c) in the tree, (a or b) and c once flattened
    let source = "trigger when a > 1 or b > 1 and c > 1";
    let values = HashMap::from([("a", 5), ("b", 0), ("c", 0)]);
    assert!(evaluate(&parse_ok(source), comparator(&values)).unwrap());
    assert!(!evaluate(&flattened(source), comparator(&values)).unwrap());
}

#[test]
fn test_every_leaf_is_evaluated() {
    let values = HashMap::from([("a", 0), ("b", 0)]);
    let mut seen = Vec::new();
    let mut compare = comparator(&values);
    let result = evaluate(&parse_ok("trigger when a > 1 and b > 1"), |l, r, op| {
        if let ExprKind::Selector(selector) = &l.kind {
            seen.push(selector.name.clone());
        }
        compare(l, r, op)
    })
    .unwrap();
    assert!(!result);
    assert_eq!(seen, vec!["a", "b"]);
}

#[test]
fn test_var_refs_reach_the_comparator_as_values() {
    let values = HashMap::from([("a", 5)]);
    let trigger = parse_ok("trigger vars limit = 3 when a > (@limit)");
    assert!(evaluate(&trigger, comparator(&values)).unwrap());
}

#[test]
fn test_non_boolean_logic_operand_is_illegal() {
    let values = HashMap::from([("a", 5)]);
    let err = evaluate(&parse_ok("trigger when a > 1 or a"), comparator(&values)).unwrap_err();
    assert!(matches!(err, EvalError::IllegalExpression { .. }));

    let err = evaluate(&flattened("trigger when a > 1 or a"), comparator(&values)).unwrap_err();
    assert!(matches!(err, EvalError::IllegalExpression { .. }));
}

#[test]
fn test_flat_leaf_must_be_a_comparison() {
    let values = HashMap::from([("a", 5)]);
    let source = "trigger when true and a > 1";
    assert!(evaluate(&parse_ok(source), comparator(&values)).unwrap());
    let err = evaluate(&flattened(source), comparator(&values)).unwrap_err();
    assert!(matches!(err, EvalError::IllegalExpression { .. }), "{}", err);
}

#[test]
fn test_comparator_errors_surface() {
    let values = HashMap::new();
    let err = evaluate(&parse_ok("trigger when missing > 1"), comparator(&values)).unwrap_err();
    assert!(matches!(err, EvalError::Leaf(_)));
    assert!(err.to_string().contains("no value for missing"));
}
