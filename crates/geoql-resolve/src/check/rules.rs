//! Operator rule table.
//!
//! Each rule names the operators it covers, a pattern for the left operand
//! class, the patterns the right operand class may match, and the class the
//! operation yields. Rules are data only; [`resolve`] is the whole
//! resolution algorithm.

use super::class::Class;
use geoql_ast::BinaryOp;
use geoql_ast::BinaryOp::*;
use tracing::trace;

/// Match against an operand class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Is(Class),
    AnyQuantity,
    AnyArrayQuantity,
    AnyRangeQuantity,
    AnyCalendar,
    Any,
}

impl Pattern {
    pub fn matches(self, class: Class) -> bool {
        match self {
            Pattern::Is(expected) => expected == class,
            Pattern::AnyQuantity => matches!(class, Class::Quantity(_)),
            Pattern::AnyArrayQuantity => matches!(class, Class::ArrayQuantity(_)),
            Pattern::AnyRangeQuantity => matches!(class, Class::RangeQuantity(_)),
            Pattern::AnyCalendar => matches!(class, Class::Calendar(_)),
            Pattern::Any => true,
        }
    }
}

/// Result class of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Yields {
    Boolean,
    Int,
    Float,
    String,
    /// The matched left class.
    Left,
    /// The matched right class.
    Right,
    /// A quantity of the unit carried by either operand.
    Quantity,
}

#[derive(Debug)]
pub struct Rule {
    pub ops: &'static [BinaryOp],
    pub left: Pattern,
    pub right: &'static [Pattern],
    pub yields: Yields,
}

const ARITHMETIC: &[BinaryOp] = &[Add, Sub, Mul, Div, Mod];
const ADDITIVE: &[BinaryOp] = &[Add, Sub];
const SCALING: &[BinaryOp] = &[Mul, Div];
const COMPARISON: &[BinaryOp] = &[Eq, Ne, Lt, Le, Gt, Ge];
const EQUALITY: &[BinaryOp] = &[Eq, Ne];
const CONTAINMENT: &[BinaryOp] = &[In, NotIn];
const GEOMETRIC: &[BinaryOp] = &[Nearby, NotNearby, Intersects, NotIntersects];
const LOGICAL: &[BinaryOp] = &[And, Or];

const INT: Pattern = Pattern::Is(Class::Int);
const FLOAT: Pattern = Pattern::Is(Class::Float);
const STRING: Pattern = Pattern::Is(Class::String);
const BOOLEAN: Pattern = Pattern::Is(Class::Boolean);
const GEOMETRY: Pattern = Pattern::Is(Class::Geometry);

/// The rule table. First match wins; rules must not overlap.
pub static RULES: &[Rule] = &[
    // === Arithmetic ===
    Rule { ops: ARITHMETIC, left: INT, right: &[INT], yields: Yields::Int },
    Rule { ops: ARITHMETIC, left: FLOAT, right: &[FLOAT], yields: Yields::Float },
    Rule { ops: ADDITIVE, left: Pattern::AnyQuantity, right: &[Pattern::AnyQuantity], yields: Yields::Quantity },
    Rule { ops: SCALING, left: Pattern::AnyQuantity, right: &[FLOAT], yields: Yields::Left },
    Rule { ops: &[Add, Sub, Mul], left: FLOAT, right: &[Pattern::AnyQuantity], yields: Yields::Right },
    Rule { ops: &[Add], left: STRING, right: &[STRING], yields: Yields::String },
    // === Comparison ===
    Rule { ops: COMPARISON, left: FLOAT, right: &[FLOAT, Pattern::AnyQuantity], yields: Yields::Boolean },
    Rule { ops: COMPARISON, left: Pattern::AnyQuantity, right: &[FLOAT, Pattern::AnyQuantity], yields: Yields::Boolean },
    Rule { ops: EQUALITY, left: STRING, right: &[STRING], yields: Yields::Boolean },
    Rule { ops: EQUALITY, left: BOOLEAN, right: &[BOOLEAN], yields: Yields::Boolean },
    // === Containment ===
    Rule {
        ops: CONTAINMENT,
        left: FLOAT,
        right: &[
            Pattern::Is(Class::ArrayFloat),
            Pattern::Is(Class::RangeFloat),
            Pattern::AnyArrayQuantity,
            Pattern::AnyRangeQuantity,
        ],
        yields: Yields::Boolean,
    },
    Rule {
        ops: CONTAINMENT,
        left: Pattern::AnyQuantity,
        right: &[Pattern::AnyArrayQuantity, Pattern::AnyRangeQuantity],
        yields: Yields::Boolean,
    },
    Rule {
        ops: CONTAINMENT,
        left: STRING,
        right: &[Pattern::Is(Class::ArrayString), Pattern::Is(Class::RangeString)],
        yields: Yields::Boolean,
    },
    Rule { ops: CONTAINMENT, left: BOOLEAN, right: &[Pattern::Is(Class::ArrayBoolean)], yields: Yields::Boolean },
    // epoch seconds or ISO text against a calendar literal
    Rule { ops: CONTAINMENT, left: INT, right: &[Pattern::AnyCalendar], yields: Yields::Boolean },
    Rule { ops: CONTAINMENT, left: STRING, right: &[Pattern::AnyCalendar], yields: Yields::Boolean },
    Rule { ops: CONTAINMENT, left: GEOMETRY, right: &[GEOMETRY], yields: Yields::Boolean },
    // a coordinate pair inside a shape
    Rule { ops: CONTAINMENT, left: Pattern::Is(Class::ArrayFloat), right: &[GEOMETRY], yields: Yields::Boolean },
    // === Geometry predicates ===
    Rule { ops: GEOMETRIC, left: GEOMETRY, right: &[Pattern::Any], yields: Yields::Boolean },
    Rule { ops: GEOMETRIC, left: Pattern::Any, right: &[GEOMETRY], yields: Yields::Boolean },
    // === Logic ===
    Rule { ops: LOGICAL, left: BOOLEAN, right: &[BOOLEAN], yields: Yields::Boolean },
];

/// Quantities on both sides must share a unit family.
fn units_agree(left: Class, right: Class) -> bool {
    match (left.unit(), right.unit()) {
        (Some(l), Some(r)) => l == r,
        _ => true,
    }
}

fn result_class(yields: Yields, left: Class, right: Class) -> Option<Class> {
    match yields {
        Yields::Boolean => Some(Class::Boolean),
        Yields::Int => Some(Class::Int),
        Yields::Float => Some(Class::Float),
        Yields::String => Some(Class::String),
        Yields::Left => Some(left),
        Yields::Right => Some(right),
        Yields::Quantity => left.unit().or(right.unit()).map(Class::Quantity),
    }
}

/// Resolve the result class of `left op right`.
///
/// Left candidates are tried in order; for each, rules are scanned in table
/// order, and the first rule whose right patterns accept any right candidate
/// decides the result.
pub fn resolve(op: BinaryOp, left: &[Class], right: &[Class]) -> Option<Class> {
    for &l in left {
        for (index, rule) in RULES.iter().enumerate() {
            if !rule.ops.contains(&op) || !rule.left.matches(l) {
                continue;
            }
            for &r in right {
                if !rule.right.iter().any(|pattern| pattern.matches(r)) || !units_agree(l, r) {
                    continue;
                }
                if let Some(result) = result_class(rule.yields, l, r) {
                    trace!(%op, left = %l, right = %r, rule = index, %result, "operator rule matched");
                    return Some(result);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoql_ast::UnitKind;

    fn int() -> Vec<Class> {
        Class::Int.candidates()
    }

    #[test]
    fn test_numeric_promotion() {
        assert_eq!(resolve(Add, &int(), &int()), Some(Class::Int));
        assert_eq!(resolve(Add, &int(), &[Class::Float]), Some(Class::Float));
        assert_eq!(resolve(Mul, &[Class::Float], &int()), Some(Class::Float));
        assert_eq!(resolve(Gt, &int(), &int()), Some(Class::Boolean));
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            resolve(Add, &[Class::String], &[Class::String]),
            Some(Class::String)
        );
        assert_eq!(resolve(Sub, &[Class::String], &[Class::String]), None);
        assert_eq!(resolve(Gt, &int(), &[Class::String]), None);
        assert_eq!(
            resolve(Eq, &[Class::String], &[Class::String]),
            Some(Class::Boolean)
        );
        for op in [Lt, Le, Gt, Ge] {
            assert_eq!(resolve(op, &[Class::String], &[Class::String]), None, "{}", op);
        }
    }

    #[test]
    fn test_quantities_need_matching_units() {
        let speed = [Class::Quantity(UnitKind::Speed)];
        let distance = [Class::Quantity(UnitKind::Distance)];
        assert_eq!(resolve(Gt, &[Class::Float], &speed), Some(Class::Boolean));
        assert_eq!(resolve(Add, &speed, &speed), Some(speed[0]));
        assert_eq!(resolve(Lt, &speed, &distance), None);
        assert_eq!(resolve(Mul, &distance, &int()), Some(distance[0]));
        assert_eq!(resolve(Sub, &int(), &distance), Some(distance[0]));
    }

    #[test]
    fn test_containment() {
        assert_eq!(
            resolve(In, &int(), &Class::ArrayInt.candidates()),
            Some(Class::Boolean)
        );
        assert_eq!(
            resolve(In, &[Class::Float], &Class::RangeInt.candidates()),
            Some(Class::Boolean)
        );
        assert_eq!(resolve(NotIn, &[Class::String], &[Class::ArrayFloat]), None);
        assert_eq!(resolve(In, &[Class::Boolean], &[Class::ArrayBoolean]), Some(Class::Boolean));
    }

    #[test]
    fn test_geometry_on_either_side() {
        assert_eq!(
            resolve(Nearby, &[Class::ArrayFloat], &[Class::Geometry]),
            Some(Class::Boolean)
        );
        assert_eq!(
            resolve(NotIntersects, &[Class::Geometry], &[Class::String]),
            Some(Class::Boolean)
        );
        assert_eq!(resolve(Nearby, &int(), &int()), None);
    }

    #[test]
    fn test_logic_requires_booleans() {
        assert_eq!(
            resolve(And, &[Class::Boolean], &[Class::Boolean]),
            Some(Class::Boolean)
        );
        assert_eq!(resolve(Or, &[Class::Boolean], &int()), None);
    }

    #[test]
    fn test_every_rule_is_reachable() {
        for rule in RULES {
            assert!(!rule.ops.is_empty());
            assert!(!rule.right.is_empty());
        }
        // every operator has at least one rule
        for op in [
            Add, Sub, Mul, Div, Mod, Eq, Ne, Lt, Le, Gt, Ge, In, NotIn, Nearby, NotNearby,
            Intersects, NotIntersects, And, Or,
        ] {
            assert!(RULES.iter().any(|rule| rule.ops.contains(&op)), "{}", op);
        }
    }
}
