//! Rendering nodes back to source text.
//!
//! Rendered output re-parses to a structurally equal tree. Multi-line mode
//! only affects where line breaks fall: after each logical operator of a
//! condition and between the clauses of a trigger.

use super::expr::{Expr, ExprKind, Selector};
use super::trigger::{Condition, Trigger};
use crate::foundation::units::format_magnitude;

/// Source rendering.
pub trait Render {
    /// Render with `indent` as the indentation unit. `inline` forces a
    /// single line.
    fn render(&self, indent: &str, inline: bool) -> String;
}

/// Quote a string literal, escaping what the tokenizer unescapes.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn join(items: &[Expr], indent: &str) -> String {
    items
        .iter()
        .map(|item| item.render(indent, true))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_selector(selector: &Selector, indent: &str) -> String {
    let mut out = selector.name.clone();
    if !selector.args.is_empty() {
        let mut args: Vec<String> = selector.args.iter().map(|arg| quote(arg)).collect();
        if selector.wildcard {
            args.push("*".to_string());
        }
        out.push('{');
        out.push_str(&args.join(", "));
        out.push('}');
    }
    if !selector.props.is_empty() {
        out.push(':');
        out.push_str(&join(&selector.props, indent));
    }
    out
}

impl Render for Expr {
    fn render(&self, indent: &str, inline: bool) -> String {
        match &self.kind {
            ExprKind::Int(value) => value.to_string(),
            ExprKind::Float(value) => format_magnitude(*value),
            ExprKind::Str(text) => quote(text),
            ExprKind::Bool(value) => value.to_string(),
            ExprKind::Percent(value) => format!("{}%", format_magnitude(*value)),
            ExprKind::Distance(q) => q.to_string(),
            ExprKind::Speed(q) => q.to_string(),
            ExprKind::Pressure(q) => q.to_string(),
            ExprKind::Temperature(q) => q.to_string(),
            ExprKind::Duration(d) => d.to_string(),
            ExprKind::Date(set) => format!("date[{}]", set),
            ExprKind::Time(set) => format!("time[{}]", set),
            ExprKind::Weekday(set) => format!("weekday[{}]", set),
            ExprKind::Month(set) => format!("month[{}]", set),
            ExprKind::Array { elements, .. } => format!("[{}]", join(elements, indent)),
            ExprKind::Range { low, high } => {
                format!("{}..{}", low.render(indent, true), high.render(indent, true))
            }
            ExprKind::Selector(selector) => render_selector(selector, indent),
            ExprKind::VarRef(name) => format!("@{}", name),
            ExprKind::Geometry(geometry) => geometry.to_string(),
            ExprKind::Binary { op, left, right } if op.is_logical() && !inline => format!(
                "{} {}\n{}{}",
                left.render(indent, false),
                op,
                indent,
                right.render(indent, false)
            ),
            ExprKind::Binary { op, left, right } => format!(
                "{} {} {}",
                left.render(indent, true),
                op,
                right.render(indent, true)
            ),
            ExprKind::Paren(inner) => format!("({})", inner.render(indent, true)),
            ExprKind::Operator(op) => op.to_string(),
        }
    }
}

impl Render for Condition {
    fn render(&self, indent: &str, inline: bool) -> String {
        match self {
            Condition::Tree(expr) => expr.render(indent, inline),
            Condition::Flat(items) => {
                let sep = if inline {
                    " ".to_string()
                } else {
                    format!("\n{}", indent)
                };
                let mut out = String::new();
                for item in items {
                    out.push_str(&item.render(indent, true));
                    out.push_str(if matches!(item.kind, ExprKind::Operator(_)) {
                        sep.as_str()
                    } else {
                        " "
                    });
                }
                out.trim_end().to_string()
            }
        }
    }
}

impl Render for Trigger {
    fn render(&self, indent: &str, inline: bool) -> String {
        let (sep, body) = if inline {
            (" ".to_string(), " ".to_string())
        } else {
            ("\n".to_string(), format!("\n{}", indent))
        };

        let mut out = String::from("trigger");
        if !self.vars.is_empty() {
            out.push_str(&sep);
            out.push_str("vars");
            for (name, value) in &self.vars {
                out.push_str(&body);
                out.push_str(&format!("{} = {}", name, value.render(indent, true)));
            }
        }

        out.push_str(&sep);
        out.push_str("when");
        out.push_str(&body);
        out.push_str(&self.condition().render(indent, inline));

        if let Some(repeat) = &self.repeat {
            out.push_str(&sep);
            out.push_str(&format!("repeat {}", repeat.count.render(indent, true)));
            if let Some(every) = &repeat.every {
                out.push_str(&format!(" every {}", every.render(indent, true)));
            }
        }
        if let Some(reset) = &self.reset_after {
            out.push_str(&sep);
            out.push_str(&format!("reset after {}", reset.render(indent, true)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{
        BinaryOp, CalendarSet, Coord, DistanceUnit, Geometry, Quantity, Span, TemperatureUnit,
        Weekday,
    };
    use indexmap::{IndexMap, IndexSet};

    fn node(kind: ExprKind) -> Expr {
        Expr::new(kind, Span::default())
    }

    fn selector(name: &str) -> Expr {
        node(ExprKind::Selector(Selector::bare(name)))
    }

    #[test]
    fn test_render_literals() {
        assert_eq!(node(ExprKind::Float(2.0)).render("  ", true), "2.0");
        assert_eq!(node(ExprKind::Percent(0.001)).render("  ", true), "0.001%");
        assert_eq!(node(ExprKind::Percent(0.00001)).render("  ", true), "1.0e-5%");
        assert_eq!(
            node(ExprKind::Temperature(Quantity::new(-30.0, TemperatureUnit::Celsius)))
                .render("  ", true),
            "-30.0c"
        );
        assert_eq!(
            node(ExprKind::Str("say \"hi\"".into())).render("  ", true),
            "\"say \\\"hi\\\"\""
        );
        assert_eq!(
            node(ExprKind::Weekday(CalendarSet::Range(
                Weekday::Monday,
                Weekday::Friday
            )))
            .render("  ", true),
            "weekday[mon..fri]"
        );
    }

    #[test]
    fn test_render_selector_forms() {
        assert_eq!(selector("speed").render("", true), "speed");

        let mut args = IndexSet::new();
        args.insert("truck".to_string());
        let sel = Selector {
            name: "vehicle".into(),
            args,
            wildcard: true,
            props: vec![node(ExprKind::Distance(Quantity::new(
                1.0,
                DistanceUnit::Kilometers,
            )))],
        };
        assert_eq!(
            node(ExprKind::Selector(sel)).render("", true),
            "vehicle{\"truck\", *}:1.0km"
        );
    }

    #[test]
    fn test_render_multiline_condition() {
        let a = Expr::binary(BinaryOp::Gt, selector("a"), node(ExprKind::Int(1)));
        let b = Expr::binary(BinaryOp::Lt, selector("b"), node(ExprKind::Int(2)));
        let when = Expr::binary(BinaryOp::And, a, b);

        let mut vars = IndexMap::new();
        vars.insert(
            "home".to_string(),
            node(ExprKind::Geometry(Geometry::Point(Coord::new(1.0, 2.0)))),
        );
        let trigger = Trigger::new(vars, when, None, None, Span::default());

        assert_eq!(
            trigger.render("  ", true),
            "trigger vars home = point[1.0, 2.0] when a > 1 and b < 2"
        );
        assert_eq!(
            trigger.render("  ", false),
            "trigger\nvars\n  home = point[1.0, 2.0]\nwhen\n  a > 1 and\n  b < 2"
        );
    }

    #[test]
    fn test_render_flat_condition() {
        let a = Expr::binary(BinaryOp::Gt, selector("a"), node(ExprKind::Int(1)));
        let b = Expr::binary(BinaryOp::Lt, selector("b"), node(ExprKind::Int(2)));
        let flat = Condition::Flat(vec![a, node(ExprKind::Operator(BinaryOp::Or)), b]);
        assert_eq!(flat.render("  ", true), "a > 1 or b < 2");
    }
}
