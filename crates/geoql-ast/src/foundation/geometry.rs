//! Geometry literal values.

use super::units::format_magnitude;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", format_magnitude(self.x), format_magnitude(self.y))
    }
}

/// Declared kind of a geometry literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
    MultiPoint,
    MultiLine,
    MultiPolygon,
    Collection,
}

impl GeometryKind {
    /// Keyword that introduces a literal of this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            GeometryKind::Point => "point",
            GeometryKind::Line => "line",
            GeometryKind::Polygon => "polygon",
            GeometryKind::MultiPoint => "multipoint",
            GeometryKind::MultiLine => "multiline",
            GeometryKind::MultiPolygon => "multipolygon",
            GeometryKind::Collection => "collection",
        }
    }

    /// Member kind required by a multi-object, `None` for everything else.
    pub fn member_kind(self) -> Option<GeometryKind> {
        match self {
            GeometryKind::MultiPoint => Some(GeometryKind::Point),
            GeometryKind::MultiLine => Some(GeometryKind::Line),
            GeometryKind::MultiPolygon => Some(GeometryKind::Polygon),
            _ => None,
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A geometry literal.
///
/// Multi-objects hold members of exactly their member kind; collections may
/// mix any kinds, including nested multi-objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Coord),
    Line(Vec<Coord>),
    /// Rings; the first ring is the outer boundary.
    Polygon(Vec<Vec<Coord>>),
    Multi {
        kind: GeometryKind,
        members: Vec<Geometry>,
    },
    Collection(Vec<Geometry>),
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::Line(_) => GeometryKind::Line,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::Multi { kind, .. } => *kind,
            Geometry::Collection(_) => GeometryKind::Collection,
        }
    }
}

fn write_coords(f: &mut fmt::Formatter<'_>, coords: &[Coord]) -> fmt::Result {
    f.write_str("[")?;
    for (i, coord) in coords.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", coord)?;
    }
    f.write_str("]")
}

fn write_members(f: &mut fmt::Formatter<'_>, members: &[Geometry]) -> fmt::Result {
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", member)?;
    }
    Ok(())
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.kind())?;
        match self {
            Geometry::Point(coord) => write!(
                f,
                "{}, {}",
                format_magnitude(coord.x),
                format_magnitude(coord.y)
            )?,
            Geometry::Line(coords) => {
                for (i, coord) in coords.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", coord)?;
                }
            }
            Geometry::Polygon(rings) => {
                for (i, ring) in rings.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_coords(f, ring)?;
                }
            }
            Geometry::Multi { members, .. } | Geometry::Collection(members) => {
                write_members(f, members)?
            }
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_point() {
        let point = Geometry::Point(Coord::new(-122.4, 37.75));
        assert_eq!(point.to_string(), "point[-122.4, 37.75]");
    }

    #[test]
    fn test_display_polygon() {
        let polygon = Geometry::Polygon(vec![vec![
            Coord::new(0.0, 0.0),
            Coord::new(1.0, 0.0),
            Coord::new(0.0, 0.0),
        ]]);
        assert_eq!(
            polygon.to_string(),
            "polygon[[[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]]"
        );
    }

    #[test]
    fn test_member_kind() {
        assert_eq!(
            GeometryKind::MultiLine.member_kind(),
            Some(GeometryKind::Line)
        );
        assert_eq!(GeometryKind::Collection.member_kind(), None);
    }
}
