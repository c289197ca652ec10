//! Read-only input model: named points plus the lines and circles the
//! deduction engine currently knows.
//!
//! A `Snapshot` is validated once on construction; every generation pass then
//! treats it as immutable. Lines and circles refer to points by name only.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use nalgebra::Vector2;

use crate::geom2::{Circle2, Line2};

/// Named point with a fixed position.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub name: String,
    pub pos: Vector2<f64>,
}

impl Point {
    #[inline]
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            pos: Vector2::new(x, y),
        }
    }
}

/// Line known to the deduction engine.
///
/// Invariants:
/// - `points` lists incident point names in engine order; the first two are the
///   line's "defining" roles used by predicate synthesis.
#[derive(Clone, Debug, PartialEq)]
pub struct DefinedLine {
    pub line: Line2,
    pub points: Vec<String>,
}

impl DefinedLine {
    #[inline]
    pub fn new(line: Line2, points: Vec<String>) -> Self {
        Self { line, points }
    }

    /// Line through `a` and `b`, with `extra` incident names appended.
    pub fn through(a: &Point, b: &Point, extra: &[&str]) -> Option<Self> {
        let line = Line2::through(a.pos, b.pos)?;
        let mut points = vec![a.name.clone(), b.name.clone()];
        points.extend(extra.iter().map(|s| s.to_string()));
        Some(Self { line, points })
    }

    pub fn point_names(&self) -> BTreeSet<&str> {
        self.points.iter().map(String::as_str).collect()
    }
}

/// Circle known to the deduction engine.
///
/// `points` holds every name known to lie on the circle; `Snapshot::new`
/// folds `defining` into it. `centers` is usually empty or a single name.
#[derive(Clone, Debug, PartialEq)]
pub struct DefinedCircle {
    pub circle: Circle2,
    pub centers: Vec<String>,
    pub defining: Vec<String>,
    pub points: Vec<String>,
}

impl DefinedCircle {
    pub fn new(
        circle: Circle2,
        centers: Vec<String>,
        defining: Vec<String>,
        points: Vec<String>,
    ) -> Self {
        Self {
            circle,
            centers,
            defining,
            points,
        }
    }

    /// Circle centered at `center` through `on`, with `extra` on-circle names.
    pub fn centered(center: &Point, on: &Point, extra: &[&str]) -> Self {
        let mut points = vec![on.name.clone()];
        points.extend(extra.iter().map(|s| s.to_string()));
        Self {
            circle: Circle2::through_point(center.pos, on.pos),
            centers: vec![center.name.clone()],
            defining: vec![on.name.clone()],
            points,
        }
    }

    /// Circumcircle of three named points (no center name known).
    pub fn through_three(a: &Point, b: &Point, c: &Point) -> Option<Self> {
        let circle = Circle2::through_three(a.pos, b.pos, c.pos)?;
        let names = vec![a.name.clone(), b.name.clone(), c.name.clone()];
        Some(Self {
            circle,
            centers: Vec::new(),
            defining: names.clone(),
            points: names,
        })
    }

    pub fn point_names(&self) -> BTreeSet<&str> {
        self.points.iter().map(String::as_str).collect()
    }
}

/// Rejected snapshot input.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotError {
    DuplicatePoint { name: String },
    NonFinitePoint { name: String },
    UnknownPoint { name: String, owner: String },
    DegenerateLine { index: usize },
    DegenerateCircle { index: usize },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePoint { name } => write!(f, "duplicate point name: {name}"),
            Self::NonFinitePoint { name } => write!(f, "point {name} has non-finite coordinates"),
            Self::UnknownPoint { name, owner } => {
                write!(f, "{owner} references unknown point {name}")
            }
            Self::DegenerateLine { index } => write!(f, "line #{index} has no valid equation"),
            Self::DegenerateCircle { index } => {
                write!(f, "circle #{index} has a non-finite center or invalid radius")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Immutable view of the current problem state for one generation pass.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    points: Vec<Point>,
    lines: Vec<DefinedLine>,
    circles: Vec<DefinedCircle>,
    index: HashMap<String, usize>,
}

impl Snapshot {
    /// Validate and freeze the engine state.
    pub fn new(
        points: Vec<Point>,
        lines: Vec<DefinedLine>,
        circles: Vec<DefinedCircle>,
    ) -> Result<Self, SnapshotError> {
        let mut index = HashMap::with_capacity(points.len());
        for (k, p) in points.iter().enumerate() {
            if !(p.pos.x.is_finite() && p.pos.y.is_finite()) {
                return Err(SnapshotError::NonFinitePoint {
                    name: p.name.clone(),
                });
            }
            if index.insert(p.name.clone(), k).is_some() {
                return Err(SnapshotError::DuplicatePoint {
                    name: p.name.clone(),
                });
            }
        }
        let known = |name: &String, owner: String| -> Result<(), SnapshotError> {
            if index.contains_key(name) {
                Ok(())
            } else {
                Err(SnapshotError::UnknownPoint {
                    name: name.clone(),
                    owner,
                })
            }
        };

        let mut norm_lines = Vec::with_capacity(lines.len());
        for (k, l) in lines.into_iter().enumerate() {
            let line = Line2::new(l.line.n, l.line.c)
                .ok_or(SnapshotError::DegenerateLine { index: k })?;
            for name in &l.points {
                known(name, format!("line #{k}"))?;
            }
            norm_lines.push(DefinedLine {
                line,
                points: l.points,
            });
        }

        let mut norm_circles = Vec::with_capacity(circles.len());
        for (k, c) in circles.into_iter().enumerate() {
            let ok = c.circle.center.x.is_finite()
                && c.circle.center.y.is_finite()
                && c.circle.r.is_finite()
                && c.circle.r >= 0.0;
            if !ok {
                return Err(SnapshotError::DegenerateCircle { index: k });
            }
            for name in c.centers.iter().chain(&c.defining).chain(&c.points) {
                known(name, format!("circle #{k}"))?;
            }
            // Defining points lie on the circle: fold them into `points`.
            let on_circle = {
                let mut seen = BTreeSet::new();
                let names: Vec<String> = c
                    .defining
                    .iter()
                    .chain(&c.points)
                    .filter(|n| seen.insert(n.as_str()))
                    .cloned()
                    .collect();
                names
            };
            norm_circles.push(DefinedCircle {
                circle: c.circle,
                centers: c.centers,
                defining: c.defining,
                points: on_circle,
            });
        }

        Ok(Self {
            points,
            lines: norm_lines,
            circles: norm_circles,
            index,
        })
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn lines(&self) -> &[DefinedLine] {
        &self.lines
    }

    #[inline]
    pub fn circles(&self) -> &[DefinedCircle] {
        &self.circles
    }

    pub fn point(&self, name: &str) -> Option<&Point> {
        self.index.get(name).map(|&k| &self.points[k])
    }

    /// Position lookup by name.
    pub fn position(&self, name: &str) -> Option<Vector2<f64>> {
        self.point(name).map(|p| p.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> Vec<Point> {
        vec![
            Point::new("a", 0.0, 0.0),
            Point::new("b", 4.0, 0.0),
            Point::new("c", 0.0, 3.0),
        ]
    }

    #[test]
    fn builds_and_looks_up_points() {
        let pts = tri();
        let ab = DefinedLine::through(&pts[0], &pts[1], &[]).unwrap();
        let circ = DefinedCircle::through_three(&pts[0], &pts[1], &pts[2]).unwrap();
        let s = Snapshot::new(pts, vec![ab], vec![circ]).unwrap();
        assert_eq!(s.points().len(), 3);
        assert_eq!(s.position("b"), Some(Vector2::new(4.0, 0.0)));
        assert!(s.point("z").is_none());
        assert!((s.circles()[0].circle.r - 2.5).abs() < 1e-12);
    }

    #[test]
    fn renormalizes_line_equation() {
        let pts = tri();
        let raw = DefinedLine::new(
            Line2 {
                n: Vector2::new(0.0, 3.0),
                c: 0.0,
            },
            vec!["a".into(), "b".into()],
        );
        let s = Snapshot::new(pts, vec![raw], vec![]).unwrap();
        assert!((s.lines()[0].line.n.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn folds_defining_names_into_circle_points() {
        let pts = tri();
        let circ = DefinedCircle::new(
            Circle2::through_point(pts[0].pos, pts[1].pos),
            vec!["a".into()],
            vec!["b".into()],
            vec!["c".into(), "b".into()],
        );
        let bare = DefinedCircle::new(circ.circle, vec!["a".into()], vec!["b".into()], vec![]);
        let s = Snapshot::new(pts, vec![], vec![circ, bare]).unwrap();
        assert_eq!(s.circles()[0].points, vec!["b", "c"]);
        assert_eq!(s.circles()[1].points, vec!["b"]);
        assert_eq!(s.circles()[1].centers, vec!["a"]);
    }

    #[test]
    fn rejects_malformed_inputs() {
        let mut dup = tri();
        dup.push(Point::new("a", 1.0, 1.0));
        assert_eq!(
            Snapshot::new(dup, vec![], vec![]).unwrap_err(),
            SnapshotError::DuplicatePoint { name: "a".into() }
        );

        let pts = tri();
        let stray = DefinedLine::new(
            Line2::through(pts[0].pos, pts[1].pos).unwrap(),
            vec!["a".into(), "q".into()],
        );
        let err = Snapshot::new(pts, vec![stray], vec![]).unwrap_err();
        assert!(matches!(err, SnapshotError::UnknownPoint { ref name, .. } if name == "q"));

        let zero = DefinedLine::new(
            Line2 {
                n: Vector2::zeros(),
                c: 1.0,
            },
            vec![],
        );
        assert_eq!(
            Snapshot::new(tri(), vec![zero], vec![]).unwrap_err(),
            SnapshotError::DegenerateLine { index: 0 }
        );

        let bad = DefinedCircle::new(Circle2::new(Vector2::zeros(), -1.0), vec![], vec![], vec![]);
        assert_eq!(
            Snapshot::new(tri(), vec![], vec![bad]).unwrap_err(),
            SnapshotError::DegenerateCircle { index: 0 }
        );
    }
}
