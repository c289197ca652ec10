//! Predicate synthesis: re-express an accepted candidate as engine facts.
//!
//! Synthesis only selects roles that are already known (the first two names
//! of a line, the first center and defining point of a circle); it never
//! recomputes geometry. Missing roles drop the affected predicate instead of
//! the whole candidate.

use super::families::Roles;
use crate::predicate::Predicate;
use crate::snapshot::{DefinedCircle, DefinedLine};

/// Minimal predicate list justifying candidate `name` built from `roles`.
///
/// | Family | Predicates |
/// |---|---|
/// | H1 | coll(P, A0, A1), coll(P, B0, B1) |
/// | H2 | coll(P, L0, L1), cong(O, P, O, Q) |
/// | H3 | coll(P, p1, p2), cong(P, p1, P, p2) |
/// | H4 | coll(p, c, P), cong(c, p, c, P) |
/// | H5 | coll(P, L0, L1), perp(p, P, L0, L1) |
pub fn synthesize(name: &str, roles: &Roles<'_>) -> Vec<Predicate> {
    match *roles {
        Roles::LineLine { a, b, .. } => [a, b]
            .into_iter()
            .filter_map(|l| line_pair(l).map(|(l0, l1)| Predicate::coll(name, l0, l1)))
            .collect(),
        Roles::LineCircle { line, circle, .. } => {
            let mut out = Vec::with_capacity(2);
            if let Some((l0, l1)) = line_pair(line) {
                out.push(Predicate::coll(name, l0, l1));
            }
            if let Some((o, q)) = center_and_defining(circle) {
                out.push(Predicate::cong(o, name, o, q));
            }
            out
        }
        Roles::Midpoint { p1, p2 } => vec![
            Predicate::coll(name, &p1.name, &p2.name),
            Predicate::cong(name, &p1.name, name, &p2.name),
        ],
        Roles::Reflection { p, center } => vec![
            Predicate::coll(&p.name, &center.name, name),
            Predicate::cong(&center.name, &p.name, &center.name, name),
        ],
        Roles::Foot { p, line } => match line_pair(line) {
            Some((l0, l1)) => vec![
                Predicate::coll(name, l0, l1),
                Predicate::perp(&p.name, name, l0, l1),
            ],
            None => Vec::new(),
        },
    }
}

/// First two incident names, in engine order.
fn line_pair(line: &DefinedLine) -> Option<(&str, &str)> {
    match line.points.as_slice() {
        [l0, l1, ..] => Some((l0.as_str(), l1.as_str())),
        _ => None,
    }
}

fn center_and_defining(circle: &DefinedCircle) -> Option<(&str, &str)> {
    let o = circle.centers.first()?;
    let q = circle.defining.first()?;
    Some((o.as_str(), q.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::{Circle2, Line2};
    use crate::predicate::PredicateKind;
    use crate::snapshot::Point;
    use nalgebra::vector;

    #[test]
    fn reflection_encodes_center_as_midpoint() {
        let p = Point::new("a", 0.0, 0.0);
        let c = Point::new("b", 1.0, 0.0);
        let preds = synthesize("R", &Roles::Reflection { p: &p, center: &c });
        assert_eq!(
            preds,
            vec![Predicate::coll("a", "b", "R"), Predicate::cong("b", "a", "b", "R")]
        );
    }

    #[test]
    fn circle_without_center_drops_congruence_only() {
        let line = DefinedLine::new(
            Line2::through(vector![0.0, 0.0], vector![1.0, 0.0]).unwrap(),
            vec!["a".into(), "b".into(), "c".into()],
        );
        let bare = DefinedCircle::new(
            Circle2::new(vector![0.0, 0.0], 1.0),
            vec![],
            vec!["d".into()],
            vec!["d".into()],
        );
        let roles = Roles::LineCircle {
            line_idx: 0,
            circle_idx: 0,
            line: &line,
            circle: &bare,
        };
        let preds = synthesize("X", &roles);
        assert_eq!(preds, vec![Predicate::coll("X", "a", "b")]);

        let full = DefinedCircle::new(
            bare.circle,
            vec!["o".into()],
            vec!["d".into()],
            vec!["d".into()],
        );
        let roles = Roles::LineCircle {
            line_idx: 0,
            circle_idx: 0,
            line: &line,
            circle: &full,
        };
        let preds = synthesize("X", &roles);
        assert_eq!(preds.len(), 2);
        assert_eq!(preds[1], Predicate::cong("o", "X", "o", "d"));
    }

    #[test]
    fn underspecified_line_yields_no_foot_predicates() {
        let p = Point::new("p", 0.0, 1.0);
        let line = DefinedLine::new(
            Line2::through(vector![0.0, 0.0], vector![1.0, 0.0]).unwrap(),
            vec!["a".into()],
        );
        let preds = synthesize(
            "F",
            &Roles::Foot { p: &p, line: &line },
        );
        assert!(preds.is_empty());

        let line2 = DefinedLine::new(line.line, vec!["a".into(), "b".into()]);
        let preds = synthesize(
            "F",
            &Roles::Foot { p: &p, line: &line2 },
        );
        let kinds: Vec<_> = preds.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![PredicateKind::Collinear, PredicateKind::Perpendicular]);
        assert_eq!(preds[1].points, vec!["p", "F", "a", "b"]);
    }
}
