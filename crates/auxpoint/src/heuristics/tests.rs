use super::*;
use crate::geom2::{distance, midpoint, Circle2, GeomCfg, Line2};
use crate::predicate::{Predicate, PredicateKind};
use crate::snapshot::{DefinedCircle, DefinedLine, Point, Snapshot};
use nalgebra::{vector, Vector2};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn pt(name: &str, x: f64, y: f64) -> Point {
    Point::new(name, x, y)
}

fn line(a: &Point, b: &Point) -> DefinedLine {
    DefinedLine::through(a, b, &[]).expect("distinct points")
}

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn assert_pool_distinct(pool: &CandidatePool, snap: &Snapshot, eps: f64) {
    let cands = pool.as_slice();
    for (k, c) in cands.iter().enumerate() {
        for p in snap.points() {
            assert!(distance(c.pos, p.pos) >= eps, "{} coincides with {}", c.name, p.name);
        }
        for earlier in &cands[..k] {
            assert!(
                distance(c.pos, earlier.pos) >= eps,
                "{} coincides with {}",
                c.name,
                earlier.name
            );
        }
    }
}

/// Three lines through (1, 1): the two diagonals of a square and x = 1.
fn concurrent_square() -> Snapshot {
    let a = pt("a", 0.0, 0.0);
    let b = pt("b", 2.0, 0.0);
    let c = pt("c", 2.0, 2.0);
    let d = pt("d", 0.0, 2.0);
    let e = pt("e", 1.0, 0.0);
    let f = pt("f", 1.0, 2.0);
    let lines = vec![line(&a, &c), line(&b, &d), line(&a, &b), line(&e, &f)];
    let circ = DefinedCircle::through_three(&a, &b, &c).unwrap();
    Snapshot::new(vec![a, b, c, d, e, f], lines, vec![circ]).unwrap()
}

#[test]
fn midpoint_coincident_with_existing_point_is_dropped() {
    let a = pt("A", 0.0, 0.0);
    let b = pt("B", 1.0, 0.0);
    let c = pt("C", 2.0, 0.0);
    let d = pt("D", 1.0, 1.0);
    // Line BD passes through the midpoint of AC and is unrelated to A, C.
    let bd = line(&b, &d);
    let snap = Snapshot::new(vec![a, b, c, d], vec![bd], vec![]).unwrap();
    let cfg = GeomCfg::default();

    let raw = propose(&snap, HeuristicKind::Midpoint, &cfg);
    let m = raw
        .iter()
        .find(|p| p.roles.parents() == names(&["A", "C"]))
        .expect("raw midpoint of A, C");
    assert!((m.pos - vector![1.0, 0.0]).norm() < 1e-12);

    let pool = generate(&snap, &cfg);
    assert!(pool.get("H_mid_A_C").is_none());
    assert!(pool.iter().all(|c| distance(c.pos, vector![1.0, 0.0]) >= cfg.eps_new));
}

#[test]
fn collinear_triple_midpoint_is_not_accepted() {
    let snap = Snapshot::new(
        vec![pt("A", 0.0, 0.0), pt("B", 1.0, 0.0), pt("C", 2.0, 0.0)],
        vec![],
        vec![],
    )
    .unwrap();
    let cfg = GeomCfg::default();
    let raw = propose(&snap, HeuristicKind::Midpoint, &cfg);
    assert!(raw.iter().any(|p| (p.pos - vector![1.0, 0.0]).norm() < 1e-12));

    let pool = generate(&snap, &cfg);
    assert!(pool.get("H_mid_A_C").is_none());
    assert!(pool.iter().all(|c| distance(c.pos, vector![1.0, 0.0]) >= cfg.eps_new));
}

#[test]
fn circle_of_own_defining_point_earns_nothing() {
    // Only `defining` names q; `points` is left empty by the caller.
    let o = pt("o", 0.0, 0.0);
    let q = pt("q", 1.0, 0.0);
    let circ = DefinedCircle::new(
        Circle2::through_point(o.pos, q.pos),
        vec!["o".into()],
        vec!["q".into()],
        vec![],
    );
    let snap = Snapshot::new(vec![o, q], vec![], vec![circ]).unwrap();
    let cfg = GeomCfg::default();
    // The reflection of q through o lies on the circle ...
    let raw = propose(&snap, HeuristicKind::Reflection, &cfg);
    let mirrored = raw
        .iter()
        .find(|p| p.roles.parents() == names(&["o", "q"]) && p.pos.x < 0.0)
        .expect("reflection of q through o");
    assert!(snap.circles()[0].circle.distance(mirrored.pos) < 1e-12);
    // ... but that circle is built from q.
    let pool = generate(&snap, &cfg);
    assert!(pool.get("H_ref_q_o").is_none());
    assert!(pool.is_empty());
}

#[test]
fn candidate_on_its_own_structures_only_is_rejected() {
    let a = pt("a", 0.0, 0.0);
    let b = pt("b", 4.0, 0.0);
    let c = pt("c", 1.0, 3.0);
    let ab = line(&a, &b);
    let snap = Snapshot::new(vec![a, b, c], vec![ab], vec![]).unwrap();
    let cfg = GeomCfg::default();
    // The midpoint of a, b is geometrically on ab ...
    assert!(snap.lines()[0].line.distance(vector![2.0, 0.0]) < 1e-12);
    // ... but ab is built from a and b, so it earns nothing.
    let pool = generate(&snap, &cfg);
    assert!(pool.get("H_mid_a_b").is_none());
    let (_, diag) = generate_audited(&snap, &cfg);
    let h3 = diag.stats(HeuristicKind::Midpoint);
    assert_eq!(h3.total, 3);
    assert_eq!(h3.new, 3);
}

#[test]
fn concurrence_of_three_lines_yields_line_line_candidate() {
    let snap = concurrent_square();
    let cfg = GeomCfg::default();
    let pool = generate(&snap, &cfg);
    let first = &pool.as_slice()[0];
    assert_eq!(first.name, "H_inter_LL_0");
    assert_eq!(first.heuristic, HeuristicKind::LineLine);
    assert!((first.pos - vector![1.0, 1.0]).norm() < 1e-12);
    assert_eq!(
        first.predicates,
        vec![Predicate::coll("H_inter_LL_0", "a", "c"), Predicate::coll("H_inter_LL_0", "b", "d")]
    );
    assert_eq!(first.parents, names(&["a", "b", "c", "d"]));
    // Later crossings at the same spot are absorbed by novelty.
    assert_eq!(pool.iter().filter(|c| c.heuristic == HeuristicKind::LineLine).count(), 1);
}

#[test]
fn two_line_crossing_without_support_is_skipped() {
    let a = pt("a", 0.0, 0.0);
    let b = pt("b", 2.0, 0.0);
    let c = pt("c", 2.0, 2.0);
    let d = pt("d", 0.0, 2.0);
    let lines = vec![line(&a, &c), line(&b, &d)];
    let snap = Snapshot::new(vec![a, b, c, d], lines, vec![]).unwrap();
    let (pool, diag) = generate_audited(&snap, &GeomCfg::default());
    assert!(pool.iter().all(|c| c.heuristic != HeuristicKind::LineLine));
    let h1 = diag.stats(HeuristicKind::LineLine);
    assert_eq!((h1.total, h1.new, h1.nontrivial), (1, 1, 0));
}

#[test]
fn generated_pool_is_distinct_sound_and_strict() {
    let snap = concurrent_square();
    let cfg = GeomCfg::default();
    let pool = generate(&snap, &cfg);
    assert!(!pool.is_empty());
    assert_pool_distinct(&pool, &snap, cfg.eps_new);
    let issues = validate_pool(&pool, &snap, &cfg);
    assert!(issues.is_empty(), "issues: {issues:?}");
}

#[test]
fn earlier_family_wins_shared_position() {
    // (-1, 0) is reachable as the midpoint of o, u and of w, z (H3), the foot of
    // w on uv (H5) and a line–circle point (H2). The first midpoint claims it.
    let o = pt("o", 0.0, 0.0);
    let p = pt("p", 1.0, 0.0);
    let u = pt("u", -2.0, 0.0);
    let v = pt("v", 2.0, 0.0);
    let w = pt("w", -1.0, -1.0);
    let z = pt("z", -1.0, 1.0);
    let lines = vec![line(&u, &v), line(&w, &z)];
    let circ = DefinedCircle::centered(&o, &p, &[]);
    let snap = Snapshot::new(vec![o, p, u, v, w, z], lines, vec![circ]).unwrap();
    let cfg = GeomCfg::default();
    let (pool, diag) = generate_audited(&snap, &cfg);

    let at: Vec<&Candidate> = pool
        .iter()
        .filter(|c| distance(c.pos, vector![-1.0, 0.0]) < cfg.eps_new)
        .collect();
    assert_eq!(at.len(), 1);
    assert_eq!(at[0].name, "H_mid_o_u");
    assert_eq!(at[0].heuristic, HeuristicKind::Midpoint);

    // uv meets the circle at p (known) and (-1, 0) (taken by H3); wz touches it at (-1, 0).
    let audit = diag.line_circle;
    assert_eq!(audit.pairs_checked, 2);
    assert_eq!(audit.pairs_with_intersections, 2);
    assert_eq!(audit.points_generated, 3);
    assert_eq!(diag.stats(HeuristicKind::LineCircle).new, 0);
    assert_eq!(diag.accepted(), pool.len());
}

#[test]
fn line_circle_family_counts() {
    let o = pt("o", 0.0, 0.0);
    let p = pt("p", 0.0, 1.0);
    let s = pt("s", -3.0, 0.0);
    let t = pt("t", 3.0, 0.0);
    let g = pt("g", -3.0, 1.0);
    let h = pt("h", 3.0, 1.0);
    let m = pt("m", -3.0, 2.0);
    let n = pt("n", 3.0, 2.0);
    let lines = vec![line(&s, &t), line(&g, &h), line(&m, &n)];
    let circ = DefinedCircle::centered(&o, &p, &[]);
    let snap = Snapshot::new(vec![o, p, s, t, g, h, m, n], lines, vec![circ]).unwrap();
    let cfg = GeomCfg::default();
    let raw = propose(&snap, HeuristicKind::LineCircle, &cfg);
    // through the center: 2, tangent at p: 1, miss: 0
    assert_eq!(raw.len(), 3);
    let through: Vec<_> = raw
        .iter()
        .filter(|q| matches!(q.roles, Roles::LineCircle { line_idx: 0, .. }))
        .collect();
    assert_eq!(through.len(), 2);
    for q in &through {
        assert!((distance(q.pos, Vector2::zeros()) - 1.0).abs() < 1e-12);
    }
    assert!(midpoint(through[0].pos, through[1].pos).norm() < 1e-12);
    let tangent: Vec<_> = raw
        .iter()
        .filter(|q| matches!(q.roles, Roles::LineCircle { line_idx: 1, .. }))
        .collect();
    assert_eq!(tangent.len(), 1);
    assert!((tangent[0].pos - vector![0.0, 1.0]).norm() < 1e-12);
}

#[test]
fn line_circle_point_is_claimed_by_earlier_foot() {
    // x = 0.6 through k, l meets the unit circle at (0.6, ±0.8); the foot of k
    // on the horizontal line rq is the upper one and is built first.
    let o = pt("o", 0.0, 0.0);
    let p = pt("p", 1.0, 0.0);
    let k = pt("k", 0.6, -3.0);
    let l = pt("l", 0.6, 3.0);
    let r = pt("r", -3.0, 0.8);
    let q = pt("q", -2.0, 0.8);
    let lines = vec![line(&k, &l), line(&r, &q)];
    let circ = DefinedCircle::centered(&o, &p, &[]);
    let snap = Snapshot::new(vec![o, p, k, l, r, q], lines, vec![circ]).unwrap();
    let cfg = GeomCfg::default();
    let pool = generate(&snap, &cfg);
    let at: Vec<&Candidate> = pool
        .iter()
        .filter(|c| distance(c.pos, vector![0.6, 0.8]) < cfg.eps_new)
        .collect();
    assert_eq!(at.len(), 1);
    assert_eq!(at[0].name, "H_foot_k_on_q_r");
    assert_eq!(at[0].heuristic, HeuristicKind::Foot);
    assert!(validate_pool(&pool, &snap, &cfg).is_empty());

    // Both lines are secants: (0.6, ±0.8) and (±0.6, 0.8).
    let raw = propose(&snap, HeuristicKind::LineCircle, &cfg);
    assert_eq!(raw.len(), 4);
    let upper = raw
        .iter()
        .find(|c| distance(c.pos, vector![0.6, 0.8]) < 1e-9)
        .expect("secant point");
    let preds = synthesize("X", &upper.roles);
    assert_eq!(preds, vec![Predicate::coll("X", "k", "l"), Predicate::cong("o", "X", "o", "p")]);
}

#[test]
fn candidate_names_never_shadow_snapshot_points() {
    let base = concurrent_square();
    let mut pts = base.points().to_vec();
    pts.push(pt("H_inter_LL_0", 9.0, 9.0));
    let snap = Snapshot::new(pts, base.lines().to_vec(), base.circles().to_vec()).unwrap();
    let pool = generate(&snap, &GeomCfg::default());
    assert_eq!(pool.as_slice()[0].name, "H_inter_LL_0_1");
}

#[test]
fn passes_are_deterministic() {
    let snap = concurrent_square();
    let cfg = GeomCfg::default();
    let a = generate(&snap, &cfg);
    let b = generate(&snap, &cfg);
    assert_eq!(a.as_slice(), b.as_slice());
}

#[test]
fn predicates_use_engine_vocabulary() {
    let pool = generate(&concurrent_square(), &GeomCfg::default());
    for c in &pool {
        for p in &c.predicates {
            assert!(matches!(
                p.kind,
                PredicateKind::Collinear | PredicateKind::Congruent | PredicateKind::Perpendicular
            ));
            assert_eq!(p.points.len(), p.kind.arity());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn midpoint_family_is_exact(
        ax in -10.0f64..10.0, ay in -10.0f64..10.0,
        bx in -10.0f64..10.0, by in -10.0f64..10.0,
    ) {
        let snap = Snapshot::new(vec![pt("a", ax, ay), pt("b", bx, by)], vec![], vec![]).unwrap();
        let raw = propose(&snap, HeuristicKind::Midpoint, &GeomCfg::default());
        prop_assert_eq!(raw.len(), 1);
        prop_assert!((raw[0].pos - vector![(ax + bx) / 2.0, (ay + by) / 2.0]).norm() < 1e-12);
        let parents: Vec<String> = raw[0].roles.parents().into_iter().collect();
        prop_assert_eq!(parents, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn reflection_family_mirrors_through_center(
        ax in -10.0f64..10.0, ay in -10.0f64..10.0,
        bx in -10.0f64..10.0, by in -10.0f64..10.0,
    ) {
        let snap = Snapshot::new(vec![pt("a", ax, ay), pt("b", bx, by)], vec![], vec![]).unwrap();
        let raw = propose(&snap, HeuristicKind::Reflection, &GeomCfg::default());
        prop_assert_eq!(raw.len(), 2);
        for prop in &raw {
            if let Roles::Reflection { p, center } = prop.roles {
                prop_assert!((midpoint(p.pos, prop.pos) - center.pos).norm() < 1e-9);
            } else {
                prop_assert!(false, "unexpected roles");
            }
        }
    }

    #[test]
    fn foot_family_projects_orthogonally(
        px in -10.0f64..10.0, py in -10.0f64..10.0,
        q1x in -10.0f64..10.0, q1y in -10.0f64..10.0,
        q2x in -10.0f64..10.0, q2y in -10.0f64..10.0,
    ) {
        prop_assume!((vector![q1x, q1y] - vector![q2x, q2y]).norm() > 1e-2);
        let q1 = pt("q1", q1x, q1y);
        let q2 = pt("q2", q2x, q2y);
        let l = line(&q1, &q2);
        let snap = Snapshot::new(vec![pt("p", px, py), q1, q2], vec![l], vec![]).unwrap();
        let raw = propose(&snap, HeuristicKind::Foot, &GeomCfg::default());
        let foot = raw
            .iter()
            .find(|r| matches!(r.roles, Roles::Foot { p, .. } if p.name == "p"))
            .expect("foot of p");
        let ln: Line2 = snap.lines()[0].line;
        prop_assert!(ln.distance(foot.pos) < 1e-9);
        prop_assert!((vector![px, py] - foot.pos).dot(&ln.direction()).abs() < 1e-9);
    }

    #[test]
    fn pools_never_hold_coincident_points(
        coords in prop::collection::vec((-5.0f64..5.0, -5.0f64..5.0), 5),
    ) {
        let names = ["a", "b", "c", "d", "e"];
        let pts: Vec<Point> = names.iter().zip(&coords).map(|(n, (x, y))| pt(n, *x, *y)).collect();
        let mut lines = Vec::new();
        for k in 0..pts.len() {
            if let Some(l) = DefinedLine::through(&pts[k], &pts[(k + 1) % pts.len()], &[]) {
                lines.push(l);
            }
        }
        let circles: Vec<DefinedCircle> = DefinedCircle::through_three(&pts[0], &pts[1], &pts[2])
            .into_iter()
            .collect();
        let snap = Snapshot::new(pts, lines, circles).unwrap();
        let cfg = GeomCfg::default();
        let pool = generate(&snap, &cfg);
        let cands = pool.as_slice();
        for (i, a) in cands.iter().enumerate() {
            for b in &cands[i + 1..] {
                prop_assert!(distance(a.pos, b.pos) >= cfg.eps_new);
            }
            for p in snap.points() {
                prop_assert!(distance(a.pos, p.pos) >= cfg.eps_new);
            }
        }
    }
}
