//! JSON shapes read and written by the binary, and their mapping onto the
//! core types. The core itself stays serde-free.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use auxpoint::api::{
    Candidate, Circle2, DefinedCircle, DefinedLine, Diagnostics, HeuristicKind, Line2, Point,
    Predicate, PredicateKind, Snapshot,
};
use auxpoint::Vec2;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WirePoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// Incident names in engine order; the equation is derived from the first
/// two known points when `normal`/`offset` are absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WireLine {
    pub points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WireCircle {
    #[serde(default)]
    pub centers: Vec<String>,
    #[serde(default)]
    pub defining: Vec<String>,
    #[serde(default)]
    pub points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WireSnapshot {
    pub points: Vec<WirePoint>,
    #[serde(default)]
    pub lines: Vec<WireLine>,
    #[serde(default)]
    pub circles: Vec<WireCircle>,
}

impl WireSnapshot {
    pub fn into_snapshot(self) -> Result<Snapshot> {
        let positions: HashMap<&str, Vec2<f64>> = self
            .points
            .iter()
            .map(|p| (p.name.as_str(), Vec2::new(p.x, p.y)))
            .collect();
        let pos = |name: &str, owner: &str| -> Result<Vec2<f64>> {
            positions
                .get(name)
                .copied()
                .ok_or_else(|| anyhow!("{owner} references unknown point {name}"))
        };

        let mut lines = Vec::with_capacity(self.lines.len());
        for (k, l) in self.lines.iter().enumerate() {
            let owner = format!("line #{k}");
            let line = match (l.normal, l.offset) {
                (Some([nx, ny]), Some(c)) => Line2 {
                    n: Vec2::new(nx, ny),
                    c,
                },
                _ => {
                    let [a, b, ..] = l.points.as_slice() else {
                        bail!("{owner} needs two points or an explicit equation");
                    };
                    Line2::through(pos(a, &owner)?, pos(b, &owner)?)
                        .ok_or_else(|| anyhow!("{owner}: {a} and {b} coincide"))?
                }
            };
            lines.push(DefinedLine::new(line, l.points.clone()));
        }

        let mut circles = Vec::with_capacity(self.circles.len());
        for (k, c) in self.circles.iter().enumerate() {
            let owner = format!("circle #{k}");
            let on: Vec<&String> = {
                let mut seen = BTreeSet::new();
                let names: Vec<&String> = c
                    .defining
                    .iter()
                    .chain(&c.points)
                    .filter(|n| seen.insert(n.as_str()))
                    .collect();
                names
            };
            let circle = match (c.center, c.radius) {
                (Some([x, y]), Some(r)) => Circle2::new(Vec2::new(x, y), r),
                _ => match (c.centers.first(), on.as_slice()) {
                    (Some(o), [q, ..]) => {
                        Circle2::through_point(pos(o, &owner)?, pos(q, &owner)?)
                    }
                    (None, [a, b, q, ..]) => {
                        let (pa, pb, pq) = (pos(a, &owner)?, pos(b, &owner)?, pos(q, &owner)?);
                        Circle2::through_three(pa, pb, pq)
                            .ok_or_else(|| anyhow!("{owner}: {a}, {b}, {q} are collinear"))?
                    }
                    _ => bail!(
                        "{owner} needs a center and one point, three points, or center/radius"
                    ),
                },
            };
            circles.push(DefinedCircle::new(
                circle,
                c.centers.clone(),
                c.defining.clone(),
                c.points.clone(),
            ));
        }

        let points = self
            .points
            .into_iter()
            .map(|p| Point::new(p.name, p.x, p.y))
            .collect();
        Snapshot::new(points, lines, circles).context("invalid snapshot")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WirePredicate {
    pub kind: String,
    pub points: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<f64>,
}

impl From<&Predicate> for WirePredicate {
    fn from(p: &Predicate) -> Self {
        Self {
            kind: p.kind.as_str().to_string(),
            points: p.points.clone(),
            values: p.values.clone(),
        }
    }
}

impl TryFrom<WirePredicate> for Predicate {
    type Error = anyhow::Error;

    fn try_from(w: WirePredicate) -> Result<Self> {
        let kind = PredicateKind::from_wire(&w.kind)
            .ok_or_else(|| anyhow!("unknown predicate kind `{}`", w.kind))?;
        if w.points.len() != kind.arity() {
            bail!("`{}` takes {} points, got {}", w.kind, kind.arity(), w.points.len());
        }
        Ok(Predicate {
            kind,
            points: w.points,
            values: w.values,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WireCandidate {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub heuristic: String,
    pub parents: Vec<String>,
    pub predicates: Vec<WirePredicate>,
}

impl From<&Candidate> for WireCandidate {
    fn from(c: &Candidate) -> Self {
        Self {
            name: c.name.clone(),
            x: c.pos.x,
            y: c.pos.y,
            heuristic: c.heuristic.label().to_string(),
            parents: c.parents.iter().cloned().collect(),
            predicates: c.predicates.iter().map(WirePredicate::from).collect(),
        }
    }
}

impl TryFrom<WireCandidate> for Candidate {
    type Error = anyhow::Error;

    fn try_from(w: WireCandidate) -> Result<Self> {
        let heuristic = HeuristicKind::from_label(&w.heuristic)
            .ok_or_else(|| anyhow!("{}: unknown heuristic `{}`", w.name, w.heuristic))?;
        let predicates = w
            .predicates
            .into_iter()
            .map(Predicate::try_from)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("candidate {}", w.name))?;
        Ok(Candidate {
            name: w.name,
            pos: Vec2::new(w.x, w.y),
            parents: w.parents.into_iter().collect(),
            heuristic,
            predicates,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireStats {
    pub total: usize,
    pub new: usize,
    pub nontrivial: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireLineCircleAudit {
    pub pairs_checked: usize,
    pub pairs_with_intersections: usize,
    pub points_generated: usize,
    pub lines: usize,
    pub circles: usize,
}

/// Per-family funnel keyed by label, in generation order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDiagnostics {
    pub families: Vec<(String, WireStats)>,
    pub line_circle: WireLineCircleAudit,
    pub accepted: usize,
}

impl From<&Diagnostics> for WireDiagnostics {
    fn from(d: &Diagnostics) -> Self {
        let families = HeuristicKind::GENERATION_ORDER
            .into_iter()
            .map(|k| {
                let s = d.stats(k);
                (
                    k.label().to_string(),
                    WireStats {
                        total: s.total,
                        new: s.new,
                        nontrivial: s.nontrivial,
                    },
                )
            })
            .collect();
        let lc = d.line_circle;
        Self {
            families,
            line_circle: WireLineCircleAudit {
                pairs_checked: lc.pairs_checked,
                pairs_with_intersections: lc.pairs_with_intersections,
                points_generated: lc.points_generated,
                lines: lc.lines,
                circles: lc.circles,
            },
            accepted: d.accepted(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WirePool {
    pub candidates: Vec<WireCandidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<WireDiagnostics>,
}

impl WirePool {
    pub fn into_candidates(self) -> Result<Vec<Candidate>> {
        self.candidates.into_iter().map(Candidate::try_from).collect()
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}
