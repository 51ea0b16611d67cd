//! Contour walker: consumes every edge exactly once into raw walks.
//!
//! Purpose
//! - Repeatedly seed a walk on an unvisited edge and follow endpoint
//!   connectivity until the walk returns to its start (closed) or runs out
//!   of continuations (open). The outer loop is bounded by the edge count,
//!   so the pass always terminates.
//!
//! Why this design
//! - Junctions take the leftmost turn (largest counter-clockwise angle from
//!   the arriving tangent), which keeps the bounded face on a consistent
//!   side of the walk; remaining branches stay unvisited and seed later
//!   walks. Every exercised tie-break is counted in the stats.
//! - The walk itself is an explicit loop, not recursion, so chained geometry
//!   of any length cannot overflow the stack.

use super::index::EndpointIndex;
use super::types::{Contour, OrientedEdge, TraceStats};
use crate::geom::{cross2, points_coincide, EdgeId, GeomCfg, GeometrySlice, Vec2};

const TURN_TIE: f64 = 1e-12;

/// Orient `id` so its traversal departs from `at`.
pub(crate) fn orient_from(
    geom: &GeometrySlice<'_>,
    cfg: &GeomCfg,
    id: EdgeId,
    at: Vec2,
) -> OrientedEdge {
    let (a, _) = geom.edge(id).endpoints();
    OrientedEdge {
        id,
        rev: !points_coincide(a, at, cfg.eps_weld),
    }
}

/// Leftmost-turn selection among oriented continuations. Options must come
/// in ascending id order; exact ties keep the earliest, hence lowest id.
pub(crate) fn pick_leftmost(
    geom: &GeometrySlice<'_>,
    d_in: Vec2,
    options: &[OrientedEdge],
) -> Option<OrientedEdge> {
    let mut best: Option<(f64, OrientedEdge)> = None;
    for &o in options {
        let d_out = geom.edge(o.id).depart_dir(o.rev);
        let turn = cross2(d_in, d_out).atan2(d_in.dot(&d_out));
        match &best {
            Some((t, _)) if turn <= *t + TURN_TIE => {}
            _ => best = Some((turn, o)),
        }
    }
    best.map(|(_, o)| o)
}

pub(crate) struct RawWalk {
    pub contour: Contour,
    pub closed: bool,
}

pub(crate) struct Walker<'a> {
    geom: &'a GeometrySlice<'a>,
    cfg: &'a GeomCfg,
    index: EndpointIndex,
    visited: Vec<bool>,
    pub stats: TraceStats,
}

impl<'a> Walker<'a> {
    pub fn new(geom: &'a GeometrySlice<'a>, cfg: &'a GeomCfg) -> Self {
        Self {
            geom,
            cfg,
            index: EndpointIndex::build(geom, cfg),
            visited: vec![false; geom.len()],
            stats: TraceStats {
                edges_total: geom.len(),
                ..TraceStats::default()
            },
        }
    }

    /// Restrict the walkable universe to `allowed`; everything else counts
    /// as already visited. Used by the residual re-trace round.
    pub fn restricted(geom: &'a GeometrySlice<'a>, cfg: &'a GeomCfg, allowed: &[EdgeId]) -> Self {
        let mut w = Self::new(geom, cfg);
        let mut keep = vec![false; geom.len()];
        for id in allowed {
            keep[id.0] = true;
        }
        for (i, k) in keep.iter().enumerate() {
            if !*k {
                w.visited[i] = true;
            }
        }
        w.stats.edges_total = allowed.len();
        w
    }

    pub fn run(&mut self) -> Vec<RawWalk> {
        let mut out = Vec::new();
        for seed in 0..self.geom.len() {
            if self.visited[seed] {
                continue;
            }
            out.push(self.walk_from(EdgeId(seed)));
            self.stats.walks += 1;
        }
        out
    }

    fn walk_from(&mut self, seed: EdgeId) -> RawWalk {
        let first = OrientedEdge {
            id: seed,
            rev: false,
        };
        self.visited[seed.0] = true;
        self.stats.edges_visited += 1;
        let start = first.start(self.geom);
        let mut cur = first.end(self.geom);
        let mut steps = vec![first];
        loop {
            if points_coincide(cur, start, self.cfg.eps_weld) {
                return RawWalk {
                    contour: Contour::new(steps),
                    closed: true,
                };
            }
            let last = steps[steps.len() - 1];
            let cands = self
                .index
                .incident(cur, Some(last.id), &self.visited, self.geom, self.cfg);
            let Some(next) = self.pick(cur, last, &cands) else {
                return RawWalk {
                    contour: Contour::new(steps),
                    closed: false,
                };
            };
            self.visited[next.id.0] = true;
            self.stats.edges_visited += 1;
            cur = next.end(self.geom);
            steps.push(next);
        }
    }

    fn pick(&mut self, at: Vec2, last: OrientedEdge, cands: &[EdgeId]) -> Option<OrientedEdge> {
        match cands {
            [] => None,
            [only] => Some(orient_from(self.geom, self.cfg, *only, at)),
            _ => {
                self.stats.ambiguous_branches += 1;
                let d_in = self.geom.edge(last.id).arrive_dir(last.rev);
                let options: Vec<OrientedEdge> = cands
                    .iter()
                    .map(|&id| orient_from(self.geom, self.cfg, id, at))
                    .collect();
                pick_leftmost(self.geom, d_in, &options)
            }
        }
    }
}
