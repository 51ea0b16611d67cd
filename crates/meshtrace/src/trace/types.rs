//! Contours, traversal steps, extraction stats, and the error taxonomy.

use std::fmt;

use crate::geom::{points_coincide, Edge, EdgeId, GeomCfg, GeometrySlice, Vec2};

/// Angular step used when flattening arcs for area sums.
pub(crate) const AREA_STEP: f64 = std::f64::consts::PI / 32.0;

/// One traversal step: an edge walked forward (`a -> b`) or reversed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrientedEdge {
    pub id: EdgeId,
    pub rev: bool,
}

impl OrientedEdge {
    #[inline]
    pub fn start(&self, geom: &GeometrySlice<'_>) -> Vec2 {
        let (a, b) = geom.edge(self.id).endpoints();
        if self.rev {
            b
        } else {
            a
        }
    }

    #[inline]
    pub fn end(&self, geom: &GeometrySlice<'_>) -> Vec2 {
        let (a, b) = geom.edge(self.id).endpoints();
        if self.rev {
            a
        } else {
            b
        }
    }

    #[inline]
    pub fn reversed(&self) -> OrientedEdge {
        OrientedEdge {
            id: self.id,
            rev: !self.rev,
        }
    }
}

/// Ordered walk of edges; consecutive steps chain end to start within the
/// weld tolerance. Closed once the last end returns to the first start.
/// Insertion order is the walk direction; no winding is canonicalized.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Contour {
    pub steps: Vec<OrientedEdge>,
}

impl Contour {
    pub fn new(steps: Vec<OrientedEdge>) -> Self {
        Self { steps }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.steps.iter().map(|s| s.id)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.steps.iter().any(|s| s.id == id)
    }

    pub fn start_point(&self, geom: &GeometrySlice<'_>) -> Option<Vec2> {
        self.steps.first().map(|s| s.start(geom))
    }

    pub fn end_point(&self, geom: &GeometrySlice<'_>) -> Option<Vec2> {
        self.steps.last().map(|s| s.end(geom))
    }

    /// Closed-contour test: non-empty and the first start welds to the last
    /// end. Pure predicate, no side effects.
    pub fn is_closed(&self, geom: &GeometrySlice<'_>, cfg: &GeomCfg) -> bool {
        match (self.start_point(geom), self.end_point(geom)) {
            (Some(s), Some(e)) => points_coincide(s, e, cfg.eps_weld),
            _ => false,
        }
    }

    /// Walk vertices: each step's start plus the final end (`len + 1` points).
    pub fn vertices(&self, geom: &GeometrySlice<'_>) -> Vec<Vec2> {
        let mut out: Vec<Vec2> = self.steps.iter().map(|s| s.start(geom)).collect();
        if let Some(last) = self.steps.last() {
            out.push(last.end(geom));
        }
        out
    }

    /// Boundary polyline with arcs flattened at `max_step`, chained in walk
    /// order without duplicated joints.
    pub fn polyline(&self, geom: &GeometrySlice<'_>, max_step: f64) -> Vec<Vec2> {
        let mut out: Vec<Vec2> = Vec::new();
        for s in &self.steps {
            let mut pts = match geom.edge(s.id) {
                Edge::Segment(seg) => vec![seg.a, seg.b],
                Edge::Arc(c) => c.discretize(max_step),
            };
            if s.rev {
                pts.reverse();
            }
            let skip = usize::from(!out.is_empty());
            out.extend(pts.into_iter().skip(skip));
        }
        out
    }

    /// Absolute enclosed area via the shoelace sum over the flattened
    /// boundary.
    pub fn area(&self, geom: &GeometrySlice<'_>) -> f64 {
        let pts = self.polyline(geom, AREA_STEP);
        if pts.len() < 3 {
            return 0.0;
        }
        let mut twice = 0.0;
        for k in 0..pts.len() {
            let p = pts[k];
            let q = pts[(k + 1) % pts.len()];
            twice += p.x * q.y - p.y * q.x;
        }
        0.5 * twice.abs()
    }

    /// Whether any edge id occurs more than once in the walk.
    pub(crate) fn has_duplicate_edge(&self) -> bool {
        let mut ids: Vec<EdgeId> = self.edge_ids().collect();
        ids.sort_unstable();
        ids.windows(2).any(|w| w[0] == w[1])
    }

    /// Same walk in the opposite direction.
    pub fn reversed(&self) -> Contour {
        Contour {
            steps: self.steps.iter().rev().map(|s| s.reversed()).collect(),
        }
    }
}

/// Whether two contours share at least one edge. Existence test only; it
/// does not identify which edge.
pub fn share_common_edge(a: &Contour, b: &Contour) -> bool {
    a.steps.iter().any(|s| b.contains_edge(s.id))
}

/// Counters describing one extraction pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceStats {
    pub edges_total: usize,
    pub edges_visited: usize,
    pub walks: usize,
    /// Junction steps where more than one continuation was available and the
    /// leftmost-turn tie-break was exercised.
    pub ambiguous_branches: usize,
    pub recombinations: usize,
}

/// Result of a successful extraction: every contour is closed.
#[derive(Clone, Debug)]
pub struct Extraction {
    pub contours: Vec<Contour>,
    pub stats: TraceStats,
}

impl Extraction {
    /// Completion invariant: every input edge was consumed by the walker.
    pub fn covers_all_edges(&self) -> bool {
        self.stats.edges_visited == self.stats.edges_total
    }
}

/// Extraction failures. The whole pass fails as a unit; nothing partial is
/// handed to the mesher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceError {
    /// Open geometry that neither closes nor recombines into a cycle.
    Dangling { edges: Vec<EdgeId> },
    /// An open path and a closed contour share endpoints but do not
    /// reconcile into valid closed loops.
    Recombination { open: Vec<EdgeId>, closed: Vec<EdgeId> },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::Dangling { edges } => {
                write!(f, "dangling geometry: {} unclosed edge(s)", edges.len())
            }
            TraceError::Recombination { open, closed } => write!(
                f,
                "recombination failed between a {}-edge path and a {}-edge contour",
                open.len(),
                closed.len()
            ),
        }
    }
}

impl std::error::Error for TraceError {}
