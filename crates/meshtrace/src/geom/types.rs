//! Basic planar types for user-drawn geometry.
//!
//! - `GeomCfg`: centralizes tolerances for welding, orientation, and span tests.
//! - `Segment`, `Arc`, `Edge`: the drawable edge universe, undirected for traversal.
//! - `GeometrySlice`: non-owning view of the editor's collections.

use std::f64::consts::TAU;

use nalgebra::Vector2;

/// Planar coordinate type used throughout the crate.
pub type Vec2 = Vector2<f64>;

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundaryId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionId(pub usize);

/// Geometry configuration (tolerances).
///
/// User-drawn geometry routinely has sub-pixel mismatches between nominally
/// coincident endpoints, so endpoint identity is always `eps_weld`-based.
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Coordinate distance under which two endpoints count as the same node.
    pub eps_weld: f64,
    /// Guard for determinant and orientation sign tests.
    pub eps_det: f64,
    /// Guard for parametric span tests on segments and arcs.
    pub eps_param: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_weld: 1e-6,
            eps_det: 1e-12,
            eps_param: 1e-9,
        }
    }
}

/// Endpoint identity within the weld tolerance.
#[inline]
pub fn points_coincide(a: Vec2, b: Vec2, eps: f64) -> bool {
    (a - b).norm() <= eps
}

/// Straight edge between two endpoints. Undirected for traversal.
#[derive(Clone, Copy, Debug)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
    /// Application payload (boundary condition reference).
    pub boundary: Option<BoundaryId>,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b, boundary: None }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.b - self.a).norm()
    }
}

/// Circular arc between two endpoints.
///
/// Stored in resolved form (center, radius, direction flag). The editor's
/// authoring form (chord plus subtended sweep) is accepted via
/// [`Arc::from_sweep`]. Coincident endpoints denote a full circle.
#[derive(Clone, Copy, Debug)]
pub struct Arc {
    pub a: Vec2,
    pub b: Vec2,
    pub center: Vec2,
    pub radius: f64,
    /// Traversal `a -> b` runs clockwise when set.
    pub cw: bool,
    pub boundary: Option<BoundaryId>,
}

impl Arc {
    /// Resolve center and radius from chord `a -> b`, subtended `sweep` in
    /// radians, and direction. `None` when the chord or sweep is degenerate.
    pub fn from_sweep(a: Vec2, b: Vec2, sweep: f64, cw: bool) -> Option<Arc> {
        let chord = b - a;
        let len = chord.norm();
        if !(len > 0.0) || !(sweep > 0.0) || sweep >= TAU {
            return None;
        }
        let half = 0.5 * sweep;
        let radius = len / (2.0 * half.sin());
        let mid = a + 0.5 * chord;
        let left = Vec2::new(-chord.y, chord.x) / len;
        let h = radius * half.cos();
        let center = if cw { mid - left * h } else { mid + left * h };
        Some(Arc {
            a,
            b,
            center,
            radius,
            cw,
            boundary: None,
        })
    }

    /// Full circle anchored at angle zero.
    pub fn full_circle(center: Vec2, radius: f64) -> Arc {
        let p = center + Vec2::new(radius, 0.0);
        Arc {
            a: p,
            b: p,
            center,
            radius,
            cw: false,
            boundary: None,
        }
    }

    #[inline]
    pub fn start_angle(&self) -> f64 {
        let d = self.a - self.center;
        d.y.atan2(d.x)
    }

    #[inline]
    pub fn end_angle(&self) -> f64 {
        let d = self.b - self.center;
        d.y.atan2(d.x)
    }

    /// Swept angle in `(0, 2π]`, measured along the traversal direction.
    /// Coincident endpoints yield a full circle.
    pub fn sweep(&self) -> f64 {
        let s = self.start_angle();
        let e = self.end_angle();
        let d = if self.cw { s - e } else { e - s };
        let d = d.rem_euclid(TAU);
        if d <= 1e-12 {
            TAU
        } else {
            d
        }
    }

    /// Whether `theta` lies within the swept span (within `eps`).
    pub fn contains_angle(&self, theta: f64, eps: f64) -> bool {
        let s = self.start_angle();
        let rel = if self.cw {
            (s - theta).rem_euclid(TAU)
        } else {
            (theta - s).rem_euclid(TAU)
        };
        rel <= self.sweep() + eps || rel >= TAU - eps
    }

    /// Flatten to a polyline with angular steps of at most `max_step` radians.
    /// Includes both endpoints; a full circle closes back onto `a`.
    pub fn discretize(&self, max_step: f64) -> Vec<Vec2> {
        let sweep = self.sweep();
        let step = max_step.max(1e-3);
        let n = (sweep / step).ceil().max(1.0) as usize;
        let signed = if self.cw { -sweep } else { sweep };
        let s = self.start_angle();
        let mut pts = Vec::with_capacity(n + 1);
        for k in 0..=n {
            let th = s + signed * (k as f64) / (n as f64);
            pts.push(self.center + Vec2::new(th.cos(), th.sin()) * self.radius);
        }
        // Snap the first and last samples onto the stored endpoints so the
        // polyline chains exactly with neighbouring edges.
        pts[0] = self.a;
        let last = pts.len() - 1;
        pts[last] = self.b;
        pts
    }

    /// Direction of motion at `at` on the circle, for the given winding.
    fn motion_dir(&self, at: Vec2, cw: bool) -> Vec2 {
        let r = at - self.center;
        let n = r.norm();
        let u = if n > 0.0 { r / n } else { Vec2::new(1.0, 0.0) };
        if cw {
            Vec2::new(u.y, -u.x)
        } else {
            Vec2::new(-u.y, u.x)
        }
    }
}

/// Tagged edge variant. The traversal layer only needs endpoints and
/// tangents; the geometry layer matches on the concrete kind.
#[derive(Clone, Copy, Debug)]
pub enum Edge {
    Segment(Segment),
    Arc(Arc),
}

impl Edge {
    #[inline]
    pub fn endpoints(&self) -> (Vec2, Vec2) {
        match self {
            Edge::Segment(s) => (s.a, s.b),
            Edge::Arc(c) => (c.a, c.b),
        }
    }

    pub fn boundary(&self) -> Option<BoundaryId> {
        match self {
            Edge::Segment(s) => s.boundary,
            Edge::Arc(c) => c.boundary,
        }
    }

    /// Unit direction of motion at the oriented start (`rev` flips traversal).
    pub fn depart_dir(&self, rev: bool) -> Vec2 {
        match self {
            Edge::Segment(s) => {
                let d = if rev { s.a - s.b } else { s.b - s.a };
                let n = d.norm();
                if n > 0.0 {
                    d / n
                } else {
                    Vec2::new(1.0, 0.0)
                }
            }
            Edge::Arc(c) => {
                if rev {
                    c.motion_dir(c.b, !c.cw)
                } else {
                    c.motion_dir(c.a, c.cw)
                }
            }
        }
    }

    /// Unit direction of motion at the oriented end (`rev` flips traversal).
    pub fn arrive_dir(&self, rev: bool) -> Vec2 {
        match self {
            Edge::Segment(s) => {
                let d = if rev { s.a - s.b } else { s.b - s.a };
                let n = d.norm();
                if n > 0.0 {
                    d / n
                } else {
                    Vec2::new(1.0, 0.0)
                }
            }
            Edge::Arc(c) => {
                if rev {
                    c.motion_dir(c.a, !c.cw)
                } else {
                    c.motion_dir(c.b, c.cw)
                }
            }
        }
    }
}

/// Region seed point placed by the user inside a closed region.
#[derive(Clone, Copy, Debug)]
pub struct BlockLabel {
    pub position: Vec2,
    pub region: RegionId,
}

impl BlockLabel {
    pub fn new(position: Vec2, region: RegionId) -> Self {
        Self { position, region }
    }
}

/// Non-owning view of the editor's segment and arc collections.
///
/// Edge ids index segments first and arcs after. The view is only held for
/// the duration of one call and never stored.
#[derive(Clone, Copy, Debug)]
pub struct GeometrySlice<'a> {
    pub segments: &'a [Segment],
    pub arcs: &'a [Arc],
}

impl<'a> GeometrySlice<'a> {
    pub fn new(segments: &'a [Segment], arcs: &'a [Arc]) -> Self {
        Self { segments, arcs }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len() + self.arcs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> Edge {
        if id.0 < self.segments.len() {
            Edge::Segment(self.segments[id.0])
        } else {
            Edge::Arc(self.arcs[id.0 - self.segments.len()])
        }
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> {
        (0..self.len()).map(EdgeId)
    }

    /// Axis-aligned bounds over all endpoints and arc extremes.
    pub fn bounding_box(&self) -> Option<(Vec2, Vec2)> {
        let mut lo = Vec2::new(f64::INFINITY, f64::INFINITY);
        let mut hi = Vec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut any = false;
        let mut take = |p: Vec2| {
            lo.x = lo.x.min(p.x);
            lo.y = lo.y.min(p.y);
            hi.x = hi.x.max(p.x);
            hi.y = hi.y.max(p.y);
            any = true;
        };
        for s in self.segments {
            take(s.a);
            take(s.b);
        }
        for c in self.arcs {
            take(c.a);
            take(c.b);
            // An arc bulges past its chord wherever its span crosses a
            // cardinal direction.
            for k in 0..4 {
                let th = (k as f64) * std::f64::consts::FRAC_PI_2;
                if c.contains_angle(th, 1e-12) {
                    take(c.center + Vec2::new(th.cos(), th.sin()) * c.radius);
                }
            }
        }
        if any {
            Some((lo, hi))
        } else {
            None
        }
    }
}
