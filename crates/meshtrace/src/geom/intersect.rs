//! Segment and arc intersection predicates.
//!
//! Used both for validating drawn geometry (crossing scan) and for the
//! ray-parity containment tests behind block-label assignment. Degenerate
//! inputs (collinear overlap, tangency) resolve to a single contact point
//! under the configured tolerances; the predicates never fail.

use super::types::{points_coincide, Arc, Edge, EdgeId, GeomCfg, GeometrySlice, Vec2};

#[inline]
pub(crate) fn cross2(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Orientation of `c` relative to the directed line `a -> b`.
#[inline]
fn orient(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    cross2(b - a, c - a)
}

/// Projection of `c` lies within segment `a -> b` (within tolerance).
fn on_segment(a: Vec2, b: Vec2, c: Vec2, cfg: &GeomCfg) -> bool {
    let d = b - a;
    let len = d.norm();
    if len <= cfg.eps_weld {
        return points_coincide(a, c, cfg.eps_weld);
    }
    let t = (c - a).dot(&d) / (len * len);
    (-cfg.eps_param..=1.0 + cfg.eps_param).contains(&t)
}

/// Whether segments `p1 p2` and `p3 p4` intersect. Endpoint contact counts;
/// collinear overlap counts as a single contact.
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2, cfg: &GeomCfg) -> bool {
    let d1 = orient(p3, p4, p1);
    let d2 = orient(p3, p4, p2);
    let d3 = orient(p1, p2, p3);
    let d4 = orient(p1, p2, p4);
    let eps = cfg.eps_det;
    if ((d1 > eps && d2 < -eps) || (d1 < -eps && d2 > eps))
        && ((d3 > eps && d4 < -eps) || (d3 < -eps && d4 > eps))
    {
        return true;
    }
    (d1.abs() <= eps && on_segment(p3, p4, p1, cfg))
        || (d2.abs() <= eps && on_segment(p3, p4, p2, cfg))
        || (d3.abs() <= eps && on_segment(p1, p2, p3, cfg))
        || (d4.abs() <= eps && on_segment(p1, p2, p4, cfg))
}

/// Number of intersection points (0, 1, or 2) between segment `p1 p2` and
/// `arc`. Tangency counts as a single contact; hits outside the segment's
/// parametric range or the arc's angular span are discarded. The count (not
/// just a boolean) feeds the parity-based containment test.
pub fn segment_arc_intersections(p1: Vec2, p2: Vec2, arc: &Arc, cfg: &GeomCfg) -> usize {
    segment_arc_hits(p1, p2, arc, cfg).len()
}

fn segment_arc_hits(p1: Vec2, p2: Vec2, arc: &Arc, cfg: &GeomCfg) -> Vec<Vec2> {
    let d = p2 - p1;
    let len = d.norm();
    if len <= cfg.eps_weld {
        // Degenerate segment: at most a point-on-arc contact.
        let on = ((p1 - arc.center).norm() - arc.radius).abs() <= cfg.eps_weld
            && arc.contains_angle(angle_about(arc.center, p1), cfg.eps_param);
        return if on { vec![p1] } else { Vec::new() };
    }
    let u = d / len;
    let rel = arc.center - p1;
    let t_c = rel.dot(&u);
    let perp = (rel - u * t_c).norm();
    if perp > arc.radius + cfg.eps_weld {
        return Vec::new();
    }
    let mut hits: Vec<Vec2> = Vec::with_capacity(2);
    if perp >= arc.radius - cfg.eps_weld {
        // Tangent contact.
        push_hit(&mut hits, p1 + u * t_c, t_c, len, arc, cfg);
    } else {
        let half = (arc.radius * arc.radius - perp * perp).sqrt();
        push_hit(&mut hits, p1 + u * (t_c - half), t_c - half, len, arc, cfg);
        push_hit(&mut hits, p1 + u * (t_c + half), t_c + half, len, arc, cfg);
    }
    hits
}

fn push_hit(hits: &mut Vec<Vec2>, p: Vec2, t: f64, len: f64, arc: &Arc, cfg: &GeomCfg) {
    if t < -cfg.eps_weld || t > len + cfg.eps_weld {
        return;
    }
    if !arc.contains_angle(angle_about(arc.center, p), cfg.eps_param) {
        return;
    }
    if hits.iter().any(|q| points_coincide(*q, p, cfg.eps_weld)) {
        return;
    }
    hits.push(p);
}

#[inline]
fn angle_about(center: Vec2, p: Vec2) -> f64 {
    let d = p - center;
    d.y.atan2(d.x)
}

/// Proper line-line intersection point, `None` for (near) parallel lines.
fn line_point(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2, cfg: &GeomCfg) -> Option<Vec2> {
    let d12 = p2 - p1;
    let d34 = p4 - p3;
    let denom = cross2(d12, d34);
    if denom.abs() <= cfg.eps_det {
        return None;
    }
    let t = cross2(p3 - p1, d34) / denom;
    Some(p1 + d12 * t)
}

/// A pair of edges that properly intersect away from a shared endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crossing {
    pub first: EdgeId,
    pub second: EdgeId,
}

/// Scan a drawing for crossings the editor must split before meshing.
///
/// Pairs that only meet at a welded endpoint are fine; proper crossings and
/// T-contacts are reported. Arc-arc pairs are probed through one arc's chord
/// polyline, which is exact enough at the weld tolerance for drawn geometry.
pub fn crossings(geom: &GeometrySlice<'_>, cfg: &GeomCfg) -> Vec<Crossing> {
    let mut out = Vec::new();
    let n = geom.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let ei = geom.edge(EdgeId(i));
            let ej = geom.edge(EdgeId(j));
            if edges_cross(&ei, &ej, cfg) {
                out.push(Crossing {
                    first: EdgeId(i),
                    second: EdgeId(j),
                });
            }
        }
    }
    out
}

const ARC_PROBE_STEP: f64 = std::f64::consts::PI / 64.0;

fn edges_cross(ei: &Edge, ej: &Edge, cfg: &GeomCfg) -> bool {
    let (a1, b1) = ei.endpoints();
    let (a2, b2) = ej.endpoints();
    let is_shared_node = |p: Vec2| {
        (points_coincide(p, a1, cfg.eps_weld) || points_coincide(p, b1, cfg.eps_weld))
            && (points_coincide(p, a2, cfg.eps_weld) || points_coincide(p, b2, cfg.eps_weld))
    };
    match (ei, ej) {
        (Edge::Segment(s), Edge::Segment(t)) => {
            if !segments_intersect(s.a, s.b, t.a, t.b, cfg) {
                return false;
            }
            if let Some(p) = line_point(s.a, s.b, t.a, t.b, cfg) {
                !is_shared_node(p)
            } else {
                // Parallel overlap: a crossing unless the contact is one
                // shared node.
                let interior = |a: Vec2, b: Vec2, c: Vec2| {
                    on_segment(a, b, c, cfg)
                        && !points_coincide(c, a, cfg.eps_weld)
                        && !points_coincide(c, b, cfg.eps_weld)
                };
                interior(s.a, s.b, t.a)
                    || interior(s.a, s.b, t.b)
                    || interior(t.a, t.b, s.a)
                    || interior(t.a, t.b, s.b)
            }
        }
        (Edge::Segment(s), Edge::Arc(c)) | (Edge::Arc(c), Edge::Segment(s)) => {
            segment_arc_hits(s.a, s.b, c, cfg)
                .iter()
                .any(|p| !is_shared_node(*p))
        }
        (Edge::Arc(c1), Edge::Arc(c2)) => {
            let poly = c1.discretize(ARC_PROBE_STEP);
            poly.windows(2).any(|w| {
                segment_arc_hits(w[0], w[1], c2, cfg)
                    .iter()
                    .any(|p| !is_shared_node(*p))
            })
        }
    }
}
