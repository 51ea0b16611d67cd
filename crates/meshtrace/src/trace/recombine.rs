//! Contour recombination along a shared partition.
//!
//! Purpose
//! - A raw depth-first walk can tangle an internal partition line into one of
//!   the two loops it should divide, leaving an open residual path behind.
//!   Recombination reconciles such a path with the closed contour carrying
//!   its free ends.
//!
//! Why this design
//! - The path's ends split the host cycle into two chains, giving three
//!   candidate loops: the host itself and the path closed with either chain.
//!   The largest of the three is the union of the other two and drops out;
//!   the two smallest bound the true regions. The partition path ends up in
//!   both survivors, which is exactly the shared-edge outcome expected for a
//!   region-dividing line.
//! - When the ends span more than one contour, a leftmost-turn face walk
//!   over the full edge set closes the path around the face it borders.

use std::collections::HashSet;

use super::index::EndpointIndex;
use super::types::{Contour, OrientedEdge};
use super::walk::{orient_from, pick_leftmost};
use crate::geom::{points_coincide, GeomCfg, GeometrySlice, Vec2};

pub(crate) enum Recombined {
    /// The open path was a chord of the host; the host splits into the two
    /// loops on either side of the chord.
    Split(Contour, Contour),
    /// The open path closes against one stretch of the host, which itself
    /// survives unchanged.
    Added(Contour),
    /// The path's ends both lie on the host, but no valid pair of closed
    /// loops resulted.
    Failed,
    /// The host does not carry both ends.
    NoMatch,
}

/// Try to reconcile an open path with a closed host contour.
pub(crate) fn recombine(
    open: &Contour,
    host: &Contour,
    geom: &GeometrySlice<'_>,
    cfg: &GeomCfg,
) -> Recombined {
    let (Some(p), Some(q)) = (open.start_point(geom), open.end_point(geom)) else {
        return Recombined::NoMatch;
    };
    if points_coincide(p, q, cfg.eps_weld) {
        return Recombined::NoMatch;
    }
    let verts = host.vertices(geom);
    let m = host.steps.len();
    let pos = |target: Vec2| (0..m).find(|k| points_coincide(verts[*k], target, cfg.eps_weld));
    let (Some(i), Some(j)) = (pos(p), pos(q)) else {
        return Recombined::NoMatch;
    };
    if i == j {
        return Recombined::Failed;
    }

    // Chains of the host cycle between the path's ends, in walk order.
    let take = |from: usize, to: usize| {
        let mut out: Vec<OrientedEdge> = Vec::new();
        let mut k = from;
        while k != to {
            out.push(host.steps[k]);
            k = (k + 1) % m;
        }
        out
    };
    let chain_pq = take(i, j);
    let chain_qp = take(j, i);

    // Loop A: the path p -> q, then back along the cycle q -> p.
    let mut a_steps = open.steps.clone();
    a_steps.extend_from_slice(&chain_qp);
    let loop_a = Contour::new(a_steps);
    // Loop B: the path p -> q, then the other stretch reversed.
    let mut b_steps = open.steps.clone();
    b_steps.extend(Contour::new(chain_pq).reversed().steps);
    let loop_b = Contour::new(b_steps);

    if !loop_a.is_closed(geom, cfg) || !loop_b.is_closed(geom, cfg) {
        return Recombined::Failed;
    }
    if loop_a.has_duplicate_edge() || loop_b.has_duplicate_edge() {
        return Recombined::Failed;
    }

    let area_host = host.area(geom);
    let area_a = loop_a.area(geom);
    let area_b = loop_b.area(geom);
    if area_host >= area_a && area_host >= area_b {
        Recombined::Split(loop_a, loop_b)
    } else if area_a >= area_b {
        Recombined::Added(loop_b)
    } else {
        Recombined::Added(loop_a)
    }
}

/// Close an open path by continuing from its end with leftmost turns over
/// the full edge set until the walk returns to the path's start. Both path
/// orientations are tried and the smaller face wins, so the unbounded outer
/// face is never picked when a bounded one exists.
pub(crate) fn complete_by_face_walk(
    path: &Contour,
    geom: &GeometrySlice<'_>,
    cfg: &GeomCfg,
    index: &EndpointIndex,
) -> Option<Contour> {
    let fwd = face_walk(path, geom, cfg, index);
    let rev = face_walk(&path.reversed(), geom, cfg, index);
    match (fwd, rev) {
        (Some(f), Some(r)) => {
            if f.area(geom) <= r.area(geom) {
                Some(f)
            } else {
                Some(r)
            }
        }
        (f, r) => f.or(r),
    }
}

fn face_walk(
    path: &Contour,
    geom: &GeometrySlice<'_>,
    cfg: &GeomCfg,
    index: &EndpointIndex,
) -> Option<Contour> {
    let target = path.start_point(geom)?;
    let mut cur = path.end_point(geom)?;
    let mut used: HashSet<(usize, bool)> =
        path.steps.iter().map(|s| (s.id.0, s.rev)).collect();
    let mut steps = path.steps.clone();
    // Each directed edge use is consumed at most once, so 2E steps bound
    // the walk.
    for _ in 0..2 * geom.len() + 2 {
        if points_coincide(cur, target, cfg.eps_weld) {
            return Some(Contour::new(steps));
        }
        let last = steps[steps.len() - 1];
        let d_in = geom.edge(last.id).arrive_dir(last.rev);
        let options: Vec<OrientedEdge> = index
            .edges_at(cur, Some(last.id), geom, cfg)
            .into_iter()
            .map(|id| orient_from(geom, cfg, id, cur))
            .filter(|o| !used.contains(&(o.id.0, o.rev)))
            .collect();
        let next = pick_leftmost(geom, d_in, &options)?;
        used.insert((next.id.0, next.rev));
        cur = next.end(geom);
        steps.push(next);
    }
    None
}
