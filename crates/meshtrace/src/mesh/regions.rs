//! Block-label region assignment by ray parity.

use crate::geom::{
    segment_arc_intersections, segments_intersect, BlockLabel, Edge, GeomCfg, GeometrySlice, Vec2,
};
use crate::trace::Contour;

/// Ray target: the bounding-box max corner pushed outward along an
/// irrational-slope direction, so grazing a vertex or running along an edge
/// is non-generic while the cast stays deterministic.
fn ray_target(geom: &GeometrySlice<'_>) -> Vec2 {
    match geom.bounding_box() {
        Some((lo, hi)) => {
            let diag = (hi - lo).norm().max(1.0);
            hi + Vec2::new(diag, diag * 0.618_033_988_749_894_9) + Vec2::new(1.0, 1.0)
        }
        None => Vec2::new(1.0, 1.0),
    }
}

fn crossings_to(contour: &Contour, p: Vec2, target: Vec2, geom: &GeometrySlice<'_>, cfg: &GeomCfg) -> usize {
    let mut count = 0usize;
    for step in &contour.steps {
        match geom.edge(step.id) {
            Edge::Segment(s) => {
                if segments_intersect(p, target, s.a, s.b, cfg) {
                    count += 1;
                }
            }
            Edge::Arc(c) => count += segment_arc_intersections(p, target, &c, cfg),
        }
    }
    count
}

/// Parity test: an odd number of boundary crossings on a ray to an external
/// point puts `p` inside the contour.
pub fn contour_contains(
    contour: &Contour,
    p: Vec2,
    geom: &GeometrySlice<'_>,
    cfg: &GeomCfg,
) -> bool {
    crossings_to(contour, p, ray_target(geom), geom, cfg) % 2 == 1
}

/// Outcome of mapping block labels onto extracted contours.
#[derive(Clone, Debug, Default)]
pub struct RegionAssignment {
    /// Enclosing contour index per label; the innermost (smallest-area)
    /// enclosing contour wins.
    pub by_label: Vec<Option<usize>>,
    /// Labels with no enclosing closed contour.
    pub unassigned: Vec<usize>,
}

pub fn assign_regions(
    geom: &GeometrySlice<'_>,
    contours: &[Contour],
    labels: &[BlockLabel],
    cfg: &GeomCfg,
) -> RegionAssignment {
    let target = ray_target(geom);
    let areas: Vec<f64> = contours.iter().map(|c| c.area(geom)).collect();
    let mut out = RegionAssignment::default();
    for (li, label) in labels.iter().enumerate() {
        let mut best: Option<usize> = None;
        for (ci, contour) in contours.iter().enumerate() {
            if crossings_to(contour, label.position, target, geom, cfg) % 2 == 0 {
                continue;
            }
            if best.map_or(true, |b| areas[ci] < areas[b]) {
                best = Some(ci);
            }
        }
        out.by_label.push(best);
        if best.is_none() {
            out.unassigned.push(li);
        }
    }
    out
}
