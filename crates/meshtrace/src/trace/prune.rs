//! Dangling-line pruning for open walks.
//!
//! An open walk that looped back onto one of its own non-start vertices
//! carries an embedded cycle; the steps before the re-entry (and any steps
//! after the walk left the cycle again) are the dangling part. A walk with
//! no such re-entry comes back whole, for the residual round to retry.

use super::types::{Contour, OrientedEdge};
use crate::geom::{points_coincide, GeomCfg, GeometrySlice};

pub(crate) struct Pruned {
    /// Steps ahead of the embedded cycle.
    pub prefix: Vec<OrientedEdge>,
    pub cycle: Option<Contour>,
    /// Steps after the walk left the cycle again.
    pub suffix: Vec<OrientedEdge>,
}

pub(crate) fn prune_dangling(
    contour: &Contour,
    geom: &GeometrySlice<'_>,
    cfg: &GeomCfg,
) -> Pruned {
    let verts = contour.vertices(geom);
    let n = contour.steps.len();
    // Earliest re-entered vertex pair (i, j) marks the embedded cycle.
    for j in 1..=n {
        for i in 0..j {
            if i == 0 && j == n {
                continue; // that walk is closed, not dangling
            }
            if points_coincide(verts[i], verts[j], cfg.eps_weld) {
                return Pruned {
                    prefix: contour.steps[..i].to_vec(),
                    cycle: Some(Contour::new(contour.steps[i..j].to_vec())),
                    suffix: contour.steps[j..].to_vec(),
                };
            }
        }
    }
    Pruned {
        prefix: contour.steps.clone(),
        cycle: None,
        suffix: Vec::new(),
    }
}
