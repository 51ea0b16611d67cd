//! Extraction driver: trace, prune, residual re-trace, recombine, validate.

use std::cmp::Ordering;

use super::index::EndpointIndex;
use super::prune::prune_dangling;
use super::recombine::{complete_by_face_walk, recombine, Recombined};
use super::types::{Contour, Extraction, TraceError};
use super::walk::Walker;
use crate::geom::{points_coincide, EdgeId, GeomCfg, GeometrySlice, Vec2};

/// Extract the closed contours covering every edge of `geom`.
///
/// The pass fails as a unit: open geometry that cannot be closed or
/// recombined reports [`TraceError::Dangling`] with the offending edges, and
/// an irreconcilable shared-edge pair reports [`TraceError::Recombination`].
/// On success every returned contour is closed and every edge appears in one
/// contour, or in two where a partition line divides neighbouring regions.
pub fn extract_contours(
    geom: &GeometrySlice<'_>,
    cfg: &GeomCfg,
) -> Result<Extraction, TraceError> {
    let mut walker = Walker::new(geom, cfg);
    let raw = walker.run();
    let mut stats = walker.stats;

    let mut closed: Vec<Contour> = Vec::new();
    let mut residual: Vec<EdgeId> = Vec::new();
    for walk in raw {
        if walk.closed {
            closed.push(walk.contour);
            continue;
        }
        let pruned = prune_dangling(&walk.contour, geom, cfg);
        if let Some(cycle) = pruned.cycle {
            closed.push(cycle);
        }
        residual.extend(pruned.prefix.iter().map(|s| s.id));
        residual.extend(pruned.suffix.iter().map(|s| s.id));
    }

    // Residual edges get one re-trace round on their own sub-universe: a
    // tangled first pass can leave the edges of a perfectly good cycle
    // behind, and a seed inside the residue finds that cycle directly.
    let mut pending: Vec<Contour> = Vec::new();
    if !residual.is_empty() {
        residual.sort_unstable();
        residual.dedup();
        let mut second = Walker::restricted(geom, cfg, &residual);
        for walk in second.run() {
            if walk.closed {
                closed.push(walk.contour);
                continue;
            }
            let pruned = prune_dangling(&walk.contour, geom, cfg);
            if let Some(cycle) = pruned.cycle {
                closed.push(cycle);
            }
            if !pruned.prefix.is_empty() {
                pending.push(Contour::new(pruned.prefix));
            }
            if !pruned.suffix.is_empty() {
                pending.push(Contour::new(pruned.suffix));
            }
        }
        stats.walks += second.stats.walks;
        stats.ambiguous_branches += second.stats.ambiguous_branches;
    }

    let index = EndpointIndex::build(geom, cfg);
    normalize_open_paths(geom, cfg, &index, &mut closed, pending, &mut stats.recombinations)?;
    validate(geom, cfg, &closed)?;

    Ok(Extraction {
        contours: closed,
        stats,
    })
}

/// What to do with one open path against the current closed set.
enum Placement {
    /// Path re-touches its host between its ends; pieces go back on the
    /// worklist.
    Pieces(Contour, Contour),
    /// Host was updated in place.
    Done,
    /// Ends matched the named host but no valid pair of loops resulted.
    Failed(Vec<EdgeId>),
    /// No host carries both ends.
    NoHost,
}

/// Work every remaining open path into the closed set: recombine it with the
/// contour carrying both of its ends (splitting the path first where it
/// re-touches that contour), or close it with a face walk. Paths that
/// survive all of that are dangling geometry.
fn normalize_open_paths(
    geom: &GeometrySlice<'_>,
    cfg: &GeomCfg,
    index: &EndpointIndex,
    closed: &mut Vec<Contour>,
    mut pending: Vec<Contour>,
    recombinations: &mut usize,
) -> Result<(), TraceError> {
    let mut failed: Option<(Vec<EdgeId>, Vec<EdgeId>)> = None;
    loop {
        let mut progress = false;
        let mut next: Vec<Contour> = Vec::new();
        for path in std::mem::take(&mut pending) {
            match place_path(&path, closed, geom, cfg) {
                Placement::Pieces(a, b) => {
                    next.push(a);
                    next.push(b);
                    progress = true;
                }
                Placement::Done => {
                    *recombinations += 1;
                    progress = true;
                }
                placement => {
                    if let Placement::Failed(host) = placement {
                        failed = Some((path.edge_ids().collect(), host));
                    }
                    // A path spanning several contours closes around the
                    // face it borders.
                    if let Some(face) = complete_by_face_walk(&path, geom, cfg, index) {
                        if !face.has_duplicate_edge() {
                            closed.push(face);
                            *recombinations += 1;
                            progress = true;
                            continue;
                        }
                    }
                    next.push(path);
                }
            }
        }
        pending = next;
        if pending.is_empty() {
            return Ok(());
        }
        if !progress {
            break;
        }
    }

    if let Some((open, closed_ids)) = failed {
        return Err(TraceError::Recombination {
            open,
            closed: closed_ids,
        });
    }
    let mut dangling: Vec<EdgeId> = Vec::new();
    for path in &pending {
        dangling.extend(path.edge_ids());
    }
    dangling.sort_unstable();
    dangling.dedup();
    Err(TraceError::Dangling { edges: dangling })
}

/// Try the host contours in ascending area order. For the first host that
/// carries both path ends: split the path if it re-touches that host in
/// between (the split pieces are genuine chords), otherwise recombine.
fn place_path(
    path: &Contour,
    closed: &mut Vec<Contour>,
    geom: &GeometrySlice<'_>,
    cfg: &GeomCfg,
) -> Placement {
    let (Some(p), Some(q)) = (path.start_point(geom), path.end_point(geom)) else {
        return Placement::NoHost;
    };
    let mut order: Vec<usize> = (0..closed.len()).collect();
    order.sort_by(|a, b| {
        closed[*a]
            .area(geom)
            .partial_cmp(&closed[*b].area(geom))
            .unwrap_or(Ordering::Equal)
    });
    let mut failed: Option<Vec<EdgeId>> = None;
    for k in order {
        let host = &closed[k];
        if !contour_has_vertex(host, p, geom, cfg) || !contour_has_vertex(host, q, geom, cfg) {
            continue;
        }
        let verts = path.vertices(geom);
        if let Some(at) =
            (1..path.steps.len()).find(|v| contour_has_vertex(host, verts[*v], geom, cfg))
        {
            return Placement::Pieces(
                Contour::new(path.steps[..at].to_vec()),
                Contour::new(path.steps[at..].to_vec()),
            );
        }
        match recombine(path, host, geom, cfg) {
            Recombined::Split(a, b) => {
                closed.swap_remove(k);
                closed.push(a);
                closed.push(b);
                return Placement::Done;
            }
            Recombined::Added(a) => {
                closed.push(a);
                return Placement::Done;
            }
            Recombined::Failed | Recombined::NoMatch => {
                failed = Some(host.edge_ids().collect());
            }
        }
    }
    match failed {
        Some(host) => Placement::Failed(host),
        None => Placement::NoHost,
    }
}

fn contour_has_vertex(c: &Contour, p: Vec2, geom: &GeometrySlice<'_>, cfg: &GeomCfg) -> bool {
    c.vertices(geom)
        .iter()
        .any(|v| points_coincide(*v, p, cfg.eps_weld))
}

/// Final invariants: every contour closed, every edge covered, and no edge
/// claimed by more than the two regions a partition line can border.
fn validate(
    geom: &GeometrySlice<'_>,
    cfg: &GeomCfg,
    closed: &[Contour],
) -> Result<(), TraceError> {
    let mut mult = vec![0usize; geom.len()];
    for c in closed {
        if !c.is_closed(geom, cfg) {
            return Err(TraceError::Dangling {
                edges: c.edge_ids().collect(),
            });
        }
        for id in c.edge_ids() {
            mult[id.0] += 1;
        }
    }
    let uncovered: Vec<EdgeId> = (0..geom.len())
        .filter(|k| mult[*k] == 0)
        .map(EdgeId)
        .collect();
    if !uncovered.is_empty() {
        return Err(TraceError::Dangling { edges: uncovered });
    }
    if let Some(k) = (0..geom.len()).find(|k| mult[*k] > 2) {
        let involved: Vec<&Contour> = closed
            .iter()
            .filter(|c| c.contains_edge(EdgeId(k)))
            .collect();
        return Err(TraceError::Recombination {
            open: involved[0].edge_ids().collect(),
            closed: involved[1].edge_ids().collect(),
        });
    }
    Ok(())
}
