//! Snap-grid endpoint index.
//!
//! Maps quantized endpoint coordinates to incident edges so the walker can
//! answer "which edges touch this point" without scanning the whole edge
//! universe. Queries probe the 3x3 cell neighborhood and confirm with a true
//! distance test, so welds near a cell boundary are not missed.

use std::collections::HashMap;

use crate::geom::{points_coincide, EdgeId, GeomCfg, GeometrySlice, Vec2};

pub struct EndpointIndex {
    cells: HashMap<(i64, i64), Vec<EdgeId>>,
    cell: f64,
}

impl EndpointIndex {
    pub fn build(geom: &GeometrySlice<'_>, cfg: &GeomCfg) -> Self {
        let cell = cfg.eps_weld.max(1e-12) * 4.0;
        let mut idx = Self {
            cells: HashMap::new(),
            cell,
        };
        for id in geom.edge_ids() {
            let (a, b) = geom.edge(id).endpoints();
            idx.insert(a, id);
            if !points_coincide(a, b, cfg.eps_weld) {
                idx.insert(b, id);
            }
        }
        idx
    }

    fn insert(&mut self, p: Vec2, id: EdgeId) {
        let key = self.key(p);
        self.cells.entry(key).or_default().push(id);
    }

    #[inline]
    fn key(&self, p: Vec2) -> (i64, i64) {
        (
            (p.x / self.cell).floor() as i64,
            (p.y / self.cell).floor() as i64,
        )
    }

    /// All edges with an endpoint welding to `p`, excluding `exclude`.
    /// Results come in ascending id order so callers' tie-breaks are
    /// deterministic.
    pub fn edges_at(
        &self,
        p: Vec2,
        exclude: Option<EdgeId>,
        geom: &GeometrySlice<'_>,
        cfg: &GeomCfg,
    ) -> Vec<EdgeId> {
        self.collect(p, exclude, None, geom, cfg)
    }

    /// As [`Self::edges_at`], restricted to unvisited edges.
    pub(crate) fn incident(
        &self,
        p: Vec2,
        exclude: Option<EdgeId>,
        visited: &[bool],
        geom: &GeometrySlice<'_>,
        cfg: &GeomCfg,
    ) -> Vec<EdgeId> {
        self.collect(p, exclude, Some(visited), geom, cfg)
    }

    fn collect(
        &self,
        p: Vec2,
        exclude: Option<EdgeId>,
        visited: Option<&[bool]>,
        geom: &GeometrySlice<'_>,
        cfg: &GeomCfg,
    ) -> Vec<EdgeId> {
        let (kx, ky) = self.key(p);
        let mut out: Vec<EdgeId> = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(ids) = self.cells.get(&(kx + dx, ky + dy)) else {
                    continue;
                };
                for &id in ids {
                    if Some(id) == exclude || out.contains(&id) {
                        continue;
                    }
                    if visited.is_some_and(|v| v[id.0]) {
                        continue;
                    }
                    let (a, b) = geom.edge(id).endpoints();
                    if points_coincide(a, p, cfg.eps_weld) || points_coincide(b, p, cfg.eps_weld) {
                        out.push(id);
                    }
                }
            }
        }
        out.sort_unstable();
        out
    }
}
