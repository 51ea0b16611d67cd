//! Serde DTOs for geometry files and result artifacts.
//!
//! The core crate stays serde-free; conversion happens here at the process
//! boundary. A geometry file looks like:
//!
//! ```json
//! {
//!   "segments": [{ "a": [0.0, 0.0], "b": [1.0, 0.0] }],
//!   "arcs": [{ "a": [1.0, 0.0], "b": [0.0, 1.0], "sweep_deg": 90.0 }],
//!   "circles": [{ "center": [5.0, 5.0], "radius": 1.0 }],
//!   "labels": [{ "position": [0.5, 0.2], "region": 1 }]
//! }
//! ```

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use meshtrace::geom::{Arc, BlockLabel, BoundaryId, GeometrySlice, RegionId, Segment, Vec2};
use meshtrace::mesh::Pslg;
use meshtrace::trace::Extraction;

#[derive(Debug, Serialize, Deserialize)]
pub struct GeometryFile {
    #[serde(default)]
    pub segments: Vec<SegmentDto>,
    #[serde(default)]
    pub arcs: Vec<ArcDto>,
    #[serde(default)]
    pub circles: Vec<CircleDto>,
    #[serde(default)]
    pub labels: Vec<LabelDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentDto {
    pub a: [f64; 2],
    pub b: [f64; 2],
    #[serde(default)]
    pub boundary: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArcDto {
    pub a: [f64; 2],
    pub b: [f64; 2],
    /// Subtended angle in degrees, in (0, 360).
    pub sweep_deg: f64,
    #[serde(default)]
    pub cw: bool,
    #[serde(default)]
    pub boundary: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CircleDto {
    pub center: [f64; 2],
    pub radius: f64,
    #[serde(default)]
    pub boundary: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LabelDto {
    pub position: [f64; 2],
    pub region: usize,
}

fn vec2(p: [f64; 2]) -> Vec2 {
    Vec2::new(p[0], p[1])
}

impl GeometryFile {
    pub fn to_core(&self) -> Result<(Vec<Segment>, Vec<Arc>, Vec<BlockLabel>)> {
        let segments: Vec<Segment> = self
            .segments
            .iter()
            .map(|s| {
                let mut out = Segment::new(vec2(s.a), vec2(s.b));
                out.boundary = s.boundary.map(BoundaryId);
                out
            })
            .collect();
        let mut arcs: Vec<Arc> = Vec::with_capacity(self.arcs.len() + self.circles.len());
        for (k, a) in self.arcs.iter().enumerate() {
            let sweep = a.sweep_deg.to_radians();
            let Some(mut arc) = Arc::from_sweep(vec2(a.a), vec2(a.b), sweep, a.cw) else {
                bail!("arc {k}: degenerate chord or sweep");
            };
            arc.boundary = a.boundary.map(BoundaryId);
            arcs.push(arc);
        }
        for c in &self.circles {
            let mut arc = Arc::full_circle(vec2(c.center), c.radius);
            arc.boundary = c.boundary.map(BoundaryId);
            arcs.push(arc);
        }
        let labels = self
            .labels
            .iter()
            .map(|l| BlockLabel::new(vec2(l.position), RegionId(l.region)))
            .collect();
        Ok((segments, arcs, labels))
    }
}

#[derive(Debug, Serialize)]
pub struct TraceOut {
    pub contours: Vec<ContourOut>,
    pub stats: StatsOut,
}

#[derive(Debug, Serialize)]
pub struct ContourOut {
    pub edges: Vec<usize>,
    pub area: f64,
}

#[derive(Debug, Serialize)]
pub struct StatsOut {
    pub edges_total: usize,
    pub edges_visited: usize,
    pub walks: usize,
    pub ambiguous_branches: usize,
    pub recombinations: usize,
}

impl TraceOut {
    pub fn from_extraction(extraction: &Extraction, geom: &GeometrySlice<'_>) -> Self {
        Self {
            contours: extraction
                .contours
                .iter()
                .map(|c| ContourOut {
                    edges: c.edge_ids().map(|id| id.0).collect(),
                    area: c.area(geom),
                })
                .collect(),
            stats: StatsOut {
                edges_total: extraction.stats.edges_total,
                edges_visited: extraction.stats.edges_visited,
                walks: extraction.stats.walks,
                ambiguous_branches: extraction.stats.ambiguous_branches,
                recombinations: extraction.stats.recombinations,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PslgOut {
    pub points: Vec<[f64; 2]>,
    pub segments: Vec<[usize; 2]>,
    pub regions: Vec<RegionOut>,
}

#[derive(Debug, Serialize)]
pub struct RegionOut {
    pub seed: [f64; 2],
    pub region: usize,
    pub contour: usize,
}

impl PslgOut {
    pub fn from_pslg(pslg: &Pslg) -> Self {
        Self {
            points: pslg.points.iter().map(|p| [p.x, p.y]).collect(),
            segments: pslg.segments.clone(),
            regions: pslg
                .regions
                .iter()
                .map(|r| RegionOut {
                    seed: [r.seed.x, r.seed.y],
                    region: r.region.0,
                    contour: r.contour,
                })
                .collect(),
        }
    }
}
