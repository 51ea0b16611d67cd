//! Mesher hand-off: settings, PSLG translation, and the engine seam.
//!
//! The external engine consumes a planar straight-line graph (welded points,
//! index segments, one seed per region) and hands back nodes and triangles.
//! Everything engine-specific stays behind the [`Mesher`] trait.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::regions::{assign_regions, RegionAssignment};
use crate::geom::{BlockLabel, Edge, GeomCfg, GeometrySlice, RegionId, Vec2};
use crate::trace::{extract_contours, Extraction, TraceError};

/// Knobs forwarded to the external mesh engine.
#[derive(Clone, Copy, Debug)]
pub struct MeshSettings {
    /// Target element edge length; zero lets the engine choose.
    pub target_element_size: f64,
    /// Minimum triangle angle requested from the engine, in degrees.
    pub min_angle_deg: f64,
    /// Maximum angular step when flattening arcs into boundary chords.
    pub arc_max_step_rad: f64,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            target_element_size: 0.0,
            min_angle_deg: 30.0,
            arc_max_step_rad: std::f64::consts::PI / 16.0,
        }
    }
}

/// Planar straight-line graph handed to the mesh engine.
#[derive(Clone, Debug, Default)]
pub struct Pslg {
    pub points: Vec<Vec2>,
    pub segments: Vec<[usize; 2]>,
    pub regions: Vec<PslgRegion>,
}

#[derive(Clone, Copy, Debug)]
pub struct PslgRegion {
    pub seed: Vec2,
    pub region: RegionId,
    /// Index of the enclosing contour in the extraction.
    pub contour: usize,
}

/// Node/triangle results read back from the engine.
#[derive(Clone, Debug, Default)]
pub struct TriangleMesh {
    pub nodes: Vec<Vec2>,
    pub elements: Vec<[usize; 3]>,
    /// Region identity per element.
    pub element_regions: Vec<RegionId>,
}

/// External mesh engine seam.
pub trait Mesher {
    fn generate(&self, pslg: &Pslg, settings: &MeshSettings) -> Result<TriangleMesh, MeshError>;
}

/// Mesh-generation failures around and inside the engine call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    Trace(TraceError),
    /// A block label fell outside every closed contour.
    UnassignedLabel { label: usize },
    /// The engine rejected the input or failed internally.
    Engine { reason: String },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::Trace(e) => write!(f, "contour extraction failed: {e}"),
            MeshError::UnassignedLabel { label } => {
                write!(f, "block label {label} lies outside every closed contour")
            }
            MeshError::Engine { reason } => write!(f, "mesh engine failed: {reason}"),
        }
    }
}

impl std::error::Error for MeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshError::Trace(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TraceError> for MeshError {
    fn from(e: TraceError) -> Self {
        MeshError::Trace(e)
    }
}

/// Welds coincident coordinates to a single node id through a snap grid.
struct PointWelder {
    cell: f64,
    eps: f64,
    cells: HashMap<(i64, i64), Vec<usize>>,
    points: Vec<Vec2>,
}

impl PointWelder {
    fn new(cfg: &GeomCfg) -> Self {
        Self {
            cell: cfg.eps_weld.max(1e-12) * 4.0,
            eps: cfg.eps_weld,
            cells: HashMap::new(),
            points: Vec::new(),
        }
    }

    #[inline]
    fn key(&self, p: Vec2) -> (i64, i64) {
        (
            (p.x / self.cell).floor() as i64,
            (p.y / self.cell).floor() as i64,
        )
    }

    fn node(&mut self, p: Vec2) -> usize {
        let (kx, ky) = self.key(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(ids) = self.cells.get(&(kx + dx, ky + dy)) else {
                    continue;
                };
                for &i in ids {
                    if (self.points[i] - p).norm() <= self.eps {
                        return i;
                    }
                }
            }
        }
        let id = self.points.len();
        self.points.push(p);
        self.cells.entry((kx, ky)).or_default().push(id);
        id
    }
}

/// Translate extracted contours plus label assignment into the engine input.
///
/// Arc edges flatten to chords at the configured angular step, coincident
/// endpoints weld to one node, and partition edges shared by two contours
/// emit their chords once.
pub fn build_pslg(
    geom: &GeometrySlice<'_>,
    extraction: &Extraction,
    labels: &[BlockLabel],
    assignment: &RegionAssignment,
    settings: &MeshSettings,
    cfg: &GeomCfg,
) -> Pslg {
    let mut welder = PointWelder::new(cfg);
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    let mut segments: Vec<[usize; 2]> = Vec::new();
    for contour in &extraction.contours {
        for step in &contour.steps {
            let pts = match geom.edge(step.id) {
                Edge::Segment(s) => vec![s.a, s.b],
                Edge::Arc(c) => c.discretize(settings.arc_max_step_rad),
            };
            for w in pts.windows(2) {
                let (u, v) = (welder.node(w[0]), welder.node(w[1]));
                if u == v {
                    continue;
                }
                let key = (u.min(v), u.max(v));
                if seen.insert(key) {
                    segments.push([u, v]);
                }
            }
        }
    }
    let mut regions = Vec::new();
    for (li, label) in labels.iter().enumerate() {
        if let Some(ci) = assignment.by_label.get(li).copied().flatten() {
            regions.push(PslgRegion {
                seed: label.position,
                region: label.region,
                contour: ci,
            });
        }
    }
    Pslg {
        points: welder.points,
        segments,
        regions,
    }
}

/// One-shot driver mirroring the application's "generate mesh" action:
/// extract contours, place every label, translate, and invoke the engine.
pub fn generate_mesh(
    geom: &GeometrySlice<'_>,
    labels: &[BlockLabel],
    mesher: &dyn Mesher,
    settings: &MeshSettings,
    cfg: &GeomCfg,
) -> Result<TriangleMesh, MeshError> {
    let extraction = extract_contours(geom, cfg)?;
    let assignment = assign_regions(geom, &extraction.contours, labels, cfg);
    if let Some(&label) = assignment.unassigned.first() {
        return Err(MeshError::UnassignedLabel { label });
    }
    let pslg = build_pslg(geom, &extraction, labels, &assignment, settings, cfg);
    mesher.generate(&pslg, settings)
}
