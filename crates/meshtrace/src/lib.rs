//! Contour extraction and mesh hand-off for drawn 2D FEM geometry.
//!
//! The drawing editor owns the node, segment, arc, and block-label
//! collections; this crate borrows them per call, extracts the closed
//! contours bounding meshable regions, maps block labels to their enclosing
//! contours, and translates the result into the external mesh engine's
//! input format.
//!
//! A fresh extraction pass runs from scratch on every mesh (re)generation;
//! nothing here persists across user edits.

pub mod api;
pub mod geom;
pub mod mesh;
pub mod trace;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::{GeomCfg, Vec2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{
        Arc, BlockLabel, BoundaryId, Edge, EdgeId, GeomCfg, GeometrySlice, RegionId, Segment, Vec2,
    };
    pub use crate::mesh::{generate_mesh, MeshError, MeshSettings, Mesher};
    pub use crate::trace::{extract_contours, Contour, Extraction, TraceError, TraceStats};
}
