//! Mesh invocation adapter.
//!
//! Purpose
//! - Bridge the extracted contour set to the external mesh engine: map each
//!   block label to its enclosing contour by ray parity, flatten the
//!   boundary into a welded PSLG, and read node/triangle results back.
//!
//! Code cross-refs: `trace::{extract_contours, Contour}`, `geom::intersect`.

mod pslg;
mod regions;

pub use pslg::{
    build_pslg, generate_mesh, MeshError, MeshSettings, Mesher, Pslg, PslgRegion, TriangleMesh,
};
pub use regions::{assign_regions, contour_contains, RegionAssignment};

#[cfg(test)]
mod tests;
