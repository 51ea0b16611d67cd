//! Planar geometry primitives and predicates for drawn geometry.
//!
//! Purpose
//! - Provide the segment/arc edge universe the contour tracer walks, with
//!   eps-aware endpoint identity and the intersection predicates the
//!   containment and validation passes rely on.
//!
//! Why this design
//! - The editor owns all collections; everything here is `Copy` value types
//!   plus a borrowed `GeometrySlice` view, so the extraction pass cannot
//!   outlive or mutate the drawing.
//!
//! Code cross-refs: `trace::{walk, extract}`, `mesh::{regions, pslg}`.

mod intersect;
pub mod rand;
mod types;

pub(crate) use intersect::cross2;
pub use intersect::{crossings, segment_arc_intersections, segments_intersect, Crossing};
pub use types::{
    points_coincide, Arc, BlockLabel, BoundaryId, Edge, EdgeId, GeomCfg, GeometrySlice, RegionId,
    Segment, Vec2,
};
