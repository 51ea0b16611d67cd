//! Contour extraction pipeline.
//!
//! Purpose
//! - Turn the unordered segment/arc soup of a drawing into the set of closed
//!   contours bounding meshable regions: walk connectivity edge by edge,
//!   prune dangling lines, and recombine contours that improperly share a
//!   partition, until every edge sits in a genuine cycle.
//!
//! Why this design
//! - Visitation state lives in a walker created fresh per call, never on the
//!   shared geometry, so repeated mesh regenerations stay re-entrant.
//! - The whole pass runs synchronously on the calling thread and fails as a
//!   unit; callers get either a full closed-contour cover or the offending
//!   edges.
//!
//! Code cross-refs: `geom::{GeometrySlice, GeomCfg}`, `mesh::{regions, pslg}`.

mod extract;
mod index;
mod prune;
mod recombine;
mod types;
mod walk;

pub use extract::extract_contours;
pub use index::EndpointIndex;
pub use types::{share_common_edge, Contour, Extraction, OrientedEdge, TraceError, TraceStats};

#[cfg(test)]
mod tests;
