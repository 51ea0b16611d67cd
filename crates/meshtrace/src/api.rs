//! Curated re-export surface for application code.
//!
//! Prefer these re-exports for clarity and consistency across the editor's
//! call sites; the module tree remains available for finer-grained imports.

// Planar primitives and predicates
pub use crate::geom::{
    crossings, points_coincide, segment_arc_intersections, segments_intersect, Arc, BlockLabel,
    BoundaryId, Crossing, Edge, EdgeId, GeomCfg, GeometrySlice, RegionId, Segment, Vec2,
};
// Random drawings for tests and benches
pub use crate::geom::rand::{draw_ring, draw_wheel, ReplayToken, RingCfg, VertexCount};
// Contour extraction
pub use crate::trace::{
    extract_contours, share_common_edge, Contour, EndpointIndex, Extraction, OrientedEdge,
    TraceError, TraceStats,
};
// Mesh hand-off
pub use crate::mesh::{
    assign_regions, build_pslg, contour_contains, generate_mesh, MeshError, MeshSettings, Mesher,
    Pslg, PslgRegion, RegionAssignment, TriangleMesh,
};
