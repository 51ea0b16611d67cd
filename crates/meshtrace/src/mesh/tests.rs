use proptest::prelude::*;

use super::*;
use crate::geom::rand::{draw_ring, ReplayToken, RingCfg, VertexCount};
use crate::geom::{Arc, BlockLabel, GeomCfg, GeometrySlice, RegionId, Segment, Vec2};
use crate::trace::extract_contours;

fn v(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
    Segment::new(v(ax, ay), v(bx, by))
}

fn square_with_diagonal() -> Vec<Segment> {
    vec![
        seg(0.0, 0.0, 1.0, 0.0),
        seg(1.0, 0.0, 1.0, 1.0),
        seg(1.0, 1.0, 0.0, 1.0),
        seg(0.0, 1.0, 0.0, 0.0),
        seg(0.0, 0.0, 1.0, 1.0),
    ]
}

#[test]
fn labels_map_to_their_triangles() {
    let segments = square_with_diagonal();
    let geom = GeometrySlice::new(&segments, &[]);
    let cfg = GeomCfg::default();
    let ex = extract_contours(&geom, &cfg).expect("two triangles");
    let labels = [
        BlockLabel::new(v(0.7, 0.3), RegionId(1)), // below the diagonal
        BlockLabel::new(v(0.3, 0.7), RegionId(2)), // above the diagonal
    ];
    let assignment = assign_regions(&geom, &ex.contours, &labels, &cfg);
    assert!(assignment.unassigned.is_empty());
    let a = assignment.by_label[0].expect("assigned");
    let b = assignment.by_label[1].expect("assigned");
    assert_ne!(a, b);
    assert!(contour_contains(&ex.contours[a], labels[0].position, &geom, &cfg));
    assert!(!contour_contains(&ex.contours[a], labels[1].position, &geom, &cfg));
}

#[test]
fn nested_contours_assign_innermost() {
    let segments = vec![
        // Outer 4x4 square
        seg(-2.0, -2.0, 2.0, -2.0),
        seg(2.0, -2.0, 2.0, 2.0),
        seg(2.0, 2.0, -2.0, 2.0),
        seg(-2.0, 2.0, -2.0, -2.0),
        // Inner unit square
        seg(-0.5, -0.5, 0.5, -0.5),
        seg(0.5, -0.5, 0.5, 0.5),
        seg(0.5, 0.5, -0.5, 0.5),
        seg(-0.5, 0.5, -0.5, -0.5),
    ];
    let geom = GeometrySlice::new(&segments, &[]);
    let cfg = GeomCfg::default();
    let ex = extract_contours(&geom, &cfg).expect("two nested loops");
    assert_eq!(ex.contours.len(), 2);
    let labels = [BlockLabel::new(v(0.0, 0.0), RegionId(7))];
    let assignment = assign_regions(&geom, &ex.contours, &labels, &cfg);
    let ci = assignment.by_label[0].expect("assigned");
    assert_eq!(ex.contours[ci].len(), 4);
    assert!(ex.contours[ci].area(&geom) < 2.0);
}

#[test]
fn label_outside_everything_is_unassigned() {
    let segments = square_with_diagonal();
    let geom = GeometrySlice::new(&segments, &[]);
    let cfg = GeomCfg::default();
    let ex = extract_contours(&geom, &cfg).expect("two triangles");
    let labels = [BlockLabel::new(v(5.0, 5.0), RegionId(1))];
    let assignment = assign_regions(&geom, &ex.contours, &labels, &cfg);
    assert_eq!(assignment.by_label, vec![None]);
    assert_eq!(assignment.unassigned, vec![0]);
}

#[test]
fn pslg_welds_corners_and_emits_partition_once() {
    let segments = square_with_diagonal();
    let geom = GeometrySlice::new(&segments, &[]);
    let cfg = GeomCfg::default();
    let ex = extract_contours(&geom, &cfg).expect("two triangles");
    let labels = [
        BlockLabel::new(v(0.7, 0.3), RegionId(1)),
        BlockLabel::new(v(0.3, 0.7), RegionId(2)),
    ];
    let assignment = assign_regions(&geom, &ex.contours, &labels, &cfg);
    let pslg = build_pslg(
        &geom,
        &ex,
        &labels,
        &assignment,
        &MeshSettings::default(),
        &cfg,
    );
    // Four welded corners; the diagonal is shared by both contours but its
    // chord appears once.
    assert_eq!(pslg.points.len(), 4);
    assert_eq!(pslg.segments.len(), 5);
    assert_eq!(pslg.regions.len(), 2);
}

#[test]
fn pslg_flattens_a_circle_into_a_ring() {
    let arcs = [Arc::full_circle(v(0.0, 0.0), 1.0)];
    let geom = GeometrySlice::new(&[], &arcs);
    let cfg = GeomCfg::default();
    let ex = extract_contours(&geom, &cfg).expect("circle closes");
    let labels = [BlockLabel::new(v(0.0, 0.0), RegionId(1))];
    let assignment = assign_regions(&geom, &ex.contours, &labels, &cfg);
    assert!(assignment.unassigned.is_empty());
    let settings = MeshSettings::default();
    let pslg = build_pslg(&geom, &ex, &labels, &assignment, &settings, &cfg);
    assert!(pslg.points.len() >= 8);
    assert_eq!(pslg.points.len(), pslg.segments.len());
}

struct FanMesher;

impl Mesher for FanMesher {
    fn generate(&self, pslg: &Pslg, _settings: &MeshSettings) -> Result<TriangleMesh, MeshError> {
        if pslg.points.len() < 3 {
            return Err(MeshError::Engine {
                reason: "degenerate input".to_string(),
            });
        }
        let region = pslg
            .regions
            .first()
            .map(|r| r.region)
            .unwrap_or(RegionId(0));
        let mut elements = Vec::new();
        let mut element_regions = Vec::new();
        for k in 1..pslg.points.len() - 1 {
            elements.push([0, k, k + 1]);
            element_regions.push(region);
        }
        Ok(TriangleMesh {
            nodes: pslg.points.clone(),
            elements,
            element_regions,
        })
    }
}

#[test]
fn generate_mesh_round_trips_through_the_engine() {
    let segments = square_with_diagonal();
    let geom = GeometrySlice::new(&segments, &[]);
    let labels = [
        BlockLabel::new(v(0.7, 0.3), RegionId(1)),
        BlockLabel::new(v(0.3, 0.7), RegionId(2)),
    ];
    let mesh = generate_mesh(
        &geom,
        &labels,
        &FanMesher,
        &MeshSettings::default(),
        &GeomCfg::default(),
    )
    .expect("stub engine accepts the pslg");
    assert_eq!(mesh.nodes.len(), 4);
    assert_eq!(mesh.elements.len(), mesh.element_regions.len());
    assert!(!mesh.elements.is_empty());
}

#[test]
fn generate_mesh_rejects_unplaced_labels() {
    let segments = square_with_diagonal();
    let geom = GeometrySlice::new(&segments, &[]);
    let labels = [BlockLabel::new(v(9.0, 9.0), RegionId(1))];
    let err = generate_mesh(
        &geom,
        &labels,
        &FanMesher,
        &MeshSettings::default(),
        &GeomCfg::default(),
    )
    .expect_err("label outside the drawing");
    assert_eq!(err, MeshError::UnassignedLabel { label: 0 });
}

#[test]
fn generate_mesh_propagates_trace_failures() {
    let segments = [seg(0.0, 0.0, 1.0, 0.0)];
    let geom = GeometrySlice::new(&segments, &[]);
    let err = generate_mesh(
        &geom,
        &[],
        &FanMesher,
        &MeshSettings::default(),
        &GeomCfg::default(),
    )
    .expect_err("a lone segment cannot close");
    assert!(matches!(err, MeshError::Trace(_)));
}

proptest! {
    #[test]
    fn ring_parity_origin_in_far_out(n in 3usize..16, seed in 0u64..256) {
        let ring = draw_ring(
            RingCfg { vertex_count: VertexCount::Fixed(n), ..RingCfg::default() },
            ReplayToken { seed, index: 2 },
        );
        let geom = GeometrySlice::new(&ring, &[]);
        let cfg = GeomCfg::default();
        let ex = extract_contours(&geom, &cfg).expect("rings are closed");
        let c = &ex.contours[0];
        // The sampler is star-shaped about the origin with radius >= 0.75.
        prop_assert!(contour_contains(c, v(0.0, 0.0), &geom, &cfg));
        prop_assert!(!contour_contains(c, v(50.0, 50.0), &geom, &cfg));
    }
}
