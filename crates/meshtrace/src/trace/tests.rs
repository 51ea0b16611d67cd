//! Scenario tests for the extraction pipeline, plus property tests over
//! random rings.

use proptest::prelude::*;

use super::recombine::{recombine, Recombined};
use super::*;
use crate::geom::rand::{draw_ring, ReplayToken, RingCfg, VertexCount};
use crate::geom::{Arc, EdgeId, GeomCfg, GeometrySlice, Segment, Vec2};

fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
    Segment::new(Vec2::new(ax, ay), Vec2::new(bx, by))
}

fn extract(segments: &[Segment], arcs: &[Arc]) -> Result<Extraction, TraceError> {
    extract_contours(&GeometrySlice::new(segments, arcs), &GeomCfg::default())
}

fn triangle() -> Vec<Segment> {
    vec![
        seg(0.0, 0.0, 1.0, 0.0),
        seg(1.0, 0.0, 0.5, 1.0),
        seg(0.5, 1.0, 0.0, 0.0),
    ]
}

#[test]
fn triangle_is_one_closed_contour() {
    let ex = extract(&triangle(), &[]).expect("clean extraction");
    assert_eq!(ex.contours.len(), 1);
    assert_eq!(ex.contours[0].len(), 3);
    assert!(ex.covers_all_edges());
    assert_eq!(ex.stats.walks, 1);
    assert_eq!(ex.stats.ambiguous_branches, 0);
}

#[test]
fn disjoint_segment_reports_dangling() {
    let mut segments = triangle();
    segments.push(seg(5.0, 5.0, 6.0, 5.0));
    let err = extract(&segments, &[]).expect_err("free-floating segment");
    assert_eq!(
        err,
        TraceError::Dangling {
            edges: vec![EdgeId(3)]
        }
    );
}

#[test]
fn two_triangles_share_their_partition_edge() {
    // Square corners A(0,0) B(1,0) C(1,1) D(0,1); the diagonal C-A is drawn
    // as part of the lower triangle's outline, the upper triangle only as
    // the two remaining sides.
    let segments = vec![
        seg(0.0, 0.0, 1.0, 0.0), // A-B
        seg(1.0, 0.0, 1.0, 1.0), // B-C
        seg(1.0, 1.0, 0.0, 0.0), // C-A
        seg(1.0, 1.0, 0.0, 1.0), // C-D
        seg(0.0, 1.0, 0.0, 0.0), // D-A
    ];
    let ex = extract(&segments, &[]).expect("recombination closes both");
    assert_eq!(ex.contours.len(), 2);
    for c in &ex.contours {
        assert_eq!(c.len(), 3);
        assert!(c.contains_edge(EdgeId(2)));
    }
    assert!(share_common_edge(&ex.contours[0], &ex.contours[1]));
    assert_eq!(ex.stats.recombinations, 1);
}

#[test]
fn full_circle_is_one_single_edge_contour() {
    let circle = Arc::full_circle(Vec2::new(0.0, 0.0), 2.0);
    let ex = extract(&[], &[circle]).expect("circle closes onto itself");
    assert_eq!(ex.contours.len(), 1);
    assert_eq!(ex.contours[0].len(), 1);
    assert!(ex.covers_all_edges());
}

#[test]
fn square_with_diagonal_yields_two_triangles() {
    let segments = vec![
        seg(0.0, 0.0, 1.0, 0.0), // A-B
        seg(1.0, 0.0, 1.0, 1.0), // B-C
        seg(1.0, 1.0, 0.0, 1.0), // C-D
        seg(0.0, 1.0, 0.0, 0.0), // D-A
        seg(0.0, 0.0, 1.0, 1.0), // A-C diagonal
    ];
    let ex = extract(&segments, &[]).expect("diagonal divides the square");
    assert_eq!(ex.contours.len(), 2);
    let geom = GeometrySlice::new(&segments, &[]);
    for c in &ex.contours {
        assert_eq!(c.len(), 3);
        assert!(c.contains_edge(EdgeId(4)));
        assert!((c.area(&geom) - 0.5).abs() < 1e-9);
    }
    assert!(ex.stats.ambiguous_branches >= 1);
}

#[test]
fn chord_splits_its_host_into_two_loops() {
    // Direct recombination check: a closed square plus the lone diagonal as
    // an open path. The square is the union of the two results and drops.
    let segments = vec![
        seg(0.0, 0.0, 1.0, 0.0),
        seg(1.0, 0.0, 1.0, 1.0),
        seg(1.0, 1.0, 0.0, 1.0),
        seg(0.0, 1.0, 0.0, 0.0),
        seg(0.0, 0.0, 1.0, 1.0),
    ];
    let geom = GeometrySlice::new(&segments, &[]);
    let cfg = GeomCfg::default();
    let host = Contour::new(
        (0..4)
            .map(|k| OrientedEdge {
                id: EdgeId(k),
                rev: false,
            })
            .collect(),
    );
    let chord = Contour::new(vec![OrientedEdge {
        id: EdgeId(4),
        rev: false,
    }]);
    match recombine(&chord, &host, &geom, &cfg) {
        Recombined::Split(a, b) => {
            assert!(a.is_closed(&geom, &cfg));
            assert!(b.is_closed(&geom, &cfg));
            assert!((a.area(&geom) - 0.5).abs() < 1e-9);
            assert!((b.area(&geom) - 0.5).abs() < 1e-9);
            assert!(a.contains_edge(EdgeId(4)));
            assert!(b.contains_edge(EdgeId(4)));
        }
        _ => panic!("expected the host to split"),
    }
}

#[test]
fn pruned_tail_is_reported_dangling() {
    // A spur X-A hanging off a triangle: the cycle closes, the tail fails
    // the pass.
    let segments = vec![
        seg(-1.0, 0.0, 0.0, 0.0), // X-A spur
        seg(0.0, 0.0, 1.0, 0.0),
        seg(1.0, 0.0, 0.5, 1.0),
        seg(0.5, 1.0, 0.0, 0.0),
    ];
    let err = extract(&segments, &[]).expect_err("spur cannot close");
    assert_eq!(
        err,
        TraceError::Dangling {
            edges: vec![EdgeId(0)]
        }
    );
}

#[test]
fn wheel_of_four_spokes_yields_four_slices() {
    // Unit square rim with a hub at the center and a spoke to every corner:
    // four triangular regions, every spoke shared by two of them.
    let h = (0.5, 0.5);
    let segments = vec![
        seg(0.0, 0.0, 1.0, 0.0),
        seg(1.0, 0.0, 1.0, 1.0),
        seg(1.0, 1.0, 0.0, 1.0),
        seg(0.0, 1.0, 0.0, 0.0),
        seg(h.0, h.1, 0.0, 0.0),
        seg(h.0, h.1, 1.0, 0.0),
        seg(h.0, h.1, 1.0, 1.0),
        seg(h.0, h.1, 0.0, 1.0),
    ];
    let ex = extract(&segments, &[]).expect("wheel decomposes into slices");
    assert_eq!(ex.contours.len(), 4);
    let mut mult = [0usize; 8];
    for c in &ex.contours {
        assert_eq!(c.len(), 3);
        for id in c.edge_ids() {
            mult[id.0] += 1;
        }
    }
    assert_eq!(&mult[..4], &[1, 1, 1, 1]);
    assert_eq!(&mult[4..], &[2, 2, 2, 2]);
}

#[test]
fn walk_vertices_chain_and_closure() {
    let segments = triangle();
    let geom = GeometrySlice::new(&segments, &[]);
    let cfg = GeomCfg::default();
    let ex = extract(&segments, &[]).expect("clean extraction");
    let c = &ex.contours[0];
    assert!(c.is_closed(&geom, &cfg));
    let verts = c.vertices(&geom);
    assert_eq!(verts.len(), 4);
    for w in verts.windows(2) {
        assert!((w[0] - w[1]).norm() > cfg.eps_weld);
    }
}

#[test]
fn near_coincident_endpoints_still_weld() {
    // Sub-tolerance gaps between nominally shared corners.
    let e = 2e-7;
    let segments = vec![
        seg(0.0, 0.0, 1.0, 0.0),
        seg(1.0 + e, -e, 0.5, 1.0),
        seg(0.5 - e, 1.0 + e, e, e),
    ];
    let ex = extract(&segments, &[]).expect("weld tolerance absorbs the gaps");
    assert_eq!(ex.contours.len(), 1);
    assert_eq!(ex.contours[0].len(), 3);
}

#[test]
fn extraction_is_idempotent() {
    let segments = vec![
        seg(0.0, 0.0, 1.0, 0.0),
        seg(1.0, 0.0, 1.0, 1.0),
        seg(1.0, 1.0, 0.0, 1.0),
        seg(0.0, 1.0, 0.0, 0.0),
        seg(0.0, 0.0, 1.0, 1.0),
    ];
    let first = extract(&segments, &[]).expect("first pass");
    let second = extract(&segments, &[]).expect("second pass");
    assert_eq!(first.contours, second.contours);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn share_common_edge_is_existence_only() {
    let a = Contour::new(vec![
        OrientedEdge {
            id: EdgeId(0),
            rev: false,
        },
        OrientedEdge {
            id: EdgeId(1),
            rev: false,
        },
    ]);
    let b = Contour::new(vec![
        OrientedEdge {
            id: EdgeId(1),
            rev: true,
        },
        OrientedEdge {
            id: EdgeId(2),
            rev: false,
        },
    ]);
    let c = Contour::new(vec![OrientedEdge {
        id: EdgeId(3),
        rev: false,
    }]);
    assert!(share_common_edge(&a, &b));
    assert!(!share_common_edge(&a, &c));
}

proptest! {
    #[test]
    fn random_rings_extract_to_one_cycle(n in 3usize..24, seed in 0u64..512) {
        let ring = draw_ring(
            RingCfg { vertex_count: VertexCount::Fixed(n), ..RingCfg::default() },
            ReplayToken { seed, index: 0 },
        );
        let geom = GeometrySlice::new(&ring, &[]);
        let ex = extract_contours(&geom, &GeomCfg::default()).expect("rings are closed");
        prop_assert_eq!(ex.contours.len(), 1);
        prop_assert_eq!(ex.contours[0].len(), n);
        prop_assert!(ex.covers_all_edges());
        prop_assert!(ex.contours[0].is_closed(&geom, &GeomCfg::default()));
    }

    #[test]
    fn random_ring_edge_cover_is_exact(n in 3usize..16, seed in 0u64..256) {
        let ring = draw_ring(
            RingCfg { vertex_count: VertexCount::Fixed(n), ..RingCfg::default() },
            ReplayToken { seed, index: 1 },
        );
        let geom = GeometrySlice::new(&ring, &[]);
        let ex = extract_contours(&geom, &GeomCfg::default()).expect("rings are closed");
        let mut seen = vec![0usize; geom.len()];
        for c in &ex.contours {
            for id in c.edge_ids() {
                seen[id.0] += 1;
            }
        }
        prop_assert!(seen.iter().all(|&m| m == 1));
    }
}
