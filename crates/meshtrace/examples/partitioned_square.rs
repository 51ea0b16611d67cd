//! End-to-end probe: extract the contours of a partitioned square, place two
//! region labels, and build the mesh engine input.
//!
//! Purpose
//! - Exercise the full pipeline on the canonical partition case (a square
//!   divided by one diagonal) and print the resulting counts, so a change to
//!   the walker or recombiner is easy to sanity-check by eye.

use meshtrace::mesh::{assign_regions, build_pslg, MeshSettings};
use meshtrace::prelude::*;

fn main() {
    let segments = vec![
        Segment::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)),
        Segment::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)),
        Segment::new(Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)),
        Segment::new(Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0)),
        Segment::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)),
    ];
    let labels = vec![
        BlockLabel::new(Vec2::new(0.7, 0.3), RegionId(1)),
        BlockLabel::new(Vec2::new(0.3, 0.7), RegionId(2)),
    ];
    let geom = GeometrySlice::new(&segments, &[]);
    let cfg = GeomCfg::default();

    let extraction = extract_contours(&geom, &cfg).expect("square with diagonal extracts");
    println!(
        "contours={} walks={} ambiguous_branches={} recombinations={}",
        extraction.contours.len(),
        extraction.stats.walks,
        extraction.stats.ambiguous_branches,
        extraction.stats.recombinations
    );
    for (k, c) in extraction.contours.iter().enumerate() {
        println!("contour_{k} edges={} area={:.6}", c.len(), c.area(&geom));
    }

    let assignment = assign_regions(&geom, &extraction.contours, &labels, &cfg);
    for (li, ci) in assignment.by_label.iter().enumerate() {
        match ci {
            Some(ci) => println!("label_{li} contour={ci}"),
            None => println!("label_{li} unassigned"),
        }
    }

    let pslg = build_pslg(
        &geom,
        &extraction,
        &labels,
        &assignment,
        &MeshSettings::default(),
        &cfg,
    );
    println!(
        "pslg_points={} pslg_segments={} pslg_regions={}",
        pslg.points.len(),
        pslg.segments.len(),
        pslg.regions.len()
    );
}
