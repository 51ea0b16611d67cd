use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;

use meshtrace::geom::{crossings, GeomCfg, GeometrySlice};
use meshtrace::mesh::{assign_regions, build_pslg, MeshSettings};
use meshtrace::trace::extract_contours;

mod model;
use model::{GeometryFile, PslgOut, TraceOut};

#[derive(Parser)]
#[command(name = "meshtrace")]
#[command(about = "Contour extraction and mesh input preparation for drawn geometry")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Check a drawing for crossings that must be split before meshing
    Validate {
        #[arg(long)]
        input: PathBuf,
    },
    /// Extract closed contours and write them as JSON
    Trace {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Build the mesh engine input (welded PSLG) and write it as JSON
    MeshInput {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Target element edge length forwarded to the engine; 0 lets the
        /// engine choose
        #[arg(long, default_value_t = 0.0)]
        element_size: f64,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Validate { input } => validate(&input),
        Action::Trace { input, out } => trace(&input, &out),
        Action::MeshInput {
            input,
            out,
            element_size,
        } => mesh_input(&input, &out, element_size),
    }
}

fn load(input: &Path) -> Result<GeometryFile> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", input.display()))
}

fn write_json<T: serde::Serialize>(out: &Path, value: &T) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))
}

fn validate(input: &Path) -> Result<()> {
    let file = load(input)?;
    let (segments, arcs, _labels) = file.to_core()?;
    let geom = GeometrySlice::new(&segments, &arcs);
    let cfg = GeomCfg::default();
    let found = crossings(&geom, &cfg);
    for c in &found {
        tracing::warn!(first = c.first.0, second = c.second.0, "crossing");
    }
    if !found.is_empty() {
        bail!("{} crossing(s); split them before meshing", found.len());
    }
    tracing::info!(edges = geom.len(), "no crossings");
    Ok(())
}

fn trace(input: &Path, out: &Path) -> Result<()> {
    let file = load(input)?;
    let (segments, arcs, _labels) = file.to_core()?;
    let geom = GeometrySlice::new(&segments, &arcs);
    let cfg = GeomCfg::default();
    let extraction = extract_contours(&geom, &cfg)?;
    tracing::info!(
        contours = extraction.contours.len(),
        walks = extraction.stats.walks,
        ambiguous_branches = extraction.stats.ambiguous_branches,
        recombinations = extraction.stats.recombinations,
        "trace"
    );
    write_json(out, &TraceOut::from_extraction(&extraction, &geom))
}

fn mesh_input(input: &Path, out: &Path, element_size: f64) -> Result<()> {
    let file = load(input)?;
    let (segments, arcs, labels) = file.to_core()?;
    let geom = GeometrySlice::new(&segments, &arcs);
    let cfg = GeomCfg::default();
    let settings = MeshSettings {
        target_element_size: element_size,
        ..MeshSettings::default()
    };
    let extraction = extract_contours(&geom, &cfg)?;
    let assignment = assign_regions(&geom, &extraction.contours, &labels, &cfg);
    if !assignment.unassigned.is_empty() {
        bail!(
            "label(s) {:?} lie outside every closed contour",
            assignment.unassigned
        );
    }
    let pslg = build_pslg(&geom, &extraction, &labels, &assignment, &settings, &cfg);
    tracing::info!(
        points = pslg.points.len(),
        segments = pslg.segments.len(),
        regions = pslg.regions.len(),
        "mesh_input"
    );
    write_json(out, &PslgOut::from_pslg(&pslg))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_WITH_DIAGONAL: &str = r#"{
        "segments": [
            { "a": [0.0, 0.0], "b": [1.0, 0.0] },
            { "a": [1.0, 0.0], "b": [1.0, 1.0] },
            { "a": [1.0, 1.0], "b": [0.0, 1.0] },
            { "a": [0.0, 1.0], "b": [0.0, 0.0] },
            { "a": [0.0, 0.0], "b": [1.0, 1.0] }
        ],
        "labels": [
            { "position": [0.7, 0.3], "region": 1 },
            { "position": [0.3, 0.7], "region": 2 }
        ]
    }"#;

    #[test]
    fn geometry_file_converts_to_core_types() {
        let file: GeometryFile = serde_json::from_str(SQUARE_WITH_DIAGONAL).expect("valid json");
        let (segments, arcs, labels) = file.to_core().expect("convertible");
        assert_eq!(segments.len(), 5);
        assert!(arcs.is_empty());
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn degenerate_arc_is_rejected() {
        let file: GeometryFile = serde_json::from_str(
            r#"{ "arcs": [{ "a": [0.0, 0.0], "b": [0.0, 0.0], "sweep_deg": 90.0 }] }"#,
        )
        .expect("valid json");
        assert!(file.to_core().is_err());
    }

    #[test]
    fn trace_writes_contours_artifact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("geometry.json");
        let out = dir.path().join("contours.json");
        std::fs::write(&input, SQUARE_WITH_DIAGONAL).expect("write input");
        trace(&input, &out).expect("trace runs");
        let text = std::fs::read_to_string(&out).expect("artifact exists");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["contours"].as_array().map(|a| a.len()), Some(2));
        assert_eq!(value["stats"]["edges_total"], 5);
    }

    #[test]
    fn mesh_input_writes_pslg_artifact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("geometry.json");
        let out = dir.path().join("pslg.json");
        std::fs::write(&input, SQUARE_WITH_DIAGONAL).expect("write input");
        mesh_input(&input, &out, 0.0).expect("mesh input builds");
        let text = std::fs::read_to_string(&out).expect("artifact exists");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["points"].as_array().map(|a| a.len()), Some(4));
        assert_eq!(value["segments"].as_array().map(|a| a.len()), Some(5));
        assert_eq!(value["regions"].as_array().map(|a| a.len()), Some(2));
    }

    #[test]
    fn validate_rejects_crossing_geometry() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("geometry.json");
        std::fs::write(
            &input,
            r#"{ "segments": [
                { "a": [0.0, 0.0], "b": [2.0, 2.0] },
                { "a": [0.0, 2.0], "b": [2.0, 0.0] }
            ] }"#,
        )
        .expect("write input");
        assert!(validate(&input).is_err());
    }
}
