//! Deterministic random drawings for tests and benches.
//!
//! Model
//! - Place `n` jittered angles on [0, 2π), jitter the radii, and join the
//!   resulting vertices into a closed ring of segments. The jitter bounds keep
//!   the ring simple and star-shaped about the origin.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::{Segment, Vec2};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Ring sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RingCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radial jitter (relative amplitude). Radii = `base_radius * (1 + u)`,
    /// with `u ∈ [-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    pub base_radius: f64,
    /// Random global phase in [0, 2π)?
    pub random_phase: bool,
}

impl Default for RingCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 1.0,
            random_phase: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

fn ring_vertices(cfg: RingCfg, rng: &mut StdRng) -> Vec<Vec2> {
    let n = cfg.vertex_count.sample(rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.max(0.0);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    (0..n)
        .map(|k| {
            let th = phase + (k as f64) * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            let r = (1.0 + u).max(1e-6) * r0;
            Vec2::new(th.cos() * r, th.sin() * r)
        })
        .collect()
}

/// Draw a closed ring of segments around the origin.
pub fn draw_ring(cfg: RingCfg, tok: ReplayToken) -> Vec<Segment> {
    let mut rng = tok.to_std_rng();
    let verts = ring_vertices(cfg, &mut rng);
    let n = verts.len();
    (0..n)
        .map(|k| Segment::new(verts[k], verts[(k + 1) % n]))
        .collect()
}

/// Draw a ring plus spokes from the origin hub to every rim vertex.
/// Produces `n` pie-slice regions; exercises junctions and recombination.
pub fn draw_wheel(cfg: RingCfg, tok: ReplayToken) -> (Vec<Segment>, Vec2) {
    let mut rng = tok.to_std_rng();
    let verts = ring_vertices(cfg, &mut rng);
    let hub = Vec2::new(0.0, 0.0);
    let n = verts.len();
    let mut out: Vec<Segment> = (0..n)
        .map(|k| Segment::new(verts[k], verts[(k + 1) % n]))
        .collect();
    out.extend(verts.iter().map(|v| Segment::new(hub, *v)));
    (out, hub)
}
