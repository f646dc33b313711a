//! Parametric silhouettes that the cluster swarms morph between.

use crate::constants::*;
use crate::rng::{Mulberry32, UnitRng};
use fnv::FnvHashMap;
use std::f64::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Heart,
    Star,
    Butterfly,
    Frog,
    Cloud,
}

/// Fixed cycle order used by the clusters.
pub const SHAPE_CYCLE: [ShapeKind; 5] = [
    ShapeKind::Heart,
    ShapeKind::Star,
    ShapeKind::Butterfly,
    ShapeKind::Frog,
    ShapeKind::Cloud,
];

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Heart => "heart",
            ShapeKind::Star => "star",
            ShapeKind::Butterfly => "butterfly",
            ShapeKind::Frog => "frog",
            ShapeKind::Cloud => "cloud",
        }
    }

    /// Position in `SHAPE_CYCLE`.
    pub fn cycle_index(self) -> usize {
        SHAPE_CYCLE.iter().position(|k| *k == self).unwrap_or(0)
    }

    pub fn from_cycle_index(i: usize) -> Self {
        SHAPE_CYCLE[i % SHAPE_CYCLE.len()]
    }
}

/// Precomputed coordinates for one silhouette, relative to the cluster anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapePoints {
    pub xs: Vec<f32>,
    pub ys: Vec<f32>,
}

impl ShapePoints {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

/// Evaluate `kind` at `n` equally spaced angles, scale and jitter it.
///
/// Pure: identical `(kind, n, seed)` always gives bitwise-identical arrays.
pub fn generate_shape(kind: ShapeKind, n: usize, seed: u32) -> ShapePoints {
    let mut rng = Mulberry32::new(seed);
    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    let scale = f64::from(SHAPE_SCALE);
    let jitter = f64::from(SHAPE_JITTER);
    let head = (n as f64 * f64::from(FROG_HEAD_FRACTION)).floor() as usize;

    for i in 0..n {
        let t = (i as f64 / n as f64) * 2.0 * PI;
        let (x, y) = match kind {
            ShapeKind::Heart => (
                16.0 * t.sin().powi(3),
                -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos()),
            ),
            ShapeKind::Star => {
                let sector = (t / (PI / 5.0)).floor() as i64 % 2;
                let radius = if sector == 0 { 22.0 } else { 11.0 };
                (radius * t.cos(), radius * t.sin())
            }
            ShapeKind::Butterfly => {
                let r = t.sin().exp() - 2.0 * (4.0 * t).cos() + ((2.0 * t - PI) / 24.0).sin().powi(5);
                (r * t.sin() * 10.0, -r * t.cos() * 10.0)
            }
            ShapeKind::Frog => {
                let lift = if i < head { -f64::from(FROG_HEAD_LIFT) } else { 0.0 };
                (20.0 * t.cos() * t.sin().powi(2), -18.0 * t.sin() + lift)
            }
            ShapeKind::Cloud => (25.0 * t.cos(), 12.0 * t.sin() + rng.range(0.0, 10.0)),
        };
        xs.push((x * scale + rng.range(-jitter, jitter)) as f32);
        ys.push((y * scale + rng.range(-jitter, jitter)) as f32);
    }

    ShapePoints { xs, ys }
}

/// Every catalog shape for one cluster, looked up by kind at draw time.
#[derive(Clone, Debug, Default)]
pub struct ShapeSet {
    shapes: FnvHashMap<ShapeKind, ShapePoints>,
}

impl ShapeSet {
    /// Seeds each shape as `base_seed + name.len() * stride`.
    pub fn build(n: usize, base_seed: u32, stride: u32) -> Self {
        let shapes = SHAPE_CYCLE
            .iter()
            .map(|&kind| {
                let seed = base_seed.wrapping_add(kind.name().len() as u32 * stride);
                (kind, generate_shape(kind, n, seed))
            })
            .collect();
        Self { shapes }
    }

    pub fn get(&self, kind: ShapeKind) -> Option<&ShapePoints> {
        self.shapes.get(&kind)
    }

    pub fn point_count(&self) -> usize {
        self.shapes.values().next().map_or(0, ShapePoints::len)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
