//! Flow particles and morphing shape clusters.
//!
//! `ParticleField` owns every per-build array. `step` advances the simulation
//! and `render` only reads state, so either can be driven without a real
//! drawing surface.

use crate::constants::*;
use crate::math::{clamp01, ease_in_out_quad, hue_bucket, lerp, wrap_phase};
use crate::params::{FieldParams, FieldProfile, Viewport};
use crate::rng::{Mulberry32, UnitRng};
use crate::shapes::{ShapeKind, ShapeSet, SHAPE_CYCLE};
use crate::sprite::{SizeClass, SpriteKey, SpriteTable};
use crate::surface::{Blend, Surface};
use glam::Vec2;
use std::f32::consts::TAU;

/// Ambient background dots, stored as parallel arrays.
#[derive(Clone, Debug, Default)]
pub struct FlowParticles {
    pub xs: Vec<f32>,
    pub ys: Vec<f32>,
    pub vxs: Vec<f32>,
    pub vys: Vec<f32>,
    pub alphas: Vec<f32>,
    pub phases: Vec<f32>,
    pub speeds: Vec<f32>,
    pub hues: Vec<u16>,
    pub sizes: Vec<SizeClass>,
}

impl FlowParticles {
    pub fn generate(viewport: &Viewport, profile: &FieldProfile, hue_buckets: usize) -> Self {
        let n = profile.flow_count;
        let mut rng = Mulberry32::new(FLOW_SEED);
        let mut p = FlowParticles {
            xs: Vec::with_capacity(n),
            ys: Vec::with_capacity(n),
            vxs: Vec::with_capacity(n),
            vys: Vec::with_capacity(n),
            alphas: Vec::with_capacity(n),
            phases: Vec::with_capacity(n),
            speeds: Vec::with_capacity(n),
            hues: Vec::with_capacity(n),
            sizes: Vec::with_capacity(n),
        };
        let (alo, ahi) = profile.alpha_range;
        for _ in 0..n {
            p.xs.push(rng.range_f32(0.0, viewport.width()));
            p.ys.push(rng.range_f32(0.0, viewport.height()));
            p.vxs.push(profile.base_velocity.x + rng.range_f32(FLOW_VX_JITTER.0, FLOW_VX_JITTER.1));
            p.vys.push(profile.base_velocity.y + rng.range_f32(FLOW_VY_JITTER.0, FLOW_VY_JITTER.1));
            p.alphas.push(rng.range_f32(alo, ahi));
            p.phases.push(rng.range_f32(0.0, TAU) % TAU);
            p.speeds.push(rng.range_f32(FLOW_SPEED_RANGE.0, FLOW_SPEED_RANGE.1));
            p.hues.push(draw_bucket(&mut rng, hue_buckets));
            p.sizes.push(SizeClass::from_pick(rng.unit() as f32, FLOW_SIZE_CUTS));
        }
        p
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    #[inline]
    pub fn is_bloom(i: usize) -> bool {
        i % FLOW_BLOOM_EVERY == 0
    }

    #[inline]
    pub fn twinkle(&self, i: usize) -> f32 {
        FLOW_TWINKLE_BASE + FLOW_TWINKLE_SPAN * self.phases[i].sin()
    }

    fn advance(&mut self, dt: f32, bounds: Vec2) {
        for i in 0..self.xs.len() {
            let (x, y) = wrap_position(
                self.xs[i] + self.vxs[i] * dt,
                self.ys[i] + self.vys[i] * dt,
                bounds,
            );
            self.xs[i] = x;
            self.ys[i] = y;
            self.phases[i] = wrap_phase(self.phases[i] + FLOW_PHASE_RATE * self.speeds[i] * dt);
        }
    }
}

/// Toroidal wrap with a padding margin outside the viewport.
#[inline]
pub fn wrap_position(mut x: f32, mut y: f32, bounds: Vec2) -> (f32, f32) {
    let pad = WRAP_PADDING_PX;
    if x < -pad {
        x = bounds.x + pad;
    }
    if x > bounds.x + pad {
        x = -pad;
    }
    if y < -pad {
        y = bounds.y + pad;
    }
    if y > bounds.y + pad {
        y = -pad;
    }
    (x, y)
}

fn draw_bucket(rng: &mut Mulberry32, hue_buckets: usize) -> u16 {
    let raw = rng.range(0.0, hue_buckets as f64).floor() as usize;
    hue_bucket(raw, hue_buckets) as u16
}

/// Per-point colour/size/phase shared by every shape, so a morph only moves
/// points and never recolours them.
#[derive(Clone, Debug, Default)]
pub struct ClusterPoints {
    pub hues: Vec<u16>,
    pub sizes: Vec<SizeClass>,
    pub phases: Vec<f32>,
}

impl ClusterPoints {
    pub fn generate(n: usize, hue_buckets: usize) -> Self {
        let mut rng = Mulberry32::new(CLUSTER_ATTR_SEED);
        let mut pts = ClusterPoints {
            hues: Vec::with_capacity(n),
            sizes: Vec::with_capacity(n),
            phases: Vec::with_capacity(n),
        };
        for _ in 0..n {
            pts.hues.push(draw_bucket(&mut rng, hue_buckets));
            pts.sizes.push(SizeClass::from_pick(rng.unit() as f32, CLUSTER_SIZE_CUTS));
            pts.phases.push(rng.range_f32(0.0, TAU) % TAU);
        }
        pts
    }

    pub fn len(&self) -> usize {
        self.hues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hues.is_empty()
    }

    #[inline]
    pub fn is_bloom(i: usize) -> bool {
        i % CLUSTER_BLOOM_EVERY == 0
    }

    fn advance(&mut self, dt: f32) {
        for p in &mut self.phases {
            *p = wrap_phase(*p + CLUSTER_PHASE_RATE * dt);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClusterSide {
    Left,
    Right,
}

/// Fixed identity and timing of one cluster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterSpec {
    pub side: ClusterSide,
    pub first_shape: usize,
    pub interval_ms: f64,
    pub morph_ms: f64,
    pub seed: u32,
    pub seed_stride: u32,
    pub hue_bias: usize,
}

impl ClusterSpec {
    pub const LEFT: ClusterSpec = ClusterSpec {
        side: ClusterSide::Left,
        first_shape: 0,
        interval_ms: 7000.0,
        morph_ms: 2200.0,
        seed: LEFT_CLUSTER_SEED,
        seed_stride: LEFT_SHAPE_SEED_STRIDE,
        hue_bias: 8,
    };

    pub const RIGHT: ClusterSpec = ClusterSpec {
        side: ClusterSide::Right,
        first_shape: 1,
        interval_ms: 9500.0,
        morph_ms: 2400.0,
        seed: RIGHT_CLUSTER_SEED,
        seed_stride: RIGHT_SHAPE_SEED_STRIDE,
        hue_bias: 26,
    };

    pub fn anchor(&self, viewport: &Viewport, profile: &FieldProfile) -> Vec2 {
        let frac = match self.side {
            ClusterSide::Left => profile.left_anchor,
            ClusterSide::Right => profile.right_anchor,
        };
        frac * viewport.size
    }
}

/// Current/next shape pair advanced by a wall-clock timer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeCycle {
    pub current: usize,
    pub next: usize,
    pub started_ms: f64,
    pub interval_ms: f64,
    pub morph_ms: f64,
}

impl ShapeCycle {
    pub fn new(spec: &ClusterSpec, now_ms: f64) -> Self {
        let n = SHAPE_CYCLE.len();
        Self {
            current: spec.first_shape % n,
            next: (spec.first_shape + 1) % n,
            started_ms: now_ms,
            interval_ms: spec.interval_ms,
            morph_ms: spec.morph_ms,
        }
    }

    /// Returns true when the timer elapsed and the pair moved on.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        if now_ms - self.started_ms < self.interval_ms {
            return false;
        }
        self.current = self.next;
        self.next = (self.next + 1) % SHAPE_CYCLE.len();
        self.started_ms = now_ms;
        true
    }

    /// Eased interpolation factor from `current` towards `next`.
    pub fn morph_factor(&self, now_ms: f64) -> f32 {
        let raw = ((now_ms - self.started_ms) / self.morph_ms.max(f64::EPSILON)) as f32;
        ease_in_out_quad(clamp01(raw))
    }

    pub fn current_kind(&self) -> ShapeKind {
        ShapeKind::from_cycle_index(self.current)
    }

    pub fn next_kind(&self) -> ShapeKind {
        ShapeKind::from_cycle_index(self.next)
    }
}

#[derive(Clone, Debug)]
pub struct Cluster {
    pub spec: ClusterSpec,
    pub cycle: ShapeCycle,
    pub shapes: ShapeSet,
}

impl Cluster {
    fn new(spec: ClusterSpec, points: usize, now_ms: f64) -> Self {
        Self {
            spec,
            cycle: ShapeCycle::new(&spec, now_ms),
            shapes: ShapeSet::build(points, spec.seed, spec.seed_stride),
        }
    }
}

/// Slow two-frequency wander applied to both cluster anchors.
pub fn cluster_drift(now_ms: f64) -> Vec2 {
    let x = (now_ms * DRIFT_X_SLOW.0).sin() as f32 * DRIFT_X_SLOW.1
        + (now_ms * DRIFT_X_FAST.0).sin() as f32 * DRIFT_X_FAST.1;
    let y = (now_ms * DRIFT_Y.0).cos() as f32 * DRIFT_Y.1;
    Vec2::new(x, y)
}

// time-based colour rotation, always inside [0, buckets)
#[inline]
fn time_hue(now_ms: f64, period_ms: f64, buckets: usize) -> usize {
    let steps = (now_ms.max(0.0) / period_ms).floor() as u64;
    (steps % buckets.max(1) as u64) as usize
}

pub struct ParticleField {
    params: FieldParams,
    profile: FieldProfile,
    viewport: Viewport,
    flow: FlowParticles,
    points: ClusterPoints,
    clusters: [Cluster; 2],
    sprites: SpriteTable,
}

impl ParticleField {
    pub fn new(params: FieldParams, viewport: Viewport, now_ms: f64) -> Self {
        let profile = FieldProfile::for_viewport(&viewport);
        let n = profile.cluster_points;
        let mut field = Self {
            flow: FlowParticles::default(),
            points: ClusterPoints::default(),
            clusters: [
                Cluster::new(ClusterSpec::LEFT, n, now_ms),
                Cluster::new(ClusterSpec::RIGHT, n, now_ms),
            ],
            sprites: SpriteTable::default(),
            params,
            profile,
            viewport,
        };
        field.regenerate();
        field
    }

    /// Regenerate every per-build array for a new viewport. Shape-cycle
    /// timers carry over so a resize never restarts a morph.
    pub fn rebuild(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.profile = FieldProfile::for_viewport(&viewport);
        let n = self.profile.cluster_points;
        for c in &mut self.clusters {
            c.shapes = ShapeSet::build(n, c.spec.seed, c.spec.seed_stride);
        }
        self.regenerate();
    }

    fn regenerate(&mut self) {
        let h = self.params.hue_buckets;
        self.flow = FlowParticles::generate(&self.viewport, &self.profile, h);
        self.points = ClusterPoints::generate(self.profile.cluster_points, h);
        self.sprites = SpriteTable::build(
            h,
            self.profile.sprite_sizes,
            self.profile.sprite_cores,
            self.params.bloom_scale,
        );
        log::debug!(
            "[field] build {}x{} dpr={} flow={} cluster_points={} sprites={:?}",
            self.viewport.width(),
            self.viewport.height(),
            self.viewport.dpr,
            self.flow.len(),
            self.points.len(),
            self.sprites.shape()
        );
    }

    /// Advance the simulation by `dt_sec`; `now_ms` drives the shape timers.
    pub fn step(&mut self, dt_sec: f32, now_ms: f64) {
        self.flow.advance(dt_sec, self.viewport.size);
        self.points.advance(dt_sec);
        for c in &mut self.clusters {
            if c.cycle.advance(now_ms) {
                log::debug!(
                    "[field] {:?} cluster -> {} (next {})",
                    c.spec.side,
                    c.cycle.current_kind().name(),
                    c.cycle.next_kind().name()
                );
            }
        }
    }

    pub fn render<D: Surface + ?Sized>(&self, surface: &mut D, now_ms: f64) {
        let h = self.params.hue_buckets;
        surface.clear(&self.viewport);

        let shift = time_hue(now_ms, FLOW_HUE_PERIOD_MS, h);
        surface.set_blend(Blend::Normal);
        for i in 0..self.flow.len() {
            let alpha = self.flow.alphas[i] * self.flow.twinkle(i);
            let hue = hue_bucket(usize::from(self.flow.hues[i]) + shift, h);
            let key = SpriteKey::base(hue, self.flow.sizes[i]);
            self.blit(surface, key, self.flow.xs[i], self.flow.ys[i], alpha);
        }

        surface.set_blend(Blend::Screen);
        for i in (0..self.flow.len()).filter(|i| FlowParticles::is_bloom(*i)) {
            let alpha = self.flow.alphas[i] * self.flow.twinkle(i) * FLOW_BLOOM_ALPHA;
            let hue = hue_bucket(usize::from(self.flow.hues[i]) + shift + FLOW_BLOOM_HUE_OFFSET, h);
            let key = SpriteKey::bloom(hue, self.flow.sizes[i]);
            self.blit(surface, key, self.flow.xs[i], self.flow.ys[i], alpha);
        }

        let drift = cluster_drift(now_ms);
        for c in &self.clusters {
            self.render_cluster(surface, c, drift, now_ms);
        }
    }

    fn render_cluster<D: Surface + ?Sized>(&self, surface: &mut D, c: &Cluster, drift: Vec2, now_ms: f64) {
        let (Some(a), Some(b)) = (
            c.shapes.get(c.cycle.current_kind()),
            c.shapes.get(c.cycle.next_kind()),
        ) else {
            return;
        };
        let h = self.params.hue_buckets;
        let t = c.cycle.morph_factor(now_ms);
        let origin = c.spec.anchor(&self.viewport, &self.profile) + drift;
        let shift = time_hue(now_ms, CLUSTER_HUE_PERIOD_MS, h) + c.spec.hue_bias;
        let n = self.points.len().min(a.len()).min(b.len());

        let point = |i: usize| {
            let x = origin.x + lerp(a.xs[i], b.xs[i], t);
            let y = origin.y + lerp(a.ys[i], b.ys[i], t);
            let tw = CLUSTER_TWINKLE_BASE + CLUSTER_TWINKLE_SPAN * self.points.phases[i].sin();
            let alpha = CLUSTER_ALPHA_BASE + tw * CLUSTER_ALPHA_SPAN;
            let hue = hue_bucket(usize::from(self.points.hues[i]) + shift + i % CLUSTER_HUE_SPREAD, h);
            (x, y, alpha, hue)
        };

        surface.set_blend(Blend::Normal);
        for i in 0..n {
            let (x, y, alpha, hue) = point(i);
            self.blit(surface, SpriteKey::base(hue, self.points.sizes[i]), x, y, alpha);
        }
        surface.set_blend(Blend::Screen);
        for i in (0..n).filter(|i| ClusterPoints::is_bloom(*i)) {
            let (x, y, alpha, hue) = point(i);
            let key = SpriteKey::bloom(hue, self.points.sizes[i]);
            self.blit(surface, key, x, y, alpha * CLUSTER_BLOOM_ALPHA);
        }
    }

    // centre the sprite on (x, y)
    #[inline]
    fn blit<D: Surface + ?Sized>(&self, surface: &mut D, key: SpriteKey, x: f32, y: f32, alpha: f32) {
        if let Some(img) = self.sprites.get(key) {
            let half = img.size as f32 / 2.0;
            surface.draw_sprite(key, x - half, y - half, alpha);
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn profile(&self) -> &FieldProfile {
        &self.profile
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn flow(&self) -> &FlowParticles {
        &self.flow
    }

    pub fn cluster_points(&self) -> &ClusterPoints {
        &self.points
    }

    pub fn clusters(&self) -> &[Cluster; 2] {
        &self.clusters
    }

    pub fn sprites(&self) -> &SpriteTable {
        &self.sprites
    }
}
