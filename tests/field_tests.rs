mod common;

use common::{desktop, mobile, viewport, RecordingSurface};
use folio_core::{
    cluster_drift, wrap_phase, wrap_position, Blend, ClusterSpec, ConfigError, FieldParams,
    FieldProfile, NullSurface, ParticleField, ShapeCycle, ShapeKind, Viewport, HUE_BUCKETS,
    WRAP_PADDING_PX,
};
use glam::Vec2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::TAU;

fn field(vp: Viewport) -> ParticleField {
    ParticleField::new(FieldParams::default(), vp, 0.0)
}

#[test]
fn wrap_phase_always_lands_in_one_turn() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..10_000 {
        let p = rng.gen_range(-1.0e4f32..1.0e4);
        let w = wrap_phase(p);
        assert!((0.0..TAU).contains(&w), "{p} wrapped to {w}");
    }
    assert_eq!(wrap_phase(-1.0e-9), 0.0);
    assert_eq!(wrap_phase(f32::NAN), 0.0);
}

#[test]
fn phases_stay_wrapped_over_many_steps() {
    let mut f = field(viewport(900.0, 600.0));
    let mut rng = StdRng::seed_from_u64(9);
    let mut now = 0.0;
    for _ in 0..600 {
        let dt = rng.gen_range(0.001f32..0.033);
        now += f64::from(dt) * 1000.0;
        f.step(dt, now);
    }
    let flow = f.flow().phases.iter();
    let clusters = f.cluster_points().phases.iter();
    for p in flow.chain(clusters) {
        assert!((0.0..TAU).contains(p), "phase escaped: {p}");
    }
}

#[test]
fn build_is_a_pure_function_of_viewport() {
    let a = field(desktop());
    let b = field(desktop());
    assert_eq!(a.flow().len(), b.flow().len());
    assert_eq!(a.flow().xs, b.flow().xs);
    assert_eq!(a.flow().hues, b.flow().hues);
    assert_eq!(a.cluster_points().sizes, b.cluster_points().sizes);
    assert_eq!(a.sprites().shape(), b.sprites().shape());
}

#[test]
fn rebuild_with_same_viewport_matches_fresh_build() {
    let fresh = field(desktop());
    let mut f = field(desktop());
    for i in 0..30 {
        f.step(0.016, f64::from(i) * 16.0);
    }
    assert_ne!(f.flow().xs, fresh.flow().xs);
    f.rebuild(desktop());
    assert_eq!(f.flow().xs, fresh.flow().xs);
    assert_eq!(f.flow().phases, fresh.flow().phases);
    assert_eq!(f.cluster_points().len(), fresh.cluster_points().len());
    assert_eq!(f.sprites().shape(), fresh.sprites().shape());
}

#[test]
fn profile_follows_viewport_width() {
    let d = field(desktop());
    assert_eq!(d.flow().len(), 360);
    assert_eq!(d.cluster_points().len(), 820);
    assert_eq!(d.clusters()[0].shapes.point_count(), 820);

    let m = field(mobile());
    assert_eq!(*m.profile(), FieldProfile::mobile());
    assert_eq!(m.flow().len(), 240);
    assert_eq!(m.cluster_points().len(), 520);
    assert_eq!(m.clusters()[1].shapes.point_count(), 520);

    let edge = field(viewport(640.0, 480.0));
    assert_eq!(*edge.profile(), FieldProfile::desktop());
}

#[test]
fn hue_indices_stay_inside_the_atlas() {
    for vp in [desktop(), mobile()] {
        let f = field(vp);
        let flow = f.flow().hues.iter();
        let clusters = f.cluster_points().hues.iter();
        assert!(flow.chain(clusters).all(|h| usize::from(*h) < HUE_BUCKETS));
    }
}

#[test]
fn wrap_moves_particles_to_the_opposite_padded_edge() {
    let bounds = Vec2::new(100.0, 50.0);
    let pad = WRAP_PADDING_PX;
    assert_eq!(wrap_position(-pad - 1.0, 10.0, bounds), (100.0 + pad, 10.0));
    assert_eq!(wrap_position(100.0 + pad + 1.0, 10.0, bounds), (-pad, 10.0));
    assert_eq!(wrap_position(10.0, -pad - 0.5, bounds), (10.0, 50.0 + pad));
    assert_eq!(wrap_position(10.0, 50.0 + pad + 0.5, bounds), (10.0, -pad));
    assert_eq!(wrap_position(-pad, 50.0 + pad, bounds), (-pad, 50.0 + pad));
}

#[test]
fn flow_particles_never_leave_padded_bounds() {
    let vp = viewport(700.0, 400.0);
    let mut f = field(vp);
    for i in 0..2_000 {
        f.step(0.033, f64::from(i) * 33.0);
    }
    let pad = WRAP_PADDING_PX;
    for (x, y) in f.flow().xs.iter().zip(&f.flow().ys) {
        assert!(*x >= -pad && *x <= vp.width() + pad, "x={x}");
        assert!(*y >= -pad && *y <= vp.height() + pad, "y={y}");
    }
}

#[test]
fn cycle_timer_elapsing_mid_morph_promotes_next_shape() {
    let mut cycle = ShapeCycle::new(&ClusterSpec::LEFT, 1_000.0);
    assert_eq!(cycle.current_kind(), ShapeKind::Heart);
    assert_eq!(cycle.next_kind(), ShapeKind::Star);

    assert!(!cycle.advance(7_999.0));
    assert!(cycle.advance(8_000.0));
    assert_eq!((cycle.current, cycle.next), (1, 2));
    assert_eq!(cycle.started_ms, 8_000.0);

    // walk the ring back round to the start
    let mut now = 8_000.0;
    for expected in [(2, 3), (3, 4), (4, 0), (0, 1)] {
        now += ClusterSpec::LEFT.interval_ms;
        assert!(cycle.advance(now));
        assert_eq!((cycle.current, cycle.next), expected);
    }
}

#[test]
fn right_cluster_starts_one_shape_ahead() {
    let cycle = ShapeCycle::new(&ClusterSpec::RIGHT, 0.0);
    assert_eq!(cycle.current_kind(), ShapeKind::Star);
    assert_eq!(cycle.next_kind(), ShapeKind::Butterfly);
}

#[test]
fn morph_factor_eases_between_zero_and_one() {
    let cycle = ShapeCycle::new(&ClusterSpec::RIGHT, 500.0);
    assert_eq!(cycle.morph_factor(500.0), 0.0);
    assert!((cycle.morph_factor(500.0 + 1_200.0) - 0.5).abs() < 1e-5);
    assert_eq!(cycle.morph_factor(500.0 + 2_400.0), 1.0);
    assert_eq!(cycle.morph_factor(100_000.0), 1.0);
    assert!(cycle.morph_factor(500.0 + 300.0) < 300.0 / 2_400.0);
}

#[test]
fn step_advances_each_cluster_on_its_own_timer() {
    let mut f = field(desktop());
    f.step(0.016, 7_000.0);
    let [left, right] = f.clusters();
    assert_eq!((left.cycle.current, left.cycle.next), (1, 2));
    assert_eq!(left.cycle.started_ms, 7_000.0);
    assert_eq!((right.cycle.current, right.cycle.next), (1, 2));
    assert_eq!(right.cycle.started_ms, 0.0);

    f.step(0.016, 9_500.0);
    assert_eq!(f.clusters()[1].cycle.current, 2);
}

#[test]
fn resize_keeps_shape_timers() {
    let mut f = field(desktop());
    f.step(0.016, 7_100.0);
    let before = [f.clusters()[0].cycle, f.clusters()[1].cycle];
    f.rebuild(mobile());
    assert_eq!([f.clusters()[0].cycle, f.clusters()[1].cycle], before);
    assert_eq!(f.clusters()[0].shapes.point_count(), 520);
}

#[test]
fn render_draws_every_particle_plus_bloom_subsets() {
    let f = field(desktop());
    let mut surface = RecordingSurface::default();
    f.render(&mut surface, 1_234.0);

    assert_eq!(surface.clears, 1);
    assert_eq!(
        surface.blends,
        [
            Blend::Normal,
            Blend::Screen,
            Blend::Normal,
            Blend::Screen,
            Blend::Normal,
            Blend::Screen
        ]
    );
    let flow = 360 + 60;
    let cluster = 820 + 164;
    assert_eq!(surface.draws.len(), flow + 2 * cluster);

    let blooms = surface.draws.iter().filter(|(k, _)| k.bloom).count();
    assert_eq!(blooms, 60 + 2 * 164);
    for (key, alpha) in &surface.draws {
        assert!(key.hue < HUE_BUCKETS);
        assert!(*alpha >= 0.0 && *alpha <= 1.0, "alpha {alpha}");
    }
}

#[test]
fn render_is_read_only() {
    let f = field(mobile());
    let xs = f.flow().xs.clone();
    f.render(&mut NullSurface, 50.0);
    f.render(&mut NullSurface, 5_000.0);
    assert_eq!(f.flow().xs, xs);
}

#[test]
fn drift_stays_within_amplitudes() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..1_000 {
        let d = cluster_drift(rng.gen_range(0.0..1.0e7));
        assert!(d.x.abs() <= 38.0 + 1e-3);
        assert!(d.y.abs() <= 18.0 + 1e-3);
    }
}

#[test]
fn frame_dt_is_clamped_to_the_safe_band() {
    let p = FieldParams::default();
    assert_eq!(p.frame_dt(0.0, 5_000.0), 0.033);
    assert_eq!(p.frame_dt(100.0, 100.0), 0.001);
    assert_eq!(p.frame_dt(200.0, 100.0), 0.001);
    assert!((p.frame_dt(0.0, 16.0) - 0.016).abs() < 1e-6);
    assert_eq!(p.frame_dt(0.0, f64::NAN), 0.001);
}

#[test]
fn viewport_measure_rejects_empty_layout_and_caps_dpr() {
    assert!(Viewport::measure(0.0, 300.0, 1.0, 2.0).is_none());
    assert!(Viewport::measure(300.0, f64::NAN, 1.0, 2.0).is_none());
    let vp = Viewport::measure(300.7, 200.2, 3.0, 2.0).expect("measured");
    assert_eq!((vp.width(), vp.height(), vp.dpr), (300.0, 200.0, 2.0));
    assert_eq!(vp.backing_size(), (600, 400));
    let tiny = Viewport::measure(0.5, 0.5, 0.0, 2.0).expect("measured");
    assert_eq!((tiny.width(), tiny.dpr), (1.0, 1.0));
}

#[test]
fn field_params_validation() {
    assert_eq!(FieldParams::default().validate(), Ok(()));
    let zero = FieldParams {
        hue_buckets: 0,
        ..FieldParams::default()
    };
    assert_eq!(zero.validate(), Err(ConfigError::ZeroHueBuckets));
    let inverted = FieldParams {
        min_dt_sec: 0.05,
        ..FieldParams::default()
    };
    assert!(matches!(
        inverted.validate(),
        Err(ConfigError::InvalidDtBand { .. })
    ));
    let flat_bloom = FieldParams {
        bloom_scale: 1.0,
        ..FieldParams::default()
    };
    assert_eq!(flat_bloom.validate(), Err(ConfigError::InvalidBloomScale(1.0)));
}
