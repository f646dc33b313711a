use std::f32::consts::TAU;

#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Quadratic ease-in-out on [0, 1].
#[inline]
pub fn ease_in_out_quad(v: f32) -> f32 {
    if v < 0.5 {
        2.0 * v * v
    } else {
        1.0 - (-2.0 * v + 2.0).powi(2) / 2.0
    }
}

/// Wrap an angle into [0, 2π).
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    let p = phase.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if p >= TAU || !p.is_finite() {
        0.0
    } else {
        p
    }
}

/// Bucket index modulo `buckets`; never escapes [0, buckets).
#[inline]
pub fn hue_bucket(raw: usize, buckets: usize) -> usize {
    raw % buckets.max(1)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Hue rotation on the colour wheel, result in [0, 360).
#[inline]
pub fn rotate_hue(hue: f32, by: f32) -> f32 {
    (hue + by).rem_euclid(360.0)
}
