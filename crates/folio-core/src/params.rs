//! Runtime-selected tuning for the particle field.

use crate::constants::*;
use crate::error::ConfigError;
use glam::Vec2;

/// Measured drawing area in CSS pixels plus the (capped) device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub size: Vec2,
    pub dpr: f32,
}

impl Viewport {
    /// Floors CSS dimensions to whole pixels (at least 1) and caps the DPR.
    /// Returns `None` while the element has no layout yet.
    pub fn measure(css_width: f64, css_height: f64, raw_dpr: f64, dpr_cap: f32) -> Option<Self> {
        if !(css_width > 0.0 && css_height > 0.0) {
            return None;
        }
        let dpr = if raw_dpr.is_finite() && raw_dpr > 0.0 {
            raw_dpr as f32
        } else {
            1.0
        };
        Some(Self {
            size: Vec2::new(
                (css_width.floor() as f32).max(1.0),
                (css_height.floor() as f32).max(1.0),
            ),
            dpr: dpr.min(dpr_cap),
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn is_mobile(&self) -> bool {
        self.size.x < MOBILE_MAX_WIDTH
    }

    /// Backing store size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.size.x * self.dpr).floor() as u32,
            (self.size.y * self.dpr).floor() as u32,
        )
    }
}

/// Counts, sprite sizes and motion bands for one device class.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldProfile {
    pub flow_count: usize,
    pub cluster_points: usize,
    pub sprite_sizes: [u32; 3],
    pub sprite_cores: [f32; 3],
    pub base_velocity: Vec2,
    pub alpha_range: (f32, f32),
    /// Cluster anchors as fractions of the viewport.
    pub left_anchor: Vec2,
    pub right_anchor: Vec2,
}

impl FieldProfile {
    pub fn desktop() -> Self {
        Self {
            flow_count: 360,
            cluster_points: 820,
            sprite_sizes: [8, 13, 20],
            sprite_cores: [1.0, 1.2, 1.5],
            base_velocity: Vec2::new(18.0, -14.0),
            alpha_range: (0.48, 0.98),
            left_anchor: Vec2::new(0.22, 0.36),
            right_anchor: Vec2::new(0.80, 0.60),
        }
    }

    pub fn mobile() -> Self {
        Self {
            flow_count: 240,
            cluster_points: 520,
            sprite_sizes: [9, 14, 22],
            sprite_cores: [1.0, 1.25, 1.55],
            base_velocity: Vec2::new(14.0, -10.0),
            alpha_range: (0.58, 1.0),
            left_anchor: Vec2::new(0.14, 0.26),
            right_anchor: Vec2::new(0.86, 0.70),
        }
    }

    pub fn for_viewport(viewport: &Viewport) -> Self {
        if viewport.is_mobile() {
            Self::mobile()
        } else {
            Self::desktop()
        }
    }
}

/// Device-independent limits shared by every build.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldParams {
    pub hue_buckets: usize,
    pub min_dt_sec: f32,
    pub max_dt_sec: f32,
    pub dpr_cap: f32,
    pub bloom_scale: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            hue_buckets: HUE_BUCKETS,
            min_dt_sec: MIN_FRAME_DT_SEC,
            max_dt_sec: MAX_FRAME_DT_SEC,
            dpr_cap: MAX_DEVICE_PIXEL_RATIO,
            bloom_scale: BLOOM_SCALE,
        }
    }
}

impl FieldParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hue_buckets == 0 {
            return Err(ConfigError::ZeroHueBuckets);
        }
        if !(self.min_dt_sec > 0.0 && self.min_dt_sec <= self.max_dt_sec) {
            return Err(ConfigError::InvalidDtBand {
                min: self.min_dt_sec,
                max: self.max_dt_sec,
            });
        }
        if !(self.dpr_cap >= 1.0) {
            return Err(ConfigError::InvalidDprCap(self.dpr_cap));
        }
        if !(self.bloom_scale > 1.0) {
            return Err(ConfigError::InvalidBloomScale(self.bloom_scale));
        }
        Ok(())
    }

    /// Frame delta in seconds from two millisecond timestamps, kept inside the
    /// safe band so a stalled tab never produces a jump.
    #[inline]
    pub fn frame_dt(&self, last_ms: f64, now_ms: f64) -> f32 {
        let dt = ((now_ms - last_ms) / 1000.0) as f32;
        if dt.is_finite() {
            dt.clamp(self.min_dt_sec, self.max_dt_sec)
        } else {
            self.min_dt_sec
        }
    }
}
