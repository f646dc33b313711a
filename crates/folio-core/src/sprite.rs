//! Glow sprite rasterizer.
//!
//! Sprites are rendered once per viewport build into straight-alpha RGBA8
//! buffers. Compositing happens in premultiplied f32 and is converted at the
//! end, so the same inputs always produce the same bytes.

use crate::constants::*;
use crate::math::rotate_hue;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Pick a class from a unit sample and two ascending cut points.
    #[inline]
    pub fn from_pick(pick: f32, cuts: [f32; 2]) -> Self {
        if pick < cuts[0] {
            SizeClass::Small
        } else if pick < cuts[1] {
            SizeClass::Medium
        } else {
            SizeClass::Large
        }
    }
}

/// Address of one sprite in the atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteKey {
    pub hue: usize,
    pub size: SizeClass,
    pub bloom: bool,
}

impl SpriteKey {
    #[inline]
    pub fn base(hue: usize, size: SizeClass) -> Self {
        Self { hue, size, bloom: false }
    }

    #[inline]
    pub fn bloom(hue: usize, size: SizeClass) -> Self {
        Self { hue, size, bloom: true }
    }

    /// Dense index into a flat `[bloom][hue][size]` array.
    #[inline]
    pub fn flat_index(self, hue_buckets: usize) -> usize {
        ((usize::from(self.bloom) * hue_buckets) + self.hue) * SizeClass::ALL.len() + self.size.index()
    }
}

/// Square straight-alpha RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteImage {
    pub size: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl SpriteImage {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels.as_slice())
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[(y * self.size + x) as usize]
    }

    fn to_premultiplied(&self) -> Vec<Rgba> {
        self.pixels.iter().map(|p| Rgba::from_straight(*p)).collect()
    }

    fn from_premultiplied(size: u32, px: &[Rgba]) -> Self {
        Self {
            size,
            pixels: px.iter().map(|c| c.to_straight()).collect(),
        }
    }
}

// premultiplied colour, channels in [0, 1]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Rgba {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Rgba {
    const CLEAR: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    fn hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        let [r, g, b] = hsl_to_rgb(h, s, l);
        Rgba { r: r * a, g: g * a, b: b * a, a }
    }

    fn scale(self, k: f32) -> Self {
        Rgba { r: self.r * k, g: self.g * k, b: self.b * k, a: self.a * k }
    }

    fn add(self, o: Rgba) -> Self {
        Rgba { r: self.r + o.r, g: self.g + o.g, b: self.b + o.b, a: self.a + o.a }
    }

    fn lerp(self, o: Rgba, t: f32) -> Self {
        self.scale(1.0 - t).add(o.scale(t))
    }

    // source-over
    fn over(self, src: Rgba) -> Self {
        src.add(self.scale(1.0 - src.a))
    }

    fn from_straight(p: [u8; 4]) -> Self {
        let a = f32::from(p[3]) / 255.0;
        Rgba {
            r: f32::from(p[0]) / 255.0 * a,
            g: f32::from(p[1]) / 255.0 * a,
            b: f32::from(p[2]) / 255.0 * a,
            a,
        }
    }

    fn to_straight(self) -> [u8; 4] {
        let a = self.a.clamp(0.0, 1.0);
        if a <= 0.0 {
            return [0, 0, 0, 0];
        }
        let q = |c: f32| ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), (a * 255.0).round() as u8]
    }
}

/// CSS-style HSL to RGB; `h` in degrees, `s`/`l` in [0, 1].
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(360.0) / 360.0;
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |mut t: f32| {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
}

/// Base hue followed by its two chromatic-separation partners.
pub fn prism_hues(hue: f32) -> [f32; 3] {
    [
        hue,
        rotate_hue(hue, PRISM_HUE_OFFSETS[0]),
        rotate_hue(hue, PRISM_HUE_OFFSETS[1]),
    ]
}

/// Hue in degrees of bucket `k` out of `buckets`.
pub fn bucket_hue(k: usize, buckets: usize) -> f32 {
    ((k as f32 * 360.0) / buckets.max(1) as f32).round()
}

fn gradient_at(stops: &[(f32, Rgba)], d: f32) -> Rgba {
    let d = d.clamp(0.0, 1.0);
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if d <= t1 {
            let span = (t1 - t0).max(f32::EPSILON);
            return c0.lerp(c1, (d - t0) / span);
        }
    }
    stops.last().map_or(Rgba::CLEAR, |s| s.1)
}

// 1D overlap between a unit pixel centred at `p` and [lo, hi]
#[inline]
fn overlap(p: f32, lo: f32, hi: f32) -> f32 {
    ((p + 0.5).min(hi) - (p - 0.5).max(lo)).clamp(0.0, 1.0)
}

/// Radial prism glow with faint cross rays and a bright core.
pub fn rasterize_glow(hue: f32, size: u32, core: f32) -> SpriteImage {
    let size = size.max(1);
    let [h1, h2, h3] = prism_hues(hue);
    let stops = [
        (0.0, Rgba::hsla(h1, 1.0, 0.90, 0.95)),
        (0.18, Rgba::hsla(h2, 1.0, 0.74, 0.65)),
        (0.38, Rgba::hsla(h3, 1.0, 0.68, 0.35)),
        (0.62, Rgba::hsla(h2, 1.0, 0.70, 0.16)),
        (1.0, Rgba::CLEAR),
    ];
    let ray = Rgba::hsla(h1, 1.0, 0.92, SPRITE_RAY_ALPHA);
    let core_color = Rgba::hsla(h1, 1.0, 0.94, 1.0);

    let c = size as f32 / 2.0;
    let r_outer = c;
    let half = size as f32 * SPRITE_RAY_HALF_LENGTH;
    let core_r = core.max(1.0);

    let mut px = Vec::with_capacity((size * size) as usize);
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 + 0.5;
            let fy = y as f32 + 0.5;
            let dx = fx - c;
            let dy = fy - c;
            let d = (dx * dx + dy * dy).sqrt();

            let mut acc = if d <= r_outer {
                gradient_at(&stops, d / r_outer)
            } else {
                Rgba::CLEAR
            };

            let horizontal = overlap(fy, c - 0.5, c + 0.5) * overlap(fx, c - half, c + half);
            let vertical = overlap(fx, c - 0.5, c + 0.5) * overlap(fy, c - half, c + half);
            if horizontal > 0.0 {
                acc = acc.over(ray.scale(horizontal));
            }
            if vertical > 0.0 {
                acc = acc.over(ray.scale(vertical));
            }

            let core_cov = (core_r - d + 0.5).clamp(0.0, 1.0);
            if core_cov > 0.0 {
                acc = acc.over(core_color.scale(core_cov));
            }
            px.push(acc);
        }
    }
    SpriteImage::from_premultiplied(size, &px)
}

/// Upscaled, softened variant of `base` used for additive glow spread.
pub fn bloom_from(base: &SpriteImage, scale: f32) -> SpriteImage {
    let src = base.to_premultiplied();
    let n = base.size as i64;
    let out = ((base.size as f32 * scale).round() as u32).max(1);
    let sample = |x: i64, y: i64| -> Rgba {
        if x < 0 || y < 0 || x >= n || y >= n {
            Rgba::CLEAR
        } else {
            src[(y * n + x) as usize]
        }
    };

    let ratio = base.size as f32 / out as f32;
    let mut up = Vec::with_capacity((out * out) as usize);
    for y in 0..out {
        for x in 0..out {
            let u = (x as f32 + 0.5) * ratio - 0.5;
            let v = (y as f32 + 0.5) * ratio - 0.5;
            let x0 = u.floor();
            let y0 = v.floor();
            let tx = u - x0;
            let ty = v - y0;
            let (x0, y0) = (x0 as i64, y0 as i64);
            let top = sample(x0, y0).lerp(sample(x0 + 1, y0), tx);
            let bottom = sample(x0, y0 + 1).lerp(sample(x0 + 1, y0 + 1), tx);
            up.push(top.lerp(bottom, ty));
        }
    }

    // one 3x3 box blur pass
    let m = out as i64;
    let mut soft = Vec::with_capacity(up.len());
    for y in 0..m {
        for x in 0..m {
            let mut acc = Rgba::CLEAR;
            for oy in -1..=1 {
                for ox in -1..=1 {
                    let sx = x + ox;
                    let sy = y + oy;
                    if sx >= 0 && sy >= 0 && sx < m && sy < m {
                        acc = acc.add(up[(sy * m + sx) as usize]);
                    }
                }
            }
            soft.push(acc.scale(1.0 / 9.0));
        }
    }
    SpriteImage::from_premultiplied(out, &soft)
}

type SizeRow = SmallVec<[SpriteImage; 3]>;

/// `[hue bucket][size class]` atlas plus its bloom twin. Read-only after build.
#[derive(Clone, Debug, Default)]
pub struct SpriteTable {
    base: Vec<SizeRow>,
    bloom: Vec<SizeRow>,
}

impl SpriteTable {
    pub fn build(hue_buckets: usize, sizes: [u32; 3], cores: [f32; 3], bloom_scale: f32) -> Self {
        let mut base = Vec::with_capacity(hue_buckets);
        let mut bloom = Vec::with_capacity(hue_buckets);
        for k in 0..hue_buckets {
            let hue = bucket_hue(k, hue_buckets);
            let row: SizeRow = SizeClass::ALL
                .iter()
                .map(|s| rasterize_glow(hue, sizes[s.index()], cores[s.index()]))
                .collect();
            bloom.push(row.iter().map(|img| bloom_from(img, bloom_scale)).collect());
            base.push(row);
        }
        Self { base, bloom }
    }

    pub fn get(&self, key: SpriteKey) -> Option<&SpriteImage> {
        let rows = if key.bloom { &self.bloom } else { &self.base };
        rows.get(key.hue)?.get(key.size.index())
    }

    pub fn hue_buckets(&self) -> usize {
        self.base.len()
    }

    /// Length of a flat array addressed by `SpriteKey::flat_index`.
    pub fn flat_len(&self) -> usize {
        self.base.len() * SizeClass::ALL.len() * 2
    }

    /// `(hue buckets, size classes)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.base.len(), self.base.first().map_or(0, |r| r.len()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpriteKey, &SpriteImage)> + '_ {
        let base = self.base.iter().enumerate().flat_map(|(hue, row)| {
            row.iter()
                .zip(SizeClass::ALL)
                .map(move |(img, size)| (SpriteKey::base(hue, size), img))
        });
        let bloom = self.bloom.iter().enumerate().flat_map(|(hue, row)| {
            row.iter()
                .zip(SizeClass::ALL)
                .map(move |(img, size)| (SpriteKey::bloom(hue, size), img))
        });
        base.chain(bloom)
    }
}
