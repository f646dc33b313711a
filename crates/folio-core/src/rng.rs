//! Deterministic pseudo-random generation.
//!
//! `Mulberry32` is a tiny 32-bit mixing generator. It is not statistically
//! strong, but it is fast and reproducible: the same seed always yields the
//! same stream on every platform, which keeps shape point sets and particle
//! attributes stable across rebuilds.

use rand::{Error, RngCore, SeedableRng};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }
}

impl RngCore for Mulberry32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut x = self.state;
        x = (x ^ (x >> 15)).wrapping_mul(x | 1);
        x ^= x.wrapping_add((x ^ (x >> 7)).wrapping_mul(x | 61));
        x ^ (x >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_u32());
        let hi = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Float helpers over any 32-bit generator.
pub trait UnitRng: RngCore {
    /// Uniform float in [0, 1).
    #[inline]
    fn unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform float in [min, max).
    #[inline]
    fn range(&mut self, min: f64, max: f64) -> f64 {
        self.unit() * (max - min) + min
    }

    /// `range` narrowed to f32, for attribute tables.
    #[inline]
    fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        self.range(f64::from(min), f64::from(max)) as f32
    }
}

impl<R: RngCore + ?Sized> UnitRng for R {}
