use crate::error::SurfaceError;
use crate::params::Viewport;
use crate::sprite::{SpriteKey, SpriteTable};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    /// Source-over; keeps sprite colours.
    Normal,
    /// Screen; spreads light for bloom passes.
    Screen,
}

/// Canvas-like target the particle field draws into.
///
/// Coordinates are CSS pixels; the surface is responsible for the DPR
/// transform set up in `configure`.
pub trait Surface {
    /// Resize the backing store for a fresh build.
    fn configure(&mut self, viewport: &Viewport);
    /// Take ownership of a freshly built atlas, replacing the previous one.
    fn install_sprites(&mut self, sprites: &SpriteTable) -> Result<(), SurfaceError>;
    fn clear(&mut self, viewport: &Viewport);
    fn set_blend(&mut self, blend: Blend);
    /// Draw a sprite with its top-left corner at `(x, y)`.
    fn draw_sprite(&mut self, key: SpriteKey, x: f32, y: f32, alpha: f32);
}

/// Surface that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn configure(&mut self, _viewport: &Viewport) {}
    fn install_sprites(&mut self, _sprites: &SpriteTable) -> Result<(), SurfaceError> {
        Ok(())
    }
    fn clear(&mut self, _viewport: &Viewport) {}
    fn set_blend(&mut self, _blend: Blend) {}
    fn draw_sprite(&mut self, _key: SpriteKey, _x: f32, _y: f32, _alpha: f32) {}
}
