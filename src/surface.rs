use folio_core::{Blend, SpriteKey, SpriteTable, Surface, SurfaceError, Viewport};
use wasm_bindgen::{Clamped, JsCast};
use web_sys as web;

/// 2D canvas implementation of the core drawing surface.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    hue_buckets: usize,
    // flat [bloom][hue][size]; None where an upload failed
    sprites: Vec<Option<web::HtmlCanvasElement>>,
}

impl CanvasSurface {
    /// Fails when the browser refuses a 2D context.
    pub fn acquire(canvas: web::HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<web::CanvasRenderingContext2d>().ok())
            .ok_or(SurfaceError::ContextUnavailable)?;
        Ok(Self {
            canvas,
            ctx,
            hue_buckets: 0,
            sprites: Vec::new(),
        })
    }

    fn upload(document: &web::Document, size: u32, rgba: &[u8]) -> Result<web::HtmlCanvasElement, SurfaceError> {
        let err = |e: wasm_bindgen::JsValue| SurfaceError::SpriteUpload(format!("{:?}", e));
        let canvas = document
            .create_element("canvas")
            .map_err(err)?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|_| SurfaceError::SpriteUpload("not a canvas".into()))?;
        canvas.set_width(size);
        canvas.set_height(size);
        let ctx = canvas
            .get_context("2d")
            .map_err(err)?
            .and_then(|c| c.dyn_into::<web::CanvasRenderingContext2d>().ok())
            .ok_or(SurfaceError::ContextUnavailable)?;
        let image = web::ImageData::new_with_u8_clamped_array_and_sh(Clamped(rgba), size, size).map_err(err)?;
        ctx.put_image_data(&image, 0.0, 0.0).map_err(err)?;
        Ok(canvas)
    }
}

impl Surface for CanvasSurface {
    fn configure(&mut self, viewport: &Viewport) {
        crate::dom::sync_canvas_backing_size(&self.canvas, viewport);
        let dpr = f64::from(viewport.dpr);
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    fn install_sprites(&mut self, sprites: &SpriteTable) -> Result<(), SurfaceError> {
        let document = self
            .canvas
            .owner_document()
            .ok_or(SurfaceError::ContextUnavailable)?;
        let buckets = sprites.hue_buckets();
        let mut slots = vec![None; sprites.flat_len()];
        let mut failures = 0usize;
        for (key, img) in sprites.iter() {
            match Self::upload(&document, img.size, img.as_bytes()) {
                Ok(c) => slots[key.flat_index(buckets)] = Some(c),
                Err(e) => {
                    failures += 1;
                    if failures == 1 {
                        log::warn!("[surface] {}", e);
                    }
                }
            }
        }
        if failures == slots.len() && !slots.is_empty() {
            return Err(SurfaceError::SpriteUpload(format!("all {} sprites failed", failures)));
        }
        self.hue_buckets = buckets;
        self.sprites = slots;
        Ok(())
    }

    fn clear(&mut self, viewport: &Viewport) {
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(viewport.width()), f64::from(viewport.height()));
    }

    fn set_blend(&mut self, blend: Blend) {
        let op = match blend {
            Blend::Normal => "source-over",
            Blend::Screen => "screen",
        };
        _ = self.ctx.set_global_composite_operation(op);
    }

    fn draw_sprite(&mut self, key: SpriteKey, x: f32, y: f32, alpha: f32) {
        let Some(Some(img)) = self.sprites.get(key.flat_index(self.hue_buckets)) else {
            return;
        };
        self.ctx.set_global_alpha(f64::from(alpha));
        _ = self
            .ctx
            .draw_image_with_html_canvas_element(img, f64::from(x), f64::from(y));
    }
}
