use crate::foundation::error::{CametraxError, CametraxResult};
use crate::generate::request::GenerationRequest;
use crate::scene::model::LightingPreset;
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// External image generator.
///
/// Implementations return the encoded image bytes of exactly one image, or a failure whose
/// message is shown to the operator. Calls may block; use [`crate::spawn_generation`] to keep the
/// session responsive. Any `Fn(&GenerationRequest) -> CametraxResult<Vec<u8>>` closure is a
/// service.
pub trait GenerationService: Send + Sync {
    /// Produce one image for `request`.
    fn generate(&self, request: &GenerationRequest) -> CametraxResult<Vec<u8>>;
}

impl<F> GenerationService for F
where
    F: Fn(&GenerationRequest) -> CametraxResult<Vec<u8>> + Send + Sync,
{
    fn generate(&self, request: &GenerationRequest) -> CametraxResult<Vec<u8>> {
        self(request)
    }
}

/// Offline service that rasterizes a deterministic preview of the scene as PNG.
///
/// The canvas follows the aspect ratio, the horizon follows pitch and roll, the subject moves with
/// yaw and scales with field of view, and the tint follows color temperature and intensity.
#[derive(Debug, Clone, Copy)]
pub struct ProceduralService {
    /// Output width in pixels; height derives from the aspect ratio.
    pub width: u32,
}

impl Default for ProceduralService {
    fn default() -> Self {
        Self { width: 256 }
    }
}

impl GenerationService for ProceduralService {
    fn generate(&self, request: &GenerationRequest) -> CametraxResult<Vec<u8>> {
        if self.width == 0 {
            return Err(CametraxError::generation_failed(
                "procedural service width must be non-zero",
            ));
        }
        let (pw, ph) = request.aspect_ratio.proportions();
        let width = self.width;
        let height = u32::try_from((u64::from(width) * u64::from(ph) / u64::from(pw)).max(1))
            .map_err(|_| {
                CametraxError::generation_failed(format!(
                    "procedural service width {width} is too large for {}",
                    request.aspect_ratio
                ))
            })?;
        encode_png(&rasterize(request, width, height))
    }
}

fn rasterize(request: &GenerationRequest, width: u32, height: u32) -> RgbImage {
    let cfg = &request.config;
    let (w, h) = (f64::from(width), f64::from(height));

    let warmth = ((cfg.lighting.temperature - 2000.0) / 6000.0).clamp(0.0, 1.0);
    let tint = [
        lerp(255.0, 170.0, warmth),
        lerp(170.0, 200.0, warmth),
        lerp(90.0, 255.0, warmth),
    ];
    let mut gain = 0.2 + 0.8 * (cfg.lighting.intensity / 2.0).clamp(0.0, 1.0);
    if cfg.render.hdr {
        gain *= 1.15;
    }
    let vignette = matches!(
        cfg.lighting.preset,
        LightingPreset::Dramatic | LightingPreset::Hard | LightingPreset::Rembrandt
    );

    let horizon = h / 2.0 + (cfg.camera.pitch / 90.0).clamp(-1.0, 1.0) * h / 2.0;
    let slope = cfg.camera.roll.to_radians().tan().clamp(-8.0, 8.0);
    let subject_x = w / 2.0 - (cfg.camera.yaw / 180.0).clamp(-1.0, 1.0) * w / 2.0;
    let subject_r = w.min(h) * 0.25 * (50.0 / cfg.camera.fov.max(1.0)).clamp(0.2, 2.0);

    RgbImage::from_fn(width, height, |x, y| {
        let (fx, fy) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
        let line = horizon + (fx - w / 2.0) * slope;
        let mut shade = if fy < line { 1.0 } else { 0.45 };

        let (dx, dy) = (fx - subject_x, fy - h / 2.0);
        if dx * dx + dy * dy <= subject_r * subject_r {
            shade = 1.3;
        }
        if vignette {
            let nx = (fx / w - 0.5) * 2.0;
            let ny = (fy / h - 0.5) * 2.0;
            shade *= (1.0 - 0.5 * (nx * nx + ny * ny)).max(0.2);
        }

        let k = gain * shade;
        Rgb(tint.map(|c| (c * k).round().clamp(0.0, 255.0) as u8))
    })
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Encode an RGB image as PNG bytes.
pub(crate) fn encode_png(img: &RgbImage) -> CametraxResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(|e| CametraxError::generation_failed(format!("encode png: {e}")))?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/generate/service.rs"]
mod tests;
