// ============================================================================
// GRADING ENGINE — render entry points, validation, and the cached LUT
// ============================================================================
//
// The engine owns no state between renders except the one synthesized LUT,
// which is rebuilt only when (film, white balance, grading) changes; every
// other slider reuses it. A render takes an immutable snapshot of its inputs
// and is total on valid input: bad parameter values are clamped and logged,
// never failed.
// ============================================================================

use std::time::Instant;

use image::RgbaImage;

use crate::film::FilmType;
use crate::log_info;
use crate::mask::MaskLayer;
use crate::ops::lut::Lut3D;
use crate::ops::pipeline::{self, Histogram};
use crate::ops::texture;
use crate::params::{Adjustments, SplitToning, WhiteBalance};

/// Render failure modes. All are detected synchronously before any pixel
/// work starts; a failed render produces no partial output.
#[derive(Debug)]
pub enum RenderError {
    /// Zero-sized image, or a raw buffer whose length is not `4·w·h`.
    InvalidDimensions { width: u32, height: u32, buffer_len: usize },
    /// LUT sample count is not `3·size³` (or the size is degenerate).
    LutSizeMismatch { size: u32, buffer_len: usize },
    /// A mask alpha plane does not match the image dimensions.
    MaskShapeMismatch { mask_width: u32, mask_height: u32, width: u32, height: u32 },
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::InvalidDimensions { width, height, buffer_len } => write!(
                f,
                "invalid image dimensions {}x{} for buffer of {} bytes",
                width, height, buffer_len
            ),
            RenderError::LutSizeMismatch { size, buffer_len } => write!(
                f,
                "LUT size {} does not match {} samples",
                size, buffer_len
            ),
            RenderError::MaskShapeMismatch { mask_width, mask_height, width, height } => write!(
                f,
                "mask is {}x{} but the image is {}x{}",
                mask_width, mask_height, width, height
            ),
        }
    }
}

/// Synthesize the 32³ LUT for a film/white-balance/grading combination.
pub fn synthesize_lut(film: FilmType, wb: &WhiteBalance, grading: &SplitToning) -> Lut3D {
    Lut3D::synthesize(film, wb, grading)
}

/// Render with an explicit LUT (synthesized or loaded from a `.cube` file).
/// Returns the graded image and its output histogram.
pub fn render_with_lut(
    src: &RgbaImage,
    lut: &Lut3D,
    adj: &Adjustments,
    masks: &[MaskLayer],
) -> Result<(RgbaImage, Histogram), RenderError> {
    let (w, h) = src.dimensions();
    if w == 0 || h == 0 {
        return Err(RenderError::InvalidDimensions {
            width: w,
            height: h,
            buffer_len: src.as_raw().len(),
        });
    }

    let n = lut.size() as usize;
    if lut.size() < 2 || lut.data().len() != 3 * n * n * n {
        return Err(RenderError::LutSizeMismatch {
            size: lut.size(),
            buffer_len: lut.data().len(),
        });
    }

    for mask in masks {
        let (mw, mh) = mask.alpha.dimensions();
        if mw != w || mh != h {
            return Err(RenderError::MaskShapeMismatch {
                mask_width: mw,
                mask_height: mh,
                width: w,
                height: h,
            });
        }
    }

    let adj = adj.sanitized();
    let (mut out, histogram) = pipeline::process(src, lut, &adj, masks);
    texture::apply(&mut out, &adj);
    Ok((out, histogram))
}

/// Render a raw straight-alpha RGBA byte slice. Validates that the buffer
/// length matches the stated dimensions before copying it into an image.
pub fn render_rgba8(
    data: &[u8],
    width: u32,
    height: u32,
    lut: &Lut3D,
    adj: &Adjustments,
    masks: &[MaskLayer],
) -> Result<(RgbaImage, Histogram), RenderError> {
    let expected = width as usize * height as usize * 4;
    if width == 0 || height == 0 || data.len() != expected {
        return Err(RenderError::InvalidDimensions {
            width,
            height,
            buffer_len: data.len(),
        });
    }
    let src = RgbaImage::from_raw(width, height, data.to_vec()).unwrap();
    render_with_lut(&src, lut, adj, masks)
}

/// Cache key for the synthesized LUT.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LutKey {
    film: FilmType,
    wb: WhiteBalance,
    grading: SplitToning,
}

/// The stateful engine: caches the synthesized LUT across renders so that
/// tone/texture/mask slider drags never pay for LUT recomputation.
#[derive(Debug, Default)]
pub struct GradingEngine {
    cached: Option<(LutKey, Lut3D)>,
}

impl GradingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The LUT for this film/WB/grading combination, synthesizing only on
    /// a key change.
    pub fn lut_for(&mut self, film: FilmType, adj: &Adjustments) -> &Lut3D {
        let key = LutKey { film, wb: adj.white_balance, grading: adj.grading };
        let stale = match &self.cached {
            Some((cached_key, _)) => *cached_key != key,
            None => true,
        };
        if stale {
            let start = Instant::now();
            let lut = Lut3D::synthesize(film, &key.wb, &key.grading);
            log_info!("LUT synthesized for {:?} in {:?}", film, start.elapsed());
            self.cached = Some((key, lut));
        }
        &self.cached.as_ref().unwrap().1
    }

    /// Full render: sanitize, reuse or rebuild the LUT, run the pixel
    /// pipeline and the texture pass.
    pub fn render(
        &mut self,
        src: &RgbaImage,
        film: FilmType,
        adj: &Adjustments,
        masks: &[MaskLayer],
    ) -> Result<(RgbaImage, Histogram), RenderError> {
        let adj = adj.sanitized();
        let lut = self.lut_for(film, &adj);
        render_with_lut(src, lut, &adj, masks)
    }
}
