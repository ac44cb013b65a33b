// ============================================================================
// PIXEL PROCESSOR — per-pixel grading stages + histogram accumulation
// ============================================================================
//
// One pass over the image, parallelized by row bands via rayon. Per pixel:
// selective HSL → global tone → trilinear LUT sample → intensity mix →
// local masks → vignette → dither → histogram. Alpha is copied verbatim.
//
// Every stage is zero-checked up front so an untouched slider costs
// nothing in the hot loop. Noise comes from the stateless coordinate hash,
// so row sharding cannot change the output.
// ============================================================================

use image::RgbaImage;
use rayon::prelude::*;

use crate::mask::MaskLayer;
use crate::ops::color::{
    clamp01, contrast_factor, hsl_to_rgb, hue_weight, lerp, luma_601, rgb_to_hsl,
};
use crate::ops::lut::Lut3D;
use crate::ops::noise::tri_noise;
use crate::params::Adjustments;

/// Hue centers for the six HSL bands: R, Y, G, C, B, M.
const BAND_CENTERS: [f32; 6] = [0.0, 60.0, 120.0, 180.0, 240.0, 300.0];

/// Half-width of each HSL band's influence in degrees.
const BAND_RANGE: f32 = 45.0;

/// Accumulated HSL deltas below this are treated as no-ops.
const HSL_EPSILON: f32 = 1e-4;

const DITHER_SEED: u32 = 0x9E3779B9;

/// Per-channel 256-bin histogram of the processed output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    pub r: [u32; 256],
    pub g: [u32; 256],
    pub b: [u32; 256],
}

impl Histogram {
    pub fn new() -> Self {
        Self { r: [0; 256], g: [0; 256], b: [0; 256] }
    }

    /// Element-wise addition, used to merge per-band partial histograms.
    pub fn merge(&mut self, other: &Histogram) {
        for i in 0..256 {
            self.r[i] += other.r[i];
            self.g[i] += other.g[i];
            self.b[i] += other.b[i];
        }
    }

    /// Total count per channel; equals `w·h` for a full render.
    pub fn totals(&self) -> (u64, u64, u64) {
        (
            self.r.iter().map(|&c| c as u64).sum(),
            self.g.iter().map(|&c| c as u64).sum(),
            self.b.iter().map(|&c| c as u64).sum(),
        )
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-mask constants hoisted out of the pixel loop.
struct LocalPrecomp<'a> {
    alpha: &'a [u8],
    opacity: f32,
    exposure_gain: f32,
    contrast_k: f32,
    sat_factor: f32,
    temp: f32,
    tint: f32,
}

/// Run the full per-pixel pipeline. `src` dimensions, LUT shape, and mask
/// shapes are validated by the caller (`engine::render_with_lut`).
pub fn process(
    src: &RgbaImage,
    lut: &Lut3D,
    adj: &Adjustments,
    masks: &[MaskLayer],
) -> (RgbaImage, Histogram) {
    let w = src.width() as usize;
    let h = src.height() as usize;
    let src_raw = src.as_raw();
    let mut dst_raw = vec![0u8; w * h * 4];
    let stride = w * 4;

    // -- hoisted stage constants -----------------------------------------
    let hsl_bands: Vec<(f32, f32, f32, f32)> = BAND_CENTERS
        .iter()
        .zip(adj.hsl.bands())
        .filter(|(_, band)| !band.is_zero())
        .map(|(&center, band)| (center, band.hue, band.saturation / 100.0, band.luminance / 100.0))
        .collect();

    let brightness = adj.brightness;
    let contrast_k = if adj.contrast != 0.0 { contrast_factor(adj.contrast) } else { 1.0 };
    let sat_factor = 1.0 + adj.saturation / 100.0;
    let shadows = adj.shadows;
    let highlights = adj.highlights;
    let intensity = adj.intensity;

    let locals: Vec<LocalPrecomp<'_>> = masks
        .iter()
        .filter(|m| m.visible && m.opacity > 0.0)
        .map(|m| LocalPrecomp {
            alpha: m.alpha.as_raw(),
            opacity: m.opacity.min(1.0),
            exposure_gain: 2.0f32.powf(m.adjust.exposure / 33.0),
            contrast_k: if m.adjust.contrast != 0.0 {
                contrast_factor(m.adjust.contrast)
            } else {
                1.0
            },
            sat_factor: 1.0 + m.adjust.saturation / 100.0,
            temp: m.adjust.temperature / 100.0,
            tint: m.adjust.tint / 100.0,
        })
        .collect();

    let vig = adj.vignette / 100.0;
    let cx = w as f32 / 2.0;
    let cy = h as f32 / 2.0;
    let inv_dmax = 1.0 / (cx * cx + cy * cy).sqrt().max(1.0);

    // -- row-parallel pixel loop with per-band histogram fold -------------
    let histogram = dst_raw
        .par_chunks_mut(stride)
        .enumerate()
        .fold(Histogram::new, |mut hist, (y, row_out)| {
            let row_in = &src_raw[y * stride..(y + 1) * stride];
            let row_off = y * w;
            let yf = y as f32;

            for x in 0..w {
                let pi = x * 4;
                let mut r = row_in[pi] as f32;
                let mut g = row_in[pi + 1] as f32;
                let mut b = row_in[pi + 2] as f32;

                // Stage A: selective HSL
                if !hsl_bands.is_empty() {
                    let (mut hue, mut s, mut l) = rgb_to_hsl(r / 255.0, g / 255.0, b / 255.0);
                    let mut dh = 0.0;
                    let mut ds = 0.0;
                    let mut dl = 0.0;
                    for &(center, bh, bs, bl) in &hsl_bands {
                        let wgt = hue_weight(hue, center, BAND_RANGE);
                        if wgt > 0.0 {
                            dh += bh * wgt;
                            ds += bs * wgt;
                            dl += bl * wgt;
                        }
                    }
                    if dh.abs() > HSL_EPSILON || ds.abs() > HSL_EPSILON || dl.abs() > HSL_EPSILON {
                        hue = (hue + dh).rem_euclid(360.0);
                        s = clamp01(s * (1.0 + ds));
                        l = if dl > 0.0 { l + (1.0 - l) * dl * 0.5 } else { l + l * dl * 0.5 };
                        l = clamp01(l);
                        let (nr, ng, nb) = hsl_to_rgb(hue, s, l);
                        r = nr * 255.0;
                        g = ng * 255.0;
                        b = nb * 255.0;
                    }
                }

                // Stage B: global tone
                if brightness != 0.0 {
                    r += brightness;
                    g += brightness;
                    b += brightness;
                }
                if contrast_k != 1.0 {
                    r = contrast_k * (r - 128.0) + 128.0;
                    g = contrast_k * (g - 128.0) + 128.0;
                    b = contrast_k * (b - 128.0) + 128.0;
                }
                r = r.clamp(0.0, 255.0);
                g = g.clamp(0.0, 255.0);
                b = b.clamp(0.0, 255.0);

                let y_luma = luma_601(r, g, b);
                if sat_factor != 1.0 {
                    r = y_luma + (r - y_luma) * sat_factor;
                    g = y_luma + (g - y_luma) * sat_factor;
                    b = y_luma + (b - y_luma) * sat_factor;
                }
                if shadows != 0.0 {
                    let lift = (1.0 - y_luma / 255.0).max(0.0) * shadows * 0.5;
                    r += lift;
                    g += lift;
                    b += lift;
                }
                if highlights != 0.0 {
                    let drop = ((y_luma - 128.0) / 128.0).max(0.0) * highlights * 0.5;
                    r += drop;
                    g += drop;
                    b += drop;
                }
                r = r.clamp(0.0, 255.0);
                g = g.clamp(0.0, 255.0);
                b = b.clamp(0.0, 255.0);

                // Stages C+D: trilinear LUT sample, mixed by intensity
                if intensity > 0.0 {
                    let (lr, lg, lb) = lut.sample(r, g, b);
                    r = lerp(r, lr, intensity);
                    g = lerp(g, lg, intensity);
                    b = lerp(b, lb, intensity);
                }

                // Stage E: local masks, composed in list order
                for lp in &locals {
                    let alpha = lp.alpha[row_off + x];
                    if alpha == 0 {
                        continue;
                    }
                    let weight = alpha as f32 / 255.0 * lp.opacity;

                    let mut cr = r * lp.exposure_gain;
                    let mut cg = g * lp.exposure_gain;
                    let mut cb = b * lp.exposure_gain;
                    if lp.contrast_k != 1.0 {
                        cr = lp.contrast_k * (cr - 128.0) + 128.0;
                        cg = lp.contrast_k * (cg - 128.0) + 128.0;
                        cb = lp.contrast_k * (cb - 128.0) + 128.0;
                    }
                    if lp.sat_factor != 1.0 {
                        let ly = luma_601(cr, cg, cb);
                        cr = ly + (cr - ly) * lp.sat_factor;
                        cg = ly + (cg - ly) * lp.sat_factor;
                        cb = ly + (cb - ly) * lp.sat_factor;
                    }
                    if lp.temp != 0.0 {
                        cr *= 1.0 + lp.temp;
                        cb *= 1.0 - lp.temp;
                    }
                    if lp.tint != 0.0 {
                        cg *= 1.0 - lp.tint;
                    }
                    cr = cr.clamp(0.0, 255.0);
                    cg = cg.clamp(0.0, 255.0);
                    cb = cb.clamp(0.0, 255.0);

                    r = lerp(r, cr, weight);
                    g = lerp(g, cg, weight);
                    b = lerp(b, cb, weight);
                }

                // Stage F: vignette, radial cubic falloff
                if vig > 0.0 {
                    let dx = x as f32 - cx;
                    let dy = yf - cy;
                    let d = (dx * dx + dy * dy).sqrt() * inv_dmax;
                    let v = d * d * d * vig * 255.0;
                    r -= v;
                    g -= v;
                    b -= v;
                }

                // Stage G: triangular dither to break gradient banding
                let n = tri_noise(x as u32, y as u32, DITHER_SEED);
                let rb = (r + n).round().clamp(0.0, 255.0) as u8;
                let gb = (g + n).round().clamp(0.0, 255.0) as u8;
                let bb = (b + n).round().clamp(0.0, 255.0) as u8;

                row_out[pi] = rb;
                row_out[pi + 1] = gb;
                row_out[pi + 2] = bb;
                row_out[pi + 3] = row_in[pi + 3];

                // Stage H: histogram of the final bytes
                hist.r[rb as usize] += 1;
                hist.g[gb as usize] += 1;
                hist.b[bb as usize] += 1;
            }
            hist
        })
        .reduce(Histogram::new, |mut a, b| {
            a.merge(&b);
            a
        });

    let dst = RgbaImage::from_raw(w as u32, h as u32, dst_raw).unwrap();
    (dst, histogram)
}
