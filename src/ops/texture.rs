// ============================================================================
// TEXTURE PASS — smart sharpen + overlay film grain
// ============================================================================
//
// Second full-image pass over the processed output. Sharpening runs first so
// grain is never amplified by the high-pass; it reads from a snapshot of the
// buffer because the convolution must see unperturbed neighbours. Grain is a
// pure per-pixel overlay blend and mutates the buffer in place.
// ============================================================================

use image::RgbaImage;
use rayon::prelude::*;

use crate::ops::color::{luma_601, luma_709};
use crate::ops::noise::hash01;
use crate::params::Adjustments;

/// Luma deltas at or below this are treated as noise and left alone.
const DETAIL_THRESHOLD: f32 = 6.0;

/// Center luma below which sharpening is progressively suppressed, to keep
/// deep-shadow noise from being amplified.
const SHADOW_PROTECT: f32 = 40.0;

const GRAIN_SEED: u32 = 0x85EBCA6B;

/// Apply sharpening then grain to the rendered output, in place.
pub fn apply(img: &mut RgbaImage, adj: &Adjustments) {
    if adj.sharpening > 0.0 {
        sharpen(img, adj.sharpening);
    }
    if adj.grain_amount > 0.0 {
        grain(img, adj.grain_amount, adj.grain_size);
    }
}

/// Unsharp mask with a luma gate: detail = center luma − 4-neighbour mean,
/// skipped below the noise threshold and damped toward black. The 1-pixel
/// border is left untouched.
fn sharpen(img: &mut RgbaImage, amount: f32) {
    let w = img.width() as usize;
    let h = img.height() as usize;
    if w < 3 || h < 3 {
        return;
    }

    let snapshot = img.as_raw().clone();
    let stride = w * 4;
    let strength = amount / 100.0 * 1.5;

    let luma_at = |i: usize| -> f32 {
        luma_601(snapshot[i] as f32, snapshot[i + 1] as f32, snapshot[i + 2] as f32)
    };

    img.as_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            if y == 0 || y == h - 1 {
                return;
            }
            for x in 1..w - 1 {
                let ci = y * stride + x * 4;
                let yc = luma_at(ci);
                let yavg = (luma_at(ci - 4)
                    + luma_at(ci + 4)
                    + luma_at(ci - stride)
                    + luma_at(ci + stride))
                    * 0.25;
                let detail = yc - yavg;
                if detail.abs() <= DETAIL_THRESHOLD {
                    continue;
                }
                let protect = (yc / SHADOW_PROTECT).min(1.0);
                let boost = detail * strength * protect;

                let pi = x * 4;
                for c in 0..3 {
                    let v = snapshot[ci + c] as f32 + boost;
                    row_out[pi + c] = v.round().clamp(0.0, 255.0) as u8;
                }
            }
        });
}

/// Overlay-blended monochrome grain. The noise mask is damped in highlights
/// (but never zeroed in shadows), and `grain_size` coarsens the grain by
/// replicating one noise value across an s×s block. Pointwise, so unlike
/// the sharpen convolution it covers the border rows too.
fn grain(img: &mut RgbaImage, amount: f32, grain_size: f32) {
    let w = img.width() as usize;
    let stride = w * 4;
    let strength = amount / 100.0;
    let block = (grain_size.round() as u32).max(1);

    img.as_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let by = y as u32 / block;
            for x in 0..w {
                let pi = x * 4;
                let r = row[pi] as f32;
                let g = row[pi + 1] as f32;
                let b = row[pi + 2] as f32;

                let luma = luma_709(r, g, b) / 255.0;
                let mask = (1.0 - luma * luma).max(0.2);
                let n = hash01(x as u32 / block, by, GRAIN_SEED);
                let v = 0.5 + (n - 0.5) * strength * mask * 0.8;

                row[pi] = overlay(r, v);
                row[pi + 1] = overlay(g, v);
                row[pi + 2] = overlay(b, v);
            }
        });
}

#[inline]
fn overlay(channel: f32, blend: f32) -> u8 {
    let base = channel / 255.0;
    let out = if base < 0.5 {
        2.0 * base * blend
    } else {
        1.0 - 2.0 * (1.0 - base) * (1.0 - blend)
    };
    (out * 255.0).round().clamp(0.0, 255.0) as u8
}
