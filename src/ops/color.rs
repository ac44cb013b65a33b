// ============================================================================
// COLOR PRIMITIVES — pure per-channel math shared by the LUT and the pipeline
// ============================================================================
//
// All functions operate on f32 channel values. RGB is nominally 0..255 but
// transient overflow between stages is tolerated; clamping happens only at
// the documented stage boundaries. HSL uses hue in degrees 0..360 and
// saturation/lightness fractions 0..1.
// ============================================================================

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Rec.601 luma on 0..255 channels.
#[inline]
pub fn luma_601(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Rec.709 luma on 0..255 channels (used by the grain pass).
#[inline]
pub fn luma_709(r: f32, g: f32, b: f32) -> f32 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// RGB (0..1) → HSL (H in degrees 0..360, S: 0..1, L: 0..1).
/// Grey input (max == min) returns h = 0, s = 0.
#[inline]
pub fn rgb_to_hsl(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if (max - min).abs() < 1e-6 {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };

    let h = if (max - r).abs() < 1e-6 {
        let mut h = (g - b) / d;
        if h < 0.0 { h += 6.0; }
        h * 60.0
    } else if (max - g).abs() < 1e-6 {
        ((b - r) / d + 2.0) * 60.0
    } else {
        ((r - g) / d + 4.0) * 60.0
    };

    (h, s, l)
}

/// HSL (H in degrees, S: 0..1, L: 0..1) → RGB (0..1).
#[inline]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    if s.abs() < 1e-6 {
        return (l, l, l);
    }

    let h = h / 360.0;
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    (r, g, b)
}

#[inline]
fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 { t += 1.0; }
    if t > 1.0 { t -= 1.0; }
    if t < 1.0 / 6.0 { return p + (q - p) * 6.0 * t; }
    if t < 1.0 / 2.0 { return q; }
    if t < 2.0 / 3.0 { return p + (q - p) * (2.0 / 3.0 - t) * 6.0; }
    p
}

/// Blend weight of a hue into a band centered at `center` degrees.
/// Wrap-aware angular distance with a smoothstep falloff; 0 at or beyond
/// `range` degrees. The red band at 0° relies on the wrap to cover 350°..10°.
#[inline]
pub fn hue_weight(hue: f32, center: f32, range: f32) -> f32 {
    let mut diff = (hue - center).abs() % 360.0;
    if diff > 180.0 {
        diff = 360.0 - diff;
    }
    if diff >= range {
        return 0.0;
    }
    let v = 1.0 - diff / range;
    v * v * (3.0 - 2.0 * v)
}

/// Photoshop soft-light blend of `base` and `blend`, both 0..1.
#[inline]
pub fn soft_light(base: f32, blend: f32) -> f32 {
    if blend <= 0.5 {
        base - (1.0 - 2.0 * blend) * base * (1.0 - base)
    } else {
        let d = if base <= 0.25 {
            ((16.0 * base - 12.0) * base + 4.0) * base
        } else {
            base.sqrt()
        };
        base + (2.0 * blend - 1.0) * (d - base)
    }
}

/// Logistic S-curve on 0..1, renormalized so that 0 → 0 and 1 → 1.
/// `k` is the midtone steepness, `x0` the inflection point.
#[inline]
pub fn s_curve(x: f32, k: f32, x0: f32) -> f32 {
    let sig = |v: f32| 1.0 / (1.0 + (-k * (v - x0)).exp());
    let lo = sig(0.0);
    let hi = sig(1.0);
    (sig(x) - lo) / (hi - lo)
}

/// Contrast multiplier for a -100..100 slider value,
/// applied as `k * (x - 128) + 128`.
#[inline]
pub fn contrast_factor(contrast: f32) -> f32 {
    (259.0 * (contrast + 255.0)) / (255.0 * (259.0 - contrast))
}
