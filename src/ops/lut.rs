// ============================================================================
// 3D LUT — synthesis, trilinear sampling, and .cube file parsing
// ============================================================================
//
// The LUT bakes white balance, film emulation, and split-tone grading into a
// 32³ grid so that per-pixel cost is a single trilinear fetch. Samples are
// bytes laid out R-fastest, the same order as a flattened .cube file:
// index (ri + gi·N + bi·N²)·3 holds the RGB triple for corner (ri, gi, bi).
// ============================================================================

use std::path::Path;

use crate::film::FilmType;
use crate::ops::color::{clamp01, hsl_to_rgb, lerp, luma_601, soft_light};
use crate::params::{SplitToning, WhiteBalance};

/// Grid size per axis for synthesized LUTs.
pub const LUT_SIZE: u32 = 32;

/// A 3D lookup table mapping input RGB to graded output RGB.
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3D {
    size: u32,
    data: Vec<u8>,
}

impl Lut3D {
    /// Wrap raw samples. Returns `None` unless `data.len() == 3·size³`
    /// with `size ≥ 2`.
    pub fn from_raw(size: u32, data: Vec<u8>) -> Option<Self> {
        let n = size as usize;
        if size < 2 || data.len() != 3 * n * n * n {
            return None;
        }
        Some(Self { size, data })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The identity transform, exact at every grid corner.
    pub fn identity() -> Self {
        Self::synthesize(FilmType::None, &WhiteBalance::default(), &SplitToning::default())
    }

    /// Bake white balance → film emulation → split-tone grading into a
    /// 32³ LUT by evaluating the chain at every grid corner.
    pub fn synthesize(film: FilmType, wb: &WhiteBalance, grading: &SplitToning) -> Self {
        let n = LUT_SIZE as usize;
        let step = 255.0 / (LUT_SIZE - 1) as f32;
        let mut data = vec![0u8; 3 * n * n * n];

        let t = wb.temp / 100.0;
        let tn = wb.tint / 100.0;
        let grade = !grading.is_neutral();

        let mut i = 0;
        for bi in 0..n {
            for gi in 0..n {
                for ri in 0..n {
                    // White balance: independent channel gains, no
                    // luminance renormalization.
                    let r = ri as f32 * step * (1.0 + t);
                    let g = gi as f32 * step * (1.0 - tn);
                    let b = bi as f32 * step * (1.0 - t);

                    let (mut r, mut g, mut b) = film.apply(r, g, b);

                    if grade {
                        (r, g, b) = apply_grading(r, g, b, grading);
                    }

                    data[i] = r.round().clamp(0.0, 255.0) as u8;
                    data[i + 1] = g.round().clamp(0.0, 255.0) as u8;
                    data[i + 2] = b.round().clamp(0.0, 255.0) as u8;
                    i += 3;
                }
            }
        }

        Self { size: LUT_SIZE, data }
    }

    /// Trilinear sample at a 0..255 RGB position: fetch the eight
    /// surrounding corners and lerp along R, then G, then B.
    #[inline]
    pub fn sample(&self, r: f32, g: f32, b: f32) -> (f32, f32, f32) {
        let n = self.size as usize;
        let scale = (self.size - 1) as f32 / 255.0;

        let pr = r.clamp(0.0, 255.0) * scale;
        let pg = g.clamp(0.0, 255.0) * scale;
        let pb = b.clamp(0.0, 255.0) * scale;

        let r0 = pr as usize;
        let g0 = pg as usize;
        let b0 = pb as usize;
        let r1 = (r0 + 1).min(n - 1);
        let g1 = (g0 + 1).min(n - 1);
        let b1 = (b0 + 1).min(n - 1);
        let fr = pr - r0 as f32;
        let fg = pg - g0 as f32;
        let fb = pb - b0 as f32;

        let idx = |ri: usize, gi: usize, bi: usize| (ri + gi * n + bi * n * n) * 3;
        let mut out = [0.0f32; 3];
        for c in 0..3 {
            let c000 = self.data[idx(r0, g0, b0) + c] as f32;
            let c100 = self.data[idx(r1, g0, b0) + c] as f32;
            let c010 = self.data[idx(r0, g1, b0) + c] as f32;
            let c110 = self.data[idx(r1, g1, b0) + c] as f32;
            let c001 = self.data[idx(r0, g0, b1) + c] as f32;
            let c101 = self.data[idx(r1, g0, b1) + c] as f32;
            let c011 = self.data[idx(r0, g1, b1) + c] as f32;
            let c111 = self.data[idx(r1, g1, b1) + c] as f32;

            let c00 = lerp(c000, c100, fr);
            let c10 = lerp(c010, c110, fr);
            let c01 = lerp(c001, c101, fr);
            let c11 = lerp(c011, c111, fr);
            let c0 = lerp(c00, c10, fg);
            let c1 = lerp(c01, c11, fg);
            out[c] = lerp(c0, c1, fb);
        }

        (out[0], out[1], out[2])
    }

    /// Load a 3D LUT from a `.cube` text file. Fractional samples are
    /// normalized by DOMAIN_MIN/DOMAIN_MAX before quantization to bytes.
    pub fn load_cube(path: &Path) -> Result<Self, CubeError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_cube(&text)
    }

    /// Parse `.cube` text: `LUT_3D_SIZE`, optional `DOMAIN_MIN`/`DOMAIN_MAX`,
    /// then whitespace-separated float triples in R-fastest order.
    pub fn parse_cube(text: &str) -> Result<Self, CubeError> {
        let mut size: u32 = 0;
        let mut dmin = [0.0f32; 3];
        let mut dmax = [1.0f32; 3];
        let mut samples: Vec<f32> = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let first = parts.next().unwrap();
            match first {
                "LUT_3D_SIZE" => {
                    size = parts
                        .next()
                        .and_then(|v| v.parse().ok())
                        .ok_or_else(|| CubeError::Parse("bad LUT_3D_SIZE".into()))?;
                }
                "LUT_1D_SIZE" => {
                    return Err(CubeError::Parse("1D LUTs are not supported".into()));
                }
                "DOMAIN_MIN" => dmin = parse_triple(parts)?,
                "DOMAIN_MAX" => dmax = parse_triple(parts)?,
                "TITLE" => {}
                tok if tok.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) => {
                    // Unknown keyword lines are ignored.
                }
                tok => {
                    let r: f32 = tok
                        .parse()
                        .map_err(|_| CubeError::Parse(format!("bad sample value: {}", tok)))?;
                    let g = parse_value(parts.next())?;
                    let b = parse_value(parts.next())?;
                    samples.push(r);
                    samples.push(g);
                    samples.push(b);
                }
            }
        }

        if size < 2 {
            return Err(CubeError::Parse("missing or invalid LUT_3D_SIZE".into()));
        }
        let n = size as usize;
        if samples.len() != 3 * n * n * n {
            return Err(CubeError::Parse(format!(
                "expected {} samples for size {}, found {}",
                3 * n * n * n,
                size,
                samples.len()
            )));
        }

        let mut data = vec![0u8; samples.len()];
        for (i, v) in samples.iter().enumerate() {
            let c = i % 3;
            let range = dmax[c] - dmin[c];
            if range <= 0.0 {
                return Err(CubeError::Parse("degenerate DOMAIN_MIN/DOMAIN_MAX".into()));
            }
            let norm = (v - dmin[c]) / range;
            data[i] = (norm * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Ok(Self { size, data })
    }
}

fn parse_triple<'a, I: Iterator<Item = &'a str>>(mut parts: I) -> Result<[f32; 3], CubeError> {
    let a = parse_value(parts.next())?;
    let b = parse_value(parts.next())?;
    let c = parse_value(parts.next())?;
    Ok([a, b, c])
}

fn parse_value(tok: Option<&str>) -> Result<f32, CubeError> {
    tok.and_then(|v| v.parse().ok())
        .ok_or_else(|| CubeError::Parse("expected a float value".into()))
}

/// Split-tone grading: soft-light toward each band's tint color, weighted
/// by luma band masks, in shadow → midtone → highlight order.
fn apply_grading(r: f32, g: f32, b: f32, grading: &SplitToning) -> (f32, f32, f32) {
    let y = luma_601(r, g, b) / 255.0;
    let masks = [
        (grading.shadows, (1.0 - 2.0 * y).max(0.0)),
        (grading.midtones, (1.0 - 2.0 * (y - 0.5).abs()).max(0.0)),
        (grading.highlights, (2.0 * (y - 0.5)).max(0.0)),
    ];

    let (mut r, mut g, mut b) = (r, g, b);
    for (tone, mask) in masks {
        if tone.saturation <= 0.0 || mask <= 0.0 {
            continue;
        }
        let (tr, tg, tb) = hsl_to_rgb(tone.hue, 0.8, 0.5);
        let amt = tone.saturation / 100.0 * mask;
        r = lerp(r, soft_light(clamp01(r / 255.0), tr) * 255.0, amt);
        g = lerp(g, soft_light(clamp01(g / 255.0), tg) * 255.0, amt);
        b = lerp(b, soft_light(clamp01(b / 255.0), tb) * 255.0, amt);
    }
    (r, g, b)
}

/// Error type for `.cube` file operations.
#[derive(Debug)]
pub enum CubeError {
    Io(std::io::Error),
    Parse(String),
}

impl std::fmt::Display for CubeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CubeError::Io(e) => write!(f, "I/O error: {}", e),
            CubeError::Parse(e) => write!(f, "Invalid cube file: {}", e),
        }
    }
}

impl From<std::io::Error> for CubeError {
    fn from(e: std::io::Error) -> Self {
        CubeError::Io(e)
    }
}
