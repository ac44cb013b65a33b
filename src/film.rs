// ============================================================================
// FILM CATALOGUE — stock emulation recipes baked into the LUT
// ============================================================================
//
// Each film is an optional 3×3 channel matrix (spectral crosstalk) followed
// by a per-channel tone curve, with a few per-stock special steps. The Acros
// family collapses to a weighted B&W mix before its curve; Sepia is matrix
// only. `None` is the pass-through used when no emulation is wanted.
// ============================================================================

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::ops::color::{luma_601, s_curve};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum FilmType {
    /// Pass-through: no matrix, no curve.
    None,
    /// Standard reference stock.
    Provia,
    /// Vivid, saturated.
    Velvia,
    /// Soft, skin-protective.
    Astia,
    /// Muted colors, crushed shadows.
    ClassicChrome,
    /// Negative-film look with a luma-dependent warm/cool split.
    ClassicNeg,
    /// Faded print with amber highlights.
    NostalgicNeg,
    /// Punchy but neutral.
    RealaAce,
    /// Flat cine stock with lifted blacks.
    Eterna,
    AcrosNeutral,
    AcrosYellow,
    AcrosRed,
    AcrosGreen,
    Sepia,
}

impl Default for FilmType {
    fn default() -> Self {
        FilmType::None
    }
}

impl FilmType {
    /// Row-major channel crosstalk matrix. `None` means identity.
    fn matrix(self) -> Option<&'static [[f32; 3]; 3]> {
        match self {
            FilmType::Velvia => Some(&[
                [1.15, -0.05, -0.10],
                [-0.05, 1.15, -0.10],
                [-0.10, -0.10, 1.20],
            ]),
            FilmType::Astia => Some(&[
                [1.05, 0.05, -0.10],
                [0.0, 1.0, 0.0],
                [-0.05, 0.0, 1.05],
            ]),
            FilmType::ClassicChrome => Some(&[
                [0.75, 0.20, 0.05],
                [0.10, 0.85, 0.05],
                [0.0, 0.10, 0.90],
            ]),
            FilmType::ClassicNeg => Some(&[
                [0.95, 0.05, 0.0],
                [0.0, 1.05, 0.0],
                [0.0, 0.10, 0.90],
            ]),
            FilmType::NostalgicNeg => Some(&[
                [1.10, 0.10, -0.20],
                [0.05, 0.95, 0.0],
                [-0.10, 0.10, 1.00],
            ]),
            FilmType::RealaAce => Some(&[
                [1.05, 0.0, -0.05],
                [-0.02, 1.04, -0.02],
                [-0.05, 0.0, 1.05],
            ]),
            FilmType::Eterna => Some(&[
                [0.90, 0.10, 0.0],
                [0.05, 0.90, 0.05],
                [0.0, 0.10, 0.90],
            ]),
            FilmType::Sepia => Some(&[
                [0.393, 0.769, 0.189],
                [0.349, 0.686, 0.168],
                [0.272, 0.534, 0.131],
            ]),
            _ => None,
        }
    }

    /// Tone curve (steepness, inflection point). `None` skips the curve.
    fn curve(self) -> Option<(f32, f32)> {
        match self {
            FilmType::None | FilmType::Sepia => None,
            FilmType::Provia | FilmType::Astia | FilmType::NostalgicNeg | FilmType::RealaAce => {
                Some((4.5, 0.5))
            }
            FilmType::Velvia => Some((6.5, 0.5)),
            FilmType::ClassicChrome => Some((5.5, 0.55)),
            FilmType::ClassicNeg => Some((6.0, 0.5)),
            FilmType::Eterna => Some((3.5, 0.5)),
            FilmType::AcrosNeutral
            | FilmType::AcrosYellow
            | FilmType::AcrosRed
            | FilmType::AcrosGreen => Some((5.0, 0.5)),
        }
    }

    /// B&W channel mix for the Acros family, simulating a lens filter.
    fn mono_mix(self) -> Option<[f32; 3]> {
        match self {
            FilmType::AcrosNeutral => Some([0.30, 0.60, 0.10]),
            FilmType::AcrosYellow => Some([0.40, 0.55, 0.05]),
            FilmType::AcrosRed => Some([0.50, 0.45, 0.05]),
            FilmType::AcrosGreen => Some([0.20, 0.70, 0.10]),
            _ => None,
        }
    }

    /// Apply this film's emulation to a 0..255 pixel.
    /// Output may transiently exceed 0..255; the LUT synthesizer clamps.
    pub fn apply(self, r: f32, g: f32, b: f32) -> (f32, f32, f32) {
        if let Some(mix) = self.mono_mix() {
            let grey = (mix[0] * r + mix[1] * g + mix[2] * b) / 255.0;
            let (k, x0) = self.curve().unwrap_or((5.0, 0.5));
            let v = s_curve(grey, k, x0) * 255.0;
            return (v, v, v);
        }

        let (mut r, mut g, mut b) = match self.matrix() {
            Some(m) => (
                m[0][0] * r + m[0][1] * g + m[0][2] * b,
                m[1][0] * r + m[1][1] * g + m[1][2] * b,
                m[2][0] * r + m[2][1] * g + m[2][2] * b,
            ),
            None => (r, g, b),
        };

        if self == FilmType::ClassicNeg {
            // Warm highlights, cool shadows, scaled by distance from mid-grey.
            let y = luma_601(r, g, b) / 255.0;
            if y > 0.5 {
                r *= 1.0 + 0.04 * (2.0 * y - 1.0);
            } else {
                b *= 1.0 + 0.04 * (1.0 - 2.0 * y);
            }
        }

        if let Some((k, x0)) = self.curve() {
            r = s_curve(r / 255.0, k, x0) * 255.0;
            g = s_curve(g / 255.0, k, x0) * 255.0;
            b = s_curve(b / 255.0, k, x0) * 255.0;
        }

        match self {
            FilmType::Eterna => {
                // Lift blacks and compress the range for the flat cine look.
                r = 0.9 * r + 10.0;
                g = 0.9 * g + 10.0;
                b = 0.9 * b + 10.0;
            }
            FilmType::NostalgicNeg => {
                let m = ((luma_601(r, g, b) / 255.0 - 0.5) * 2.0).max(0.0);
                r += 12.0 * m;
                g += 6.0 * m;
            }
            _ => {}
        }

        (r, g, b)
    }
}
