// ============================================================================
// GRADE PARAMETERS — the immutable adjustment snapshot passed to each render
// ============================================================================
//
// All records are plain aggregates with documented slider ranges. Values
// outside their range never fail a render: `Adjustments::sanitized` clamps
// them and reports through the session log.
// ============================================================================

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::film::FilmType;
use crate::log_warn;

/// White balance channel gains.
/// `temp`: -50..50 (negative = cooler/blue, positive = warmer/red)
/// `tint`: -50..50 (positive pulls green down toward magenta)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WhiteBalance {
    pub temp: f32,
    pub tint: f32,
}

/// One split-toning band: `hue` in degrees 0..360, `saturation` 0..100.
/// Zero saturation disables the band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GradingTone {
    pub hue: f32,
    pub saturation: f32,
}

/// Split-tone color grading applied inside the LUT, after film emulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitToning {
    pub shadows: GradingTone,
    pub midtones: GradingTone,
    pub highlights: GradingTone,
}

impl SplitToning {
    pub fn is_neutral(&self) -> bool {
        self.shadows.saturation <= 0.0
            && self.midtones.saturation <= 0.0
            && self.highlights.saturation <= 0.0
    }
}

/// Selective HSL adjustment for a single color band.
/// `hue`: -30..30 degrees, `saturation` and `luminance`: -100..100.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HslBand {
    pub hue: f32,
    pub saturation: f32,
    pub luminance: f32,
}

impl HslBand {
    pub fn is_zero(&self) -> bool {
        self.hue == 0.0 && self.saturation == 0.0 && self.luminance == 0.0
    }
}

/// Six-band selective HSL mixer. Band centers sit at
/// red 0°, yellow 60°, green 120°, cyan 180°, blue 240°, magenta 300°.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HslMixer {
    pub red: HslBand,
    pub yellow: HslBand,
    pub green: HslBand,
    pub cyan: HslBand,
    pub blue: HslBand,
    pub magenta: HslBand,
}

impl HslMixer {
    pub fn is_neutral(&self) -> bool {
        self.bands().iter().all(|b| b.is_zero())
    }

    pub fn bands(&self) -> [HslBand; 6] {
        [self.red, self.yellow, self.green, self.cyan, self.blue, self.magenta]
    }
}

/// Per-mask local adjustments, all -100..100.
/// `sharpness` is carried for the host's benefit; spatial sharpening is a
/// global texture-pass concern and is not evaluated per mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalAdjustments {
    pub exposure: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub temperature: f32,
    pub tint: f32,
    pub sharpness: f32,
}

/// The full adjustment snapshot for one render.
///
/// Tone sliders are -100..100; texture sliders 0..100 except `grain_size`
/// (1..5). `halation` is stored for the host's post-render bloom composite
/// and ignored by the engine. `intensity` (0..1) mixes the pre-LUT color
/// with the LUT result.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub highlights: f32,
    pub shadows: f32,

    pub grain_amount: f32,
    pub grain_size: f32,
    pub sharpening: f32,
    pub vignette: f32,
    pub halation: f32,

    pub white_balance: WhiteBalance,
    pub grading: SplitToning,
    pub hsl: HslMixer,

    pub intensity: f32,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 0.0,
            saturation: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            grain_amount: 0.0,
            grain_size: 1.0,
            sharpening: 0.0,
            vignette: 0.0,
            halation: 0.0,
            white_balance: WhiteBalance::default(),
            grading: SplitToning::default(),
            hsl: HslMixer::default(),
            intensity: 1.0,
        }
    }
}

impl Adjustments {
    /// Clamp every parameter to its documented range. Out-of-range values
    /// are reported on the session log but never fail the render.
    pub fn sanitized(&self) -> Self {
        let mut adj = *self;
        adj.brightness = clamp_report(adj.brightness, -100.0, 100.0, "brightness");
        adj.contrast = clamp_report(adj.contrast, -100.0, 100.0, "contrast");
        adj.saturation = clamp_report(adj.saturation, -100.0, 100.0, "saturation");
        adj.highlights = clamp_report(adj.highlights, -100.0, 100.0, "highlights");
        adj.shadows = clamp_report(adj.shadows, -100.0, 100.0, "shadows");
        adj.grain_amount = clamp_report(adj.grain_amount, 0.0, 100.0, "grain_amount");
        adj.grain_size = clamp_report(adj.grain_size, 1.0, 5.0, "grain_size");
        adj.sharpening = clamp_report(adj.sharpening, 0.0, 100.0, "sharpening");
        adj.vignette = clamp_report(adj.vignette, 0.0, 100.0, "vignette");
        adj.halation = clamp_report(adj.halation, 0.0, 100.0, "halation");
        adj.white_balance.temp = clamp_report(adj.white_balance.temp, -50.0, 50.0, "wb.temp");
        adj.white_balance.tint = clamp_report(adj.white_balance.tint, -50.0, 50.0, "wb.tint");
        adj.grading.shadows = sanitize_tone(adj.grading.shadows, "grading.shadows");
        adj.grading.midtones = sanitize_tone(adj.grading.midtones, "grading.midtones");
        adj.grading.highlights = sanitize_tone(adj.grading.highlights, "grading.highlights");
        adj.hsl.red = sanitize_band(adj.hsl.red, "hsl.red");
        adj.hsl.yellow = sanitize_band(adj.hsl.yellow, "hsl.yellow");
        adj.hsl.green = sanitize_band(adj.hsl.green, "hsl.green");
        adj.hsl.cyan = sanitize_band(adj.hsl.cyan, "hsl.cyan");
        adj.hsl.blue = sanitize_band(adj.hsl.blue, "hsl.blue");
        adj.hsl.magenta = sanitize_band(adj.hsl.magenta, "hsl.magenta");
        adj.intensity = clamp_report(adj.intensity, 0.0, 1.0, "intensity");
        adj
    }
}

fn sanitize_tone(tone: GradingTone, name: &str) -> GradingTone {
    GradingTone {
        hue: wrap_hue(tone.hue),
        saturation: clamp_report(tone.saturation, 0.0, 100.0, name),
    }
}

fn sanitize_band(band: HslBand, name: &str) -> HslBand {
    HslBand {
        hue: clamp_report(band.hue, -30.0, 30.0, name),
        saturation: clamp_report(band.saturation, -100.0, 100.0, name),
        luminance: clamp_report(band.luminance, -100.0, 100.0, name),
    }
}

fn clamp_report(value: f32, lo: f32, hi: f32, name: &str) -> f32 {
    if !value.is_finite() {
        log_warn!("adjustment {} is not finite, reset to {}", name, lo.max(0.0).min(hi));
        return lo.max(0.0).min(hi);
    }
    if value < lo || value > hi {
        log_warn!("adjustment {} = {} outside {}..{}, clamped", name, value, lo, hi);
    }
    value.clamp(lo, hi)
}

fn wrap_hue(hue: f32) -> f32 {
    if hue.is_finite() { hue.rem_euclid(360.0) } else { 0.0 }
}

// ============================================================================
// PRESETS — a film choice plus adjustments, stored as JSON
// ============================================================================

/// A saved grade: film stock plus the adjustment snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GradePreset {
    #[serde(default)]
    pub film: FilmType,
    #[serde(default)]
    pub adjustments: Adjustments,
}

impl GradePreset {
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read preset {}: {}", path.display(), e))?;
        serde_json::from_str(&text)
            .map_err(|e| format!("cannot parse preset {}: {}", path.display(), e))
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| format!("cannot serialize preset: {}", e))?;
        std::fs::write(path, text)
            .map_err(|e| format!("cannot write preset {}: {}", path.display(), e))
    }
}
