//! filmgrade — a non-destructive raster image grading engine.
//!
//! Transforms 8-bit RGBA images through a fixed pipeline: white balance,
//! film-stock emulation, and split-tone grading (baked into a 32³ 3D LUT),
//! then per-pixel selective HSL, global tone, trilinear LUT sampling,
//! mask-weighted local adjustments, vignette, dither, and a final texture
//! pass of smart sharpening and film grain. Every render also produces a
//! 256-bin RGB histogram.
//!
//! The engine is pure with respect to its inputs: the host passes an
//! immutable [`Adjustments`] snapshot per render, owns all image and mask
//! buffers, and receives a fresh output. The only state kept between
//! renders is the cached LUT inside [`GradingEngine`].

pub mod cli;
pub mod engine;
pub mod film;
pub mod logger;
pub mod mask;
pub mod ops;
pub mod params;

pub use engine::{GradingEngine, RenderError, render_rgba8, render_with_lut, synthesize_lut};
pub use film::FilmType;
pub use mask::{BrushParams, MaskLayer, rasterize_stroke};
pub use ops::lut::{CubeError, LUT_SIZE, Lut3D};
pub use ops::pipeline::Histogram;
pub use params::{
    Adjustments, GradePreset, GradingTone, HslBand, HslMixer, LocalAdjustments, SplitToning,
    WhiteBalance,
};
