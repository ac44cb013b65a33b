pub mod color;
pub mod lut;
pub mod noise;
pub mod pipeline;
pub mod texture;
