// ============================================================================
// MASK LAYERS — alpha-only local adjustment masks + brush rasterization
// ============================================================================
//
// A mask is an 8-bit alpha plane the size of the image. Alpha is
// authoritative: a zero-alpha pixel is untouched regardless of layer
// opacity. Masks are mutated only by the brush rasterizer between renders
// and are read-only while a render runs.
// ============================================================================

use image::{GrayImage, Luma};
use uuid::Uuid;

use crate::params::LocalAdjustments;

/// One local-adjustment mask layer.
#[derive(Debug, Clone)]
pub struct MaskLayer {
    pub id: Uuid,
    pub visible: bool,
    /// 0..1, multiplies the alpha-derived per-pixel weight.
    pub opacity: f32,
    pub alpha: GrayImage,
    pub adjust: LocalAdjustments,
}

impl MaskLayer {
    /// An empty (fully transparent) mask sized for a `width`×`height` image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            visible: true,
            opacity: 1.0,
            alpha: GrayImage::new(width, height),
            adjust: LocalAdjustments::default(),
        }
    }
}

/// Brush parameters for mask painting.
#[derive(Debug, Clone, Copy)]
pub struct BrushParams {
    /// Stamp diameter in pixels.
    pub size: f32,
    /// 0..1; 1.0 is a hard edge, lower values widen the soft falloff.
    pub hardness: f32,
    /// 0..1 per-stamp accumulation rate.
    pub flow: f32,
    /// Erase strokes reduce alpha instead of building it up.
    pub erase: bool,
}

impl Default for BrushParams {
    fn default() -> Self {
        Self { size: 64.0, hardness: 0.75, flow: 1.0, erase: false }
    }
}

/// Rasterize one stroke segment into a mask, splatting a disk stamp at
/// every pixel of segment length so fast pointer movement leaves no gaps.
pub fn rasterize_stroke(
    mask: &mut GrayImage,
    brush: &BrushParams,
    from: (f32, f32),
    to: (f32, f32),
) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance < 0.1 {
        splat(mask, brush, from);
        return;
    }

    let steps = distance.ceil() as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        splat(mask, brush, (from.0 + dx * t, from.1 + dy * t));
    }
}

/// Stamp one disk. Paint accumulates `α += flow·fall·(255−α)`;
/// erase removes `α −= flow·fall·α`, so repeated low-flow passes build
/// up (or wear down) coverage smoothly without overshooting.
fn splat(mask: &mut GrayImage, brush: &BrushParams, center: (f32, f32)) {
    let radius = brush.size / 2.0;
    if radius < 0.001 {
        return;
    }
    let (w, h) = mask.dimensions();
    let flow = brush.flow.clamp(0.0, 1.0);

    let x0 = (center.0 - radius).floor().max(0.0) as u32;
    let x1 = ((center.0 + radius).ceil() as i64).min(w as i64 - 1).max(0) as u32;
    let y0 = (center.1 - radius).floor().max(0.0) as u32;
    let y1 = ((center.1 + radius).ceil() as i64).min(h as i64 - 1).max(0) as u32;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 - center.0;
            let dy = y as f32 - center.1;
            let dist = (dx * dx + dy * dy).sqrt();
            let fall = edge_falloff(dist, radius, brush.hardness);
            if fall <= 0.0 {
                continue;
            }
            let a = mask.get_pixel(x, y).0[0] as f32;
            let na = if brush.erase {
                a - flow * fall * a
            } else {
                a + flow * fall * (255.0 - a)
            };
            mask.put_pixel(x, y, Luma([na.round().clamp(0.0, 255.0) as u8]));
        }
    }
}

/// Soft brush edge: solid core, then a smoothstep fade whose width grows
/// as hardness drops. Hardness is remapped so 0% still keeps a sliver of
/// core instead of degenerating to a point.
fn edge_falloff(dist: f32, radius: f32, hardness: f32) -> f32 {
    let hardness = (0.02 + hardness * 0.98).clamp(0.0, 0.99);
    let fade = (radius * (1.0 - hardness)).max(1.0);
    let solid = radius - fade;

    if dist <= solid {
        return 1.0;
    }
    if dist >= radius {
        return 0.0;
    }

    let t = (dist - solid) / fade;
    let x = 1.0 - t.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}
