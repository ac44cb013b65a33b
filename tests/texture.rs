use image::{Rgba, RgbaImage};

use filmgrade::{Adjustments, Lut3D, render_with_lut};

fn neutral() -> Adjustments {
    Adjustments { intensity: 0.0, ..Adjustments::default() }
}

#[test]
fn sharpen_amplifies_a_bright_detail() {
    let mut src = RgbaImage::from_pixel(5, 5, Rgba([100, 100, 100, 255]));
    src.put_pixel(2, 2, Rgba([160, 160, 160, 255]));

    let adj = Adjustments { sharpening: 100.0, ..neutral() };
    let (out, _) = render_with_lut(&src, &Lut3D::identity(), &adj, &[]).unwrap();

    // detail = 60, strength = 1.5, no shadow damping → 160 + 90
    assert_eq!(out.get_pixel(2, 2).0[0], 250);
    // The 4-neighbours see a negative detail and darken
    assert!(out.get_pixel(1, 2).0[0] < 100);
    assert!(out.get_pixel(3, 2).0[0] < 100);
    // Diagonal neighbours average four flat pixels and stay put
    assert_eq!(out.get_pixel(1, 1).0[0], 100);
}

#[test]
fn sharpen_skips_flat_regions_and_borders() {
    let src = RgbaImage::from_pixel(6, 6, Rgba([90, 90, 90, 255]));
    let adj = Adjustments { sharpening: 100.0, ..neutral() };

    let (out, _) = render_with_lut(&src, &Lut3D::identity(), &adj, &[]).unwrap();
    assert_eq!(out.as_raw(), src.as_raw(), "flat image must pass through untouched");
}

#[test]
fn sharpen_ignores_sub_threshold_detail() {
    // A ±4 luma ripple sits under the noise threshold of 6
    let mut src = RgbaImage::from_pixel(5, 5, Rgba([100, 100, 100, 255]));
    src.put_pixel(2, 2, Rgba([104, 104, 104, 255]));

    let adj = Adjustments { sharpening: 100.0, ..neutral() };
    let (out, _) = render_with_lut(&src, &Lut3D::identity(), &adj, &[]).unwrap();
    assert_eq!(out.get_pixel(2, 2).0[0], 104);
}

#[test]
fn sharpen_protects_deep_shadows() {
    let mut src = RgbaImage::from_pixel(5, 5, Rgba([8, 8, 8, 255]));
    src.put_pixel(2, 2, Rgba([32, 32, 32, 255]));

    let adj = Adjustments { sharpening: 100.0, ..neutral() };
    let (out, _) = render_with_lut(&src, &Lut3D::identity(), &adj, &[]).unwrap();

    // detail = 24, strength 1.5, protection 32/40 → 32 + 28.8
    assert_eq!(out.get_pixel(2, 2).0[0], 61);
}

#[test]
fn grain_is_deterministic_and_visible() {
    let src = RgbaImage::from_pixel(64, 64, Rgba([128, 128, 128, 255]));
    let adj = Adjustments { grain_amount: 100.0, ..neutral() };

    let (a, _) = render_with_lut(&src, &Lut3D::identity(), &adj, &[]).unwrap();
    let (b, _) = render_with_lut(&src, &Lut3D::identity(), &adj, &[]).unwrap();
    assert_eq!(a.as_raw(), b.as_raw());

    assert!(
        a.pixels().any(|p| p.0[0] != 128),
        "full-strength grain must perturb a flat field"
    );
    for p in a.pixels() {
        assert_eq!(p.0[3], 255);
    }
}

#[test]
fn grain_size_replicates_noise_per_block() {
    let src = RgbaImage::from_pixel(64, 64, Rgba([128, 128, 128, 255]));
    let adj = Adjustments { grain_amount: 100.0, grain_size: 4.0, ..neutral() };

    let (out, _) = render_with_lut(&src, &Lut3D::identity(), &adj, &[]).unwrap();

    // Every pixel inside one 4×4 block shares one noise value
    for by in 0..4 {
        for bx in 0..4 {
            let v = out.get_pixel(bx * 4, by * 4).0[0];
            for dy in 0..4 {
                for dx in 0..4 {
                    assert_eq!(out.get_pixel(bx * 4 + dx, by * 4 + dy).0[0], v);
                }
            }
        }
    }
}

#[test]
fn grain_is_damped_in_highlights() {
    // Spread of grain around a bright field is narrower than around midtones
    let bright = RgbaImage::from_pixel(64, 64, Rgba([245, 245, 245, 255]));
    let mid = RgbaImage::from_pixel(64, 64, Rgba([128, 128, 128, 255]));
    let adj = Adjustments { grain_amount: 100.0, ..neutral() };

    let spread = |img: &RgbaImage| {
        let (out, _) = render_with_lut(img, &Lut3D::identity(), &adj, &[]).unwrap();
        let min = out.pixels().map(|p| p.0[0]).min().unwrap() as i32;
        let max = out.pixels().map(|p| p.0[0]).max().unwrap() as i32;
        max - min
    };

    assert!(spread(&bright) < spread(&mid));
}

#[test]
fn zero_texture_settings_change_nothing() {
    let src = RgbaImage::from_fn(8, 8, |x, y| {
        Rgba([(x * 30) as u8, (y * 30) as u8, 128, 255])
    });
    let (out, _) = render_with_lut(&src, &Lut3D::identity(), &neutral(), &[]).unwrap();
    assert_eq!(out.as_raw(), src.as_raw());
}
