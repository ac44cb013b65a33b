use filmgrade::ops::color::*;

#[test]
fn hsl_roundtrip() {
    let (h, s, l) = rgb_to_hsl(120.0 / 255.0, 200.0 / 255.0, 80.0 / 255.0);
    let (r, g, b) = hsl_to_rgb(h, s, l);
    assert!((r * 255.0 - 120.0).abs() < 0.5);
    assert!((g * 255.0 - 200.0).abs() < 0.5);
    assert!((b * 255.0 - 80.0).abs() < 0.5);
}

#[test]
fn hsl_grey_has_no_hue() {
    let (h, s, l) = rgb_to_hsl(0.5, 0.5, 0.5);
    assert_eq!(h, 0.0);
    assert_eq!(s, 0.0);
    assert!((l - 0.5).abs() < 1e-6);
}

#[test]
fn hsl_primaries() {
    let (h, s, _) = rgb_to_hsl(1.0, 0.0, 0.0);
    assert!((h - 0.0).abs() < 1e-3);
    assert!((s - 1.0).abs() < 1e-3);

    let (h, _, _) = rgb_to_hsl(0.0, 1.0, 0.0);
    assert!((h - 120.0).abs() < 1e-3);

    let (h, _, _) = rgb_to_hsl(0.0, 0.0, 1.0);
    assert!((h - 240.0).abs() < 1e-3);
}

#[test]
fn hue_weight_center_and_edges() {
    assert_eq!(hue_weight(120.0, 120.0, 45.0), 1.0);
    assert_eq!(hue_weight(165.0, 120.0, 45.0), 0.0);
    assert_eq!(hue_weight(75.0, 120.0, 45.0), 0.0);
    assert_eq!(hue_weight(200.0, 120.0, 45.0), 0.0);
}

#[test]
fn hue_weight_wraps_around_zero() {
    // 350° is 10° away from the red center at 0°
    let w = hue_weight(350.0, 0.0, 45.0);
    assert!(w > 0.5, "wrap-aware distance should cover 350°, got {}", w);
    // and symmetric with 10°
    let w2 = hue_weight(10.0, 0.0, 45.0);
    assert!((w - w2).abs() < 1e-5);
}

#[test]
fn hue_weight_smoothstep_midpoint() {
    // Halfway through the falloff, smoothstep yields exactly 0.5
    let w = hue_weight(22.5, 0.0, 45.0);
    assert!((w - 0.5).abs() < 1e-5);
}

#[test]
fn soft_light_neutral_blend() {
    for base in [0.0, 0.1, 0.25, 0.5, 0.9, 1.0] {
        let out = soft_light(base, 0.5);
        assert!((out - base).abs() < 1e-6, "0.5 blend must be identity");
    }
}

#[test]
fn soft_light_darkens_and_lightens() {
    assert!(soft_light(0.5, 0.0) < 0.5);
    assert!(soft_light(0.5, 1.0) > 0.5);
    // D(0.25) = 0.5 on the polynomial branch
    assert!((soft_light(0.25, 1.0) - 0.5).abs() < 1e-5);
}

#[test]
fn s_curve_is_renormalized() {
    for (k, x0) in [(3.5, 0.5), (4.5, 0.5), (5.5, 0.55), (6.5, 0.5)] {
        assert!(s_curve(0.0, k, x0).abs() < 1e-5);
        assert!((s_curve(1.0, k, x0) - 1.0).abs() < 1e-5);
    }
}

#[test]
fn s_curve_midpoint_and_monotonicity() {
    assert!((s_curve(0.5, 4.5, 0.5) - 0.5).abs() < 1e-4);

    let mut prev = -1.0;
    for i in 0..=100 {
        let v = s_curve(i as f32 / 100.0, 6.5, 0.5);
        assert!(v > prev, "S-curve must be strictly increasing");
        prev = v;
    }
}

#[test]
fn s_curve_steepens_midtones() {
    // A steeper k pushes quartiles further from the midpoint
    let gentle = s_curve(0.75, 3.5, 0.5);
    let steep = s_curve(0.75, 6.5, 0.5);
    assert!(steep > gentle);
}

#[test]
fn contrast_factor_identity_at_zero() {
    assert_eq!(contrast_factor(0.0), 1.0);
}

#[test]
fn contrast_factor_range() {
    assert!(contrast_factor(100.0) > 2.0);
    assert!(contrast_factor(-100.0) < 0.5);
    assert!(contrast_factor(-100.0) > 0.0);
}

#[test]
fn luma_white_is_255() {
    assert!((luma_601(255.0, 255.0, 255.0) - 255.0).abs() < 1e-3);
    assert!((luma_709(255.0, 255.0, 255.0) - 255.0).abs() < 1e-3);
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
    assert_eq!(lerp(10.0, 20.0, 1.0), 20.0);
    assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
}
