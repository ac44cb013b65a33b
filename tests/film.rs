use filmgrade::FilmType;

#[test]
fn none_is_pass_through() {
    let (r, g, b) = FilmType::None.apply(12.0, 99.0, 240.0);
    assert_eq!((r, g, b), (12.0, 99.0, 240.0));
}

#[test]
fn sepia_stamp_on_mid_grey() {
    // Matrix row sums × 128
    let (r, g, b) = FilmType::Sepia.apply(128.0, 128.0, 128.0);
    assert!((r - 172.9).abs() < 0.1, "got {}", r);
    assert!((g - 154.0).abs() < 0.1, "got {}", g);
    assert!((b - 119.9).abs() < 0.1, "got {}", b);
}

#[test]
fn sepia_has_no_tone_curve() {
    // Pure matrix: doubling the input doubles the output
    let (r1, _, _) = FilmType::Sepia.apply(50.0, 50.0, 50.0);
    let (r2, _, _) = FilmType::Sepia.apply(100.0, 100.0, 100.0);
    assert!((r2 - 2.0 * r1).abs() < 1e-3);
}

#[test]
fn acros_produces_equal_channels() {
    for film in [
        FilmType::AcrosNeutral,
        FilmType::AcrosYellow,
        FilmType::AcrosRed,
        FilmType::AcrosGreen,
    ] {
        let (r, g, b) = film.apply(100.0, 150.0, 200.0);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }
}

#[test]
fn acros_filters_reweight_the_mix() {
    // A red subject reads brighter through the red filter than the green one
    let (red_filter, _, _) = FilmType::AcrosRed.apply(220.0, 40.0, 40.0);
    let (green_filter, _, _) = FilmType::AcrosGreen.apply(220.0, 40.0, 40.0);
    assert!(red_filter > green_filter);
}

#[test]
fn provia_anchors_black_and_white() {
    let (r, _, _) = FilmType::Provia.apply(0.0, 0.0, 0.0);
    assert!(r.abs() < 0.01);
    let (r, _, _) = FilmType::Provia.apply(255.0, 255.0, 255.0);
    assert!((r - 255.0).abs() < 0.01);
}

#[test]
fn provia_is_gentle_near_mid_grey() {
    let (r, g, b) = FilmType::Provia.apply(128.0, 128.0, 128.0);
    assert!((r - 128.0).abs() < 2.0);
    assert!((g - 128.0).abs() < 2.0);
    assert!((b - 128.0).abs() < 2.0);
}

#[test]
fn velvia_expands_contrast() {
    // Bright saturated red gets pushed up, dull green pulled down
    let (r_in, g_in) = (200.0, 50.0);
    let (r, g, _) = FilmType::Velvia.apply(r_in, g_in, 50.0);
    assert!(r > r_in, "velvia should brighten the red, got {}", r);
    assert!(g < g_in, "velvia should deepen the green, got {}", g);
}

#[test]
fn eterna_lifts_blacks() {
    let (r, g, b) = FilmType::Eterna.apply(0.0, 0.0, 0.0);
    assert!((r - 10.0).abs() < 0.01);
    assert!((g - 10.0).abs() < 0.01);
    assert!((b - 10.0).abs() < 0.01);
}

#[test]
fn eterna_compresses_highlights() {
    let (r, _, _) = FilmType::Eterna.apply(255.0, 255.0, 255.0);
    // 0.9 · curve(1.0) · 255 + 10 = 239.5
    assert!((r - 239.5).abs() < 0.1);
}

#[test]
fn classic_neg_warms_highlights_cools_shadows() {
    let (r_hi, _, b_hi) = FilmType::ClassicNeg.apply(230.0, 230.0, 230.0);
    let (r_lo, _, b_lo) = FilmType::ClassicNeg.apply(40.0, 40.0, 40.0);
    // The conditional boost feeds red into highlights and blue into
    // shadows, so the warm split is widest at the top of the range.
    assert!(r_hi > b_hi);
    assert!(r_hi - b_hi > r_lo - b_lo);
}

#[test]
fn nostalgic_neg_amber_highlights() {
    let (r, g, b) = FilmType::NostalgicNeg.apply(240.0, 240.0, 240.0);
    assert!(r > b, "amber cast: red above blue, got r={} b={}", r, b);
    assert!(g > b, "amber cast: green above blue, got g={} b={}", g, b);
}
