use filmgrade::{Adjustments, FilmType, GradePreset, WhiteBalance};

#[test]
fn preset_round_trips_through_json() {
    let preset = GradePreset {
        film: FilmType::Velvia,
        adjustments: Adjustments {
            brightness: 12.0,
            contrast: -8.0,
            vignette: 35.0,
            white_balance: WhiteBalance { temp: 10.0, tint: -5.0 },
            intensity: 0.85,
            ..Adjustments::default()
        },
    };

    let json = serde_json::to_string(&preset).unwrap();
    let back: GradePreset = serde_json::from_str(&json).unwrap();
    assert_eq!(preset, back);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let preset: GradePreset = serde_json::from_str("{}").unwrap();
    assert_eq!(preset.film, FilmType::None);
    assert_eq!(preset.adjustments, Adjustments::default());

    let preset: GradePreset = serde_json::from_str(r#"{"film":"Sepia"}"#).unwrap();
    assert_eq!(preset.film, FilmType::Sepia);
    assert_eq!(preset.adjustments.intensity, 1.0);

    let preset: GradePreset =
        serde_json::from_str(r#"{"adjustments":{"brightness":20.0}}"#).unwrap();
    assert_eq!(preset.adjustments.brightness, 20.0);
    assert_eq!(preset.adjustments.grain_size, 1.0);
}

#[test]
fn sanitize_clamps_out_of_range_values() {
    let adj = Adjustments {
        brightness: 400.0,
        contrast: -400.0,
        grain_size: 99.0,
        intensity: -3.0,
        white_balance: WhiteBalance { temp: 80.0, tint: -80.0 },
        ..Adjustments::default()
    };

    let clean = adj.sanitized();
    assert_eq!(clean.brightness, 100.0);
    assert_eq!(clean.contrast, -100.0);
    assert_eq!(clean.grain_size, 5.0);
    assert_eq!(clean.intensity, 0.0);
    assert_eq!(clean.white_balance.temp, 50.0);
    assert_eq!(clean.white_balance.tint, -50.0);
}

#[test]
fn sanitize_is_identity_on_valid_input() {
    let adj = Adjustments {
        brightness: 50.0,
        saturation: -20.0,
        grain_amount: 30.0,
        intensity: 0.5,
        ..Adjustments::default()
    };
    assert_eq!(adj.sanitized(), adj);
}

#[test]
fn non_finite_values_are_neutralized() {
    let adj = Adjustments { brightness: f32::NAN, contrast: f32::INFINITY, ..Adjustments::default() };
    let clean = adj.sanitized();
    assert!(clean.brightness.is_finite());
    assert!(clean.contrast.is_finite());
}
