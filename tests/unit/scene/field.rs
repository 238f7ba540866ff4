use super::*;
use crate::scene::model::LightingPreset;
use crate::scene::presets::Preset;

#[test]
fn update_replaces_only_the_addressed_field() {
    let base = SceneConfig::default();
    let next = update(&base, Field::CameraYaw, 45.0).unwrap();

    assert_eq!(next.camera.yaw, 45.0);
    for field in Field::ALL {
        if field != Field::CameraYaw {
            assert_eq!(next.get(field), base.get(field), "{field} changed");
        }
    }
    assert_eq!(next.lighting, base.lighting);
    assert_eq!(next.composition, base.composition);
    assert_eq!(next.render, base.render);
}

#[test]
fn update_leaves_the_input_untouched() {
    let base = SceneConfig::default();
    let retained = base.clone();
    let _ = update(&base, Field::RenderQuality, "ultra").unwrap();
    let _ = update(&base, Field::CameraFov, 99.0).unwrap();
    assert_eq!(base, retained);
}

#[test]
fn updates_to_different_fields_commute() {
    let base = Preset::Portrait.config();
    let a = update(
        &update(&base, Field::CameraRoll, 12.0).unwrap(),
        Field::LightingIntensity,
        0.3,
    )
    .unwrap();
    let b = update(
        &update(&base, Field::LightingIntensity, 0.3).unwrap(),
        Field::CameraRoll,
        12.0,
    )
    .unwrap();
    assert_eq!(a, b);
}

#[test]
fn update_path_resolves_dotted_paths() {
    let base = SceneConfig::default();
    let next = update_path(&base, "camera.yaw", 45).unwrap();
    assert_eq!(next.camera.yaw, 45.0);

    let next = update_path(&next, "lighting.preset", "rembrandt").unwrap();
    assert_eq!(next.lighting.preset, LightingPreset::Rembrandt);

    let next = update_path(&next, "render.hdr", true).unwrap();
    assert!(next.render.hdr);

    let next = update_path(&next, "composition.aspectRatio", "9:16").unwrap();
    assert_eq!(next.composition.aspect_ratio, AspectRatio::Vertical);
}

#[test]
fn invalid_paths_are_rejected() {
    let base = SceneConfig::default();
    for path in ["camera", "camera.zoom", "optics.yaw", "camera.yaw.deg", "", "camera."] {
        let err = update_path(&base, path, 1.0).unwrap_err();
        assert!(
            matches!(err, CametraxError::InvalidPath(_)),
            "{path}: {err}"
        );
        assert!(err.is_contract_violation());
    }
}

#[test]
fn type_mismatches_are_rejected() {
    let base = SceneConfig::default();
    let err = update(&base, Field::RenderHdr, 1.0).unwrap_err();
    assert!(matches!(
        err,
        CametraxError::TypeMismatch {
            path: "render.hdr",
            ..
        }
    ));
    assert!(update(&base, Field::CameraYaw, "left").is_err());
    assert!(update(&base, Field::LightingPreset, "neon").is_err());
    assert!(update(&base, Field::CameraYaw, f64::NAN).is_err());
    assert!(update(&base, Field::LightingIntensity, f64::INFINITY).is_err());
}

#[test]
fn out_of_range_values_are_stored_as_given() {
    let base = SceneConfig::default();
    let next = update(&base, Field::CameraPitch, 135.0).unwrap();
    assert_eq!(next.camera.pitch, 135.0);
    assert_eq!(next.out_of_range(), vec![Field::CameraPitch]);
}

#[test]
fn unsupported_aspect_ratio_normalizes() {
    let base = update(&SceneConfig::default(), Field::CompositionAspectRatio, "1:1").unwrap();
    let next = update(&base, Field::CompositionAspectRatio, "21:9").unwrap();
    assert_eq!(next.composition.aspect_ratio, AspectRatio::Widescreen);
}

#[test]
fn paths_round_trip_through_display() {
    for field in Field::ALL {
        assert_eq!(field.path().parse::<Field>().unwrap(), field);
        assert_eq!(field.to_string(), field.path());
    }
    assert_eq!(Field::CompositionAspectRatio.namespace(), Namespace::Composition);
}

#[test]
fn clamp_respects_declared_ranges() {
    assert_eq!(
        Field::LightingTemperature.clamp(Scalar::Number(12000.0)),
        Scalar::Number(8000.0)
    );
    assert_eq!(
        Field::CameraFov.clamp(Scalar::Number(2.0)),
        Scalar::Number(10.0)
    );
    assert_eq!(
        Field::CameraYaw.clamp(Scalar::Number(-30.0)),
        Scalar::Number(-30.0)
    );
    assert_eq!(
        Field::RenderHdr.clamp(Scalar::Bool(true)),
        Scalar::Bool(true)
    );
}

#[test]
fn parse_value_follows_field_kind() {
    assert_eq!(
        Field::CameraYaw.parse_value(" -12.5 ").unwrap(),
        Scalar::Number(-12.5)
    );
    assert_eq!(Field::RenderHdr.parse_value("true").unwrap(), Scalar::Bool(true));
    assert_eq!(
        Field::RenderQuality.parse_value("ultra").unwrap(),
        Scalar::Text("ultra".into())
    );
    assert!(Field::RenderHdr.parse_value("yes").is_err());
    assert!(Field::CameraFov.parse_value("wide").is_err());
}

#[test]
fn ranges_and_units_match_controls() {
    let t = Field::LightingTemperature.range().unwrap();
    assert_eq!((t.min, t.max, t.step, t.unit), (2000.0, 8000.0, 100.0, "K"));
    let i = Field::LightingIntensity.range().unwrap();
    assert_eq!((i.min, i.max, i.step), (0.0, 2.0, 0.01));
    assert!(Field::RenderQuality.range().is_none());
}

#[test]
fn scalars_deserialize_untagged() {
    let v: Vec<Scalar> = serde_json::from_str(r#"[45, true, "1:1"]"#).unwrap();
    assert_eq!(
        v,
        vec![
            Scalar::Number(45.0),
            Scalar::Bool(true),
            Scalar::Text("1:1".into())
        ]
    );
    let f: Field = serde_json::from_str(r#""lighting.intensity""#).unwrap();
    assert_eq!(f, Field::LightingIntensity);
    assert!(serde_json::from_str::<Field>(r#""lighting.color""#).is_err());
}
