use super::*;
use crate::scene::field::{Field, update};

#[test]
fn catalog_names_round_trip() {
    for p in Preset::ALL {
        assert_eq!(p.name().parse::<Preset>().unwrap(), p);
    }
}

#[test]
fn unknown_preset_is_reported() {
    let err = apply_preset("vaporwave").unwrap_err();
    assert!(matches!(err, CametraxError::UnknownPreset(ref n) if n == "vaporwave"));
}

#[test]
fn cyberpunk_camera_matches_catalog() {
    let cfg = apply_preset("cyberpunk").unwrap();
    assert_eq!(
        cfg.camera,
        CameraConfig {
            yaw: 0.0,
            pitch: -20.0,
            roll: 0.0,
            fov: 24.0
        }
    );
    assert_eq!(cfg.lighting.preset, LightingPreset::Dramatic);
    assert_eq!(cfg.lighting.temperature, 8000.0);
    assert!(cfg.render.hdr);
}

#[test]
fn noir_replaces_every_namespace() {
    let mut edited = Preset::Macro.config();
    for (field, value) in [
        (Field::CameraFov, crate::Scalar::Number(110.0)),
        (Field::CompositionAspectRatio, "1:1".into()),
        (Field::RenderQuality, "draft".into()),
        (Field::RenderHdr, true.into()),
    ] {
        edited = update(&edited, field, value).unwrap();
    }

    let noir = apply_preset("noir").unwrap();
    assert_eq!(
        noir.camera,
        CameraConfig {
            yaw: -30.0,
            pitch: 10.0,
            roll: 5.0,
            fov: 35.0
        }
    );
    assert_eq!(noir.lighting.preset, LightingPreset::Hard);
    assert_eq!(noir.lighting.intensity, 0.6);
    assert_eq!(noir.lighting.temperature, 3200.0);
    assert_eq!(noir.composition.aspect_ratio, AspectRatio::Widescreen);
    assert_eq!(noir.render.quality, "high");
    assert!(!noir.render.hdr);
    assert_eq!(noir, Preset::Noir.config());
}

#[test]
fn hdr_only_on_cinematic_and_cyberpunk() {
    let hdr: Vec<_> = Preset::ALL
        .into_iter()
        .filter(|p| p.config().render.hdr)
        .collect();
    assert_eq!(hdr, vec![Preset::Cinematic, Preset::Cyberpunk]);
}
