use super::*;
use crate::scene::field::{Field, update};
use crate::scene::presets::Preset;

#[test]
fn prompt_for_default_configuration() {
    let req = GenerationRequest::from_config(&SceneConfig::default());
    assert_eq!(
        req.prompt,
        "Create a photorealistic image based on these technical specifications: \
         Camera parameters: Yaw 0°, Pitch 5°, Roll 0°, FOV 50mm. \
         Lighting setup: softbox preset, Intensity 1.2, Temperature 5600K. \
         Quality: high. Style: Photorealistic studio photography, highly detailed, cinematic lighting."
    );
    assert_eq!(req.aspect_ratio, AspectRatio::Widescreen);
    assert_eq!(req.number_of_images, 1);
    assert_eq!(req.output_mime_type, "image/jpeg");
}

#[test]
fn hdr_adds_processing_sentence() {
    let req = GenerationRequest::from_config(&Preset::Cyberpunk.config());
    assert!(req.prompt.contains("Yaw 0°, Pitch -20°, Roll 0°, FOV 24mm."));
    assert!(req.prompt.contains("dramatic preset, Intensity 1.8, Temperature 8000K."));
    assert!(req.prompt.ends_with(
        "Apply High Dynamic Range (HDR) processing for vibrant colors and deep contrast."
    ));
}

#[test]
fn request_snapshots_the_configuration() {
    let live = update(&SceneConfig::default(), Field::CompositionAspectRatio, "3:4").unwrap();
    let req = GenerationRequest::from_config(&live);
    let _edited = update(&live, Field::CameraYaw, 120.0).unwrap();

    assert_eq!(req.aspect_ratio, AspectRatio::Portrait);
    assert_eq!(req.config, live);
    assert_eq!(req.config.camera.yaw, 0.0);
}

#[test]
fn unsupported_ratio_is_submitted_as_widescreen() {
    let live = update(&SceneConfig::default(), Field::CompositionAspectRatio, "5:4").unwrap();
    assert_eq!(
        GenerationRequest::from_config(&live).aspect_ratio,
        AspectRatio::Widescreen
    );
}
