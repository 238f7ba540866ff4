use crate::scene::model::{AspectRatio, SceneConfig};

/// MIME type requested from the generation service.
pub const OUTPUT_MIME_TYPE: &str = "image/jpeg";

/// Everything the generation service receives for one request.
///
/// The configuration is a snapshot taken at submission time; later live edits do not reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Natural-language description derived from the configuration.
    pub prompt: String,
    /// Output aspect ratio, always one of the supported set.
    pub aspect_ratio: AspectRatio,
    /// Number of images to produce. Always 1.
    pub number_of_images: u32,
    /// Requested output encoding.
    pub output_mime_type: &'static str,
    /// Submitted configuration.
    pub config: SceneConfig,
}

impl GenerationRequest {
    /// Derive a request from a configuration snapshot.
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            prompt: describe(config),
            aspect_ratio: config.composition.aspect_ratio,
            number_of_images: 1,
            output_mime_type: OUTPUT_MIME_TYPE,
            config: config.clone(),
        }
    }
}

/// Prompt text for a configuration.
pub fn describe(config: &SceneConfig) -> String {
    let SceneConfig {
        camera,
        lighting,
        render,
        ..
    } = config;

    let mut prompt = format!(
        "Create a photorealistic image based on these technical specifications: \
         Camera parameters: Yaw {}°, Pitch {}°, Roll {}°, FOV {}mm. \
         Lighting setup: {} preset, Intensity {}, Temperature {}K. \
         Quality: {}. Style: Photorealistic studio photography, highly detailed, cinematic lighting.",
        camera.yaw,
        camera.pitch,
        camera.roll,
        camera.fov,
        lighting.preset,
        lighting.intensity,
        lighting.temperature,
        render.quality,
    );
    if render.hdr {
        prompt.push_str(
            " Apply High Dynamic Range (HDR) processing for vibrant colors and deep contrast.",
        );
    }
    prompt
}

#[cfg(test)]
#[path = "../../tests/unit/generate/request.rs"]
mod tests;
