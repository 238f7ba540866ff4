use crate::foundation::error::{CametraxError, CametraxResult};
use crate::scene::model::{
    AspectRatio, CameraConfig, CompositionConfig, LightingConfig, LightingPreset, RenderConfig,
    SceneConfig,
};
use std::fmt;
use std::str::FromStr;

/// Named, fully specified configuration templates.
///
/// Applying a preset replaces the whole configuration; nothing is merged with the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Neutral softbox setup. The startup default.
    Studio,
    /// Slight low angle, dramatic light, HDR.
    Cinematic,
    /// Long lens, butterfly light.
    Portrait,
    /// Steep top-down angle, wide field of view.
    Macro,
    /// Dutch angle with hard, warm light.
    Noir,
    /// Low angle, strong cool light, HDR.
    Cyberpunk,
}

impl Preset {
    /// Every preset, in catalog order.
    pub const ALL: [Preset; 6] = [
        Preset::Studio,
        Preset::Cinematic,
        Preset::Portrait,
        Preset::Macro,
        Preset::Noir,
        Preset::Cyberpunk,
    ];

    /// Configuration a fresh session starts from.
    pub const DEFAULT: Preset = Preset::Studio;

    /// Catalog identifier.
    pub fn name(self) -> &'static str {
        match self {
            Self::Studio => "studio",
            Self::Cinematic => "cinematic",
            Self::Portrait => "portrait",
            Self::Macro => "macro",
            Self::Noir => "noir",
            Self::Cyberpunk => "cyberpunk",
        }
    }

    /// Full configuration declared by this preset.
    pub fn config(self) -> SceneConfig {
        let (camera, lighting, hdr) = match self {
            Self::Studio => (
                camera(0.0, 5.0, 0.0, 50.0),
                lighting(LightingPreset::Softbox, 1.2, 5600.0),
                false,
            ),
            Self::Cinematic => (
                camera(15.0, -5.0, 0.0, 35.0),
                lighting(LightingPreset::Dramatic, 0.8, 4200.0),
                true,
            ),
            Self::Portrait => (
                camera(0.0, 0.0, 0.0, 85.0),
                lighting(LightingPreset::Butterfly, 1.0, 5000.0),
                false,
            ),
            Self::Macro => (
                camera(0.0, 45.0, 0.0, 100.0),
                lighting(LightingPreset::Studio, 1.5, 6000.0),
                false,
            ),
            Self::Noir => (
                camera(-30.0, 10.0, 5.0, 35.0),
                lighting(LightingPreset::Hard, 0.6, 3200.0),
                false,
            ),
            Self::Cyberpunk => (
                camera(0.0, -20.0, 0.0, 24.0),
                lighting(LightingPreset::Dramatic, 1.8, 8000.0),
                true,
            ),
        };
        SceneConfig {
            camera,
            lighting,
            composition: CompositionConfig {
                aspect_ratio: AspectRatio::Widescreen,
            },
            render: RenderConfig {
                quality: "high".to_string(),
                hdr,
            },
        }
    }
}

fn camera(yaw: f64, pitch: f64, roll: f64, fov: f64) -> CameraConfig {
    CameraConfig {
        yaw,
        pitch,
        roll,
        fov,
    }
}

fn lighting(preset: LightingPreset, intensity: f64, temperature: f64) -> LightingConfig {
    LightingConfig {
        preset,
        intensity,
        temperature,
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = CametraxError;

    fn from_str(name: &str) -> CametraxResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| CametraxError::unknown_preset(name))
    }
}

/// Look up a preset by catalog identifier and return its configuration.
///
/// # Errors
/// [`CametraxError::UnknownPreset`] when `name` is not in the catalog.
pub fn apply_preset(name: &str) -> CametraxResult<SceneConfig> {
    name.parse::<Preset>().map(Preset::config)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/presets.rs"]
mod tests;
