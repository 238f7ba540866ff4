use crate::foundation::error::{CametraxError, CametraxResult};
use crate::scene::field::{Field, Scalar};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

/// Complete description of one generation request.
///
/// Every namespace and field is always present: deserialization rejects missing and unknown keys,
/// and the only other constructors are [`Default`] (the startup preset), [`crate::Preset::config`]
/// and the snapshots held by history entries and keyframes. The type is a plain value; cloning it
/// yields a fully independent copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    /// Camera framing.
    pub camera: CameraConfig,
    /// Light setup.
    pub lighting: LightingConfig,
    /// Output framing.
    pub composition: CompositionConfig,
    /// Render quality switches.
    pub render: RenderConfig,
}

/// Camera orientation and field of view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraConfig {
    /// Degrees, nominally `[-180, 180]`.
    pub yaw: f64,
    /// Degrees, nominally `[-90, 90]`.
    pub pitch: f64,
    /// Degrees, nominally `[-180, 180]`.
    pub roll: f64,
    /// Focal-length-like unit, nominally `[10, 120]`.
    pub fov: f64,
}

/// Lighting preset, intensity, and color temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightingConfig {
    /// Named light setup.
    pub preset: LightingPreset,
    /// Nominally `[0, 2]`.
    pub intensity: f64,
    /// Kelvin, nominally `[2000, 8000]` in steps of 100.
    pub temperature: f64,
}

/// Output framing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CompositionConfig {
    /// Output aspect ratio.
    pub aspect_ratio: AspectRatio,
}

/// Render quality switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Open-ended quality tag, e.g. `"high"`.
    pub quality: String,
    /// High dynamic range processing.
    pub hdr: bool,
}

/// Closed set of light setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightingPreset {
    /// Neutral studio key light.
    Studio,
    /// Large diffused source.
    Softbox,
    /// Small hard source.
    Hard,
    /// Low-key, high contrast.
    Dramatic,
    /// Frontal light from above the lens.
    Butterfly,
    /// Side key with a cheek triangle.
    Rembrandt,
}

impl LightingPreset {
    /// All presets, in menu order.
    pub const ALL: [LightingPreset; 6] = [
        LightingPreset::Studio,
        LightingPreset::Softbox,
        LightingPreset::Hard,
        LightingPreset::Dramatic,
        LightingPreset::Butterfly,
        LightingPreset::Rembrandt,
    ];

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Studio => "studio",
            Self::Softbox => "softbox",
            Self::Hard => "hard",
            Self::Dramatic => "dramatic",
            Self::Butterfly => "butterfly",
            Self::Rembrandt => "rembrandt",
        }
    }

    /// Display label for menus.
    pub fn label(self) -> &'static str {
        match self {
            Self::Studio => "Studio Standard",
            Self::Softbox => "Softbox Diffused",
            Self::Hard => "Hard Light",
            Self::Dramatic => "Dramatic/Noir",
            Self::Butterfly => "Butterfly",
            Self::Rembrandt => "Rembrandt",
        }
    }
}

impl fmt::Display for LightingPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LightingPreset {
    type Err = CametraxError;

    fn from_str(s: &str) -> CametraxResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CametraxError::validation(format!("unknown lighting preset '{s}'")))
    }
}

/// Aspect ratios accepted by the generation service.
///
/// Any other ratio is normalized to [`AspectRatio::Widescreen`] wherever text enters the model
/// (path edits and JSON loading), so the model never holds an unsupported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AspectRatio {
    /// `1:1`
    Square,
    /// `3:4`
    Portrait,
    /// `4:3`
    Landscape,
    /// `9:16`
    Vertical,
    /// `16:9`
    #[default]
    Widescreen,
}

impl AspectRatio {
    /// All supported ratios.
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Portrait,
        AspectRatio::Landscape,
        AspectRatio::Vertical,
        AspectRatio::Widescreen,
    ];

    /// Wire form, e.g. `"16:9"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait => "3:4",
            Self::Landscape => "4:3",
            Self::Vertical => "9:16",
            Self::Widescreen => "16:9",
        }
    }

    /// `(width, height)` proportions.
    pub fn proportions(self) -> (u32, u32) {
        match self {
            Self::Square => (1, 1),
            Self::Portrait => (3, 4),
            Self::Landscape => (4, 3),
            Self::Vertical => (9, 16),
            Self::Widescreen => (16, 9),
        }
    }

    /// Parse a supported ratio, falling back to the default for anything else.
    pub fn normalize(s: &str) -> Self {
        match s.parse() {
            Ok(ratio) => ratio,
            Err(_) => {
                tracing::debug!(ratio = s, "unsupported aspect ratio, using 16:9");
                Self::default()
            }
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = CametraxError;

    fn from_str(s: &str) -> CametraxResult<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| CametraxError::validation(format!("unsupported aspect ratio '{s}'")))
    }
}

impl Serialize for AspectRatio {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AspectRatio {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::normalize(&s))
    }
}

impl Default for SceneConfig {
    /// The startup preset (`studio`).
    fn default() -> Self {
        crate::scene::presets::Preset::DEFAULT.config()
    }
}

impl SceneConfig {
    /// Read any field generically.
    pub fn get(&self, field: Field) -> Scalar {
        match field {
            Field::CameraYaw => Scalar::Number(self.camera.yaw),
            Field::CameraPitch => Scalar::Number(self.camera.pitch),
            Field::CameraRoll => Scalar::Number(self.camera.roll),
            Field::CameraFov => Scalar::Number(self.camera.fov),
            Field::LightingPreset => Scalar::Text(self.lighting.preset.as_str().to_string()),
            Field::LightingIntensity => Scalar::Number(self.lighting.intensity),
            Field::LightingTemperature => Scalar::Number(self.lighting.temperature),
            Field::CompositionAspectRatio => {
                Scalar::Text(self.composition.aspect_ratio.as_str().to_string())
            }
            Field::RenderQuality => Scalar::Text(self.render.quality.clone()),
            Field::RenderHdr => Scalar::Bool(self.render.hdr),
        }
    }

    /// Numeric fields whose current value lies outside the declared range.
    pub fn out_of_range(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|&field| match (field.range(), self.get(field)) {
                (Some(range), Scalar::Number(v)) => !range.contains(v),
                _ => false,
            })
            .collect()
    }

    /// Fail when any numeric field lies outside its declared range.
    pub fn validate(&self) -> CametraxResult<()> {
        let bad = self.out_of_range();
        if bad.is_empty() {
            return Ok(());
        }
        let paths: Vec<&str> = bad.iter().map(|f| f.path()).collect();
        Err(CametraxError::validation(format!(
            "fields out of range: {}",
            paths.join(", ")
        )))
    }

    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CametraxResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CametraxError::serde(format!("parse scene configuration JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CametraxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CametraxError::Other(anyhow::anyhow!(
                "open scene configuration '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty-printed JSON payload, as shown in the preview panel.
    pub fn to_json_pretty(&self) -> CametraxResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CametraxError::serde(format!("encode scene configuration JSON: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
