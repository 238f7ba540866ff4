use crate::foundation::error::{CametraxError, CametraxResult};
use crate::scene::model::{AspectRatio, SceneConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level configuration namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// `camera.*`
    Camera,
    /// `lighting.*`
    Lighting,
    /// `composition.*`
    Composition,
    /// `render.*`
    Render,
}

impl Namespace {
    /// First path segment.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Lighting => "lighting",
            Self::Composition => "composition",
            Self::Render => "render",
        }
    }
}

/// Every addressable scalar of a [`SceneConfig`].
///
/// A field is the typed form of a dotted `namespace.field` path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Field {
    /// `camera.yaw`
    CameraYaw,
    /// `camera.pitch`
    CameraPitch,
    /// `camera.roll`
    CameraRoll,
    /// `camera.fov`
    CameraFov,
    /// `lighting.preset`
    LightingPreset,
    /// `lighting.intensity`
    LightingIntensity,
    /// `lighting.temperature`
    LightingTemperature,
    /// `composition.aspectRatio`
    CompositionAspectRatio,
    /// `render.quality`
    RenderQuality,
    /// `render.hdr`
    RenderHdr,
}

/// Value type accepted by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// Finite `f64`.
    Number,
    /// `bool`.
    Bool,
    /// String, possibly restricted to an enum.
    Text,
}

impl ScalarKind {
    fn describe(self) -> &'static str {
        match self {
            Self::Number => "finite number",
            Self::Bool => "bool",
            Self::Text => "string",
        }
    }
}

/// Declared range of a numeric field, with the UI step and unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    /// Granularity the editing controls use.
    pub step: f64,
    /// Display unit, empty when unitless.
    pub unit: &'static str,
}

impl FieldRange {
    const fn new(min: f64, max: f64, step: f64, unit: &'static str) -> Self {
        Self {
            min,
            max,
            step,
            unit,
        }
    }

    /// `true` when `v` lies inside `[min, max]`.
    pub fn contains(self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }
}

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// String value.
    Text(String),
}

impl Scalar {
    /// Kind of the carried value.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Number(_) => ScalarKind::Number,
            Self::Bool(_) => ScalarKind::Bool,
            Self::Text(_) => ScalarKind::Text,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl Field {
    /// All fields, grouped by namespace.
    pub const ALL: [Field; 10] = [
        Field::CameraYaw,
        Field::CameraPitch,
        Field::CameraRoll,
        Field::CameraFov,
        Field::LightingPreset,
        Field::LightingIntensity,
        Field::LightingTemperature,
        Field::CompositionAspectRatio,
        Field::RenderQuality,
        Field::RenderHdr,
    ];

    /// Dotted path, e.g. `"camera.yaw"`.
    pub fn path(self) -> &'static str {
        match self {
            Self::CameraYaw => "camera.yaw",
            Self::CameraPitch => "camera.pitch",
            Self::CameraRoll => "camera.roll",
            Self::CameraFov => "camera.fov",
            Self::LightingPreset => "lighting.preset",
            Self::LightingIntensity => "lighting.intensity",
            Self::LightingTemperature => "lighting.temperature",
            Self::CompositionAspectRatio => "composition.aspectRatio",
            Self::RenderQuality => "render.quality",
            Self::RenderHdr => "render.hdr",
        }
    }

    /// Namespace containing the field.
    pub fn namespace(self) -> Namespace {
        match self {
            Self::CameraYaw | Self::CameraPitch | Self::CameraRoll | Self::CameraFov => {
                Namespace::Camera
            }
            Self::LightingPreset | Self::LightingIntensity | Self::LightingTemperature => {
                Namespace::Lighting
            }
            Self::CompositionAspectRatio => Namespace::Composition,
            Self::RenderQuality | Self::RenderHdr => Namespace::Render,
        }
    }

    /// Accepted value kind.
    pub fn kind(self) -> ScalarKind {
        match self {
            Self::CameraYaw
            | Self::CameraPitch
            | Self::CameraRoll
            | Self::CameraFov
            | Self::LightingIntensity
            | Self::LightingTemperature => ScalarKind::Number,
            Self::RenderHdr => ScalarKind::Bool,
            Self::LightingPreset | Self::CompositionAspectRatio | Self::RenderQuality => {
                ScalarKind::Text
            }
        }
    }

    /// Declared range for numeric fields.
    pub fn range(self) -> Option<FieldRange> {
        match self {
            Self::CameraYaw | Self::CameraRoll => Some(FieldRange::new(-180.0, 180.0, 1.0, "°")),
            Self::CameraPitch => Some(FieldRange::new(-90.0, 90.0, 1.0, "°")),
            Self::CameraFov => Some(FieldRange::new(10.0, 120.0, 1.0, "mm")),
            Self::LightingIntensity => Some(FieldRange::new(0.0, 2.0, 0.01, "")),
            Self::LightingTemperature => Some(FieldRange::new(2000.0, 8000.0, 100.0, "K")),
            _ => None,
        }
    }

    /// Clamp a numeric value into the declared range; other values pass through.
    pub fn clamp(self, value: Scalar) -> Scalar {
        match (self.range(), value) {
            (Some(range), Scalar::Number(v)) if v.is_finite() => {
                Scalar::Number(v.clamp(range.min, range.max))
            }
            (_, value) => value,
        }
    }

    /// Parse textual input according to the field kind.
    pub fn parse_value(self, text: &str) -> CametraxResult<Scalar> {
        let text = text.trim();
        match self.kind() {
            ScalarKind::Number => text
                .parse::<f64>()
                .map(Scalar::Number)
                .map_err(|_| self.mismatch(&Scalar::Text(text.to_string()))),
            ScalarKind::Bool => text
                .parse::<bool>()
                .map(Scalar::Bool)
                .map_err(|_| self.mismatch(&Scalar::Text(text.to_string()))),
            ScalarKind::Text => Ok(Scalar::Text(text.to_string())),
        }
    }

    fn mismatch(self, got: &Scalar) -> CametraxError {
        CametraxError::TypeMismatch {
            path: self.path(),
            expected: self.kind().describe(),
            got: got.to_string(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Field {
    type Err = CametraxError;

    fn from_str(path: &str) -> CametraxResult<Self> {
        let mut segments = path.split('.');
        let (Some(ns), Some(name), None) = (segments.next(), segments.next(), segments.next())
        else {
            return Err(CametraxError::invalid_path(path));
        };
        Self::ALL
            .into_iter()
            .find(|f| f.namespace().as_str() == ns && f.path()[ns.len() + 1..] == *name)
            .ok_or_else(|| CametraxError::invalid_path(path))
    }
}

impl TryFrom<String> for Field {
    type Error = CametraxError;

    fn try_from(path: String) -> CametraxResult<Self> {
        path.parse()
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.path().to_string()
    }
}

/// Return a new configuration with exactly `field` replaced by `value`.
///
/// The input is left untouched. Values are stored as given; range enforcement belongs to the edit
/// producer (see [`Field::clamp`]). Aspect ratios outside the supported set normalize to `16:9`.
///
/// # Errors
/// [`CametraxError::TypeMismatch`] when the value kind does not match the field, when a number is
/// not finite, or when a lighting preset name is outside the closed set.
pub fn update(
    config: &SceneConfig,
    field: Field,
    value: impl Into<Scalar>,
) -> CametraxResult<SceneConfig> {
    let value = value.into();
    if let Scalar::Number(v) = value
        && !v.is_finite()
    {
        return Err(field.mismatch(&value));
    }

    let mut next = config.clone();
    match (field, value) {
        (Field::CameraYaw, Scalar::Number(v)) => next.camera.yaw = v,
        (Field::CameraPitch, Scalar::Number(v)) => next.camera.pitch = v,
        (Field::CameraRoll, Scalar::Number(v)) => next.camera.roll = v,
        (Field::CameraFov, Scalar::Number(v)) => next.camera.fov = v,
        (Field::LightingPreset, Scalar::Text(s)) => {
            next.lighting.preset = s
                .parse()
                .map_err(|_| field.mismatch(&Scalar::Text(s.clone())))?;
        }
        (Field::LightingIntensity, Scalar::Number(v)) => next.lighting.intensity = v,
        (Field::LightingTemperature, Scalar::Number(v)) => next.lighting.temperature = v,
        (Field::CompositionAspectRatio, Scalar::Text(s)) => {
            next.composition.aspect_ratio = AspectRatio::normalize(&s);
        }
        (Field::RenderQuality, Scalar::Text(s)) => next.render.quality = s,
        (Field::RenderHdr, Scalar::Bool(b)) => next.render.hdr = b,
        (field, value) => return Err(field.mismatch(&value)),
    }
    Ok(next)
}

/// [`update`] addressed by a dotted path string.
///
/// # Errors
/// [`CametraxError::InvalidPath`] when `path` does not name exactly one field, plus everything
/// [`update`] reports.
pub fn update_path(
    config: &SceneConfig,
    path: &str,
    value: impl Into<Scalar>,
) -> CametraxResult<SceneConfig> {
    let field: Field = path.parse()?;
    update(config, field, value)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/field.rs"]
mod tests;
