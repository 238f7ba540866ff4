use crate::foundation::error::{CametraxError, CametraxResult};
use crate::foundation::ids::ArtifactId;
use anyhow::Context as _;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ARTIFACT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
struct Artifact {
    id: ArtifactId,
    format: ImageFormat,
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

/// Opaque, shared handle to one generated image.
///
/// Handles are cheap to clone and never mutated. The image bytes are released once the last
/// holder (history entry, comparison session, or live view) drops its handle.
#[derive(Clone, Debug)]
pub struct ArtifactRef(Arc<Artifact>);

impl ArtifactRef {
    /// Decode a generation payload and wrap it in a fresh handle.
    ///
    /// # Errors
    /// [`CametraxError::GenerationFailed`] when the payload is empty or is not a decodable image.
    pub(crate) fn from_payload(bytes: Vec<u8>) -> CametraxResult<Self> {
        if bytes.is_empty() {
            return Err(CametraxError::generation_failed("Failed to generate image data."));
        }

        let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| CametraxError::generation_failed(format!("read image payload: {e}")))?;
        let format = reader.format().ok_or_else(|| {
            CametraxError::generation_failed("generation service returned an unrecognized payload")
        })?;
        let decoded = reader.decode().map_err(|e| {
            CametraxError::generation_failed(format!("malformed {format:?} payload: {e}"))
        })?;
        let (width, height) = (decoded.width(), decoded.height());

        let id = ArtifactId(NEXT_ARTIFACT_ID.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(%id, ?format, width, height, len = bytes.len(), "artifact created");
        Ok(Self(Arc::new(Artifact {
            id,
            format,
            width,
            height,
            bytes,
        })))
    }

    /// Process-unique id.
    pub fn id(&self) -> ArtifactId {
        self.0.id
    }

    /// Detected image container format.
    pub fn format(&self) -> ImageFormat {
        self.0.format
    }

    /// Pixel width.
    pub fn width(&self) -> u32 {
        self.0.width
    }

    /// Pixel height.
    pub fn height(&self) -> u32 {
        self.0.height
    }

    /// Encoded image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.0.bytes
    }

    /// MIME type of the encoded bytes.
    pub fn mime_type(&self) -> &'static str {
        self.0.format.to_mime_type()
    }

    /// Preferred file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        self.0.format.extensions_str().first().copied().unwrap_or("bin")
    }

    /// Number of live handles to this artifact, including `self`.
    pub fn holders(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// `true` when both handles point at the same artifact.
    pub fn same_as(&self, other: &ArtifactRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Write the encoded bytes to `path`, creating parent directories.
    pub fn write_to(&self, path: impl AsRef<Path>) -> CametraxResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(path, self.bytes())
            .with_context(|| format!("write artifact '{}'", path.display()))?;
        Ok(())
    }
}

impl PartialEq for ArtifactRef {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for ArtifactRef {}

#[cfg(test)]
#[path = "../tests/unit/artifact.rs"]
mod tests;
