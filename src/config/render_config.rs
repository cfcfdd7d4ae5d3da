use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    caption::resolver::CaptionStyle,
    eval::evaluator::MotionParams,
    foundation::core::{Canvas, Fps},
    foundation::error::{ReelError, ReelResult},
};

/// Everything a render needs besides the transcript.
///
/// Every field has a default, so `{}` is a complete configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Timeline frame rate.
    pub fps: Fps,
    /// Output canvas, used as the scale anchor for image transforms.
    pub canvas: Canvas,
    /// Segmentation bucket size in milliseconds.
    pub bucket_ms: u64,
    /// Fixed composition length; defaults to the end of the last scene.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_frames: Option<u64>,
    /// Scene motion, fades and grades.
    pub motion: MotionParams,
    /// Caption pop-in.
    pub caption: CaptionStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fps: Fps { num: 30, den: 1 },
            canvas: Canvas {
                width: 1080,
                height: 1920,
            },
            bucket_ms: 4000,
            duration_frames: None,
            motion: MotionParams::default(),
            caption: CaptionStyle::default(),
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s).map_err(|e| ReelError::serde(format!("parse config JSON: {e}")))
    }

    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r).map_err(|e| ReelError::serde(format!("parse config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate every section.
    pub fn validate(&self) -> ReelResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReelError::validation("canvas width and height must be > 0"));
        }
        if self.bucket_ms == 0 {
            return Err(ReelError::validation("bucket_ms must be > 0"));
        }
        if self.duration_frames == Some(0) {
            return Err(ReelError::validation("duration_frames must be > 0 when set"));
        }
        self.motion.validate()?;
        self.caption.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/render_config.rs"]
mod tests;
