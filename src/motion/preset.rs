use crate::{
    animation::{ease::Ease, envelope::PunchFlash},
    foundation::error::{ReelError, ReelResult},
};

/// Camera move applied to a scene image over its lifetime.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MotionPreset {
    /// Human-readable name, echoed in evaluated frames.
    pub name: String,
    /// Scale at progress 0 and 1.
    pub scale: [f64; 2],
    /// Horizontal offset in pixels at progress 0 and 1.
    #[serde(default)]
    pub offset_x: [f64; 2],
    /// Vertical offset in pixels at progress 0 and 1.
    #[serde(default)]
    pub offset_y: [f64; 2],
    /// Curve applied to scene progress.
    #[serde(default = "default_motion_ease")]
    pub ease: Ease,
    /// Optional impact flash at scene entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punch: Option<PunchFlash>,
}

fn default_motion_ease() -> Ease {
    Ease::OutCubic
}

impl MotionPreset {
    fn new(name: &str, scale: [f64; 2], offset_x: [f64; 2]) -> Self {
        Self {
            name: name.to_string(),
            scale,
            offset_x,
            offset_y: [0.0, 0.0],
            ease: Ease::OutCubic,
            punch: None,
        }
    }

    fn with_offset_y(mut self, offset_y: [f64; 2]) -> Self {
        self.offset_y = offset_y;
        self
    }

    fn with_punch(mut self, punch: PunchFlash) -> Self {
        self.punch = Some(punch);
        self
    }

    fn validate(&self) -> ReelResult<()> {
        let finite = self
            .scale
            .iter()
            .chain(&self.offset_x)
            .chain(&self.offset_y)
            .all(|v| v.is_finite());
        if !finite {
            return Err(ReelError::validation(format!(
                "motion preset '{}' has non-finite values",
                self.name
            )));
        }
        if self.scale.iter().any(|s| *s <= 0.0) {
            return Err(ReelError::validation(format!(
                "motion preset '{}' scale must be > 0",
                self.name
            )));
        }
        if let Some(p) = &self.punch
            && !(0.0..=1.0).contains(&p.peak)
        {
            return Err(ReelError::validation(format!(
                "motion preset '{}' punch peak must be within [0, 1]",
                self.name
            )));
        }
        Ok(())
    }
}

/// Non-empty ordered preset list, indexed by `variant mod len`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<MotionPreset>", into = "Vec<MotionPreset>")]
pub struct PresetTable {
    presets: Vec<MotionPreset>,
}

impl PresetTable {
    /// Build a validated table.
    pub fn new(presets: Vec<MotionPreset>) -> ReelResult<Self> {
        if presets.is_empty() {
            return Err(ReelError::validation("motion preset table must not be empty"));
        }
        for p in &presets {
            p.validate()?;
        }
        Ok(Self { presets })
    }

    /// Zoom in, zoom out, pan left to right, pan right to left.
    pub fn classic() -> Self {
        Self {
            presets: vec![
                MotionPreset::new("zoom_in", [1.02, 1.06], [0.0, 0.0]),
                MotionPreset::new("zoom_out", [1.06, 1.02], [0.0, 0.0]),
                MotionPreset::new("pan_left_to_right", [1.04, 1.04], [-16.0, 16.0]),
                MotionPreset::new("pan_right_to_left", [1.04, 1.04], [16.0, -16.0]),
            ],
        }
    }

    /// Classic moves plus diagonal drifts and punch-in cuts.
    pub fn cinematic() -> Self {
        let punch = PunchFlash {
            window_frames: 8,
            peak: 0.55,
            scale_kick: 0.035,
            ease: Ease::OutQuad,
        };
        let mut presets = Self::classic().presets;
        presets.extend([
            MotionPreset::new("drift_up_left", [1.05, 1.08], [10.0, -10.0])
                .with_offset_y([12.0, -12.0]),
            MotionPreset::new("punch_in", [1.10, 1.04], [0.0, 0.0]).with_punch(punch),
            MotionPreset::new("drift_down_right", [1.08, 1.05], [-10.0, 10.0])
                .with_offset_y([-12.0, 12.0]),
            MotionPreset::new("punch_pan", [1.06, 1.06], [-24.0, 8.0]).with_punch(punch),
        ]);
        Self { presets }
    }

    /// Preset for `variant`.
    pub fn select(&self, variant: u64) -> &MotionPreset {
        let idx = (variant % self.presets.len() as u64) as usize;
        &self.presets[idx]
    }

    /// Presets in table order.
    pub fn presets(&self) -> &[MotionPreset] {
        &self.presets
    }

    /// Number of presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Always `false`; tables are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::classic()
    }
}

impl TryFrom<Vec<MotionPreset>> for PresetTable {
    type Error = ReelError;

    fn try_from(presets: Vec<MotionPreset>) -> ReelResult<Self> {
        Self::new(presets)
    }
}

impl From<PresetTable> for Vec<MotionPreset> {
    fn from(t: PresetTable) -> Self {
        t.presets
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/preset.rs"]
mod tests;
