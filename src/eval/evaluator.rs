use crate::{
    animation::envelope::{FadeEnvelope, Levels},
    foundation::core::{Affine, Vec2},
    foundation::error::{ReelError, ReelResult},
    foundation::math::{clamp01, clamp_local, lerp},
    motion::grade::{ColorGrade, GradeParams, GradeTable},
    motion::preset::PresetTable,
};

/// Static inputs of the scene evaluator, fixed for a whole render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionParams {
    /// Camera moves, indexed by `variant mod len`.
    pub presets: PresetTable,
    /// Fade ramp shared by opacity and blur.
    pub fade: FadeEnvelope,
    /// Opacity at scene edges and on the plateau.
    pub opacity: Levels,
    /// Blur radius (px) at scene edges and on the plateau.
    pub blur: Levels,
    /// Warm/cool grade parameters.
    pub grades: GradeTable,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            presets: PresetTable::default(),
            fade: FadeEnvelope { cap_frames: 12 },
            opacity: Levels {
                edge: 0.0,
                plateau: 1.0,
            },
            blur: Levels {
                edge: 8.0,
                plateau: 0.0,
            },
            grades: GradeTable::default(),
        }
    }
}

impl MotionParams {
    /// Check level domains and grade parameters.
    pub fn validate(&self) -> ReelResult<()> {
        for v in [self.opacity.edge, self.opacity.plateau] {
            if !(0.0..=1.0).contains(&v) {
                return Err(ReelError::validation("opacity levels must be within [0, 1]"));
            }
        }
        for v in [self.blur.edge, self.blur.plateau] {
            if !(v >= 0.0 && v.is_finite()) {
                return Err(ReelError::validation("blur levels must be finite and >= 0"));
            }
        }
        self.grades.validate()
    }
}

/// Visual state of a scene image at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameVisualState {
    /// Index of the motion preset in the table.
    pub preset: usize,
    /// Translation in pixels.
    pub offset: Vec2,
    /// Uniform scale about the canvas center.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Blur radius in pixels, `>= 0`.
    pub blur: f64,
    /// Impact overlay intensity in `[0, 1]`.
    pub flash: f64,
    /// Grade selector.
    pub grade: ColorGrade,
    /// Filter parameters for `grade`.
    pub grade_params: GradeParams,
}

impl FrameVisualState {
    /// Image transform: scale about `anchor`, then translate by `offset`.
    pub fn to_affine(&self, anchor: Vec2) -> Affine {
        Affine::translate(self.offset)
            * Affine::translate(anchor)
            * Affine::scale(self.scale)
            * Affine::translate(-anchor)
    }
}

/// Evaluate a scene image at `local_frame` of a scene lasting `duration_frames`.
///
/// Pure: depends only on its arguments. Frames outside `[0, duration_frames]` give the
/// same state as the nearest edge, and a zero duration is treated as one frame.
pub fn evaluate(
    local_frame: i64,
    duration_frames: u64,
    variant: u64,
    params: &MotionParams,
) -> FrameVisualState {
    let duration = duration_frames.max(1);
    let local = clamp_local(local_frame, duration);
    let progress = clamp01(local as f64 / duration as f64);

    let preset_idx = (variant % params.presets.len() as u64) as usize;
    let preset = params.presets.select(variant);
    let e = preset.ease.apply(progress);

    let flash = preset
        .punch
        .map_or(0.0, |p| p.intensity(i64::try_from(local).unwrap_or(i64::MAX)));
    let kick = preset.punch.map_or(0.0, |p| p.scale_kick);
    let scale = lerp(preset.scale[0], preset.scale[1], e) * (1.0 + kick * flash);
    let offset = Vec2::new(
        lerp(preset.offset_x[0], preset.offset_x[1], e),
        lerp(preset.offset_y[0], preset.offset_y[1], e),
    );

    let opacity = clamp01(params.fade.sample(params.opacity, local_frame, duration));
    let blur = params.fade.sample(params.blur, local_frame, duration).max(0.0);

    let grade = ColorGrade::for_variant(variant);
    FrameVisualState {
        preset: preset_idx,
        offset,
        scale,
        opacity,
        blur,
        flash,
        grade,
        grade_params: params.grades.params(grade),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
