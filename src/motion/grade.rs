use crate::foundation::error::{ReelError, ReelResult};

/// Which of the two color grades a scene uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorGrade {
    /// Even variants.
    Warm,
    /// Odd variants.
    Cool,
}

impl ColorGrade {
    /// Alternate by `variant mod 2`, independent of the motion preset.
    pub fn for_variant(variant: u64) -> Self {
        if variant % 2 == 0 {
            Self::Warm
        } else {
            Self::Cool
        }
    }
}

/// Filter parameters handed to the compositor for one grade.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradeParams {
    /// Contrast multiplier (`1.0` = unchanged).
    pub contrast: f64,
    /// Saturation multiplier (`1.0` = unchanged).
    pub saturation: f64,
    /// White-balance shift in `[-1, 1]`; positive is warmer.
    #[serde(default)]
    pub temperature: f64,
}

/// Parameters for both grades.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradeTable {
    /// Used for [`ColorGrade::Warm`].
    pub warm: GradeParams,
    /// Used for [`ColorGrade::Cool`].
    pub cool: GradeParams,
}

impl Default for GradeTable {
    fn default() -> Self {
        Self {
            warm: GradeParams {
                contrast: 1.05,
                saturation: 1.04,
                temperature: 0.06,
            },
            cool: GradeParams {
                contrast: 1.05,
                saturation: 1.0,
                temperature: -0.06,
            },
        }
    }
}

impl GradeTable {
    /// Parameters for `grade`.
    pub fn params(&self, grade: ColorGrade) -> GradeParams {
        match grade {
            ColorGrade::Warm => self.warm,
            ColorGrade::Cool => self.cool,
        }
    }

    pub(crate) fn validate(&self) -> ReelResult<()> {
        for (name, p) in [("warm", self.warm), ("cool", self.cool)] {
            if !(p.contrast >= 0.0 && p.saturation >= 0.0) {
                return Err(ReelError::validation(format!(
                    "{name} grade contrast and saturation must be >= 0"
                )));
            }
            if !(-1.0..=1.0).contains(&p.temperature) {
                return Err(ReelError::validation(format!(
                    "{name} grade temperature must be within [-1, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/grade.rs"]
mod tests;
