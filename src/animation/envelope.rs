use crate::{
    animation::ease::Ease,
    foundation::math::{clamp01, clamp_local, lerp},
};

/// Edge and plateau values of a trapezoidal envelope.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Levels {
    /// Value at the first and last frame of a scene.
    pub edge: f64,
    /// Value held between the two ramps.
    pub plateau: f64,
}

/// Symmetric fade-in/hold/fade-out envelope over local scene frames.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FadeEnvelope {
    /// Upper bound on the length of each ramp, in frames.
    pub cap_frames: u64,
}

impl FadeEnvelope {
    /// Ramp length for a scene of `duration` frames.
    ///
    /// Never more than a third of the scene, so the in and out ramps cannot overlap.
    pub fn window(self, duration: u64) -> u64 {
        self.cap_frames.min(duration / 3)
    }

    /// Ramp weight in `[0, 1]`: `0` at the edges, `1` on the plateau.
    ///
    /// `local` is clamped into `[0, duration]`. Scenes too short for a ramp jump straight
    /// between edge and plateau; `cap_frames == 0` disables the fade entirely.
    pub fn weight(self, local: i64, duration: u64) -> f64 {
        if self.cap_frames == 0 {
            return 1.0;
        }
        let duration = duration.max(1);
        let f = self.window(duration);
        let t = clamp_local(local, duration);
        if f == 0 {
            return if t == 0 || t == duration { 0.0 } else { 1.0 };
        }
        let ramp = if t < f {
            t
        } else if t > duration - f {
            duration - t
        } else {
            return 1.0;
        };
        clamp01(ramp as f64 / f as f64)
    }

    /// Sample `levels` at `local`.
    pub fn sample(self, levels: Levels, local: i64, duration: u64) -> f64 {
        lerp(levels.edge, levels.plateau, self.weight(local, duration))
    }
}

/// Short decaying impact overlay at scene entry.
///
/// Depends on the local frame only; the scene length never stretches it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PunchFlash {
    /// Frames until the overlay reaches zero.
    pub window_frames: u64,
    /// Overlay intensity at local frame 0, in `[0, 1]`.
    pub peak: f64,
    /// Extra scale added at full intensity (`0.03` = +3%).
    #[serde(default)]
    pub scale_kick: f64,
    /// Decay curve.
    #[serde(default = "default_punch_ease")]
    pub ease: Ease,
}

fn default_punch_ease() -> Ease {
    Ease::OutQuad
}

impl PunchFlash {
    /// Overlay intensity at `local`; exactly `0` once `local >= window_frames`.
    pub fn intensity(self, local: i64) -> f64 {
        if self.window_frames == 0 {
            return 0.0;
        }
        let t = local.max(0) as u64;
        if t >= self.window_frames {
            return 0.0;
        }
        let decay = self.ease.apply(t as f64 / self.window_frames as f64);
        clamp01(self.peak) * (1.0 - decay)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/envelope.rs"]
mod tests;
