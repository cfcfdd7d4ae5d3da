use crate::{
    foundation::core::{Fps, FrameIndex},
    foundation::error::{ReelError, ReelResult},
    foundation::math::{lerp, progress},
    transcript::model::Word,
};

/// Pop-in animation of the active caption word.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptionStyle {
    /// Scale of a word on its first active frame.
    pub pop_start: f64,
    /// Frames until the word reaches full scale.
    pub pop_window_frames: u64,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            pop_start: 0.92,
            pop_window_frames: 5,
        }
    }
}

impl CaptionStyle {
    /// Check the pop scale is positive and finite.
    pub fn validate(&self) -> ReelResult<()> {
        if !(self.pop_start > 0.0 && self.pop_start.is_finite()) {
            return Err(ReelError::validation("caption pop_start must be finite and > 0"));
        }
        Ok(())
    }

    /// Scale of a word that became active at `start_frame`, seen at `frame`.
    pub fn pop_scale(&self, frame: u64, start_frame: u64) -> f64 {
        let window = self.pop_window_frames as f64;
        let t = progress(frame as f64, start_frame as f64, start_frame as f64 + window);
        lerp(self.pop_start, 1.0, t)
    }
}

/// The word spoken at a frame, with its predecessor.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActiveCaption {
    /// Index of `current` in the transcript.
    pub index: usize,
    /// Word preceding `current`, if any.
    pub previous: Option<Word>,
    /// Active word.
    pub current: Word,
    /// Pop-in scale of `current`.
    pub pop_scale: f64,
}

fn word_frames(w: &Word, fps: Fps) -> (u64, u64) {
    (fps.ms_to_frames(w.start), fps.ms_to_frames(w.end))
}

fn build_caption(
    index: usize,
    frame: FrameIndex,
    words: &[Word],
    start_frame: u64,
    style: &CaptionStyle,
) -> ActiveCaption {
    ActiveCaption {
        index,
        previous: index.checked_sub(1).map(|p| words[p].clone()),
        current: words[index].clone(),
        pop_scale: style.pop_scale(frame.0, start_frame),
    }
}

/// Find the caption for `frame` by scanning `words` in order.
///
/// Word frame ranges are inclusive on both ends; the first containing word wins.
pub fn resolve_caption(
    frame: FrameIndex,
    words: &[Word],
    fps: Fps,
    style: &CaptionStyle,
) -> Option<ActiveCaption> {
    words.iter().enumerate().find_map(|(i, w)| {
        let (start, end) = word_frames(w, fps);
        (start <= frame.0 && frame.0 <= end).then(|| build_caption(i, frame, words, start, style))
    })
}

/// Precomputed frame ranges for logarithmic caption lookup.
///
/// Answers exactly like [`resolve_caption`] for start-ordered words. `reach[i]` is the
/// largest end frame among words `0..=i`, so the first word whose range can still cover
/// a frame is found by binary search.
#[derive(Clone, Debug, Default)]
pub struct CaptionIndex {
    ranges: Vec<(u64, u64)>,
    reach: Vec<u64>,
}

impl CaptionIndex {
    /// Index `words` on the frame grid of `fps`.
    pub fn new(words: &[Word], fps: Fps) -> Self {
        let ranges: Vec<(u64, u64)> = words.iter().map(|w| word_frames(w, fps)).collect();
        let reach = ranges
            .iter()
            .scan(0u64, |max_end, &(_, end)| {
                *max_end = (*max_end).max(end);
                Some(*max_end)
            })
            .collect();
        Self { ranges, reach }
    }

    /// Index of the active word at `frame`.
    pub fn active_index(&self, frame: FrameIndex) -> Option<usize> {
        let started = self.ranges.partition_point(|&(start, _)| start <= frame.0);
        let first_reaching = self.reach.partition_point(|&end| end < frame.0);
        (first_reaching < started).then_some(first_reaching)
    }

    /// Caption at `frame`; `words` must be the list the index was built from.
    pub fn resolve(
        &self,
        frame: FrameIndex,
        words: &[Word],
        style: &CaptionStyle,
    ) -> Option<ActiveCaption> {
        let i = self.active_index(frame)?;
        let (start, _) = self.ranges[i];
        Some(build_caption(i, frame, words, start, style))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/caption/resolver.rs"]
mod tests;
