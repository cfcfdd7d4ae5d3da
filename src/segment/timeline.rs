use crate::{
    foundation::core::{Fps, FrameIndex, FrameRange},
    segment::segmenter::SceneDescriptor,
    transcript::model::Word,
};

/// A scene placed on the frame timeline.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneSpan {
    /// Index into the scene list this span was built from.
    pub scene_index: usize,
    /// Scene id copied from the descriptor.
    pub scene_id: u32,
    /// Frames `[start, end)` the scene is visible for.
    pub range: FrameRange,
}

/// Frame placement of every scene, computed once per transcript.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    spans: Vec<SceneSpan>,
    duration_frames: u64,
}

impl Timeline {
    /// Place `scenes` on the frame grid of `fps`.
    ///
    /// Each span runs from the first word's start frame to the last word's end frame and
    /// lasts at least one frame. When `total_frames` is set every span, including the last,
    /// is clamped to it and spans left empty are dropped. Scenes whose word indices no
    /// longer resolve against `words` are skipped.
    pub fn build(
        scenes: &[SceneDescriptor],
        words: &[Word],
        fps: Fps,
        total_frames: Option<u64>,
    ) -> Self {
        let (mut spans, natural_end) = scenes.iter().enumerate().fold(
            (Vec::with_capacity(scenes.len()), 0u64),
            |(mut spans, end_so_far), (scene_index, scene)| {
                let Some((start_ms, end_ms)) = scene.extent_ms(words) else {
                    tracing::debug!(scene_id = scene.scene_id, "skipping unresolvable scene");
                    return (spans, end_so_far);
                };
                let start = fps.ms_to_frames(start_ms);
                let end = fps.ms_to_frames(end_ms).max(start.saturating_add(1));
                let mut range = FrameRange {
                    start: FrameIndex(start),
                    end: FrameIndex(end),
                };
                if let Some(total) = total_frames {
                    range = range.clamp_end(total);
                }
                if !range.is_empty() {
                    spans.push(SceneSpan {
                        scene_index,
                        scene_id: scene.scene_id,
                        range,
                    });
                }
                (spans, end_so_far.max(end))
            },
        );

        // Stable, so equal starts keep scene order.
        spans.sort_by_key(|s: &SceneSpan| s.range.start);
        let duration_frames = total_frames.unwrap_or(natural_end).max(1);
        Self {
            spans,
            duration_frames,
        }
    }

    /// Spans ordered by start frame.
    pub fn spans(&self) -> &[SceneSpan] {
        &self.spans
    }

    /// Composition length in frames (at least one).
    pub fn duration_frames(&self) -> u64 {
        self.duration_frames
    }

    /// The scene visible at `frame`.
    ///
    /// Spans are ordered by start; where two overlap the later-starting one is on top.
    pub fn active(&self, frame: FrameIndex) -> Option<&SceneSpan> {
        let upto = self.spans.partition_point(|s| s.range.start <= frame);
        self.spans[..upto]
            .iter()
            .rev()
            .find(|s| s.range.contains(frame))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segment/timeline.rs"]
mod tests;
