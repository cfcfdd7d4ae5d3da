use rayon::prelude::*;

use crate::{
    caption::resolver::{ActiveCaption, CaptionIndex},
    config::render_config::RenderConfig,
    eval::evaluator::{FrameVisualState, evaluate},
    foundation::core::{FrameIndex, FrameRange, Vec2},
    foundation::error::{ReelError, ReelResult},
    segment::segmenter::{ImageRef, SceneDescriptor, segment},
    segment::timeline::Timeline,
    session::sink::{SinkConfig, SnapshotSink},
    transcript::model::Transcript,
};

/// Threading options for [`RenderSession::render_range`].
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Evaluate frames on a dedicated rayon pool.
    pub parallel: bool,
    /// Frames evaluated per batch before they are pushed to the sink.
    pub chunk_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 256,
            threads: None,
        }
    }
}

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_total: u64,
    /// Frames with a visible scene.
    pub frames_with_scene: u64,
    /// Frames with an active caption.
    pub frames_with_caption: u64,
}

/// The scene layer of one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneFrame {
    /// Scene id.
    pub scene_id: u32,
    /// Image to draw.
    pub image_ref: ImageRef,
    /// Frame offset inside the scene.
    pub local_frame: u64,
    /// Scene length in frames.
    pub duration_frames: u64,
    /// Evaluated transform and filters.
    pub state: FrameVisualState,
    /// Image transform about the canvas center.
    pub transform: [f64; 6],
}

/// Everything the compositor needs for one output frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameSnapshot {
    /// Timeline frame.
    pub frame: FrameIndex,
    /// Visible scene, if any.
    pub scene: Option<SceneFrame>,
    /// Active caption, if any.
    pub caption: Option<ActiveCaption>,
}

/// Front-loads segmentation, timeline placement and caption indexing, then answers
/// per-frame queries without mutable state.
#[derive(Debug)]
pub struct RenderSession {
    config: RenderConfig,
    transcript: Transcript,
    scenes: Vec<SceneDescriptor>,
    timeline: Timeline,
    captions: CaptionIndex,
}

impl RenderSession {
    /// Validate inputs and segment the transcript.
    pub fn new(config: RenderConfig, transcript: Transcript) -> ReelResult<Self> {
        config.validate()?;
        let scenes = segment(transcript.words(), config.bucket_ms);
        Self::with_scenes(config, transcript, scenes)
    }

    /// Build a session from scenes computed elsewhere.
    ///
    /// Scenes may come from a different revision of the transcript; their word indices
    /// are clamped against `transcript` and scenes that no longer resolve are skipped.
    /// Scenes must be ordered by `from_word_index`.
    pub fn with_scenes(
        config: RenderConfig,
        transcript: Transcript,
        scenes: Vec<SceneDescriptor>,
    ) -> ReelResult<Self> {
        config.validate()?;
        transcript.validate()?;
        if let Some(pair) = scenes
            .windows(2)
            .find(|w| w[1].from_word_index < w[0].from_word_index)
        {
            return Err(ReelError::validation(format!(
                "scene {} starts at word {} before scene {} (word {})",
                pair[1].scene_id,
                pair[1].from_word_index,
                pair[0].scene_id,
                pair[0].from_word_index
            )));
        }
        let timeline = Timeline::build(
            &scenes,
            transcript.words(),
            config.fps,
            config.duration_frames,
        );
        let captions = CaptionIndex::new(transcript.words(), config.fps);
        tracing::info!(
            words = transcript.len(),
            scenes = scenes.len(),
            placed = timeline.spans().len(),
            duration_frames = timeline.duration_frames(),
            "render session ready"
        );
        Ok(Self {
            config,
            transcript,
            scenes,
            timeline,
            captions,
        })
    }

    /// Static configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Input transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Scenes in emission order.
    pub fn scenes(&self) -> &[SceneDescriptor] {
        &self.scenes
    }

    /// Frame placement of the scenes.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Composition length in frames.
    pub fn duration_frames(&self) -> u64 {
        self.timeline.duration_frames()
    }

    /// Evaluate one frame.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn frame_snapshot(&self, frame: FrameIndex) -> ReelResult<FrameSnapshot> {
        if frame.0 >= self.duration_frames() {
            return Err(ReelError::validation(
                "frame_snapshot frame must be within composition duration",
            ));
        }

        let scene = self.timeline.active(frame).map(|span| {
            let descriptor = &self.scenes[span.scene_index];
            let duration_frames = span.range.len_frames().max(1);
            let local = span.range.local(frame);
            let variant = span.scene_index as u64;
            let state = evaluate(local, duration_frames, variant, &self.config.motion);
            let anchor = Vec2::new(
                f64::from(self.config.canvas.width) / 2.0,
                f64::from(self.config.canvas.height) / 2.0,
            );
            SceneFrame {
                scene_id: descriptor.scene_id,
                image_ref: descriptor.image_ref.clone(),
                local_frame: local.max(0) as u64,
                duration_frames,
                transform: state.to_affine(anchor).as_coeffs(),
                state,
            }
        });

        let caption = self
            .captions
            .resolve(frame, self.transcript.words(), &self.config.caption);

        Ok(FrameSnapshot {
            frame,
            scene,
            caption,
        })
    }

    /// Evaluate `range` and push the frames into `sink` in timeline order.
    ///
    /// Parallel and sequential evaluation produce identical output.
    #[tracing::instrument(skip(self, threading, sink))]
    pub fn render_range(
        &self,
        range: FrameRange,
        threading: &RenderThreading,
        sink: &mut dyn SnapshotSink,
    ) -> ReelResult<RenderStats> {
        if range.is_empty() {
            return Err(ReelError::validation("render_range range must be non-empty"));
        }
        if range.end.0 > self.duration_frames() {
            return Err(ReelError::validation(
                "render_range range must be within composition duration",
            ));
        }

        let pool = if threading.parallel {
            Some(build_thread_pool(threading.threads)?)
        } else {
            None
        };
        let chunk_size = normalized_chunk_size(threading.chunk_size);

        sink.begin(SinkConfig {
            canvas: self.config.canvas,
            fps: self.config.fps,
            frames: range.len_frames(),
        })?;

        let mut stats = RenderStats::default();
        let mut chunk_start = range.start.0;
        while chunk_start < range.end.0 {
            let chunk_end = (chunk_start + chunk_size).min(range.end.0);
            let frames = match pool.as_ref() {
                Some(pool) => pool.install(|| {
                    (chunk_start..chunk_end)
                        .into_par_iter()
                        .map(|f| self.frame_snapshot(FrameIndex(f)))
                        .collect::<ReelResult<Vec<_>>>()
                })?,
                None => (chunk_start..chunk_end)
                    .map(|f| self.frame_snapshot(FrameIndex(f)))
                    .collect::<ReelResult<Vec<_>>>()?,
            };

            for snap in &frames {
                stats.frames_total += 1;
                stats.frames_with_scene += u64::from(snap.scene.is_some());
                stats.frames_with_caption += u64::from(snap.caption.is_some());
                sink.push_frame(snap.frame, snap)?;
            }
            chunk_start = chunk_end;
        }

        sink.end()?;
        tracing::debug!(?stats, "render_range finished");
        Ok(stats)
    }
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
