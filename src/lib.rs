//! wordreel turns a word-level transcript into a timed sequence of image scenes with
//! animated camera moves and word-by-word captions.
//!
//! # Pipeline overview
//!
//! 1. **Segment**: `Transcript -> Vec<SceneDescriptor>` (fixed time buckets over word starts)
//! 2. **Place**: `scenes + Fps -> Timeline` (frame spans, computed once)
//! 3. **Evaluate**: `(local frame, scene length, variant) -> FrameVisualState`
//! 4. **Caption**: `frame -> ActiveCaption` (first word whose frame range contains the frame)
//!
//! Steps 3 and 4 are pure functions of the frame number and static inputs, so frames can
//! be evaluated in any order or in parallel. [`RenderSession`] ties the steps together and
//! streams [`FrameSnapshot`]s into a [`SnapshotSink`]. Pixel compositing, asset loading and
//! audio are left to the host.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs give bit-identical outputs.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod caption;
mod config;
mod eval;
mod foundation;
mod motion;
mod segment;
mod session;
mod transcript;

pub use animation::ease::Ease;
pub use animation::envelope::{FadeEnvelope, Levels, PunchFlash};
pub use caption::resolver::{ActiveCaption, CaptionIndex, CaptionStyle, resolve_caption};
pub use config::render_config::RenderConfig;
pub use eval::evaluator::{FrameVisualState, MotionParams, evaluate};
pub use foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Vec2};
pub use foundation::error::{ReelError, ReelResult};
pub use foundation::math::{clamp01, interpolate, lerp, lerp_vec2, progress};
pub use motion::grade::{ColorGrade, GradeParams, GradeTable};
pub use motion::preset::{MotionPreset, PresetTable};
pub use segment::segmenter::{ImageRef, SceneDescriptor, segment, with_image_refs};
pub use segment::timeline::{SceneSpan, Timeline};
pub use session::render_session::{
    FrameSnapshot, RenderSession, RenderStats, RenderThreading, SceneFrame,
};
pub use session::sink::{InMemorySink, JsonLinesSink, SinkConfig, SnapshotSink};
pub use transcript::model::{Transcript, Word};
