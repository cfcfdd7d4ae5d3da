use std::io::Write;

use crate::{
    foundation::core::{Canvas, Fps, FrameIndex},
    foundation::error::{ReelError, ReelResult},
    session::render_session::FrameSnapshot,
};

/// Configuration provided to a [`SnapshotSink`] at the start of a range render.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SinkConfig {
    /// Output canvas.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Number of frames that will be pushed.
    pub frames: u64,
}

/// Consumer of evaluated frames.
///
/// `push_frame` is called in strictly increasing `FrameIndex` order, also when frames
/// were evaluated in parallel.
pub trait SnapshotSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Push one frame in timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameSnapshot) -> ReelResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ReelResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<FrameSnapshot>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in timeline order.
    pub fn frames(&self) -> &[FrameSnapshot] {
        &self.frames
    }
}

impl SnapshotSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &FrameSnapshot) -> ReelResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        Ok(())
    }
}

/// Writes one JSON object per frame, preceded by a header line with the sink config.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line<T: serde::Serialize>(&mut self, value: &T) -> ReelResult<()> {
        serde_json::to_writer(&mut self.out, value)?;
        self.out
            .write_all(b"\n")
            .map_err(|e| ReelError::Other(anyhow::Error::new(e)))
    }
}

impl<W: Write> SnapshotSink for JsonLinesSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.write_line(&cfg)
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &FrameSnapshot) -> ReelResult<()> {
        self.write_line(frame)
    }

    fn end(&mut self) -> ReelResult<()> {
        self.out
            .flush()
            .map_err(|e| ReelError::Other(anyhow::Error::new(e)))
    }
}
