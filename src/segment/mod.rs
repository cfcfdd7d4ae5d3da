//! Transcript-to-scene segmentation and timeline placement.

pub(crate) mod segmenter;
pub(crate) mod timeline;
