use std::fmt;
use std::path::{Path, PathBuf};

use crate::transcript::model::Word;

/// Reference to the image shown for a scene.
///
/// The segmenter always emits [`ImageRef::Ordinal`]; asset collaborators may swap in
/// named references through [`with_image_refs`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    /// 1-based scene ordinal.
    Ordinal(u32),
    /// Collaborator-provided asset key.
    Named(String),
}

impl ImageRef {
    /// Resolve to `dir/<ref>.<ext>`.
    pub fn asset_path(&self, dir: impl AsRef<Path>, ext: &str) -> PathBuf {
        dir.as_ref().join(format!("{self}.{ext}"))
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordinal(n) => write!(f, "{n}"),
            Self::Named(s) => f.write_str(s),
        }
    }
}

/// A contiguous run of words shown over one image.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneDescriptor {
    /// 1-based, dense, in emission order.
    pub scene_id: u32,
    /// Image shown for the scene.
    pub image_ref: ImageRef,
    /// First word index (inclusive).
    pub from_word_index: usize,
    /// Last word index (inclusive).
    pub to_word_index: usize,
    /// Space-joined text of the scene's words.
    pub dialogue: String,
}

impl SceneDescriptor {
    /// Clamp indices against a word list of `word_count` entries.
    ///
    /// Returns `None` when nothing valid remains (empty word list).
    pub fn resolve(&self, word_count: usize) -> Option<(usize, usize)> {
        let last = word_count.checked_sub(1)?;
        let from = self.from_word_index.min(last);
        let to = self.to_word_index.min(last);
        (from <= to).then_some((from, to))
    }

    /// `(start_ms, end_ms)` of the scene against `words`, after clamping.
    pub fn extent_ms(&self, words: &[Word]) -> Option<(u64, u64)> {
        let (from, to) = self.resolve(words.len())?;
        Some((words[from].start, words[to].end))
    }
}

/// Group words into scenes by fixed-size time buckets of their start times.
///
/// A new scene starts whenever a word's bucket differs from the bucket of the current
/// scene's first word. `bucket_ms == 0` is treated as 1ms.
#[tracing::instrument(skip(words), fields(words = words.len()))]
pub fn segment(words: &[Word], bucket_ms: u64) -> Vec<SceneDescriptor> {
    let bucket_ms = bucket_ms.max(1);
    let bucket = |ms: u64| ms / bucket_ms;

    let Some(first) = words.first() else {
        return Vec::new();
    };

    let mut scenes = Vec::new();
    let mut scene_id = 1u32;
    let mut from = 0usize;
    let mut current = bucket(first.start);

    for (i, w) in words.iter().enumerate().skip(1) {
        let b = bucket(w.start);
        if b != current {
            scenes.push(make_scene(words, scene_id, from, i - 1));
            scene_id += 1;
            current = b;
            from = i;
        }
    }
    scenes.push(make_scene(words, scene_id, from, words.len() - 1));

    tracing::debug!(scenes = scenes.len(), bucket_ms, "segmented transcript");
    scenes
}

fn make_scene(words: &[Word], scene_id: u32, from: usize, to: usize) -> SceneDescriptor {
    let dialogue = words[from..=to]
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    SceneDescriptor {
        scene_id,
        image_ref: ImageRef::Ordinal(scene_id),
        from_word_index: from,
        to_word_index: to,
        dialogue,
    }
}

/// Replace image references without touching ids, order or word ranges.
pub fn with_image_refs(
    mut scenes: Vec<SceneDescriptor>,
    mut assign: impl FnMut(&SceneDescriptor) -> ImageRef,
) -> Vec<SceneDescriptor> {
    for s in &mut scenes {
        s.image_ref = assign(s);
    }
    scenes
}

#[cfg(test)]
#[path = "../../tests/unit/segment/segmenter.rs"]
mod tests;
