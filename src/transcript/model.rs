use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};

/// One timed word of the transcript.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Word {
    /// Spoken text.
    pub text: String,
    /// Start time in milliseconds.
    pub start: u64,
    /// End time in milliseconds (`>= start`).
    pub end: u64,
}

impl Word {
    /// Convenience constructor.
    pub fn new(text: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// Immutable, start-ordered word sequence.
///
/// Word identity elsewhere in the crate is the index into this sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    words: Vec<Word>,
}

impl Transcript {
    /// Build a transcript and validate its ordering.
    pub fn new(words: Vec<Word>) -> ReelResult<Self> {
        let t = Self { words };
        t.validate()?;
        Ok(t)
    }

    /// Parse a JSON array of `{ "text", "start", "end" }` records.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let words: Vec<Word> = serde_json::from_str(s)
            .map_err(|e| ReelError::serde(format!("parse transcript JSON: {e}")))?;
        Self::new(words)
    }

    /// Parse a transcript from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        let words: Vec<Word> = serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse transcript JSON: {e}")))?;
        Self::new(words)
    }

    /// Parse a transcript from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open transcript JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check `start <= end` per word and non-decreasing starts.
    pub fn validate(&self) -> ReelResult<()> {
        let mut prev_start = 0u64;
        for (i, w) in self.words.iter().enumerate() {
            if w.start > w.end {
                return Err(ReelError::validation(format!(
                    "word {i} ('{}') starts after it ends ({} > {})",
                    w.text, w.start, w.end
                )));
            }
            if w.start < prev_start {
                return Err(ReelError::validation(format!(
                    "word {i} ('{}') starts before its predecessor ({} < {prev_start})",
                    w.text, w.start
                )));
            }
            prev_start = w.start;
        }
        Ok(())
    }

    /// Words in sequence order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Return `true` when there are no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// End time of the last word, or `0` for an empty transcript.
    pub fn end_ms(&self) -> u64 {
        self.words.iter().map(|w| w.end).max().unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/model.rs"]
mod tests;
