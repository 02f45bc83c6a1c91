use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{StoryreelError, StoryreelResult};

/// Identifier of a stored video record.
///
/// Stores hand out either numeric or string keys; both are normalised to their string form.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "RawRecordId", into = "String")]
pub struct RecordId(pub String);

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawRecordId {
    Number(i64),
    Text(String),
}

impl From<RawRecordId> for RecordId {
    fn from(raw: RawRecordId) -> Self {
        match raw {
            RawRecordId::Number(n) => Self(n.to_string()),
            RawRecordId::Text(s) => Self(s),
        }
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A timestamped caption span (word or phrase) in milliseconds.
pub struct Caption {
    /// Caption text shown while the span is active.
    pub text: String,
    /// Inclusive start in milliseconds.
    pub start: u64,
    /// Inclusive end in milliseconds.
    pub end: u64,
}

impl Caption {
    pub fn new(text: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// `start <= time_ms <= end`.
    pub fn covers(&self, time_ms: f64) -> bool {
        time_ms >= self.start as f64 && time_ms <= self.end as f64
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A generated short video as handed to the player: narration script, images, audio, captions.
pub struct VideoRecord {
    /// Store key.
    pub id: RecordId,
    /// Narration script. The composition draws nothing while this is empty.
    #[serde(default)]
    pub script: String,
    /// Ordered image references, one slot each.
    #[serde(default)]
    pub image_list: Vec<String>,
    /// Background narration audio.
    #[serde(default)]
    pub audio_file_url: String,
    /// Word-level captions ascending by `start`.
    #[serde(default)]
    pub captions: Vec<Caption>,
}

impl VideoRecord {
    /// Parse a single record from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> StoryreelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| StoryreelError::serde(format!("parse video record JSON: {e}")))
    }

    /// Parse a single record from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StoryreelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StoryreelError::validation(format!("open video record '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Whether the composition has anything to draw.
    pub fn has_script(&self) -> bool {
        !self.script.trim().is_empty()
    }

    /// Human-readable problems with the caption track.
    ///
    /// These never fail evaluation; the timing calculator works with whatever it is given.
    pub fn caption_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for (i, c) in self.captions.iter().enumerate() {
            if c.end < c.start {
                issues.push(format!("caption {i} ends before it starts"));
            }
        }
        for (i, w) in self.captions.windows(2).enumerate() {
            if w[1].start < w[0].start {
                issues.push(format!("caption {} starts before caption {i}", i + 1));
            }
        }
        issues
    }
}

#[cfg(test)]
#[path = "../../tests/unit/record/model.rs"]
mod tests;
