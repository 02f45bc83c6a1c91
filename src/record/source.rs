use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::{
    foundation::error::{StoryreelError, StoryreelResult},
    record::model::{RecordId, VideoRecord},
};

/// Upstream lookup of video records by id.
///
/// `Ok(None)` means the store answered and the record does not exist; `Err` means the store
/// could not be asked.
pub trait RecordSource {
    /// Look up one record.
    fn fetch(&self, id: &RecordId) -> StoryreelResult<Option<VideoRecord>>;
}

/// Records held in memory, for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryRecordSource {
    records: Vec<VideoRecord>,
}

impl MemoryRecordSource {
    pub fn new(records: Vec<VideoRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for MemoryRecordSource {
    fn fetch(&self, id: &RecordId) -> StoryreelResult<Option<VideoRecord>> {
        Ok(self.records.iter().find(|r| &r.id == id).cloned())
    }
}

/// Records read from a JSON file holding either one record or an array of records.
///
/// The file is re-read on every fetch, so edits are picked up without restarting.
#[derive(Clone, Debug)]
pub struct JsonRecordSource {
    path: PathBuf,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RecordFile {
    Many(Vec<VideoRecord>),
    One(Box<VideoRecord>),
}

impl JsonRecordSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoryreelResult<Vec<VideoRecord>> {
        let f = File::open(&self.path).map_err(|e| {
            StoryreelError::fetch(format!("open record store '{}': {e}", self.path.display()))
        })?;
        let parsed: RecordFile = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            StoryreelError::fetch(format!("parse record store '{}': {e}", self.path.display()))
        })?;
        Ok(match parsed {
            RecordFile::Many(records) => records,
            RecordFile::One(record) => vec![*record],
        })
    }
}

impl RecordSource for JsonRecordSource {
    #[tracing::instrument(skip(self), fields(store = %self.path.display()))]
    fn fetch(&self, id: &RecordId) -> StoryreelResult<Option<VideoRecord>> {
        let records = self.load()?;
        tracing::debug!(count = records.len(), "loaded record store");
        Ok(records.into_iter().find(|r| &r.id == id))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/record/source.rs"]
mod tests;
