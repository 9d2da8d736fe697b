//! Reader for the `key=value` metadata file the game's launcher writes.
//!
//! The format is deliberately forgiving: lines that don't look like a pair are
//! skipped, keys may repeat (the first occurrence wins), and numbers that fail
//! to parse read as absent.

use std::path::Path;

use crate::error::ResolveError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyReader {
    entries: Vec<(String, String)>,
}

impl PropertyReader {
    /// Read and parse the file at `path`.
    ///
    /// Any failure to read the file is [`ResolveError::NotFound`]. Content is
    /// decoded as lossy UTF-8, so an unreadable byte never fails the parse.
    pub fn open(path: &Path) -> Result<Self, ResolveError> {
        let bytes = std::fs::read(path).map_err(|e| ResolveError::NotFound {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .filter_map(|line| {
                let (key, value) = line.split_once('=')?;
                let key = key.trim();
                if key.is_empty() {
                    return None;
                }
                Some((key.to_string(), value.trim().to_string()))
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Integer lookup that treats a malformed value the same as a missing one.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get_int_checked(key).ok().flatten()
    }

    /// Integer lookup that reports a malformed value instead of hiding it.
    pub fn get_int_checked(&self, key: &str) -> Result<Option<i64>, ResolveError> {
        let Some(value) = self.get_string(key) else {
            return Ok(None);
        };
        value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ResolveError::ParseFailure {
                key: key.to_string(),
                value: value.to_string(),
            })
    }
}
