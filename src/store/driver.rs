//! Drivers move key/value pairs between a [`Store`](super::Store) and some
//! other medium.

use super::{Map, StoreError, validate};
use regex::Regex;
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Something key/value pairs can be loaded from and saved to.
pub trait Driver {
    /// Reads every pair from the medium.
    fn load(&self) -> Result<Map, StoreError>;

    /// Replaces the contents of the medium with `data`.
    fn save(&mut self, data: &Map) -> Result<(), StoreError>;
}

/// Keeps pairs in memory; they're gone once the driver is dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryDriver {
    data: Map,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver that will load `data`.
    pub fn from_map(data: Map) -> Self {
        Self { data }
    }
}

impl Driver for MemoryDriver {
    fn load(&self) -> Result<Map, StoreError> {
        Ok(self.data.clone())
    }

    fn save(&mut self, data: &Map) -> Result<(), StoreError> {
        self.data = data.clone();
        Ok(())
    }
}

fn line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([_a-zA-Z][_a-zA-Z0-9]*)=([^\n]*)$").unwrap())
}

/// Reads and writes `key=value` lines from a file.
///
/// Blank lines and lines starting with `#` are skipped when loading. Saving
/// rewrites the whole file with the pairs sorted by key.
#[derive(Debug, Clone)]
pub struct FileDriver {
    path: PathBuf,
}

impl FileDriver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses `key=value` lines from any reader.
    pub fn parse(reader: impl io::Read) -> Result<Map, StoreError> {
        let mut map = Map::new();
        for (i, line) in BufReader::new(reader).lines().enumerate() {
            // `lines()` already drops the `\r` of a CRLF ending.
            let line = line?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let caps = line_regex().captures(&line).ok_or_else(|| StoreError::Parse {
                line: i + 1,
                text: line.to_string(),
            })?;
            trace!(key = &caps[1], "parsed entry");
            map.insert(caps[1].to_string(), caps[2].to_string());
        }
        Ok(map)
    }

    /// Writes `data` as sorted `key=value` lines.
    ///
    /// Every pair is checked first, so nothing is written unless all of it
    /// can be parsed back. A value ending in `\r` is refused since it would
    /// read back as a CRLF line ending.
    pub fn write(data: &Map, mut out: impl Write) -> Result<(), StoreError> {
        validate(data)?;
        if let Some((k, _)) = data.iter().find(|(_, v)| v.ends_with('\r')) {
            return Err(StoreError::InvalidValue(k.clone()));
        }
        let mut keys: Vec<&String> = data.keys().collect();
        keys.sort();
        for k in keys {
            writeln!(out, "{}={}", k, data[k])?;
        }
        Ok(())
    }
}

impl Driver for FileDriver {
    fn load(&self) -> Result<Map, StoreError> {
        debug!(path = %self.path.display(), "loading key values");
        let file = fs::File::open(&self.path)?;
        Self::parse(file)
    }

    fn save(&mut self, data: &Map) -> Result<(), StoreError> {
        debug!(path = %self.path.display(), entries = data.len(), "saving key values");
        let mut buf = Vec::new();
        Self::write(data, &mut buf)?;
        fs::write(&self.path, buf)?;
        Ok(())
    }
}
