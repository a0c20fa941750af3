use crate::record::{MalformedRecord, ViolationRecord};
use crate::util;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filename of the violation index written into a scanned directory
pub const INDEX_FILENAME: &str = "index.covrst";

/// Serialize records into the index file text, one encoded record per line.
/// Caller order is preserved; the builder does not sort.
pub fn build_index(records: &[ViolationRecord]) -> String {
    records
        .iter()
        .map(ViolationRecord::encode)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Persist index text to `directory/filename`, replacing any prior index.
/// The write goes through a temporary file and a rename so a crash never
/// leaves a half-written index under the final name.
pub fn write_index(directory: &Path, filename: &str, text: &str) -> std::io::Result<PathBuf> {
    let path = directory.join(filename);
    util::atomic_write(&path, text)?;
    debug!("Index written to {}", path.display());
    Ok(path)
}

/// Why an index file failed to load
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    /// A line did not decode; carries its 1-based line number
    Malformed {
        line_no: usize,
        source: MalformedRecord,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "cannot read index: {}", e),
            LoadError::Malformed { line_no, source } => {
                write!(f, "malformed record on line {}: {}", line_no, source)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Malformed { source, .. } => Some(source),
        }
    }
}

/// Read an index file back into records, in file order. Blank lines are
/// skipped; the first malformed line fails the load.
pub fn load_index(path: &Path) -> Result<Vec<ViolationRecord>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(LoadError::Io)?;

    let mut records = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = ViolationRecord::decode(line).map_err(|source| LoadError::Malformed {
            line_no: idx + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}
