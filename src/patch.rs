use crate::util;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// A single guarded fix attempt: replace one line of `target_file` only if
/// its current content equals `expected_content` exactly. Constructed per
/// attempt, never persisted.
#[derive(Debug, Clone)]
pub struct PatchProposal {
    /// Absolute path of the file to modify
    pub target_file: String,
    /// 1-based line number
    pub target_line: u32,
    /// Exact string the line must currently equal; not a pattern
    pub expected_content: String,
    /// String to write in its place
    pub replacement_content: String,
}

/// Outcome of a guarded patch attempt.
///
/// `Rejected` is an expected result, not a crash condition: the file was
/// edited since the finding was recorded, or the fix was already applied.
/// It carries both sides of the failed comparison for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    Applied,
    Rejected { expected: String, actual: String },
}

/// Why a patch attempt could not be evaluated at all
#[derive(Debug)]
pub enum PatchError {
    /// `target_line` was 0; line numbers are 1-based
    InvalidLine,
    /// `target_line` is past the end of the file
    OutOfRange { line: u32, line_count: usize },
    Io(std::io::Error),
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::InvalidLine => write!(f, "invalid line number 0, lines are 1-based"),
            PatchError::OutOfRange { line, line_count } => {
                write!(f, "line {} is out of range, file has {} lines", line, line_count)
            }
            PatchError::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for PatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatchError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PatchError {
    fn from(e: std::io::Error) -> Self {
        PatchError::Io(e)
    }
}

/// Apply a guarded single-line replacement.
///
/// Reads the whole file, verifies the target line equals the expected
/// content, and only then rewrites the file with the line replaced. A
/// mismatch leaves the file byte-for-byte unchanged and reports the actual
/// content found. The read-check-write sequence is atomic with respect to
/// this process only; a concurrent writer between read and write is an
/// accepted race.
pub async fn apply_patch(proposal: &PatchProposal) -> Result<PatchOutcome, PatchError> {
    if proposal.target_line == 0 {
        return Err(PatchError::InvalidLine);
    }

    let raw = tokio::fs::read_to_string(&proposal.target_file).await?;

    // The guard compares logical line content: CRLF files are normalized on
    // read and get their line endings restored on write. A file with mixed
    // endings is rewritten with uniform CRLF.
    let uses_crlf = raw.contains("\r\n");
    let content = if uses_crlf { raw.replace("\r\n", "\n") } else { raw };

    let mut lines: Vec<&str> = content.split('\n').collect();
    let line_count = lines.len();
    let index = (proposal.target_line - 1) as usize;
    if index >= line_count {
        return Err(PatchError::OutOfRange {
            line: proposal.target_line,
            line_count,
        });
    }

    let actual = lines[index];
    if actual != proposal.expected_content {
        debug!(
            "Guard mismatch on {}:{}: expected {:?}, found {:?}",
            proposal.target_file, proposal.target_line, proposal.expected_content, actual
        );
        return Ok(PatchOutcome::Rejected {
            expected: proposal.expected_content.clone(),
            actual: actual.to_string(),
        });
    }

    lines[index] = &proposal.replacement_content;
    let mut updated = lines.join("\n");
    if uses_crlf {
        updated = updated.replace('\n', "\r\n");
    }
    util::atomic_write(Path::new(&proposal.target_file), &updated)?;

    info!(
        "Replaced line {} of {}",
        proposal.target_line, proposal.target_file
    );
    Ok(PatchOutcome::Applied)
}
