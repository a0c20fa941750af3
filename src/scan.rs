use crate::config::Config;
use crate::editor::EditorSurface;
use crate::index;
use crate::record::{Location, ViolationRecord};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// One analyzer finding, in covnav's own interchange format. Numbering into
/// violation records happens at scan time, in input order.
#[derive(Deserialize, Debug, Clone)]
pub struct Finding {
    /// Coding-standard family (e.g. "autosar")
    pub ruleset: String,
    /// Rule identifier within the ruleset
    pub rule: String,
    /// Absolute path of the offending file
    pub file: String,
    /// 1-based line number
    pub line: u32,
}

/// Assign violation numbers in discovery order, starting at 1
pub fn number_findings(findings: &[Finding]) -> Vec<ViolationRecord> {
    findings
        .iter()
        .enumerate()
        .map(|(i, f)| {
            ViolationRecord::new(
                i as u32 + 1,
                &f.ruleset,
                &f.rule,
                Location {
                    path: f.file.clone(),
                    line: f.line,
                },
            )
        })
        .collect()
}

/// Scan a directory of analyzer findings and write its violation index
///
/// Reads the findings file from the directory, numbers findings in input
/// order, writes the index snapshot atomically (replacing any prior index),
/// and requests navigation to line 1 of the written file. Returns the index
/// filename.
pub async fn scan(
    directory: &Path,
    config: &Config,
    findings_file: Option<&str>,
    editor: &dyn EditorSurface,
) -> anyhow::Result<String> {
    let findings_name = findings_file.unwrap_or(&config.scan.findings);
    let findings_path = directory.join(findings_name);
    info!("Reading findings from {}", findings_path.display());

    let content = tokio::fs::read_to_string(&findings_path)
        .await
        .with_context(|| format!("cannot read findings file {}", findings_path.display()))?;
    let findings: Vec<Finding> = serde_json::from_str(&content)
        .with_context(|| format!("cannot parse findings file {}", findings_path.display()))?;
    info!("Loaded {} findings", findings.len());

    let records = number_findings(&findings);
    let text = index::build_index(&records);
    let index_path = index::write_index(directory, &config.index.filename, &text)
        .with_context(|| format!("cannot write index into {}", directory.display()))?;
    info!("Wrote {} records to {}", records.len(), index_path.display());

    editor.notify(&format!(
        "Violation index written to {}",
        index_path.display()
    ));
    if let Err(e) = editor.open_at(&index_path, 1).await {
        // The index is already on disk at this point
        warn!("Cannot open index file: {}", e);
    }

    Ok(config.index.filename.clone())
}
