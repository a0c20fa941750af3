use crate::editor::EditorSurface;
use crate::record::ViolationRecord;
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^violation_(\d+)$").expect("identifier pattern"));

/// Extract the violation number from a lookup token.
///
/// Total over all strings: `Some(n)` iff the token matches
/// `^violation_(\d+)$` exactly (case-sensitive, anchored both ends) and the
/// digits fit in a u32.
pub fn resolve_identifier(token: &str) -> Option<u32> {
    let caps = IDENTIFIER.captures(token)?;
    caps[1].parse().ok()
}

/// A navigable destination recovered from the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTarget {
    pub path: String,
    pub line: u32,
}

/// Look up violation `number` among `records` and produce its target
pub fn find_target(records: &[ViolationRecord], number: u32) -> Option<NavTarget> {
    let identifier = format!("violation_{}", number);
    records
        .iter()
        .find(|r| r.identifier == identifier)
        .map(|r| NavTarget {
            path: r.location.path.clone(),
            line: r.location.line,
        })
}

/// Why a navigation request was not delegated or did not complete
#[derive(Debug)]
pub enum NavError {
    /// Non-positive line requested; rejected before any delegation
    InvalidLocation,
    /// Opaque failure reported by the editing surface
    Editor(String),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::InvalidLocation => write!(f, "line numbers are 1-based; 0 is not navigable"),
            NavError::Editor(e) => write!(f, "editor error: {}", e),
        }
    }
}

impl std::error::Error for NavError {}

/// Hand a validated target to the editing surface
pub async fn navigate(target: &NavTarget, editor: &dyn EditorSurface) -> Result<(), NavError> {
    if target.line == 0 {
        return Err(NavError::InvalidLocation);
    }

    debug!("Delegating navigation to {}:{}", target.path, target.line);
    editor
        .open_at(Path::new(&target.path), target.line)
        .await
        .map_err(NavError::Editor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Location;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct RecordingEditor {
        opened: Mutex<Vec<(PathBuf, u32)>>,
    }

    impl RecordingEditor {
        fn new() -> Self {
            Self {
                opened: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl EditorSurface for RecordingEditor {
        async fn open_at(&self, path: &Path, line: u32) -> Result<(), String> {
            self.opened.lock().unwrap().push((path.to_path_buf(), line));
            Ok(())
        }

        fn notify(&self, _message: &str) {}
    }

    struct FailingEditor;

    #[async_trait]
    impl EditorSurface for FailingEditor {
        async fn open_at(&self, _path: &Path, _line: u32) -> Result<(), String> {
            Err("document is gone".to_string())
        }

        fn notify(&self, _message: &str) {}
    }

    #[test]
    fn test_resolve_identifier_matches() {
        assert_eq!(resolve_identifier("violation_1"), Some(1));
        assert_eq!(resolve_identifier("violation_42"), Some(42));
        // Leading zeros are digits too
        assert_eq!(resolve_identifier("violation_007"), Some(7));
    }

    #[test]
    fn test_resolve_identifier_is_anchored_and_case_sensitive() {
        assert_eq!(resolve_identifier("Violation_1"), None);
        assert_eq!(resolve_identifier("violation_1x"), None);
        assert_eq!(resolve_identifier("xviolation_1"), None);
        assert_eq!(resolve_identifier("violation_"), None);
        assert_eq!(resolve_identifier("violation_1 "), None);
        assert_eq!(resolve_identifier(""), None);
    }

    #[test]
    fn test_resolve_identifier_rejects_oversized_numbers() {
        assert_eq!(resolve_identifier("violation_99999999999999999999"), None);
    }

    #[test]
    fn test_find_target() {
        let records = vec![
            ViolationRecord::new(
                1,
                "autosar",
                "A7-1-1",
                Location {
                    path: "/a.cpp".to_string(),
                    line: 5,
                },
            ),
            ViolationRecord::new(
                2,
                "autosar",
                "A7-1-1",
                Location {
                    path: "/a.cpp".to_string(),
                    line: 10,
                },
            ),
        ];

        assert_eq!(
            find_target(&records, 2),
            Some(NavTarget {
                path: "/a.cpp".to_string(),
                line: 10
            })
        );
        assert_eq!(find_target(&records, 3), None);
    }

    #[tokio::test]
    async fn test_navigate_delegates_valid_target() {
        let editor = RecordingEditor::new();
        let target = NavTarget {
            path: "/a.cpp".to_string(),
            line: 5,
        };

        navigate(&target, &editor).await.unwrap();
        assert_eq!(
            *editor.opened.lock().unwrap(),
            vec![(PathBuf::from("/a.cpp"), 5)]
        );
    }

    #[tokio::test]
    async fn test_navigate_rejects_line_zero_before_delegation() {
        let editor = RecordingEditor::new();
        let target = NavTarget {
            path: "/a.cpp".to_string(),
            line: 0,
        };

        let err = navigate(&target, &editor).await.unwrap_err();
        assert!(matches!(err, NavError::InvalidLocation));
        assert!(editor.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_navigate_surfaces_editor_failure() {
        let target = NavTarget {
            path: "/a.cpp".to_string(),
            line: 1,
        };

        let err = navigate(&target, &FailingEditor).await.unwrap_err();
        match err {
            NavError::Editor(msg) => assert_eq!(msg, "document is gone"),
            other => panic!("expected editor error, got {:?}", other),
        }
    }
}
