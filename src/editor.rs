use async_trait::async_trait;
use std::path::Path;
use tracing::info;

/// Boundary to the external editing surface. The core produces validated
/// `(path, line)` targets; opening documents, moving the caret, and showing
/// messages belong to the surface behind this trait.
#[async_trait]
pub trait EditorSurface: Send + Sync {
    /// Open `path` and place the caret at the start of the 1-based `line`,
    /// scrolled into view. Failure comes back as an opaque error string.
    async fn open_at(&self, path: &Path, line: u32) -> Result<(), String>;

    /// Display a message to the user. Fire-and-forget.
    fn notify(&self, message: &str);
}

/// Editing-surface shim for CLI use: prints the target in `path:line` form
/// so a wrapping editor integration (or the user) can act on it.
pub struct CliEditor;

#[async_trait]
impl EditorSurface for CliEditor {
    async fn open_at(&self, path: &Path, line: u32) -> Result<(), String> {
        info!("Navigation requested to {}:{}", path.display(), line);
        println!("{}:{}", path.display(), line);
        Ok(())
    }

    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}
