use std::path::PathBuf;

/// Options of a mapshot synchronization run.
///
/// Built once by the caller and passed to [`synchronize`](crate::synchronize).
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    /// Directory receiving the normalized `.jpg` mapshots
    pub output_dir: PathBuf,
    /// Root of a full game installation, scanned before any package
    pub install_root: Option<PathBuf>,
    /// Directory holding custom `.pk3` packages
    pub package_dir: Option<PathBuf>,
    /// Master switch; when off a run does nothing
    pub extract_mapshots: bool,
}

impl SyncConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            extract_mapshots: true,
            ..Self::default()
        }
    }

    pub fn with_install_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.install_root = Some(root.into());
        self
    }

    pub fn with_package_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.package_dir = Some(dir.into());
        self
    }
}
