//! The synchronization run.
//!
//! A run plans its sources, snapshots the output directory, scans every
//! source in order and finally deletes whatever no source reproduced.
//! Sources are processed strictly one after another: a later source must
//! see the claims and files of the earlier ones, that is what makes the
//! first writer of a name win.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::config::SyncConfig;
use crate::error::{NormalizeError, SyncError, SyncResult};
use crate::package::Package;

use super::normalize;
use super::source::{self, MapshotImage, Source};

/// What a run did, with every list sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Mapshots encoded and written during this run
    pub written: Vec<String>,
    /// Existing mapshots kept because a source still provides them
    pub retained: Vec<String>,
    /// Stale mapshots deleted
    pub removed: Vec<String>,
    /// Source images (`<source>:<entry>`) that could not be converted
    pub failed: Vec<String>,
}

/// Output file names present before the run that no source has claimed yet.
#[derive(Debug, Default)]
pub struct PendingCleanup {
    names: BTreeSet<String>,
}

impl PendingCleanup {
    /// Snapshot the regular files currently in `dir`.
    pub fn snapshot(dir: &Path) -> SyncResult<Self> {
        let listing_error = |source| SyncError::Listing {
            path: dir.to_path_buf(),
            source,
        };

        let mut names = BTreeSet::new();
        for entry in fs::read_dir(dir).map_err(listing_error)? {
            let entry = entry.map_err(listing_error)?;
            if entry.file_type().map_err(listing_error)?.is_file() {
                names.insert(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(Self { names })
    }

    /// Remove `name` from the set, returning whether it was there.
    pub fn claim(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_names(self) -> impl Iterator<Item = String> {
        self.names.into_iter()
    }
}

/// Bring the mapshot directory in line with the configured sources.
///
/// Only a misconfigured installation or an unusable output or package
/// directory fails the run; problems with single images or packages are
/// logged and recorded in the report.
pub fn synchronize(config: &SyncConfig) -> SyncResult<SyncReport> {
    if !config.extract_mapshots {
        debug!("Mapshot extraction disabled");
        return Ok(SyncReport::default());
    }

    let sources = source::plan_sources(config)?;

    let output_dir = config.output_dir.as_path();
    fs::create_dir_all(output_dir).map_err(|source| SyncError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let pending = PendingCleanup::snapshot(output_dir)?;
    debug!(
        "{} existing mapshots in {}",
        pending.len(),
        output_dir.display()
    );

    let mut run = SyncRun {
        output_dir,
        pending,
        report: SyncReport::default(),
    };
    for source in &sources {
        run.scan(source);
    }
    let report = run.finish();

    info!(
        "Mapshots: {} written, {} kept, {} removed, {} failed",
        report.written.len(),
        report.retained.len(),
        report.removed.len(),
        report.failed.len()
    );
    Ok(report)
}

struct SyncRun<'a> {
    output_dir: &'a Path,
    pending: PendingCleanup,
    report: SyncReport,
}

impl SyncRun<'_> {
    fn scan(&mut self, source: &Source) {
        info!("Scanning {}", source.path().display());
        match source {
            Source::Directory(dir) => self.scan_directory(dir),
            Source::Package(path) => self.scan_package(path),
        }
    }

    fn scan_directory(&mut self, dir: &Path) {
        let read_dir = match fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                warn!("Cannot list {}: {}", dir.display(), e);
                return;
            }
        };

        // Symlinks to image files count as images.
        let mut files = Vec::new();
        for entry in read_dir {
            match entry {
                Ok(entry) if entry.path().is_file() => files.push(entry.path()),
                Ok(_) => {}
                Err(e) => warn!("Cannot read an entry of {}: {}", dir.display(), e),
            }
        }
        files.sort();

        for path in files {
            let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().into_owned())
            else {
                continue;
            };
            let Some(image) = source::mapshot_image(&file_name) else {
                continue;
            };
            if !self.needs_write(&image) {
                continue;
            }
            let data = fs::read(&path).map_err(|source| NormalizeError::Io {
                path: path.clone(),
                source,
            });
            self.produce(&path.display().to_string(), &image, data);
        }
    }

    fn scan_package(&mut self, path: &Path) {
        let package = match Package::open(path) {
            Ok(package) => package,
            Err(e) => {
                warn!("Skipping package: {}", e);
                self.report.failed.push(path.display().to_string());
                return;
            }
        };

        for entry in package.entry_names() {
            let Some(image) = source::select_entry(entry) else {
                continue;
            };
            if !self.needs_write(&image) {
                continue;
            }
            let data = package.read(entry).map_err(NormalizeError::from);
            let origin = format!("{}:{}", package.path().display(), entry);
            self.produce(&origin, &image, data);
        }
    }

    /// Decide whether `image` still has to be written.
    ///
    /// A name left over from a previous run is claimed and kept as is; a
    /// name already written earlier in this run belongs to that source.
    fn needs_write(&mut self, image: &MapshotImage) -> bool {
        if self.pending.claim(&image.output) {
            debug!("Keeping existing {}", image.output);
            self.report.retained.push(image.output.clone());
            return false;
        }
        if self.output_dir.join(&image.output).is_file() {
            debug!("{} already written by an earlier source", image.output);
            return false;
        }
        true
    }

    fn produce(
        &mut self,
        origin: &str,
        image: &MapshotImage,
        data: Result<Vec<u8>, NormalizeError>,
    ) {
        let out_path = self.output_dir.join(&image.output);
        let result =
            data.and_then(|data| normalize::write_mapshot(&out_path, &data, &image.extension));
        match result {
            Ok(()) => {
                debug!("Wrote {} from {}", image.output, origin);
                self.report.written.push(image.output.clone());
            }
            Err(e) => {
                warn!("Error when extracting {}: {}", origin, e);
                self.report.failed.push(origin.to_string());
            }
        }
    }

    fn finish(self) -> SyncReport {
        let SyncRun {
            output_dir,
            pending,
            mut report,
        } = self;

        for name in pending.into_names() {
            match fs::remove_file(output_dir.join(&name)) {
                Ok(()) => {
                    debug!("Removed stale {}", name);
                    report.removed.push(name);
                }
                Err(e) => warn!("Cannot remove stale {}: {}", name, e),
            }
        }

        report.written.sort();
        report.retained.sort();
        report.removed.sort();
        report.failed.sort();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn snapshot_contains_files_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.jpg"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let mut pending = PendingCleanup::snapshot(dir.path()).unwrap();
        assert_eq!(pending.len(), 2);
        assert!(pending.claim("a.jpg"));
        assert!(!pending.claim("a.jpg"));
        assert!(!pending.claim("sub"));
        assert_eq!(pending.into_names().collect::<Vec<_>>(), ["notes.txt"]);
    }

    #[test]
    fn disabled_extraction_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("mapshots");
        let mut config = SyncConfig::new(&out);
        config.extract_mapshots = false;

        assert_eq!(synchronize(&config).unwrap(), SyncReport::default());
        assert!(!out.exists());
    }

    #[test]
    fn without_sources_every_output_is_stale() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("old.jpg"), b"old").unwrap();

        let report = synchronize(&SyncConfig::new(dir.path())).unwrap();
        assert_eq!(report.removed, ["old.jpg"]);
        assert!(!dir.path().join("old.jpg").exists());
    }
}
