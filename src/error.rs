//! Error types shared by the package, mapinfo and mapshot modules.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the package (archive) queries.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The path does not reference an existing, readable archive
    #[error("Package not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The container could not be parsed or an entry could not be decoded
    #[error("Corrupt package {}: {reason}", path.display())]
    CorruptArchive { path: PathBuf, reason: String },

    #[error("No entry {entry} in package {}", path.display())]
    EntryNotFound { path: PathBuf, entry: String },
}

pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Fatal failures of a synchronization run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Zero or several full map archives where exactly one was expected
    #[error(
        "Expected exactly one full map archive in {}, found {}: [{}]",
        data_dir.display(),
        matches.len(),
        matches.join(", ")
    )]
    AmbiguousInstallation {
        data_dir: PathBuf,
        matches: Vec<String>,
    },

    #[error("Cannot prepare output directory {}: {source}", path.display())]
    OutputDir { path: PathBuf, source: io::Error },

    #[error("Cannot list {}: {source}", path.display())]
    Listing { path: PathBuf, source: io::Error },
}

pub type SyncResult<T> = Result<T, SyncError>;

/// Failure to turn one source image into a mapshot. Never fatal for a run.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("cannot read source image: {0}")]
    Read(#[from] ArchiveError),

    #[error("cannot read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("cannot decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("cannot encode JPEG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}
