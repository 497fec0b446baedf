//! Where mapshots come from, and which files inside a source are mapshots.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::package;

/// Data directory below an installation root
pub const DATA_DIR: &str = "data";
/// Unpacked map set inside the data directory (development checkouts)
pub const UNPACKED_MAPS_DIR: &str = "xonotic-maps.pk3dir";
/// Name of the consolidated map archive of a release build
pub const MAPS_ARCHIVE_PATTERN: &str = "xonotic-*-maps.pk3";
/// Directory holding map files, both in packages and unpacked
pub const MAPS_DIR: &str = "maps";
/// Recognised image extensions, matched case-sensitively
pub const IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "tga"];
/// Extension of every mapshot written
pub const MAPSHOT_EXTENSION: &str = "jpg";

/// One place images are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A directory whose top-level image files are mapshots
    Directory(PathBuf),
    /// A package whose `maps/<image>` entries are mapshots
    Package(PathBuf),
}

impl Source {
    pub fn path(&self) -> &Path {
        match self {
            Source::Directory(path) | Source::Package(path) => path,
        }
    }
}

/// An image file recognised as a mapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapshotImage {
    /// The matched entry of [`IMAGE_EXTENSIONS`], used as the decode hint
    pub extension: String,
    /// File name in the output directory
    pub output: String,
}

/// Recognise an image by the suffix of its file name.
///
/// The output name drops everything from the last `.` on, or nothing when
/// the name has no `.`: `shotjpg` becomes `shotjpg.jpg`.
pub fn mapshot_image(file_name: &str) -> Option<MapshotImage> {
    let extension = IMAGE_EXTENSIONS
        .iter()
        .find(|suffix| file_name.ends_with(*suffix))?;
    let stem = file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem);
    Some(MapshotImage {
        extension: extension.to_string(),
        output: format!("{}.{}", stem, MAPSHOT_EXTENSION),
    })
}

/// Recognise a package entry: exactly `maps/<image>`, nothing deeper or shallower.
pub fn select_entry(entry_name: &str) -> Option<MapshotImage> {
    let segments: Vec<&str> = entry_name.split('/').collect();
    if segments.len() != 2 || segments[0] != MAPS_DIR {
        return None;
    }
    mapshot_image(segments[1])
}

/// All sources of a run in processing order: the installation first,
/// then the custom packages sorted by name.
///
/// Nothing is written here, so a failure leaves the output untouched.
pub fn plan_sources(config: &SyncConfig) -> SyncResult<Vec<Source>> {
    let mut sources = Vec::new();

    if let Some(root) = &config.install_root {
        sources.push(detect_installation(root)?);
    }

    if let Some(dir) = &config.package_dir {
        let packages = package::list_packages(dir).map_err(|source| SyncError::Listing {
            path: dir.clone(),
            source,
        })?;
        sources.extend(
            packages
                .into_iter()
                .map(|name| Source::Package(dir.join(name))),
        );
    }

    Ok(sources)
}

/// Pick the map source of a game installation.
///
/// An unpacked maps directory wins; otherwise exactly one archive must
/// match [`MAPS_ARCHIVE_PATTERN`] in the data directory.
pub fn detect_installation(root: &Path) -> SyncResult<Source> {
    let data_dir = root.join(DATA_DIR);

    let unpacked = data_dir.join(UNPACKED_MAPS_DIR).join(MAPS_DIR);
    if unpacked.is_dir() {
        debug!("Using unpacked maps in {}", unpacked.display());
        return Ok(Source::Directory(unpacked));
    }

    let mut matches = match archive_candidates(&data_dir) {
        Ok(matches) => matches,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(source) => {
            return Err(SyncError::Listing {
                path: data_dir,
                source,
            });
        }
    };

    if matches.len() != 1 {
        return Err(SyncError::AmbiguousInstallation { data_dir, matches });
    }
    let archive = data_dir.join(matches.remove(0));
    debug!("Using map archive {}", archive.display());
    Ok(Source::Package(archive))
}

fn archive_candidates(data_dir: &Path) -> io::Result<Vec<String>> {
    let mut matches = Vec::new();
    for entry in fs::read_dir(data_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if glob_match(MAPS_ARCHIVE_PATTERN, &name) {
            matches.push(name);
        }
    }
    matches.sort();
    Ok(matches)
}

/// Wildcard match where `*` is any run of characters and `?` exactly one.
fn glob_match(pattern: &str, text: &str) -> bool {
    fn do_match(pattern: &[char], text: &[char]) -> bool {
        match (pattern.first(), text.first()) {
            (None, None) => true,
            (Some('*'), _) => {
                do_match(&pattern[1..], text) || (!text.is_empty() && do_match(pattern, &text[1..]))
            }
            (Some('?'), Some(_)) => do_match(&pattern[1..], &text[1..]),
            (Some(p), Some(t)) if p == t => do_match(&pattern[1..], &text[1..]),
            _ => false,
        }
    }

    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    do_match(&pattern, &text)
}
