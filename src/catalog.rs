//! Queries a site generator runs against the custom package directory.

use std::path::{Path, PathBuf};

use log::warn;

use crate::error::{ArchiveError, ArchiveResult};
use crate::mapinfo::{self, MapInfoRecord};
use crate::package;

/// The (optional) directory of custom packages.
///
/// Without a directory every query answers with an empty result.
#[derive(Debug, Clone, Default)]
pub struct PackageCatalog {
    folder: Option<PathBuf>,
}

impl PackageCatalog {
    pub fn new(folder: Option<PathBuf>) -> Self {
        Self { folder }
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    /// File names of the available packages, sorted.
    pub fn packages(&self) -> Vec<String> {
        let Some(folder) = &self.folder else {
            return Vec::new();
        };
        package::list_packages(folder).unwrap_or_else(|e| {
            warn!("Cannot list packages in {}: {}", folder.display(), e);
            Vec::new()
        })
    }

    /// Entry names of one package; empty when the package does not exist.
    pub fn content(&self, pk3: &str) -> ArchiveResult<Vec<String>> {
        let Some(folder) = &self.folder else {
            return Ok(Vec::new());
        };
        match package::list_entries(&folder.join(pk3)) {
            Err(ArchiveError::NotFound(_)) => Ok(Vec::new()),
            other => other,
        }
    }

    /// Metadata of a map, see [`mapinfo::lookup`].
    pub fn mapinfo(&self, map_name: &str, pk3: Option<&str>) -> MapInfoRecord {
        match &self.folder {
            Some(folder) => mapinfo::lookup(folder, map_name, pk3),
            None => MapInfoRecord::named(map_name),
        }
    }
}
