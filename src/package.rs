//! Package (pk3) queries.
//!
//! The free functions reopen the archive on every call. Packages hold at
//! most a few hundred entries, so nothing is cached between calls; a scan
//! that needs several entries keeps one [`Package`] open instead.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{ArchiveError, ArchiveResult};
use crate::io::LocalFileReader;
use crate::zipfile::{EntryRecord, ZipExtractor};

/// File name suffix of a package
pub const PACKAGE_SUFFIX: &str = ".pk3";

/// An opened package with its central directory already read.
pub struct Package {
    path: PathBuf,
    extractor: ZipExtractor<LocalFileReader>,
    entries: Vec<EntryRecord>,
}

impl Package {
    pub fn open(path: &Path) -> ArchiveResult<Self> {
        if !path.is_file() {
            return Err(ArchiveError::NotFound(path.to_path_buf()));
        }
        let reader = LocalFileReader::new(path).map_err(|e| {
            debug!("Cannot open {}: {:#}", path.display(), e);
            ArchiveError::NotFound(path.to_path_buf())
        })?;
        let extractor = ZipExtractor::new(reader);
        let entries = extractor.entries().map_err(|e| corrupt(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            extractor,
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entry names in archive order
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn read(&self, entry_name: &str) -> ArchiveResult<Vec<u8>> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.name == entry_name)
            .ok_or_else(|| ArchiveError::EntryNotFound {
                path: self.path.clone(),
                entry: entry_name.to_string(),
            })?;
        self.extractor
            .extract_to_memory(entry)
            .map_err(|e| corrupt(&self.path, e))
    }
}

fn corrupt(path: &Path, err: anyhow::Error) -> ArchiveError {
    ArchiveError::CorruptArchive {
        path: path.to_path_buf(),
        reason: format!("{:#}", err),
    }
}

/// Names of all entries inside a package, in archive order.
pub fn list_entries(path: &Path) -> ArchiveResult<Vec<String>> {
    let package = Package::open(path)?;
    Ok(package.entry_names().map(str::to_string).collect())
}

/// Raw bytes of one named entry.
pub fn read_entry(path: &Path, entry_name: &str) -> ArchiveResult<Vec<u8>> {
    Package::open(path)?.read(entry_name)
}

/// File names of the packages in `folder`, sorted.
pub fn list_packages(folder: &Path) -> io::Result<Vec<String>> {
    let mut packages = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(PACKAGE_SUFFIX) {
            packages.push(name);
        }
    }
    packages.sort();
    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_pk3(dir: &Path, name: &str, files: &[(&str, &[u8])]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut writer = zip::ZipWriter::new(fs::File::create(&path).unwrap());
        for (entry, content) in files {
            writer
                .start_file(entry.to_string(), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn lists_and_reads_entries() {
        let dir = TempDir::new().unwrap();
        let pk3 = write_pk3(
            dir.path(),
            "afterslime.pk3",
            &[
                ("maps/afterslime.bsp", b"IBSP"),
                ("maps/afterslime.mapinfo", b"title After Slime"),
            ],
        );

        assert_eq!(
            list_entries(&pk3).unwrap(),
            ["maps/afterslime.bsp", "maps/afterslime.mapinfo"]
        );
        assert_eq!(
            read_entry(&pk3, "maps/afterslime.mapinfo").unwrap(),
            b"title After Slime"
        );
    }

    #[test]
    fn missing_package_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = list_entries(&dir.path().join("nope.pk3")).unwrap_err();
        assert!(matches!(err, ArchiveError::NotFound(_)));

        // A directory is not a readable archive either.
        let err = list_entries(dir.path()).unwrap_err();
        assert!(matches!(err, ArchiveError::NotFound(_)));
    }

    #[test]
    fn garbage_package_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pk3");
        fs::write(&path, b"this is not a zip file at all").unwrap();

        assert!(matches!(
            list_entries(&path).unwrap_err(),
            ArchiveError::CorruptArchive { .. }
        ));
        assert!(matches!(
            read_entry(&path, "maps/x.jpg").unwrap_err(),
            ArchiveError::CorruptArchive { .. }
        ));
    }

    #[test]
    fn absent_entry_is_entry_not_found() {
        let dir = TempDir::new().unwrap();
        let pk3 = write_pk3(dir.path(), "a.pk3", &[("maps/a.bsp", b"IBSP")]);
        let err = read_entry(&pk3, "maps/a.mapinfo").unwrap_err();
        assert!(matches!(err, ArchiveError::EntryNotFound { entry, .. } if entry == "maps/a.mapinfo"));
    }

    #[test]
    fn package_handle_reads_several_entries() {
        let dir = TempDir::new().unwrap();
        let pk3 = write_pk3(
            dir.path(),
            "a.pk3",
            &[("maps/a.jpg", b"one"), ("maps/a.bsp", b"two")],
        );

        let package = Package::open(&pk3).unwrap();
        assert_eq!(package.path(), pk3.as_path());
        assert_eq!(package.entry_names().count(), 2);
        assert_eq!(package.read("maps/a.bsp").unwrap(), b"two");
        assert_eq!(package.read("maps/a.jpg").unwrap(), b"one");
    }

    #[test]
    fn lists_only_pk3_files_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("zeta.pk3"), b"").unwrap();
        fs::write(dir.path().join("alpha.pk3"), b"").unwrap();
        fs::write(dir.path().join("readme.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("folder.pk3")).unwrap();

        assert_eq!(list_packages(dir.path()).unwrap(), ["alpha.pk3", "zeta.pk3"]);
    }
}
