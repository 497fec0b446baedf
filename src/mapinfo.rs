//! Parser for Xonotic `.mapinfo` files.
//!
//! The format is line oriented: `//` starts a comment, every other
//! non-empty line is a `KEY value...` pair. Only four keys matter here;
//! everything else in the file is ignored, as are lines without a value.

use std::path::Path;

use log::debug;

use crate::error::ArchiveError;
use crate::package;

/// Metadata of one map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapInfoRecord {
    pub name: String,
    pub author: String,
    pub description: String,
    /// In order of appearance, duplicates kept
    pub gametypes: Vec<String>,
}

impl MapInfoRecord {
    /// A record with only the map name filled in.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Parse mapinfo text. Unrecognised or malformed lines are skipped.
pub fn parse(raw: &str) -> MapInfoRecord {
    let mut record = MapInfoRecord::default();
    parse_into(&mut record, raw);
    record
}

fn parse_into(record: &mut MapInfoRecord, raw: &str) {
    for line in raw.split(['\n', '\r']) {
        let line = match line.split_once("//") {
            Some((content, _comment)) => content,
            None => line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once(char::is_whitespace) else {
            continue;
        };
        let value = value.trim_start().to_string();

        match key.to_ascii_lowercase().as_str() {
            "title" => record.name = value,
            "author" => record.author = value,
            "description" => record.description = value,
            "gametype" => record.gametypes.push(value),
            _ => {}
        }
    }
}

/// Entry path of a map's metadata inside its package
pub fn entry_name(map_name: &str) -> String {
    format!("maps/{}.mapinfo", map_name)
}

/// Look up the metadata of `map_name` in `folder`.
///
/// The package defaults to `<map_name>.pk3`. A missing package, a missing
/// entry or an unreadable package all yield a record carrying just the
/// map name.
pub fn lookup(folder: &Path, map_name: &str, pk3: Option<&str>) -> MapInfoRecord {
    let mut record = MapInfoRecord::named(map_name);

    let package_name = match pk3 {
        Some(name) => name.to_string(),
        None => format!("{}{}", map_name, package::PACKAGE_SUFFIX),
    };
    let path = folder.join(package_name);

    match package::read_entry(&path, &entry_name(map_name)) {
        Ok(bytes) => parse_into(&mut record, &String::from_utf8_lossy(&bytes)),
        Err(ArchiveError::NotFound(_)) | Err(ArchiveError::EntryNotFound { .. }) => {}
        Err(e) => debug!("No mapinfo for {}: {}", map_name, e),
    }

    record
}
