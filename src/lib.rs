//! # mapsync
//!
//! Extracts map preview images ("mapshots") and map metadata ("mapinfo")
//! from Xonotic packages for a static site build.
//!
//! The library reads `.pk3` packages (plain ZIP archives) with its own
//! small ZIP reader, parses `maps/<map>.mapinfo` files, and keeps a
//! directory of normalized JPEG mapshots in sync with the packages and
//! the game installation it is pointed at.
//!
//! ## Features
//!
//! - List packages in a directory and entries in a package
//! - Parse mapinfo metadata (title, author, description, gametypes)
//! - Convert `maps/*.{jpeg,jpg,png,tga}` into baseline JPEG mapshots
//! - Remove mapshots whose source is gone
//!
//! ## Example
//!
//! ```no_run
//! use mapsync::{PackageCatalog, SyncConfig, synchronize};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = SyncConfig::new("assets/images/mapshots")
//!         .with_install_root("/opt/xonotic")
//!         .with_package_dir("packages");
//!     let report = synchronize(&config)?;
//!     println!("{} mapshots written", report.written.len());
//!
//!     let catalog = PackageCatalog::new(config.package_dir.clone());
//!     for pk3 in catalog.packages() {
//!         println!("{}", pk3);
//!     }
//!     println!("{:?}", catalog.mapinfo("afterslime", None));
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod mapinfo;
pub mod mapshot;
pub mod package;
pub mod zipfile;

pub use catalog::PackageCatalog;
pub use cli::Cli;
pub use config::SyncConfig;
pub use error::{ArchiveError, NormalizeError, SyncError};
pub use io::{LocalFileReader, ReadAt};
pub use mapinfo::MapInfoRecord;
pub use mapshot::{SyncReport, synchronize};
pub use zipfile::{EntryRecord, ZipExtractor};
