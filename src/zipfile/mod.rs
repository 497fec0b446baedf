//! ZIP archive parsing and extraction.
//!
//! Xonotic packages (`.pk3`) are plain ZIP archives. The module is split
//! into three parts:
//!
//! - [`structures`]: the on-disk records (EOCD, ZIP64 records, entry metadata)
//! - [`parser`]: reads the Central Directory from any [`ReadAt`](crate::io::ReadAt) source
//! - [`extractor`]: decompresses individual entries into memory
//!
//! ## Supported Features
//!
//! - STORED and DEFLATE entries
//! - ZIP64 sizes and offsets
//! - CRC-32 verification of extracted data
//!
//! Encryption and multi-disk archives are not supported.

mod extractor;
mod parser;
mod structures;

pub use extractor::ZipExtractor;
pub use parser::ZipParser;
pub use structures::*;
