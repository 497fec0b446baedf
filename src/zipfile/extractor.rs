use flate2::Crc;
use flate2::read::DeflateDecoder;
use std::io::Read;

use crate::io::ReadAt;
use anyhow::{Result, bail};

use super::parser::ZipParser;
use super::structures::{CompressionMethod, EntryRecord};

/// Reads entry contents out of a ZIP archive.
pub struct ZipExtractor<R: ReadAt> {
    parser: ZipParser<R>,
}

impl<R: ReadAt> ZipExtractor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            parser: ZipParser::new(reader),
        }
    }

    /// List all entries in the archive
    pub fn entries(&self) -> Result<Vec<EntryRecord>> {
        self.parser.entries()
    }

    /// Decompress one entry into memory and verify its CRC-32.
    pub fn extract_to_memory(&self, entry: &EntryRecord) -> Result<Vec<u8>> {
        let data_offset = self.parser.data_offset(entry)?;
        let end = data_offset.saturating_add(entry.compressed_size);
        if end > self.parser.reader().size() {
            bail!("Data of {} runs past the end of the archive", entry.name);
        }

        let mut raw = vec![0u8; entry.compressed_size as usize];
        self.parser.reader().read_exact_at(data_offset, &mut raw)?;

        let data = match entry.compression_method {
            CompressionMethod::Stored => raw,
            CompressionMethod::Deflate => {
                // The declared size is only a hint; the take() guards against lying headers.
                let mut out = Vec::with_capacity(entry.uncompressed_size.min(1 << 24) as usize);
                DeflateDecoder::new(raw.as_slice())
                    .take(entry.uncompressed_size)
                    .read_to_end(&mut out)?;
                out
            }
            CompressionMethod::Unknown(method) => {
                bail!(
                    "Unsupported compression method {} for {}",
                    method,
                    entry.name
                );
            }
        };

        if data.len() as u64 != entry.uncompressed_size {
            bail!(
                "Size mismatch for {}: expected {} bytes, got {}",
                entry.name,
                entry.uncompressed_size,
                data.len()
            );
        }

        let mut crc = Crc::new();
        crc.update(&data);
        if crc.sum() != entry.crc32 {
            bail!(
                "CRC mismatch for {}: expected {:08x}, got {:08x}",
                entry.name,
                entry.crc32,
                crc.sum()
            );
        }

        Ok(data)
    }
}
