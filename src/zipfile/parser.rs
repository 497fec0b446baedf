//! Low-level ZIP archive parser.
//!
//! ZIP files are read from the end: the End of Central Directory record
//! points at the Central Directory, which lists every entry together with
//! the offset of its Local File Header. Listing a package therefore never
//! touches the compressed data.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use crate::io::ReadAt;
use anyhow::{Context, Result, bail};

use super::structures::*;

/// Maximum ZIP comment size allowed by the format (65535 bytes).
const MAX_COMMENT_SIZE: u64 = u16::MAX as u64;

/// Reads the central directory of a ZIP archive from any [`ReadAt`] source.
pub struct ZipParser<R: ReadAt> {
    reader: R,
    size: u64,
}

impl<R: ReadAt> ZipParser<R> {
    pub fn new(reader: R) -> Self {
        let size = reader.size();
        Self { reader, size }
    }

    /// Locate the End of Central Directory record and its offset.
    ///
    /// Most packages carry no archive comment, so the record sits exactly
    /// at the tail; otherwise the last 64 KiB are scanned backwards.
    pub fn find_eocd(&self) -> Result<(EndOfCentralDirectory, u64)> {
        let eocd_size = EndOfCentralDirectory::SIZE as u64;
        if self.size < eocd_size {
            bail!("Not a valid ZIP file: {} bytes is too short", self.size);
        }

        let mut tail = [0u8; EndOfCentralDirectory::SIZE];
        let tail_offset = self.size - eocd_size;
        self.reader.read_exact_at(tail_offset, &mut tail)?;
        if &tail[0..4] == EndOfCentralDirectory::SIGNATURE && tail[20..22] == [0, 0] {
            return Ok((EndOfCentralDirectory::from_bytes(&tail)?, tail_offset));
        }

        let search_size = (MAX_COMMENT_SIZE + eocd_size).min(self.size);
        let search_start = self.size - search_size;
        let mut buf = vec![0u8; search_size as usize];
        self.reader.read_exact_at(search_start, &mut buf)?;

        let last = buf.len() - EndOfCentralDirectory::SIZE;
        for i in (0..=last).rev() {
            if &buf[i..i + 4] != EndOfCentralDirectory::SIGNATURE {
                continue;
            }
            // A genuine record's comment runs exactly to the end of the file.
            let comment_len = u16::from_le_bytes([buf[i + 20], buf[i + 21]]) as usize;
            if comment_len == buf.len() - i - EndOfCentralDirectory::SIZE {
                let eocd = EndOfCentralDirectory::from_bytes(&buf[i..])?;
                return Ok((eocd, search_start + i as u64));
            }
        }

        bail!("Not a valid ZIP file: no End of Central Directory record")
    }

    fn read_zip64_eocd(&self, eocd_offset: u64) -> Result<Zip64EndOfCentralDirectory> {
        let locator_offset = eocd_offset
            .checked_sub(Zip64Locator::SIZE as u64)
            .context("ZIP64 locator would start before the archive")?;
        let mut locator_buf = [0u8; Zip64Locator::SIZE];
        self.reader.read_exact_at(locator_offset, &mut locator_buf)?;
        let locator = Zip64Locator::from_bytes(&locator_buf)?;

        let mut eocd64_buf = [0u8; Zip64EndOfCentralDirectory::MIN_SIZE];
        self.reader
            .read_exact_at(locator.eocd64_offset, &mut eocd64_buf)?;
        Zip64EndOfCentralDirectory::from_bytes(&eocd64_buf)
    }

    /// Read every Central Directory entry, in archive order.
    pub fn entries(&self) -> Result<Vec<EntryRecord>> {
        let (eocd, eocd_offset) = self.find_eocd()?;

        let (cd_offset, cd_size, total_entries) = if eocd.is_zip64() {
            let eocd64 = self.read_zip64_eocd(eocd_offset)?;
            (eocd64.cd_offset, eocd64.cd_size, eocd64.total_entries)
        } else {
            (
                eocd.cd_offset as u64,
                eocd.cd_size as u64,
                eocd.total_entries as u64,
            )
        };

        if cd_offset.saturating_add(cd_size) > self.size {
            bail!(
                "Central Directory ({} bytes at {}) runs past the end of the archive",
                cd_size,
                cd_offset
            );
        }

        let mut cd_data = vec![0u8; cd_size as usize];
        self.reader.read_exact_at(cd_offset, &mut cd_data)?;

        // Each header is at least 46 bytes, which bounds a bogus entry count.
        let capacity = total_entries.min(cd_size / 46) as usize;
        let mut entries = Vec::with_capacity(capacity);
        let mut cursor = Cursor::new(cd_data.as_slice());
        for index in 0..total_entries {
            let entry = parse_cdfh(&mut cursor)
                .with_context(|| format!("Central Directory entry {}", index))?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Offset of the first byte of an entry's (possibly compressed) data.
    ///
    /// The Local File Header repeats the name and may carry a different
    /// extra field than the Central Directory, so its lengths are re-read.
    pub fn data_offset(&self, entry: &EntryRecord) -> Result<u64> {
        let mut lfh = [0u8; LFH_SIZE];
        self.reader.read_exact_at(entry.lfh_offset, &mut lfh)?;
        if &lfh[0..4] != LFH_SIGNATURE {
            bail!("Invalid Local File Header for {}", entry.name);
        }

        let mut cursor = Cursor::new(&lfh[26..]);
        let file_name_length = cursor.read_u16::<LittleEndian>()? as u64;
        let extra_field_length = cursor.read_u16::<LittleEndian>()? as u64;

        Ok(entry.lfh_offset + LFH_SIZE as u64 + file_name_length + extra_field_length)
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }
}

fn parse_cdfh(cursor: &mut Cursor<&[u8]>) -> Result<EntryRecord> {
    let mut sig = [0u8; 4];
    cursor.read_exact(&mut sig)?;
    if sig != CDFH_SIGNATURE {
        bail!("Invalid Central Directory File Header");
    }

    // version made by, version needed, flags
    skip(cursor, 6);
    let compression_method = cursor.read_u16::<LittleEndian>()?;
    // modification time and date
    skip(cursor, 4);
    let crc32 = cursor.read_u32::<LittleEndian>()?;
    let mut compressed_size = cursor.read_u32::<LittleEndian>()? as u64;
    let mut uncompressed_size = cursor.read_u32::<LittleEndian>()? as u64;
    let file_name_length = cursor.read_u16::<LittleEndian>()?;
    let extra_field_length = cursor.read_u16::<LittleEndian>()?;
    let file_comment_length = cursor.read_u16::<LittleEndian>()?;
    // disk number start, internal and external attributes
    skip(cursor, 8);
    let mut lfh_offset = cursor.read_u32::<LittleEndian>()? as u64;

    let mut name_bytes = vec![0u8; file_name_length as usize];
    cursor.read_exact(&mut name_bytes)?;
    let name = String::from_utf8_lossy(&name_bytes).into_owned();

    let extra_end = cursor.position() + extra_field_length as u64;
    while cursor.position() + 4 <= extra_end {
        let header_id = cursor.read_u16::<LittleEndian>()?;
        let field_size = cursor.read_u16::<LittleEndian>()? as u64;
        let field_end = cursor.position() + field_size;

        if header_id == ZIP64_EXTRA_ID {
            // Values appear only for the header fields that are saturated, in this order.
            if uncompressed_size == u32::MAX as u64 && cursor.position() + 8 <= field_end {
                uncompressed_size = cursor.read_u64::<LittleEndian>()?;
            }
            if compressed_size == u32::MAX as u64 && cursor.position() + 8 <= field_end {
                compressed_size = cursor.read_u64::<LittleEndian>()?;
            }
            if lfh_offset == u32::MAX as u64 && cursor.position() + 8 <= field_end {
                lfh_offset = cursor.read_u64::<LittleEndian>()?;
            }
        }
        cursor.set_position(field_end);
    }
    cursor.set_position(extra_end + file_comment_length as u64);

    if cursor.position() > cursor.get_ref().len() as u64 {
        bail!("Central Directory header for {} is truncated", name);
    }

    Ok(EntryRecord {
        name,
        compression_method: compression_method.into(),
        compressed_size,
        uncompressed_size,
        crc32,
        lfh_offset,
    })
}

fn skip(cursor: &mut Cursor<&[u8]>, n: u64) {
    cursor.set_position(cursor.position() + n);
}
