//! Store-only ZIP writer
//!
//! Layout of the produced archive:
//!
//! ```text
//! [local header 1][name 1][data 1] ... [local header n][name n][data n]
//! [central record 1][name 1] ... [central record n][name n]
//! [end of central directory]
//! ```
//!
//! Every entry shares one fixed DOS timestamp so identical inputs produce
//! identical bytes.

use crate::crc::crc32;
use crate::error::{ZipError, ZipResult};

const LOCAL_HEADER_SIGNATURE: u32 = 0x0403_4b50;
const CENTRAL_HEADER_SIGNATURE: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIR_SIGNATURE: u32 = 0x0605_4b50;

const LOCAL_HEADER_LEN: usize = 30;
const CENTRAL_HEADER_LEN: usize = 46;
const END_OF_CENTRAL_DIR_LEN: usize = 22;

/// ZIP 2.0: the minimum for plain stored entries with directories
const VERSION: u16 = 20;
const METHOD_STORED: u16 = 0;

/// 1980-01-01 00:00:00, the DOS epoch
const DOS_TIME: u16 = 0x0000;
const DOS_DATE: u16 = (1 << 5) | 1;

const MAX_ENTRIES: usize = u16::MAX as usize;

/// A named file to place in an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipEntry {
    /// Archive-relative path, forward-slash separated
    pub name: String,
    /// Raw entry bytes
    pub data: Vec<u8>,
}

impl ZipEntry {
    /// Create an entry
    pub fn new<N: Into<String>, D: Into<Vec<u8>>>(name: N, data: D) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

#[derive(Debug)]
struct CentralRecord {
    name: String,
    crc: u32,
    size: u32,
    offset: u32,
}

/// Accumulates stored entries and serializes the archive once
///
/// ```rust
/// use snapsheet_zip::{ZipEntry, ZipWriter};
///
/// let mut writer = ZipWriter::new();
/// writer.add(&ZipEntry::new("hello.txt", "hi")).unwrap();
/// assert_eq!(writer.len(), 1);
/// let bytes = writer.finish().unwrap();
/// assert!(bytes.len() > 22);
/// ```
#[derive(Debug, Default)]
pub struct ZipWriter {
    buffer: Vec<u8>,
    central: Vec<CentralRecord>,
}

impl ZipWriter {
    /// Create an empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries added so far
    pub fn len(&self) -> usize {
        self.central.len()
    }

    /// Check if no entries were added
    pub fn is_empty(&self) -> bool {
        self.central.is_empty()
    }

    /// Append a stored entry
    ///
    /// The entry is only read; its bytes are copied into the archive.
    pub fn add(&mut self, entry: &ZipEntry) -> ZipResult<()> {
        validate_name(&entry.name)?;

        if self.central.len() >= MAX_ENTRIES {
            return Err(ZipError::TooManyEntries(self.central.len() + 1));
        }

        let size = u32::try_from(entry.data.len()).map_err(|_| ZipError::EntryTooLarge {
            name: entry.name.clone(),
            size: entry.data.len() as u64,
        })?;
        let offset = u32::try_from(self.buffer.len())
            .map_err(|_| ZipError::ArchiveTooLarge(self.buffer.len() as u64))?;
        let name_len = name_len(&entry.name)?;
        let crc = crc32(&entry.data);

        self.buffer
            .reserve(LOCAL_HEADER_LEN + entry.name.len() + entry.data.len());
        put_u32(&mut self.buffer, LOCAL_HEADER_SIGNATURE);
        put_u16(&mut self.buffer, VERSION);
        put_u16(&mut self.buffer, 0); // flags
        put_u16(&mut self.buffer, METHOD_STORED);
        put_u16(&mut self.buffer, DOS_TIME);
        put_u16(&mut self.buffer, DOS_DATE);
        put_u32(&mut self.buffer, crc);
        put_u32(&mut self.buffer, size); // compressed
        put_u32(&mut self.buffer, size); // uncompressed
        put_u16(&mut self.buffer, name_len);
        put_u16(&mut self.buffer, 0); // extra field length
        self.buffer.extend_from_slice(entry.name.as_bytes());
        self.buffer.extend_from_slice(&entry.data);

        log::trace!("zip: stored '{}' ({} bytes, crc {:08x})", entry.name, size, crc);

        self.central.push(CentralRecord {
            name: entry.name.clone(),
            crc,
            size,
            offset,
        });
        Ok(())
    }

    /// Write the central directory and return the archive bytes
    pub fn finish(self) -> ZipResult<Vec<u8>> {
        let Self {
            mut buffer,
            central,
        } = self;

        let directory_offset = u32::try_from(buffer.len())
            .map_err(|_| ZipError::ArchiveTooLarge(buffer.len() as u64))?;

        let directory_len: usize = central
            .iter()
            .map(|record| CENTRAL_HEADER_LEN + record.name.len())
            .sum();
        buffer.reserve(directory_len + END_OF_CENTRAL_DIR_LEN);

        for record in &central {
            put_u32(&mut buffer, CENTRAL_HEADER_SIGNATURE);
            put_u16(&mut buffer, VERSION); // version made by
            put_u16(&mut buffer, VERSION); // version needed
            put_u16(&mut buffer, 0); // flags
            put_u16(&mut buffer, METHOD_STORED);
            put_u16(&mut buffer, DOS_TIME);
            put_u16(&mut buffer, DOS_DATE);
            put_u32(&mut buffer, record.crc);
            put_u32(&mut buffer, record.size);
            put_u32(&mut buffer, record.size);
            put_u16(&mut buffer, name_len(&record.name)?);
            put_u16(&mut buffer, 0); // extra field length
            put_u16(&mut buffer, 0); // comment length
            put_u16(&mut buffer, 0); // disk number start
            put_u16(&mut buffer, 0); // internal attributes
            put_u32(&mut buffer, 0); // external attributes
            put_u32(&mut buffer, record.offset);
            buffer.extend_from_slice(record.name.as_bytes());
        }

        let directory_size = u32::try_from(directory_len)
            .map_err(|_| ZipError::ArchiveTooLarge(directory_len as u64))?;
        // Checked against MAX_ENTRIES in add()
        let count = central.len() as u16;

        put_u32(&mut buffer, END_OF_CENTRAL_DIR_SIGNATURE);
        put_u16(&mut buffer, 0); // this disk
        put_u16(&mut buffer, 0); // disk with central directory
        put_u16(&mut buffer, count); // entries on this disk
        put_u16(&mut buffer, count); // total entries
        put_u32(&mut buffer, directory_size);
        put_u32(&mut buffer, directory_offset);
        put_u16(&mut buffer, 0); // comment length

        log::debug!(
            "zip: finished archive with {} entries ({} bytes)",
            count,
            buffer.len()
        );
        Ok(buffer)
    }
}

/// Build a complete archive from a list of entries, in order
pub fn build_zip_archive<I>(entries: I) -> ZipResult<Vec<u8>>
where
    I: IntoIterator<Item = ZipEntry>,
{
    let mut writer = ZipWriter::new();
    for entry in entries {
        writer.add(&entry)?;
    }
    writer.finish()
}

fn validate_name(name: &str) -> ZipResult<()> {
    if name.is_empty() || name.starts_with('/') || name.contains('\\') {
        return Err(ZipError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn name_len(name: &str) -> ZipResult<u16> {
    u16::try_from(name.len()).map_err(|_| ZipError::NameTooLong(name.len()))
}

fn put_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}
