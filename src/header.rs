//! Optional `AP32` container header framing
//!
//! Packed buffers may carry a thin container around the raw stream: a 4-byte
//! magic tag followed by five little-endian u32 fields describing where the
//! packed data sits and what sizes and CRC32 checksums to expect. Buffers
//! without the magic are raw streams and carry no validation data.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};

/// Magic tag at offset 0 of a framed buffer.
pub const MAGIC: [u8; 4] = *b"AP32";

/// Bytes occupied by the magic plus the five header fields.
const FIXED_HEADER_LEN: usize = 24;

/// The `AP32` container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApHeader {
    /// Offset of the packed data from the start of the buffer.
    pub header_size: u32,
    /// Size of the packed stream in bytes.
    pub packed_size: u32,
    /// CRC32 of the packed stream.
    pub packed_crc32: u32,
    /// Size of the decompressed data in bytes.
    pub orig_size: u32,
    /// CRC32 of the decompressed data.
    pub orig_crc32: u32,
}

impl ApHeader {
    /// Detect and parse a container header.
    ///
    /// Returns `None` for raw streams: no magic tag, or a buffer too short
    /// to hold the fixed header fields.
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.len() < FIXED_HEADER_LEN || !data.starts_with(&MAGIC) {
            return None;
        }
        let mut cursor = Cursor::new(&data[MAGIC.len()..FIXED_HEADER_LEN]);
        // Reads cannot fail, the length is checked above
        Some(Self {
            header_size: cursor.read_u32::<LittleEndian>().ok()?,
            packed_size: cursor.read_u32::<LittleEndian>().ok()?,
            packed_crc32: cursor.read_u32::<LittleEndian>().ok()?,
            orig_size: cursor.read_u32::<LittleEndian>().ok()?,
            orig_crc32: cursor.read_u32::<LittleEndian>().ok()?,
        })
    }

    /// The packed stream slice `data[header_size..][..packed_size]`.
    ///
    /// Fails with [`Error::PackedSizeMismatch`] if the buffer does not hold
    /// as many bytes as the header declares.
    pub fn packed_slice<'a>(&self, data: &'a [u8]) -> Result<&'a [u8]> {
        let start = self.header_size as usize;
        start
            .checked_add(self.packed_size as usize)
            .and_then(|end| data.get(start..end))
            .ok_or(Error::PackedSizeMismatch {
                expected: self.packed_size,
                actual: data.len().saturating_sub(start),
            })
    }

    /// The packed stream slice with both bounds clamped to the buffer, for
    /// best-effort decoding of short or corrupt containers.
    pub fn packed_slice_lenient<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        let start = (self.header_size as usize).min(data.len());
        let end = start
            .saturating_add(self.packed_size as usize)
            .min(data.len());
        &data[start..end]
    }

    /// Verify the packed stream against the declared checksum.
    pub fn verify_packed(&self, packed: &[u8]) -> Result<()> {
        let actual = crc32(packed);
        if actual != self.packed_crc32 {
            return Err(Error::PackedChecksumMismatch {
                expected: self.packed_crc32,
                actual,
            });
        }
        Ok(())
    }

    /// Verify decompressed data against the declared size and checksum.
    pub fn verify_unpacked(&self, unpacked: &[u8]) -> Result<()> {
        if unpacked.len() != self.orig_size as usize {
            return Err(Error::UnpackedSizeMismatch {
                expected: self.orig_size,
                actual: unpacked.len(),
            });
        }
        let actual = crc32(unpacked);
        if actual != self.orig_crc32 {
            return Err(Error::UnpackedChecksumMismatch {
                expected: self.orig_crc32,
                actual,
            });
        }
        Ok(())
    }
}

/// CRC32 (standard polynomial) over raw bytes.
pub(crate) fn crc32(data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    hasher.finalize()
}
