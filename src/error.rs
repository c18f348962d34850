//! Error types for `apdepack`

use thiserror::Error;

/// The error type for `apdepack` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Stream Errors ====================
    /// The compressed stream ended before an instruction completed.
    #[error("input truncated inside the compressed stream")]
    TruncatedInput,

    /// A back-reference points outside the output produced so far.
    #[error("invalid back-reference: offset {offset} with {produced} bytes produced")]
    InvalidBackReference {
        /// The offset the instruction asked for.
        offset: usize,
        /// Number of output bytes available at that point.
        produced: usize,
    },

    /// A gamma-coded value exceeded the supported range.
    #[error("gamma-coded value exceeds the supported range")]
    GammaOverflow,

    // ==================== Container Header Errors ====================
    /// The buffer is shorter than the packed size declared in the header.
    #[error("packed data size is incorrect: header declares {expected} bytes, {actual} available")]
    PackedSizeMismatch {
        /// The packed size declared in the header.
        expected: u32,
        /// Bytes actually available after the header.
        actual: usize,
    },

    /// The packed data checksum does not match the header.
    #[error("packed data checksum is incorrect: expected {expected:#010x}, got {actual:#010x}")]
    PackedChecksumMismatch {
        /// The CRC32 declared in the header.
        expected: u32,
        /// The CRC32 of the actual packed data.
        actual: u32,
    },

    /// The decompressed data size does not match the header.
    #[error("unpacked data size is incorrect: header declares {expected} bytes, got {actual}")]
    UnpackedSizeMismatch {
        /// The original size declared in the header.
        expected: u32,
        /// The size actually produced.
        actual: usize,
    },

    /// The decompressed data checksum does not match the header.
    #[error("unpacked data checksum is incorrect: expected {expected:#010x}, got {actual:#010x}")]
    UnpackedChecksumMismatch {
        /// The CRC32 declared in the header.
        expected: u32,
        /// The CRC32 of the actual decompressed data.
        actual: u32,
    },
}

/// A specialized Result type for `apdepack` operations.
pub type Result<T> = std::result::Result<T, Error>;
