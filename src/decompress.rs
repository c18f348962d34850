//! Top-level decompression entry points
//!
//! These tie the container framing to the engine: the `AP32` header is
//! auto-detected, its slice bounds and checksums are enforced in the strict
//! functions and skipped entirely in the lenient one.

use crate::depack;
use crate::error::Result;
use crate::header::ApHeader;

/// Decompress `aPLib` data, with or without an `AP32` container header.
///
/// Strict mode: any truncation, invalid back-reference or (on the container
/// path) size/checksum mismatch fails the whole call; no partial output is
/// returned. When a header is present its `orig_size` pre-sizes the output.
///
/// # Errors
/// Returns an error if the stream is malformed or the container checks fail.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_inner(data, None)
}

/// Like [`decompress`], with a caller-provided output capacity hint for raw
/// streams whose decompressed size is known out-of-band.
///
/// # Errors
/// Returns an error if the stream is malformed or the container checks fail.
pub fn decompress_with_capacity(data: &[u8], capacity: usize) -> Result<Vec<u8>> {
    decompress_inner(data, Some(capacity))
}

fn decompress_inner(data: &[u8], capacity: Option<usize>) -> Result<Vec<u8>> {
    if let Some(header) = ApHeader::detect(data) {
        tracing::debug!(
            "AP32 container: {} packed -> {} unpacked bytes declared",
            header.packed_size,
            header.orig_size
        );
        let packed = header.packed_slice(data)?;
        header.verify_packed(packed)?;
        let output = depack::depack(packed, capacity.or(Some(header.orig_size as usize)))?;
        header.verify_unpacked(&output)?;
        Ok(output)
    } else {
        tracing::debug!("raw stream: {} bytes in", data.len());
        depack::depack(data, capacity)
    }
}

/// Best-effort decompression: decode errors end the stream early and the
/// output produced so far is returned; container size and checksum checks
/// are not performed at all. This never fails, so corruption can only be
/// detected by the caller — opt in deliberately.
pub fn decompress_lenient(data: &[u8]) -> Vec<u8> {
    if let Some(header) = ApHeader::detect(data) {
        depack::depack_lenient(header.packed_slice_lenient(data), None)
    } else {
        depack::depack_lenient(data, None)
    }
}
