//! # apdepack
//!
//! A pure-Rust decompressor for the `aPLib` compression format.
//!
//! `aPLib` is a byte-oriented LZ77-family format used by installers,
//! firmware blobs and archive tools. This crate decodes both raw streams
//! and buffers wrapped in the optional `AP32` container header (which adds
//! sizes and CRC32 checksums). It is decode-only; compressing is out of
//! scope.
//!
//! ## Quick Start
//!
//! ```
//! let packed = b"T\x00he quick\xecb\x0erown\xcef\xaex\x80jumps\xed\xe4veur`t?lazy\xead\xfeg\xc0\x00";
//! let data = apdepack::decompress(packed)?;
//! assert_eq!(data, b"The quick brown fox jumps over the lazy dog");
//! # Ok::<(), apdepack::Error>(())
//! ```
//!
//! ## Strict and lenient decoding
//!
//! [`decompress`] is strict: truncated input, invalid back-references and
//! container size/checksum mismatches all fail the call. For payloads with
//! trailing corruption where the valid prefix is still worth recovering,
//! [`decompress_lenient`] returns whatever output was produced before the
//! stream broke and performs no container validation.
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `apdepack` command-line binary

pub mod error;
pub mod header;

mod decompress;
mod depack;

// Re-exports for convenience
pub use decompress::{decompress, decompress_lenient, decompress_with_capacity};
pub use error::{Error, Result};
pub use header::ApHeader;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
