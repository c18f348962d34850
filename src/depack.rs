//! The `aPLib` decompression engine
//!
//! A single [`Depacker`] owns the input cursor, the tag-byte bit reader, the
//! gamma2 decoder, the `last_offset`/`last_was_match` registers and the
//! growing output buffer. Instructions are decoded from up to three control
//! bits and executed one at a time until the stream's end marker; parsing and
//! output production are interleaved, there is no separate parse stage.

use crate::error::{Error, Result};

/// Gamma2 values above this are rejected as corrupt input. No real stream
/// encodes an offset or length anywhere near it; the cap only exists so a
/// run of continuation bits cannot overflow the accumulator.
const GAMMA_LIMIT: u64 = 1 << 31;

/// Instruction kinds, keyed by up to three control bits.
#[derive(Debug, Clone, Copy)]
enum Op {
    /// `0` — copy one verbatim byte from the input.
    Literal,
    /// `10` — gamma-coded back-reference, or a rep-match reusing `last_offset`.
    LongMatch,
    /// `110` — one-byte back-reference; offset 0 is the end-of-stream marker.
    ShortMatch,
    /// `111` — 4-bit-offset back-reference of length 1, or a literal zero.
    TinyMatch,
}

/// Decoder state for one decompression call.
///
/// Created fresh per call and discarded afterwards; concurrent decodes are
/// independent because nothing here is shared.
struct Depacker<'a> {
    input: &'a [u8],
    src: usize,
    output: Vec<u8>,
    /// Current tag byte, consumed most-significant-bit first.
    tag: u8,
    /// Unconsumed bits left in `tag`, always in `0..8`.
    bitcount: u8,
    /// Most recently used back-reference offset (`r0`), once one exists.
    last_offset: Option<usize>,
    /// Whether the previous instruction was a back-reference (`lwm`).
    last_was_match: bool,
}

impl<'a> Depacker<'a> {
    fn new(input: &'a [u8], capacity: Option<usize>) -> Self {
        Self {
            input,
            src: 0,
            output: capacity.map_or_else(Vec::new, Vec::with_capacity),
            tag: 0,
            bitcount: 0,
            last_offset: None,
            last_was_match: false,
        }
    }

    /// Consume one whole input byte, bypassing the bit reader.
    fn next_byte(&mut self) -> Result<u8> {
        let byte = *self.input.get(self.src).ok_or(Error::TruncatedInput)?;
        self.src += 1;
        Ok(byte)
    }

    /// Consume one bit from the tag byte, refilling it from the input when
    /// all eight bits have been shifted out.
    fn next_bit(&mut self) -> Result<u8> {
        if self.bitcount == 0 {
            self.tag = self.next_byte()?;
            self.bitcount = 8;
        }
        self.bitcount -= 1;
        let bit = self.tag >> 7;
        self.tag <<= 1;
        Ok(bit)
    }

    /// Decode a gamma2-coded integer: each value bit is followed by a
    /// continuation bit. Always consumes at least one pair, so the result is
    /// always >= 2.
    fn gamma(&mut self) -> Result<usize> {
        let mut result: u64 = 1;
        loop {
            result = (result << 1) | u64::from(self.next_bit()?);
            if result > GAMMA_LIMIT {
                return Err(Error::GammaOverflow);
            }
            if self.next_bit()? == 0 {
                return Ok(result as usize);
            }
        }
    }

    /// Read the next instruction's control bits.
    fn next_op(&mut self) -> Result<Op> {
        if self.next_bit()? == 0 {
            return Ok(Op::Literal);
        }
        if self.next_bit()? == 0 {
            return Ok(Op::LongMatch);
        }
        if self.next_bit()? == 0 {
            return Ok(Op::ShortMatch);
        }
        Ok(Op::TinyMatch)
    }

    /// Copy `count` bytes verbatim from the input to the output.
    fn copy_literals(&mut self, count: usize) -> Result<()> {
        for _ in 0..count {
            let byte = self.next_byte()?;
            self.output.push(byte);
        }
        Ok(())
    }

    /// Append `length` bytes read back `offset` positions into the output.
    ///
    /// When `offset < length` the copy overlaps its own destination and must
    /// replicate byte-by-byte, since later bytes reference bytes produced
    /// earlier in the same call.
    fn copy_match(&mut self, offset: usize, length: usize) -> Result<()> {
        let pos = self.output.len();
        if offset == 0 || offset > pos {
            return Err(Error::InvalidBackReference {
                offset,
                produced: pos,
            });
        }

        if offset == 1 {
            // Run of the previous byte
            let byte = self.output[pos - 1];
            self.output.resize(pos + length, byte);
        } else if offset >= length {
            self.output.extend_from_within(pos - offset..pos - offset + length);
        } else {
            self.output.reserve(length);
            for i in 0..length {
                let byte = self.output[pos - offset + i];
                self.output.push(byte);
            }
        }
        Ok(())
    }

    /// `10`: offset from a gamma code plus a raw low byte, length from a
    /// second gamma code with the format's offset-dependent length bumps.
    /// A gamma offset of 2 right after a non-match reuses `last_offset`
    /// with no adjustments or bumps.
    fn long_match(&mut self) -> Result<()> {
        let offset = self.gamma()?;
        if !self.last_was_match && offset == 2 {
            let offset = self.last_offset.unwrap_or(0);
            let length = self.gamma()?;
            self.copy_match(offset, length)?;
        } else {
            let high = offset - if self.last_was_match { 2 } else { 3 };
            let offset = (high << 8) | usize::from(self.next_byte()?);
            let mut length = self.gamma()?;
            if offset >= 32000 {
                length += 1;
            }
            if offset >= 1280 {
                length += 1;
            }
            if offset < 128 {
                length += 2;
            }
            self.copy_match(offset, length)?;
            self.last_offset = Some(offset);
        }
        self.last_was_match = true;
        Ok(())
    }

    /// `110`: one raw byte holds a 7-bit offset and a 1-bit length selector.
    /// Offset 0 is the end-of-stream marker; returns true in that case.
    fn short_match(&mut self) -> Result<bool> {
        let raw = self.next_byte()?;
        let offset = usize::from(raw >> 1);
        if offset == 0 {
            return Ok(true);
        }
        let length = 2 + usize::from(raw & 1);
        self.copy_match(offset, length)?;
        self.last_offset = Some(offset);
        self.last_was_match = true;
        Ok(false)
    }

    /// `111`: a 4-bit offset copies a single byte; a zero nibble emits a
    /// literal zero byte instead. `last_offset` is left alone either way.
    fn tiny_match(&mut self) -> Result<()> {
        let mut offset = 0usize;
        for _ in 0..4 {
            offset = (offset << 1) | usize::from(self.next_bit()?);
        }
        if offset == 0 {
            self.output.push(0);
        } else {
            self.copy_match(offset, 1)?;
        }
        self.last_was_match = false;
        Ok(())
    }

    /// Drive the instruction loop until the end marker.
    fn run(&mut self) -> Result<()> {
        // The stream always starts with one verbatim byte
        self.copy_literals(1)?;
        loop {
            match self.next_op()? {
                Op::Literal => {
                    self.copy_literals(1)?;
                    self.last_was_match = false;
                }
                Op::LongMatch => self.long_match()?,
                Op::ShortMatch => {
                    if self.short_match()? {
                        return Ok(());
                    }
                }
                Op::TinyMatch => self.tiny_match()?,
            }
        }
    }
}

/// Decompress a raw `aPLib` stream (no container framing), strictly: any
/// truncation or invalid back-reference surfaces as an error.
pub(crate) fn depack(input: &[u8], capacity: Option<usize>) -> Result<Vec<u8>> {
    let mut depacker = Depacker::new(input, capacity);
    depacker.run()?;
    Ok(depacker.output)
}

/// Best-effort decompression of a raw `aPLib` stream: a decode error ends
/// the loop early and the output produced so far is returned. Trailing
/// corruption does not discard the already-valid prefix.
pub(crate) fn depack_lenient(input: &[u8], capacity: Option<usize>) -> Vec<u8> {
    let mut depacker = Depacker::new(input, capacity);
    if let Err(e) = depacker.run() {
        tracing::debug!(
            "lenient decode stopped after {} bytes: {e}",
            depacker.output.len()
        );
    }
    depacker.output
}
