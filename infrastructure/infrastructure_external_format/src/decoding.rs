//! Decoding Module
//!
//! Provides the term decoder for the external term format.
//! Based on dec_term(), dec_atom() and erts_decode_ext() from external.c
//!
//! ## Admission
//!
//! Untrusted input cannot make the decoder allocate more than it holds:
//! every length field is checked against the remaining bytes, using the
//! minimum payload the tag table derives from it, before any element is read
//! or any buffer is reserved. A shortfall is `Truncated`, the one retryable
//! error; the caller owns buffering and retries with more bytes.
//!
//! Two limits from `DecodeOptions` bound the work done for one term: nesting
//! depth (`DepthExceeded`) and the number of bytes it spans
//! (`SizeLimitExceeded`). The outermost term sits at depth 0.
//!
//! ## Accepted tags
//!
//! Everything the encoder emits, plus FLOAT_EXT (99), SMALL_ATOM_EXT (115)
//! and the compressed envelope (80) directly after the version byte. Pids,
//! ports, references and funs are captured as raw bytes.

/*
 * %CopyrightBegin%
 *
 * SPDX-License-Identifier: Apache-2.0
 *
 * Copyright Lee Barney 2025. All Rights Reserved.
 *
 * This file is derived from work copyrighted by Ericsson AB 1996-2025.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 * %CopyrightEnd%
 */

use crate::compression::{self, CompressionError};
use crate::config::DecodeOptions;
use crate::constants::*;
use crate::tag_table::{AtomText, ElementRule, LengthWidth, OpaqueLayout, Shape, TagInfo, TagTable};
use entities_data_handling::{
    Atom, BigNumber, BitBinary, Binary, Float, Map, Opaque, Term, Tuple, MAX_ATOM_LENGTH,
};
use infrastructure_bignum_encoding::bytes_to_integer;
use log::{debug, trace};
use thiserror::Error;

/// Decoding error types
///
/// Offsets are positions in the buffer handed to the decoder; for a
/// compressed term, positions in the inflated body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// First byte is not 131
    #[error("unsupported version byte {0}, expected 131")]
    UnsupportedVersion(u8),
    /// Tag byte not defined by the format, or not valid where it appears
    #[error("unknown tag {tag} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },
    /// Input ends before the term does
    #[error("truncated input: {needed} more bytes needed at offset {offset}")]
    Truncated { offset: usize, needed: usize },
    /// Nesting deeper than `DecodeOptions::max_depth`
    #[error("term nesting exceeds the maximum depth of {max_depth}")]
    DepthExceeded { max_depth: usize },
    /// BIT_BINARY_EXT bit count outside 1..=7
    #[error("invalid bit count {bits} at offset {offset}")]
    InvalidBitCount { bits: u8, offset: usize },
    /// Declared length inconsistent with the data it describes
    #[error("declared length {declared} does not match the data at offset {offset}")]
    ArityMismatch { offset: usize, declared: usize },
    /// Atom payload longer than 255 bytes
    #[error("atom of {len} bytes at offset {offset} exceeds the limit of 255")]
    AtomTooLong { len: usize, offset: usize },
    /// NaN, infinity or unparsable float text
    #[error("invalid float at offset {offset}")]
    InvalidFloat { offset: usize },
    /// Term spans more than `DecodeOptions::max_size` bytes
    #[error("term of at least {size} bytes exceeds the size limit of {limit}")]
    SizeLimitExceeded { size: usize, limit: usize },
    /// Corrupt zlib stream
    #[error("decompression failed: {0}")]
    Compression(String),
    /// Bytes left after a complete term
    #[error("{remaining} bytes remain after the term")]
    TrailingBytes { remaining: usize },
}

impl DecodeError {
    /// True when more input could make the decode succeed
    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeError::Truncated { .. })
    }
}

/// Decode one term with default options
///
/// Returns the term and the bytes that follow it, so concatenated messages
/// can be decoded in a loop.
pub fn decode(data: &[u8]) -> Result<(Term, &[u8]), DecodeError> {
    decode_with(data, &DecodeOptions::default())
}

/// Decode one term
pub fn decode_with<'a>(
    data: &'a [u8],
    options: &DecodeOptions,
) -> Result<(Term, &'a [u8]), DecodeError> {
    let result = erts_decode_ext(data, options);
    if let Err(err) = &result {
        debug!("[etf::decode] rejected {} byte input: {}", data.len(), err);
    }
    result
}

/// Iterate over concatenated top-level terms
pub fn decode_iter(data: &[u8], options: DecodeOptions) -> DecodeIter<'_> {
    DecodeIter {
        rest: data,
        options,
        failed: false,
    }
}

/// Iterator returned by `decode_iter`
///
/// Stops after the first error. On `Truncated`, `remaining()` is the
/// unconsumed input to retry once more bytes have arrived.
#[derive(Debug, Clone)]
pub struct DecodeIter<'a> {
    rest: &'a [u8],
    options: DecodeOptions,
    failed: bool,
}

impl<'a> DecodeIter<'a> {
    /// Input not yet decoded
    pub fn remaining(&self) -> &'a [u8] {
        self.rest
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = Result<Term, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.rest.is_empty() {
            return None;
        }
        match decode_with(self.rest, &self.options) {
            Ok((term, rest)) => {
                self.rest = rest;
                Some(Ok(term))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Based on `erts_decode_ext()` from external.c
fn erts_decode_ext<'a>(
    data: &'a [u8],
    options: &DecodeOptions,
) -> Result<(Term, &'a [u8]), DecodeError> {
    let Some(&version) = data.first() else {
        return Err(DecodeError::Truncated {
            offset: 0,
            needed: 1,
        });
    };
    if version != VERSION_MAGIC {
        return Err(DecodeError::UnsupportedVersion(version));
    }
    if data.get(1) == Some(&COMPRESSED) {
        return dec_compressed(data, options);
    }

    let mut decoder = Decoder::new(data, 1, options);
    let term = decoder.dec_term()?;
    Ok((term, &data[decoder.pos..]))
}

/// `131, 80, <u32 size>, <zlib stream>`: inflate into exactly `size` bytes,
/// which must hold exactly one term
fn dec_compressed<'a>(
    data: &'a [u8],
    options: &DecodeOptions,
) -> Result<(Term, &'a [u8]), DecodeError> {
    let mut header = Decoder::new(data, 2, options);
    let declared = header.read_u32()? as usize;
    if declared > options.max_size {
        return Err(DecodeError::SizeLimitExceeded {
            size: declared,
            limit: options.max_size,
        });
    }

    let stream_start = header.pos;
    let (inflated, consumed) =
        compression::decompress(&data[stream_start..], declared).map_err(|err| match err {
            CompressionError::Incomplete => DecodeError::Truncated {
                offset: data.len(),
                needed: 1,
            },
            CompressionError::SizeMismatch { declared } => DecodeError::ArityMismatch {
                offset: 2,
                declared,
            },
            CompressionError::Inflate(msg) | CompressionError::Deflate(msg) => {
                DecodeError::Compression(msg)
            }
        })?;
    trace!(
        "[etf::decode] inflated {} compressed bytes into {}",
        consumed,
        declared
    );

    let mut body = Decoder::new(&inflated, 0, options);
    let term = body.dec_term()?;
    if body.pos != inflated.len() {
        return Err(DecodeError::ArityMismatch {
            offset: 2,
            declared,
        });
    }
    Ok((term, &data[stream_start + consumed..]))
}

/// Cursor over one top-level term
struct Decoder<'a, 'o> {
    data: &'a [u8],
    pos: usize,
    depth: usize,
    options: &'o DecodeOptions,
}

impl<'a, 'o> Decoder<'a, 'o> {
    fn new(data: &'a [u8], pos: usize, options: &'o DecodeOptions) -> Self {
        Self {
            data,
            pos,
            depth: 0,
            options,
        }
    }

    /// Check that `n` more bytes exist and stay within the size limit
    fn need(&self, n: u64) -> Result<(), DecodeError> {
        let end = (self.pos as u64).saturating_add(n);
        if end > self.options.max_size as u64 {
            return Err(DecodeError::SizeLimitExceeded {
                size: usize::try_from(end).unwrap_or(usize::MAX),
                limit: self.options.max_size,
            });
        }
        if end > self.data.len() as u64 {
            return Err(DecodeError::Truncated {
                offset: self.pos,
                needed: usize::try_from(end - self.data.len() as u64).unwrap_or(usize::MAX),
            });
        }
        Ok(())
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        self.need(n as u64)?;
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let offset = self.pos;
        self.take(N)?.try_into().map_err(|_| DecodeError::Truncated {
            offset,
            needed: N,
        })
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take_array::<1>()?[0])
    }

    fn read_u16(&mut self) -> Result<u16, DecodeError> {
        self.take_array().map(u16::from_be_bytes)
    }

    fn read_u32(&mut self) -> Result<u32, DecodeError> {
        self.take_array().map(u32::from_be_bytes)
    }

    fn read_length(&mut self, width: LengthWidth) -> Result<usize, DecodeError> {
        Ok(match width {
            LengthWidth::None => 0,
            LengthWidth::U8 => self.read_u8()? as usize,
            LengthWidth::U16 => self.read_u16()? as usize,
            LengthWidth::U32 => self.read_u32()? as usize,
        })
    }

    /// Decode a nested term one level deeper
    fn dec_child(&mut self) -> Result<Term, DecodeError> {
        if self.depth >= self.options.max_depth {
            return Err(DecodeError::DepthExceeded {
                max_depth: self.options.max_depth,
            });
        }
        self.depth += 1;
        let result = self.dec_term();
        self.depth -= 1;
        result
    }

    fn dec_children(&mut self, count: usize) -> Result<Vec<Term>, DecodeError> {
        let mut elements = Vec::with_capacity(count);
        for _ in 0..count {
            elements.push(self.dec_child()?);
        }
        Ok(elements)
    }

    /// Decode the term at the cursor
    ///
    /// Based on `dec_term()` from external.c.
    fn dec_term(&mut self) -> Result<Term, DecodeError> {
        let offset = self.pos;
        let tag = self.read_u8()?;
        let info = TagTable::lookup(tag)
            .filter(|info| info.shape != Shape::Compressed)
            .ok_or(DecodeError::UnknownTag { tag, offset })?;
        let len = self.read_length(info.length)?;
        self.need(info.elements.min_payload(len as u64))?;

        match info.shape {
            Shape::SmallInteger => Ok(Term::Integer(BigNumber::from(self.read_u8()?))),
            Shape::Integer => {
                let value = i32::from_be_bytes(self.take_array()?);
                Ok(Term::Integer(BigNumber::from(value)))
            }
            Shape::Bignum => {
                let is_negative = self.read_u8()? != 0;
                let magnitude = self.take(len)?;
                Ok(Term::Integer(BigNumber::from_integer(bytes_to_integer(
                    magnitude,
                    is_negative,
                ))))
            }
            Shape::Float => {
                let value = f64::from_be_bytes(self.take_array()?);
                Float::new(value)
                    .map(Term::Float)
                    .map_err(|_| DecodeError::InvalidFloat { offset })
            }
            Shape::LegacyFloat => self.dec_legacy_float(offset),
            Shape::Atom(text) => self.dec_atom(text, len, offset),
            Shape::Tuple => {
                let elements = self.dec_children(len)?;
                Tuple::new(elements)
                    .map(Term::Tuple)
                    .map_err(|_| arity_mismatch(offset, len))
            }
            Shape::Nil => Ok(Term::Nil),
            Shape::String => {
                let bytes = self.take(len)?;
                Term::list(bytes.iter().map(|&b| Term::integer(b)).collect())
                    .map_err(|_| arity_mismatch(offset, len))
            }
            Shape::List => {
                let elements = self.dec_children(len)?;
                let tail = self.dec_child()?;
                Term::improper_list(elements, tail).map_err(|_| arity_mismatch(offset, len))
            }
            Shape::Binary => {
                let bytes = self.take(len)?;
                Binary::new(bytes)
                    .map(Term::Binary)
                    .map_err(|_| arity_mismatch(offset, len))
            }
            Shape::BitBinary => self.dec_bit_binary(len, offset),
            Shape::Map => {
                let mut pairs = Vec::with_capacity(len);
                for _ in 0..len {
                    let key = self.dec_child()?;
                    let value = self.dec_child()?;
                    pairs.push((key, value));
                }
                Ok(Term::Map(Map::from_list(pairs)))
            }
            Shape::Opaque(_, layout) => self.dec_opaque(info, layout, len, offset),
            Shape::Compressed => Err(DecodeError::UnknownTag { tag, offset }),
        }
    }

    /// Based on `dec_atom()` from external.c. Atom bytes are kept as they
    /// arrived; a Latin-1 tag marks them as Latin-1 text.
    fn dec_atom(&mut self, text: AtomText, len: usize, offset: usize) -> Result<Term, DecodeError> {
        if len > MAX_ATOM_LENGTH {
            return Err(DecodeError::AtomTooLong { len, offset });
        }
        let bytes = self.take(len)?;
        let atom = match text {
            AtomText::Latin1 => Atom::latin1(bytes),
            AtomText::Utf8 => Atom::new(bytes),
        };
        atom.map(Term::Atom)
            .map_err(|_| DecodeError::AtomTooLong { len, offset })
    }

    fn dec_bit_binary(&mut self, len: usize, offset: usize) -> Result<Term, DecodeError> {
        let bits = self.read_u8()?;
        if !(1..=7).contains(&bits) {
            return Err(DecodeError::InvalidBitCount { bits, offset });
        }
        if len == 0 {
            return Err(arity_mismatch(offset, len));
        }
        let data = self.take(len)?;
        BitBinary::new(data, bits)
            .map(Term::BitBinary)
            .map_err(|_| DecodeError::InvalidBitCount { bits, offset })
    }

    /// FLOAT_EXT: 31 bytes of NUL-padded `%.20e` text
    fn dec_legacy_float(&mut self, offset: usize) -> Result<Term, DecodeError> {
        let raw = self.take(FLOAT_EXT_LEN)?;
        let text_len = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        std::str::from_utf8(&raw[..text_len])
            .ok()
            .and_then(|text| text.trim().parse::<f64>().ok())
            .and_then(|value| Float::new(value).ok())
            .map(Term::Float)
            .ok_or(DecodeError::InvalidFloat { offset })
    }

    /// Node and module names inside opaque values must be atoms
    fn dec_atom_child(&mut self) -> Result<(), DecodeError> {
        let offset = self.pos;
        let tag = self.data.get(offset).copied().unwrap_or_default();
        if self.dec_child()?.is_atom() {
            Ok(())
        } else {
            Err(DecodeError::UnknownTag { tag, offset })
        }
    }

    /// Capture a pid, port, reference or fun verbatim
    ///
    /// Nested terms (node, module, free variables) are decoded only to find
    /// where the value ends.
    fn dec_opaque(
        &mut self,
        info: &TagInfo,
        layout: OpaqueLayout,
        len: usize,
        offset: usize,
    ) -> Result<Term, DecodeError> {
        match layout {
            OpaqueLayout::NodeThen(trailing) => {
                self.dec_atom_child()?;
                self.take(trailing)?;
            }
            OpaqueLayout::Reference { creation } => {
                self.dec_atom_child()?;
                self.take(creation)?;
                self.need((len as u64).saturating_mul(4))?;
                self.take(len * 4)?;
            }
            OpaqueLayout::Fun => {
                // pid, module, index, uniq, then the free variables
                self.dec_child()?;
                self.dec_atom_child()?;
                for _ in 0..2 + len {
                    self.dec_child()?;
                }
            }
            OpaqueLayout::SizedFun => {
                let field = match info.elements {
                    ElementRule::SelfSized { field } => field as usize,
                    _ => 0,
                };
                if len < field {
                    return Err(arity_mismatch(offset, len));
                }
                self.take(len - field)?;
            }
            OpaqueLayout::Export => {
                self.dec_atom_child()?;
                self.dec_atom_child()?;
                self.dec_child()?;
            }
        }

        Opaque::new(&self.data[offset..self.pos])
            .map(Term::Opaque)
            .map_err(|_| DecodeError::UnknownTag {
                tag: info.tag,
                offset,
            })
    }
}

/// Check that `bytes` hold exactly one pid, port, reference or fun, laid out
/// the way the decoder captures one
pub(crate) fn check_opaque(bytes: &[u8]) -> Result<(), DecodeError> {
    let options = DecodeOptions::default();
    let mut decoder = Decoder::new(bytes, 0, &options);
    match decoder.dec_term()? {
        Term::Opaque(_) if decoder.pos == bytes.len() => Ok(()),
        Term::Opaque(_) => Err(DecodeError::TrailingBytes {
            remaining: bytes.len() - decoder.pos,
        }),
        _ => Err(DecodeError::UnknownTag {
            tag: bytes.first().copied().unwrap_or_default(),
            offset: 0,
        }),
    }
}

fn arity_mismatch(offset: usize, declared: usize) -> DecodeError {
    DecodeError::ArityMismatch { offset, declared }
}
