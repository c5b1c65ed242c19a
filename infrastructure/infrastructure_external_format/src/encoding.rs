//! Encoding Module
//!
//! Provides the term encoder for the external term format.
//! Based on enc_term(), enc_atom() and erts_encode_ext() from external.c
//!
//! The encoder walks the term depth first and picks, for every value, the
//! smallest tag that can represent it:
//!
//! | Value | Tag |
//! |---|---|
//! | integer in `0..=255` | SMALL_INTEGER_EXT (97) |
//! | integer in the `i32` range | INTEGER_EXT (98) |
//! | other integers | SMALL_BIG_EXT (110) / LARGE_BIG_EXT (111) |
//! | float | NEW_FLOAT_EXT (70) |
//! | ASCII or UTF-8 atom | SMALL_ATOM_UTF8_EXT (119) / ATOM_UTF8_EXT (118) |
//! | Latin-1 atom | ATOM_EXT (100) |
//! | proper list of bytes | STRING_EXT (107), when enabled |
//!
//! The output buffer is allocated once, sized by `encoded_size`. With
//! compression enabled the body is deflated and wrapped in tag 80, but only
//! when that is smaller than the plain encoding.

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

use crate::compression;
use crate::config::EncodeOptions;
use crate::constants::*;
use crate::decoding::check_opaque;
use crate::size_calculation::encoded_size;
use crate::tag_table::{AtomText, LengthWidth, Shape, TagInfo, TagTable};
use entities_data_handling::{
    Atom, AtomEncoding, BigNumber, IntoTerm, List, Term, TermError, MAX_ATOM_LENGTH,
};
use infrastructure_bignum_encoding::integer_to_bytes;
use log::{debug, trace};
use thiserror::Error;

/// Encoding error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Host value with no term representation
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
    /// Atom text longer than 255 bytes
    #[error("atom is {len} bytes long, the limit is 255")]
    AtomTooLong { len: usize },
    /// Element or byte count does not fit its length field
    #[error("{len} elements do not fit the length field")]
    ArityOverflow { len: usize },
    /// Bit count outside 1..=7
    #[error("invalid bit count {bits} for a bitstring of {len} bytes")]
    InvalidBitCount { bits: u8, len: usize },
    /// NaN or infinity
    #[error("NaN and infinite floats have no external representation")]
    NonFiniteFloat,
    /// Opaque bytes that are not exactly one well-formed pid, port,
    /// reference or fun
    #[error("malformed pid, port, reference or fun (tag {tag:?})")]
    InvalidOpaque { tag: Option<u8> },
    /// Deflate failed
    #[error("compression failed: {0}")]
    Compression(String),
}

impl From<TermError> for EncodeError {
    fn from(err: TermError) -> Self {
        match err {
            TermError::AtomTooLong { len } => EncodeError::AtomTooLong { len },
            TermError::InvalidBitCount { bits, len } => EncodeError::InvalidBitCount { bits, len },
            TermError::ArityOverflow { len } => EncodeError::ArityOverflow { len },
            TermError::NonFiniteFloat => EncodeError::NonFiniteFloat,
            TermError::InvalidOpaque { tag } => EncodeError::InvalidOpaque { tag },
            TermError::UnsupportedType(what) => EncodeError::UnsupportedType(what),
        }
    }
}

/// Encode a term to external format with default options
///
/// The result starts with the version magic byte (131).
pub fn encode(term: &Term) -> Result<Vec<u8>, EncodeError> {
    encode_with(term, &EncodeOptions::default())
}

/// Encode a term to external format
pub fn encode_with(term: &Term, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    let result = erts_encode_ext(term, options);
    if let Err(err) = &result {
        debug!("[etf::encode] rejected {:?} term: {}", term.kind(), err);
    }
    result
}

/// Convert a host value with `IntoTerm` and encode it
pub fn encode_value<T: IntoTerm>(value: T) -> Result<Vec<u8>, EncodeError> {
    let term = value.into_term().map_err(|err| {
        debug!("[etf::encode] host value has no term representation: {}", err);
        EncodeError::from(err)
    })?;
    encode(&term)
}

fn erts_encode_ext(term: &Term, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    let size = encoded_size(term, options);
    let mut buf = Vec::with_capacity(size);
    buf.push(VERSION_MAGIC);
    enc_term_int(&mut buf, term, options)?;
    debug_assert_eq!(buf.len(), size);

    match options.compression {
        Some(level) => compress_body(buf, level),
        None => Ok(buf),
    }
}

/// Wrap the body in a compressed envelope if that makes it smaller
fn compress_body(buf: Vec<u8>, level: u32) -> Result<Vec<u8>, EncodeError> {
    let body = &buf[1..];
    let Ok(declared) = u32::try_from(body.len()) else {
        trace!("[etf::encode] {} byte body is too large to compress", body.len());
        return Ok(buf);
    };

    let deflated =
        compression::compress(body, level).map_err(|e| EncodeError::Compression(e.to_string()))?;
    let framed_len = 2 + 4 + deflated.len();
    if framed_len >= buf.len() {
        trace!(
            "[etf::encode] compression would not shrink {} bytes, sending uncompressed",
            body.len()
        );
        return Ok(buf);
    }

    trace!(
        "[etf::encode] compressed {} bytes to {} at level {}",
        body.len(),
        deflated.len(),
        level
    );
    let mut out = Vec::with_capacity(framed_len);
    out.push(VERSION_MAGIC);
    out.push(COMPRESSED);
    out.extend_from_slice(&declared.to_be_bytes());
    out.extend_from_slice(&deflated);
    Ok(out)
}

/// Internal encoding function
///
/// Based on `enc_term_int()` from external.c. Encodes a term without the
/// version magic byte.
fn enc_term_int(buf: &mut Vec<u8>, term: &Term, options: &EncodeOptions) -> Result<(), EncodeError> {
    match term {
        Term::Integer(n) => enc_integer(buf, n),
        Term::Float(f) => {
            buf.push(NEW_FLOAT_EXT);
            buf.extend_from_slice(&f.value().to_be_bytes());
            Ok(())
        }
        Term::Atom(atom) => enc_atom(buf, atom),
        Term::Tuple(tuple) => {
            let info = select(Shape::Tuple, tuple.arity())?;
            put_header(buf, info, tuple.arity());
            for element in tuple.elements() {
                enc_term_int(buf, element, options)?;
            }
            Ok(())
        }
        Term::Nil => {
            buf.push(NIL_EXT);
            Ok(())
        }
        Term::List(list) => enc_list(buf, list, options),
        Term::Binary(binary) => {
            let info = select(Shape::Binary, binary.len())?;
            put_header(buf, info, binary.len());
            buf.extend_from_slice(binary.data());
            Ok(())
        }
        Term::BitBinary(bits) => {
            let len = bits.data().len();
            let info = select(Shape::BitBinary, len)?;
            put_header(buf, info, len);
            buf.push(bits.bits());
            buf.extend_from_slice(bits.data());
            Ok(())
        }
        Term::Map(map) => {
            let info = select(Shape::Map, map.size())?;
            put_header(buf, info, map.size());
            for (key, value) in map.iter() {
                enc_term_int(buf, key, options)?;
                enc_term_int(buf, value, options)?;
            }
            Ok(())
        }
        Term::Opaque(opaque) => {
            check_opaque(opaque.bytes()).map_err(|err| {
                debug!(
                    "[etf::encode] malformed {} of {} bytes: {}",
                    opaque.kind().name(),
                    opaque.bytes().len(),
                    err
                );
                EncodeError::InvalidOpaque {
                    tag: Some(opaque.tag()),
                }
            })?;
            buf.extend_from_slice(opaque.bytes());
            Ok(())
        }
    }
}

fn select(shape: Shape, len: usize) -> Result<&'static TagInfo, EncodeError> {
    TagTable::select(shape, len).ok_or(EncodeError::ArityOverflow { len })
}

/// Write the tag and, if the tag has one, the big-endian length field
///
/// `len` must fit the field, which `TagTable::select` guarantees.
fn put_header(buf: &mut Vec<u8>, info: &TagInfo, len: usize) {
    buf.push(info.tag);
    match info.length {
        LengthWidth::None => {}
        LengthWidth::U8 => buf.push(len as u8),
        LengthWidth::U16 => buf.extend_from_slice(&(len as u16).to_be_bytes()),
        LengthWidth::U32 => buf.extend_from_slice(&(len as u32).to_be_bytes()),
    }
}

/// Encode an integer with the smallest tag that covers it
///
/// Based on `enc_integer()` / `encode_longlong()`.
fn enc_integer(buf: &mut Vec<u8>, n: &BigNumber) -> Result<(), EncodeError> {
    if let Some(small) = n.to_u8() {
        buf.push(SMALL_INTEGER_EXT);
        buf.push(small);
    } else if let Some(int) = n.to_i32() {
        buf.push(INTEGER_EXT);
        buf.extend_from_slice(&int.to_be_bytes());
    } else {
        let (magnitude, is_negative) = integer_to_bytes(n.as_integer());
        let info = select(Shape::Bignum, magnitude.len())?;
        put_header(buf, info, magnitude.len());
        buf.push(u8::from(is_negative));
        buf.extend_from_slice(&magnitude);
    }
    Ok(())
}

/// ASCII and UTF-8 text goes out as a UTF-8 atom; Latin-1 atoms, including
/// those read from a Latin-1 tag, keep ATOM_EXT
pub(crate) fn atom_shape(atom: &Atom) -> Shape {
    match atom.encoding() {
        AtomEncoding::SevenBitAscii | AtomEncoding::Utf8 => Shape::Atom(AtomText::Utf8),
        AtomEncoding::Latin1 => Shape::Atom(AtomText::Latin1),
    }
}

/// Encode an atom
///
/// Based on `enc_atom()` from external.c.
fn enc_atom(buf: &mut Vec<u8>, atom: &Atom) -> Result<(), EncodeError> {
    let len = atom.len();
    if len > MAX_ATOM_LENGTH {
        return Err(EncodeError::AtomTooLong { len });
    }
    let info = TagTable::select(atom_shape(atom), len).ok_or(EncodeError::AtomTooLong { len })?;
    put_header(buf, info, len);
    buf.extend_from_slice(atom.as_bytes());
    Ok(())
}

/// True when `list` goes out as STRING_EXT: proper, short enough, every
/// element an integer in `0..=255`
pub(crate) fn is_string(list: &List, options: &EncodeOptions) -> bool {
    list.is_proper()
        && list.len() <= options.string_limit()
        && list
            .elements()
            .iter()
            .all(|e| matches!(e, Term::Integer(n) if n.to_u8().is_some()))
}

fn enc_list(buf: &mut Vec<u8>, list: &List, options: &EncodeOptions) -> Result<(), EncodeError> {
    if is_string(list, options) {
        let info = select(Shape::String, list.len())?;
        put_header(buf, info, list.len());
        buf.extend(list.elements().iter().filter_map(|e| match e {
            Term::Integer(n) => n.to_u8(),
            _ => None,
        }));
        return Ok(());
    }

    let info = select(Shape::List, list.len())?;
    put_header(buf, info, list.len());
    for element in list.elements() {
        enc_term_int(buf, element, options)?;
    }
    enc_term_int(buf, list.tail(), options)
}
