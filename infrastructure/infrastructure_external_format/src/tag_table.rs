//! Tag Table Module
//!
//! Static registry of the tags of the external term format. Each entry records
//! the shape of the value behind the tag, the width of its length field, and
//! the smallest payload a declared length implies. The encoder uses the table
//! to choose the smallest tag for a value; the decoder uses it to reject a
//! declared length that the remaining input cannot possibly hold before it
//! allocates anything.
//!
//! The table and its 256-entry index are built at compile time and are read
//! without synchronisation.
//!
//! ## Examples
//!
//! ```rust
//! use infrastructure_external_format::tag_table::{LengthWidth, Shape, TagTable};
//!
//! let info = TagTable::select(Shape::Tuple, 3).unwrap();
//! assert_eq!(info.tag, 104);
//! assert_eq!(info.length, LengthWidth::U8);
//!
//! let info = TagTable::select(Shape::Tuple, 300).unwrap();
//! assert_eq!(info.tag, 105);
//!
//! assert!(TagTable::lookup(200).is_none());
//! ```

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

use crate::constants::*;
use entities_data_handling::{OpaqueKind, TermKind};

/// Width of the length field that follows a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthWidth {
    /// No length field
    None,
    U8,
    /// Big-endian
    U16,
    /// Big-endian
    U32,
}

impl LengthWidth {
    /// Bytes occupied by the field
    pub const fn bytes(self) -> usize {
        match self {
            LengthWidth::None => 0,
            LengthWidth::U8 => 1,
            LengthWidth::U16 => 2,
            LengthWidth::U32 => 4,
        }
    }

    /// Largest length the field can express
    pub const fn max(self) -> u64 {
        match self {
            LengthWidth::None => u64::MAX,
            LengthWidth::U8 => u8::MAX as u64,
            LengthWidth::U16 => u16::MAX as u64,
            LengthWidth::U32 => u32::MAX as u64,
        }
    }

    pub fn fits(self, len: usize) -> bool {
        (len as u64) <= self.max()
    }
}

/// Minimum payload implied by a declared length
///
/// The payload is everything after the length field. Nested terms count as at
/// least one byte each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRule {
    /// Fixed payload, independent of any length
    Fixed(u64),
    /// `per_element` bytes for each declared element, plus `extra`
    PerElement { per_element: u64, extra: u64 },
    /// The declared length counts `field` bytes of the length field itself
    SelfSized { field: u64 },
}

impl ElementRule {
    /// Minimum payload bytes for a declared length, saturating
    pub const fn min_payload(self, len: u64) -> u64 {
        match self {
            ElementRule::Fixed(n) => n,
            ElementRule::PerElement { per_element, extra } => {
                len.saturating_mul(per_element).saturating_add(extra)
            }
            ElementRule::SelfSized { field } => len.saturating_sub(field),
        }
    }
}

/// Text encoding of an atom tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomText {
    Latin1,
    Utf8,
}

/// Layout of a pid, port, reference or fun payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpaqueLayout {
    /// Node atom followed by a fixed number of bytes
    NodeThen(usize),
    /// Id word count (the length field), node atom, creation, id words
    Reference { creation: usize },
    /// Free variable count (the length field), pid, module, index, uniq,
    /// free variables
    Fun,
    /// Size field counting itself, then the rest of the fun
    SizedFun,
    /// Module, function and arity
    Export,
}

/// What a tag carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    SmallInteger,
    Integer,
    Float,
    LegacyFloat,
    Atom(AtomText),
    Tuple,
    Nil,
    /// Byte list
    String,
    List,
    Binary,
    BitBinary,
    Bignum,
    Map,
    Opaque(OpaqueKind, OpaqueLayout),
    /// Zlib envelope around a whole term
    Compressed,
}

impl Shape {
    /// Term kind a tag of this shape decodes to
    pub fn kind(self) -> Option<TermKind> {
        match self {
            Shape::SmallInteger | Shape::Integer | Shape::Bignum => Some(TermKind::Integer),
            Shape::Float | Shape::LegacyFloat => Some(TermKind::Float),
            Shape::Atom(_) => Some(TermKind::Atom),
            Shape::Tuple => Some(TermKind::Tuple),
            Shape::Nil => Some(TermKind::Nil),
            Shape::String | Shape::List => Some(TermKind::List),
            Shape::Binary => Some(TermKind::Binary),
            Shape::BitBinary => Some(TermKind::BitBinary),
            Shape::Map => Some(TermKind::Map),
            Shape::Opaque(kind, _) => Some(TermKind::Opaque(kind)),
            Shape::Compressed => None,
        }
    }
}

/// One tag of the format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagInfo {
    pub tag: u8,
    pub name: &'static str,
    pub shape: Shape,
    pub length: LengthWidth,
    pub elements: ElementRule,
    /// Chosen by the encoder for fresh values. Decode-only and opaque tags are
    /// not; captured opaque bytes are re-emitted whatever their tag.
    pub encodable: bool,
}

impl TagInfo {
    /// Tag byte plus length field
    pub const fn header_len(&self) -> usize {
        1 + self.length.bytes()
    }
}

const fn entry(
    tag: u8,
    name: &'static str,
    shape: Shape,
    length: LengthWidth,
    elements: ElementRule,
    encodable: bool,
) -> TagInfo {
    TagInfo {
        tag,
        name,
        shape,
        length,
        elements,
        encodable,
    }
}

const fn per(per_element: u64, extra: u64) -> ElementRule {
    ElementRule::PerElement { per_element, extra }
}

// Within a shape, entries are listed smallest length field first.
const TAGS: &[TagInfo] = &[
    entry(SMALL_INTEGER_EXT, "SMALL_INTEGER_EXT", Shape::SmallInteger, LengthWidth::None, ElementRule::Fixed(1), true),
    entry(INTEGER_EXT, "INTEGER_EXT", Shape::Integer, LengthWidth::None, ElementRule::Fixed(4), true),
    entry(SMALL_BIG_EXT, "SMALL_BIG_EXT", Shape::Bignum, LengthWidth::U8, per(1, 1), true),
    entry(LARGE_BIG_EXT, "LARGE_BIG_EXT", Shape::Bignum, LengthWidth::U32, per(1, 1), true),
    entry(NEW_FLOAT_EXT, "NEW_FLOAT_EXT", Shape::Float, LengthWidth::None, ElementRule::Fixed(8), true),
    entry(FLOAT_EXT, "FLOAT_EXT", Shape::LegacyFloat, LengthWidth::None, ElementRule::Fixed(FLOAT_EXT_LEN as u64), false),
    entry(SMALL_ATOM_UTF8_EXT, "SMALL_ATOM_UTF8_EXT", Shape::Atom(AtomText::Utf8), LengthWidth::U8, per(1, 0), true),
    entry(ATOM_UTF8_EXT, "ATOM_UTF8_EXT", Shape::Atom(AtomText::Utf8), LengthWidth::U16, per(1, 0), true),
    entry(SMALL_ATOM_EXT, "SMALL_ATOM_EXT", Shape::Atom(AtomText::Latin1), LengthWidth::U8, per(1, 0), false),
    entry(ATOM_EXT, "ATOM_EXT", Shape::Atom(AtomText::Latin1), LengthWidth::U16, per(1, 0), true),
    entry(SMALL_TUPLE_EXT, "SMALL_TUPLE_EXT", Shape::Tuple, LengthWidth::U8, per(1, 0), true),
    entry(LARGE_TUPLE_EXT, "LARGE_TUPLE_EXT", Shape::Tuple, LengthWidth::U32, per(1, 0), true),
    entry(NIL_EXT, "NIL_EXT", Shape::Nil, LengthWidth::None, ElementRule::Fixed(0), true),
    entry(STRING_EXT, "STRING_EXT", Shape::String, LengthWidth::U16, per(1, 0), true),
    entry(LIST_EXT, "LIST_EXT", Shape::List, LengthWidth::U32, per(1, 1), true),
    entry(BINARY_EXT, "BINARY_EXT", Shape::Binary, LengthWidth::U32, per(1, 0), true),
    entry(BIT_BINARY_EXT, "BIT_BINARY_EXT", Shape::BitBinary, LengthWidth::U32, per(1, 1), true),
    entry(MAP_EXT, "MAP_EXT", Shape::Map, LengthWidth::U32, per(2, 0), true),
    entry(PID_EXT, "PID_EXT", Shape::Opaque(OpaqueKind::Pid, OpaqueLayout::NodeThen(9)), LengthWidth::None, ElementRule::Fixed(10), false),
    entry(NEW_PID_EXT, "NEW_PID_EXT", Shape::Opaque(OpaqueKind::Pid, OpaqueLayout::NodeThen(12)), LengthWidth::None, ElementRule::Fixed(13), false),
    entry(PORT_EXT, "PORT_EXT", Shape::Opaque(OpaqueKind::Port, OpaqueLayout::NodeThen(5)), LengthWidth::None, ElementRule::Fixed(6), false),
    entry(NEW_PORT_EXT, "NEW_PORT_EXT", Shape::Opaque(OpaqueKind::Port, OpaqueLayout::NodeThen(8)), LengthWidth::None, ElementRule::Fixed(9), false),
    entry(V4_PORT_EXT, "V4_PORT_EXT", Shape::Opaque(OpaqueKind::Port, OpaqueLayout::NodeThen(12)), LengthWidth::None, ElementRule::Fixed(13), false),
    entry(REFERENCE_EXT, "REFERENCE_EXT", Shape::Opaque(OpaqueKind::Reference, OpaqueLayout::NodeThen(5)), LengthWidth::None, ElementRule::Fixed(6), false),
    entry(NEW_REFERENCE_EXT, "NEW_REFERENCE_EXT", Shape::Opaque(OpaqueKind::Reference, OpaqueLayout::Reference { creation: 1 }), LengthWidth::U16, per(4, 2), false),
    entry(NEWER_REFERENCE_EXT, "NEWER_REFERENCE_EXT", Shape::Opaque(OpaqueKind::Reference, OpaqueLayout::Reference { creation: 4 }), LengthWidth::U16, per(4, 5), false),
    entry(FUN_EXT, "FUN_EXT", Shape::Opaque(OpaqueKind::Function, OpaqueLayout::Fun), LengthWidth::U32, per(1, 4), false),
    entry(NEW_FUN_EXT, "NEW_FUN_EXT", Shape::Opaque(OpaqueKind::Function, OpaqueLayout::SizedFun), LengthWidth::U32, ElementRule::SelfSized { field: 4 }, false),
    entry(EXPORT_EXT, "EXPORT_EXT", Shape::Opaque(OpaqueKind::Function, OpaqueLayout::Export), LengthWidth::None, ElementRule::Fixed(3), false),
    entry(COMPRESSED, "COMPRESSED", Shape::Compressed, LengthWidth::U32, ElementRule::Fixed(0), false),
];

/// Position in `TAGS` plus one, zero for unknown tags
const INDEX: [u8; 256] = build_index(TAGS);

const fn build_index(tags: &[TagInfo]) -> [u8; 256] {
    let mut index = [0u8; 256];
    let mut i = 0;
    while i < tags.len() {
        index[tags[i].tag as usize] = (i + 1) as u8;
        i += 1;
    }
    index
}

/// Read-only access to the tag registry
pub struct TagTable;

impl TagTable {
    /// Every known tag
    pub fn entries() -> &'static [TagInfo] {
        TAGS
    }

    /// Entry for a tag byte
    pub fn lookup(tag: u8) -> Option<&'static TagInfo> {
        match INDEX[tag as usize] {
            0 => None,
            slot => TAGS.get(slot as usize - 1),
        }
    }

    /// Entries of a shape, smallest length field first
    pub fn by_shape(shape: Shape) -> impl Iterator<Item = &'static TagInfo> {
        TAGS.iter().filter(move |info| info.shape == shape)
    }

    /// Entries that decode to a term kind
    pub fn for_kind(kind: TermKind) -> impl Iterator<Item = &'static TagInfo> {
        TAGS.iter().filter(move |info| info.shape.kind() == Some(kind))
    }

    /// Smallest encodable entry of `shape` whose length field can hold `len`
    pub fn select(shape: Shape, len: usize) -> Option<&'static TagInfo> {
        Self::by_shape(shape).find(|info| info.encodable && info.length.fits(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_entries() {
        for info in TagTable::entries() {
            assert_eq!(TagTable::lookup(info.tag), Some(info));
        }
        let known = (0..=255u8).filter(|&t| TagTable::lookup(t).is_some()).count();
        assert_eq!(known, TagTable::entries().len());
    }

    #[test]
    fn test_select_smallest_fitting() {
        assert_eq!(TagTable::select(Shape::Tuple, 255).unwrap().tag, SMALL_TUPLE_EXT);
        assert_eq!(TagTable::select(Shape::Tuple, 256).unwrap().tag, LARGE_TUPLE_EXT);
        assert_eq!(TagTable::select(Shape::Bignum, 255).unwrap().tag, SMALL_BIG_EXT);
        assert_eq!(TagTable::select(Shape::Bignum, 256).unwrap().tag, LARGE_BIG_EXT);
        assert_eq!(TagTable::select(Shape::Atom(AtomText::Utf8), 10).unwrap().tag, SMALL_ATOM_UTF8_EXT);
        assert_eq!(TagTable::select(Shape::Atom(AtomText::Latin1), 10).unwrap().tag, ATOM_EXT);
        assert!(TagTable::select(Shape::String, 65536).is_none());
        assert!(TagTable::select(Shape::LegacyFloat, 0).is_none());
    }

    #[test]
    fn test_for_kind() {
        let integer_tags: Vec<u8> = TagTable::for_kind(TermKind::Integer).map(|i| i.tag).collect();
        assert_eq!(integer_tags, vec![97, 98, 110, 111]);

        let pid_tags: Vec<u8> = TagTable::for_kind(TermKind::Opaque(OpaqueKind::Pid))
            .map(|i| i.tag)
            .collect();
        assert_eq!(pid_tags, vec![103, 88]);
    }

    #[test]
    fn test_min_payload() {
        let list = TagTable::lookup(LIST_EXT).unwrap();
        assert_eq!(list.elements.min_payload(5), 6);
        let map = TagTable::lookup(MAP_EXT).unwrap();
        assert_eq!(map.elements.min_payload(u32::MAX as u64), 2 * u32::MAX as u64);
        let fun = TagTable::lookup(NEW_FUN_EXT).unwrap();
        assert_eq!(fun.elements.min_payload(30), 26);
        assert_eq!(fun.elements.min_payload(2), 0);
        assert_eq!(ElementRule::PerElement { per_element: u64::MAX, extra: 1 }.min_payload(2), u64::MAX);
    }
}
