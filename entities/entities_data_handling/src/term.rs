//! Term Module
//!
//! Provides the `Term` enum, the closed set of values the external term
//! format codec can represent, and the composite value types it is built from.
//!
//! Every variant wraps a type whose constructor validates the invariants the
//! wire format imposes (atom length, bit count range, 32-bit arity, finite
//! floats), so any `Term` that exists in memory can be encoded.
//!
//! Lists are stored flattened: a `Term::List` holds at least one element and a
//! tail that is never itself a list. The empty list is `Term::Nil`.

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

use crate::atom::Atom;
use crate::binary::Binary;
use crate::bits::BitBinary;
use crate::error::TermError;
use crate::map::Map;
use entities_utilities::BigNumber;
use std::hash::{Hash, Hasher};

/// Largest element count a 32-bit arity field can describe
pub const MAX_ARITY: usize = u32::MAX as usize;

pub(crate) fn check_arity(len: usize) -> Result<(), TermError> {
    if len > MAX_ARITY {
        Err(TermError::ArityOverflow { len })
    } else {
        Ok(())
    }
}

/// Erlang term
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    /// Arbitrary precision integer
    Integer(BigNumber),
    /// IEEE-754 double, finite
    Float(Float),
    /// Atom
    Atom(Atom),
    /// Tuple of any arity
    Tuple(Tuple),
    /// The empty list `[]`
    Nil,
    /// Non-empty list, proper or improper
    List(List),
    /// Byte-aligned binary
    Binary(Binary),
    /// Bitstring with a partial final byte
    BitBinary(BitBinary),
    /// Map
    Map(Map),
    /// Pid, port, reference or fun, carried as raw external format bytes
    Opaque(Opaque),
}

/// Kind of a term, independent of how it is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    Integer,
    Float,
    Atom,
    Tuple,
    Nil,
    List,
    Binary,
    BitBinary,
    Map,
    Opaque(OpaqueKind),
}

impl Term {
    /// Integer term
    pub fn integer(value: impl Into<BigNumber>) -> Self {
        Term::Integer(value.into())
    }

    /// Float term; NaN and infinities are rejected
    pub fn float(value: f64) -> Result<Self, TermError> {
        Float::new(value).map(Term::Float)
    }

    /// Atom term
    pub fn atom(name: impl Into<Vec<u8>>) -> Result<Self, TermError> {
        Atom::new(name).map(Term::Atom)
    }

    /// Boolean as the atom `true` or `false`
    pub fn boolean(value: bool) -> Self {
        if value {
            Term::Atom(Atom::true_atom())
        } else {
            Term::Atom(Atom::false_atom())
        }
    }

    /// Tuple term
    pub fn tuple(elements: Vec<Term>) -> Result<Self, TermError> {
        Tuple::new(elements).map(Term::Tuple)
    }

    /// Proper list; an empty vector yields `Term::Nil`
    pub fn list(elements: Vec<Term>) -> Result<Self, TermError> {
        Self::improper_list(elements, Term::Nil)
    }

    /// List ending in `tail`
    ///
    /// A `Nil` tail gives a proper list. A list tail is spliced in, so the
    /// result is always flattened. With no elements the tail itself is
    /// returned, as `[ | T]` is `T`.
    pub fn improper_list(mut elements: Vec<Term>, tail: Term) -> Result<Self, TermError> {
        let tail = match tail {
            Term::List(inner) => {
                elements.extend(inner.elements);
                *inner.tail
            }
            other => other,
        };
        if elements.is_empty() {
            return Ok(tail);
        }
        check_arity(elements.len())?;
        Ok(Term::List(List {
            elements,
            tail: Box::new(tail),
        }))
    }

    /// Binary term
    pub fn binary(data: impl Into<Vec<u8>>) -> Result<Self, TermError> {
        Binary::new(data).map(Term::Binary)
    }

    /// Bitstring term
    pub fn bit_binary(data: impl Into<Vec<u8>>, bits: u8) -> Result<Self, TermError> {
        BitBinary::new(data, bits).map(Term::BitBinary)
    }

    /// Map term; repeated keys keep the last value at the first position
    pub fn map(pairs: Vec<(Term, Term)>) -> Result<Self, TermError> {
        check_arity(pairs.len())?;
        Ok(Term::Map(Map::from_list(pairs)))
    }

    /// Opaque term from captured external format bytes
    pub fn opaque(bytes: impl Into<Vec<u8>>) -> Result<Self, TermError> {
        Opaque::new(bytes).map(Term::Opaque)
    }

    /// Kind of this term
    pub fn kind(&self) -> TermKind {
        match self {
            Term::Integer(_) => TermKind::Integer,
            Term::Float(_) => TermKind::Float,
            Term::Atom(_) => TermKind::Atom,
            Term::Tuple(_) => TermKind::Tuple,
            Term::Nil => TermKind::Nil,
            Term::List(_) => TermKind::List,
            Term::Binary(_) => TermKind::Binary,
            Term::BitBinary(_) => TermKind::BitBinary,
            Term::Map(_) => TermKind::Map,
            Term::Opaque(o) => TermKind::Opaque(o.kind()),
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Term::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Term::Float(_))
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Term::Atom(_))
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, Term::Tuple(_))
    }

    /// True for `[]` and for non-empty lists, proper or not
    pub fn is_list(&self) -> bool {
        matches!(self, Term::Nil | Term::List(_))
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Term::Binary(_))
    }

    pub fn is_bit_binary(&self) -> bool {
        matches!(self, Term::BitBinary(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Term::Map(_))
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, Term::Opaque(_))
    }
}

impl From<BigNumber> for Term {
    fn from(value: BigNumber) -> Self {
        Term::Integer(value)
    }
}

impl From<Float> for Term {
    fn from(value: Float) -> Self {
        Term::Float(value)
    }
}

impl From<Atom> for Term {
    fn from(value: Atom) -> Self {
        Term::Atom(value)
    }
}

impl From<Tuple> for Term {
    fn from(value: Tuple) -> Self {
        Term::Tuple(value)
    }
}

impl From<Binary> for Term {
    fn from(value: Binary) -> Self {
        Term::Binary(value)
    }
}

impl From<BitBinary> for Term {
    fn from(value: BitBinary) -> Self {
        Term::BitBinary(value)
    }
}

impl From<Map> for Term {
    fn from(value: Map) -> Self {
        Term::Map(value)
    }
}

impl From<Opaque> for Term {
    fn from(value: Opaque) -> Self {
        Term::Opaque(value)
    }
}

/// Finite IEEE-754 double
///
/// Equality and hashing compare bit patterns, so `0.0` and `-0.0` are
/// distinct values and every float survives a round trip unchanged.
#[derive(Clone, Copy, Debug)]
pub struct Float(f64);

impl Float {
    pub fn new(value: f64) -> Result<Self, TermError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(TermError::NonFiniteFloat)
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Float {}

impl Hash for Float {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Tuple of terms
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tuple {
    elements: Vec<Term>,
}

impl Tuple {
    pub fn new(elements: Vec<Term>) -> Result<Self, TermError> {
        check_arity(elements.len())?;
        Ok(Self { elements })
    }

    pub fn elements(&self) -> &[Term] {
        &self.elements
    }

    pub fn arity(&self) -> usize {
        self.elements.len()
    }

    pub fn into_elements(self) -> Vec<Term> {
        self.elements
    }
}

/// Non-empty list with an explicit tail
///
/// Built through `Term::list` and `Term::improper_list`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct List {
    elements: Vec<Term>,
    tail: Box<Term>,
}

impl List {
    pub fn elements(&self) -> &[Term] {
        &self.elements
    }

    /// `Term::Nil` for a proper list
    pub fn tail(&self) -> &Term {
        &self.tail
    }

    pub fn is_proper(&self) -> bool {
        matches!(*self.tail, Term::Nil)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false; the empty list is `Term::Nil`
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Term>, Term) {
        (self.elements, *self.tail)
    }
}

/// Kind of an opaque term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpaqueKind {
    Pid,
    Port,
    Reference,
    Function,
}

impl OpaqueKind {
    /// Kind carried by an external format tag byte
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            103 | 88 => Some(OpaqueKind::Pid),
            102 | 89 | 120 => Some(OpaqueKind::Port),
            101 | 114 | 90 => Some(OpaqueKind::Reference),
            117 | 112 | 113 => Some(OpaqueKind::Function),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OpaqueKind::Pid => "Pid",
            OpaqueKind::Port => "Port",
            OpaqueKind::Reference => "Ref",
            OpaqueKind::Function => "Fun",
        }
    }
}

/// Pid, port, reference or fun captured as raw external format bytes
///
/// The bytes start with the original tag and are re-emitted verbatim on
/// encode. Only the tag is checked here; the encoder rejects bytes that are
/// not exactly one well-formed value of that tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Opaque {
    kind: OpaqueKind,
    bytes: Vec<u8>,
}

impl Opaque {
    /// Wrap captured bytes; the first byte must be a pid, port, reference or
    /// fun tag
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, TermError> {
        let bytes = bytes.into();
        let tag = bytes.first().copied();
        let kind = tag
            .and_then(OpaqueKind::from_tag)
            .ok_or(TermError::InvalidOpaque { tag })?;
        Ok(Self { kind, bytes })
    }

    pub fn kind(&self) -> OpaqueKind {
        self.kind
    }

    /// Original tag byte
    pub fn tag(&self) -> u8 {
        self.bytes[0]
    }

    /// Captured bytes, tag included
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
