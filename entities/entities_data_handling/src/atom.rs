//! Atom Module
//!
//! Provides the `Atom` value type. An atom is a short symbolic name with its
//! own wire identity, distinct from binaries and character lists even when the
//! bytes are the same.
//!
//! ## Limits
//!
//! - Maximum bytes per atom: 255 (`MAX_ATOM_LENGTH`)
//!
//! ## Encoding Support
//!
//! Atom content is kept as raw bytes. `Atom::encoding` classifies the content
//! so that the encoder can choose between the UTF-8 atom tags and the Latin-1
//! one:
//!
//! - **7-bit ASCII**: only bytes in the range 0x00-0x7F
//! - **UTF-8**: well-formed UTF-8 containing at least one multi-byte sequence
//! - **Latin1**: anything else; every byte is one ISO-8859-1 character
//!
//! An atom read from a Latin-1 tag keeps that reading through `Atom::latin1`,
//! so bytes such as `C3 A9` stay the two characters `Ã©` and are written back
//! with a Latin-1 tag.
//!
//! ## Examples
//!
//! ```rust
//! use entities_data_handling::{Atom, AtomEncoding};
//!
//! let ok = Atom::new("ok").unwrap();
//! assert_eq!(ok.as_bytes(), b"ok");
//! assert_eq!(ok.encoding(), AtomEncoding::SevenBitAscii);
//! assert_eq!(ok.to_string(), "ok");
//!
//! let quoted = Atom::new("Hello World").unwrap();
//! assert_eq!(quoted.to_string(), "'Hello World'");
//!
//! assert!(Atom::new(vec![b'a'; 256]).is_err());
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

use crate::error::TermError;
use std::fmt;
use std::str::FromStr;

/// Maximum number of bytes in an atom
pub const MAX_ATOM_LENGTH: usize = 255;

/// Words that must be quoted when an atom is printed
const RESERVED_WORDS: &[&str] = &[
    "after", "and", "andalso", "band", "begin", "bnot", "bor", "bsl", "bsr", "bxor", "case",
    "catch", "cond", "div", "else", "end", "fun", "if", "let", "maybe", "not", "of", "or",
    "orelse", "receive", "rem", "try", "when", "xor",
];

/// Atom encoding types
///
/// Classification of atom content, used to select the atom tag on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomEncoding {
    /// Only bytes 0x00-0x7F
    SevenBitAscii,
    /// ISO-8859-1, one byte per character
    Latin1,
    /// Well-formed UTF-8 with multi-byte characters
    Utf8,
}

/// Erlang atom
///
/// Equality, hashing and ordering are by byte content, then by text
/// encoding: a Latin-1 atom and a UTF-8 atom with the same bytes are
/// different atoms.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom {
    name: Vec<u8>,
    // Set only for non-ASCII bytes that would also read as UTF-8
    latin1: bool,
}

impl Atom {
    /// Create an atom, rejecting names longer than `MAX_ATOM_LENGTH` bytes
    pub fn new(name: impl Into<Vec<u8>>) -> Result<Self, TermError> {
        let name = name.into();
        if name.len() > MAX_ATOM_LENGTH {
            return Err(TermError::AtomTooLong { len: name.len() });
        }
        Ok(Self { name, latin1: false })
    }

    /// Create an atom whose bytes are Latin-1 characters
    pub fn latin1(name: impl Into<Vec<u8>>) -> Result<Self, TermError> {
        let mut atom = Self::new(name)?;
        atom.latin1 = !atom.name.is_ascii() && std::str::from_utf8(&atom.name).is_ok();
        Ok(atom)
    }

    /// The atom `true`
    pub fn true_atom() -> Self {
        Self {
            name: b"true".to_vec(),
            latin1: false,
        }
    }

    /// The atom `false`
    pub fn false_atom() -> Self {
        Self {
            name: b"false".to_vec(),
            latin1: false,
        }
    }

    /// The atom `undefined`
    pub fn undefined() -> Self {
        Self {
            name: b"undefined".to_vec(),
            latin1: false,
        }
    }

    /// Raw atom bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.name
    }

    /// Atom content as `&str`, if it is UTF-8 text
    pub fn as_str(&self) -> Option<&str> {
        if self.latin1 {
            return None;
        }
        std::str::from_utf8(&self.name).ok()
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.name.len()
    }

    /// True for the empty atom `''`
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Classify the atom content
    pub fn encoding(&self) -> AtomEncoding {
        if self.name.is_ascii() {
            AtomEncoding::SevenBitAscii
        } else if !self.latin1 && std::str::from_utf8(&self.name).is_ok() {
            AtomEncoding::Utf8
        } else {
            AtomEncoding::Latin1
        }
    }

    /// Content as characters: UTF-8 when well formed, otherwise Latin-1
    fn chars(&self) -> Vec<char> {
        match self.as_str() {
            Some(s) => s.chars().collect(),
            None => self.name.iter().map(|&b| b as char).collect(),
        }
    }

    fn needs_quotes(chars: &[char]) -> bool {
        let Some(first) = chars.first() else {
            return true;
        };
        if !first.is_ascii_lowercase() {
            return true;
        }
        if !chars
            .iter()
            .all(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '@')
        {
            return true;
        }
        let word: String = chars.iter().collect();
        RESERVED_WORDS.contains(&word.as_str())
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chars = self.chars();
        if !Self::needs_quotes(&chars) {
            return chars.iter().try_for_each(|c| write!(f, "{}", c));
        }
        write!(f, "'")?;
        for c in chars {
            match c {
                '\'' => write!(f, "\\'")?,
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\t' => write!(f, "\\t")?,
                c if c.is_control() => write!(f, "\\x{{{:X}}}", c as u32)?,
                c => write!(f, "{}", c)?,
            }
        }
        write!(f, "'")
    }
}

impl FromStr for Atom {
    type Err = TermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Atom {
    type Error = TermError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Atom {
    type Error = TermError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<Vec<u8>> for Atom {
    type Error = TermError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_length_limit() {
        assert!(Atom::new(vec![b'x'; MAX_ATOM_LENGTH]).is_ok());
        assert_eq!(
            Atom::new(vec![b'x'; MAX_ATOM_LENGTH + 1]),
            Err(TermError::AtomTooLong { len: 256 })
        );
        assert!(Atom::new("").unwrap().is_empty());
    }

    #[test]
    fn test_atom_encoding_classification() {
        assert_eq!(Atom::new("hello").unwrap().encoding(), AtomEncoding::SevenBitAscii);
        assert_eq!(Atom::new("héllo").unwrap().encoding(), AtomEncoding::Utf8);
        assert_eq!(Atom::new(vec![b'h', 0xE9]).unwrap().encoding(), AtomEncoding::Latin1);
    }

    #[test]
    fn test_latin1_atom_keeps_its_reading() {
        let latin1 = Atom::latin1(vec![0xC3, 0xA9]).unwrap();
        let utf8 = Atom::new("é").unwrap();
        assert_eq!(latin1.as_bytes(), utf8.as_bytes());
        assert_eq!(latin1.encoding(), AtomEncoding::Latin1);
        assert_ne!(latin1, utf8);
        assert_eq!(latin1.as_str(), None);
        assert_eq!(latin1.to_string(), "'Ã©'");

        // Only bytes that could be misread as UTF-8 carry the marker
        assert_eq!(Atom::latin1("ok").unwrap(), Atom::new("ok").unwrap());
        assert_eq!(Atom::latin1(vec![0xE9]).unwrap(), Atom::new(vec![0xE9]).unwrap());
        assert!(Atom::latin1(vec![b'x'; MAX_ATOM_LENGTH + 1]).is_err());
    }

    #[test]
    fn test_atom_display_unquoted() {
        assert_eq!(Atom::new("ok").unwrap().to_string(), "ok");
        assert_eq!(Atom::new("node@host").unwrap().to_string(), "node@host");
        assert_eq!(Atom::new("a_1").unwrap().to_string(), "a_1");
    }

    #[test]
    fn test_atom_display_quoted() {
        assert_eq!(Atom::new("").unwrap().to_string(), "''");
        assert_eq!(Atom::new("Upper").unwrap().to_string(), "'Upper'");
        assert_eq!(Atom::new("it's").unwrap().to_string(), "'it\\'s'");
        assert_eq!(Atom::new("receive").unwrap().to_string(), "'receive'");
        assert_eq!(Atom::new(vec![0xE9]).unwrap().to_string(), "'é'");
    }

    #[test]
    fn test_atom_ordering_by_bytes() {
        let a = Atom::new("abc").unwrap();
        let b = Atom::new("abd").unwrap();
        let c = Atom::new("ab").unwrap();
        assert!(a < b);
        assert!(c < a);
    }

    #[test]
    fn test_atom_conversions() {
        let from_str: Atom = "error".parse().unwrap();
        let from_string = Atom::try_from(String::from("error")).unwrap();
        assert_eq!(from_str, from_string);
        assert_eq!(from_str.as_str(), Some("error"));
        assert_eq!(Atom::true_atom().as_bytes(), b"true");
    }
}
