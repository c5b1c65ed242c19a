//! Bitstring Module
//!
//! Provides `BitBinary`, a bitstring whose length in bits is not a multiple
//! of eight, together with the small bit arithmetic helpers it relies on.
//!
//! A `BitBinary` is a byte payload plus a `bits` count in `1..=7`. All bytes
//! but the last are fully significant; only the `bits` most significant bits of
//! the last byte belong to the value. The remaining low bits are cleared when
//! the value is built, so two bitstrings with the same significant bits are
//! equal regardless of what garbage their source buffers carried.
//!
//! ## Examples
//!
//! ```rust
//! use entities_data_handling::BitBinary;
//!
//! let b = BitBinary::new(vec![0xFF, 0xBF], 1).unwrap();
//! assert_eq!(b.data(), &[0xFF, 0x80]);
//! assert_eq!(b.bits(), 1);
//! assert_eq!(b.bit_size(), 9);
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

/// Largest payload a 32-bit length field can describe
const MAX_PAYLOAD_LEN: usize = u32::MAX as usize;

/// Calculate the number of bytes needed to store `bits` bits
///
/// Equivalent to `NBYTES(x)` macro in C
pub fn nbytes(bits: u64) -> usize {
    ((bits + 7) >> 3) as usize
}

/// Calculate the number of bits in `bytes` bytes
///
/// Equivalent to `NBITS(x)` macro in C
pub fn nbits(bytes: usize) -> u64 {
    (bytes as u64) << 3
}

/// Mask selecting the `bits` most significant bits of a byte
///
/// `bits` must be in `0..=8`.
pub fn high_bits_mask(bits: u8) -> u8 {
    match bits {
        0 => 0,
        b if b >= 8 => 0xFF,
        b => 0xFFu8 << (8 - b),
    }
}

/// Erlang bitstring whose length in bits is not a multiple of 8
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitBinary {
    data: Vec<u8>,
    bits: u8,
}

impl BitBinary {
    /// Create a bitstring from a payload and the number of significant bits
    /// in its final byte
    ///
    /// Fails with `InvalidBitCount` when `bits` is outside `1..=7` or the
    /// payload is empty, and with `ArityOverflow` when the payload does not fit
    /// a 32-bit length field.
    pub fn new(data: impl Into<Vec<u8>>, bits: u8) -> Result<Self, TermError> {
        let mut data = data.into();
        if !(1..=7).contains(&bits) || data.is_empty() {
            return Err(TermError::InvalidBitCount {
                bits,
                len: data.len(),
            });
        }
        if data.len() > MAX_PAYLOAD_LEN {
            return Err(TermError::ArityOverflow { len: data.len() });
        }
        if let Some(last) = data.last_mut() {
            *last &= high_bits_mask(bits);
        }
        Ok(Self { data, bits })
    }

    /// Payload bytes, final byte included
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Significant bits in the final byte (1..=7)
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Total length in bits
    pub fn bit_size(&self) -> u64 {
        nbits(self.data.len() - 1) + u64::from(self.bits)
    }

    /// Consume the bitstring, returning the payload and the bit count
    pub fn into_parts(self) -> (Vec<u8>, u8) {
        (self.data, self.bits)
    }
}

impl fmt::Display for BitBinary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (last, full) = match self.data.split_last() {
            Some(split) => split,
            None => return write!(f, "<<>>"),
        };
        write!(f, "<<")?;
        for byte in full {
            write!(f, "{},", byte)?;
        }
        write!(f, "{}:{}>>", last >> (8 - self.bits), self.bits)
    }
}
