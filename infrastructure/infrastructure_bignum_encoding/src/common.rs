//! Common Encoding/Decoding Utilities
//!
//! Sign and byte order handling for big integers, shared by the external term
//! format encoder, decoder and size calculation.
//!
//! ## Encoding Format
//!
//! - **SMALL_BIG_EXT** (tag 110): 1 byte tag + 1 byte arity + 1 byte sign + n bytes (little-endian)
//! - **LARGE_BIG_EXT** (tag 111): 1 byte tag + 4 bytes arity (big-endian) + 1 byte sign + n bytes (little-endian)
//!
//! The sign byte is 0 for non-negative values and anything else for negative
//! ones. The magnitude is little-endian; minimal on encode, while the decoder
//! accepts high zero bytes.

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

use malachite::base::num::logic::traits::SignificantBits;
use malachite::Integer;

/// Chunks below this count are folded directly; larger inputs are split
const FOLD_THRESHOLD: usize = 32;

/// Number of magnitude bytes `value` needs; 0 for zero
pub fn magnitude_len(value: &Integer) -> usize {
    let bits = value.significant_bits();
    ((bits + 7) / 8) as usize
}

/// Extract the minimal little-endian magnitude and the sign of an Integer
///
/// Zero yields an empty magnitude. Linear in the magnitude: the limbs are
/// copied out as they are stored.
pub fn integer_to_bytes(value: &Integer) -> (Vec<u8>, bool) {
    let is_negative = *value < 0i32;
    let len = magnitude_len(value);

    let limbs = value.unsigned_abs_ref().to_limbs_asc();
    let mut bytes = Vec::with_capacity(len + 8);
    for limb in limbs {
        bytes.extend_from_slice(&limb.to_le_bytes());
    }
    bytes.truncate(len);

    (bytes, is_negative)
}

/// Rebuild an Integer from a little-endian magnitude and a sign
///
/// High zero bytes are accepted.
pub fn bytes_to_integer(bytes: &[u8], is_negative: bool) -> Integer {
    let chunks: Vec<u64> = bytes
        .chunks(8)
        .map(|chunk| {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            u64::from_le_bytes(word)
        })
        .collect();

    let magnitude = chunks_to_integer(&chunks);
    if is_negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Little-endian 64-bit chunks to Integer, splitting in halves so that large
/// inputs cost a logarithmic number of big multiplications
fn chunks_to_integer(chunks: &[u64]) -> Integer {
    if chunks.len() <= FOLD_THRESHOLD {
        return chunks.iter().rev().fold(Integer::from(0u32), |acc, &chunk| {
            (acc << 64u64) + Integer::from(chunk)
        });
    }
    let mid = chunks.len() / 2;
    let low = chunks_to_integer(&chunks[..mid]);
    let high = chunks_to_integer(&chunks[mid..]);
    (high << (64 * mid as u64)) + low
}
