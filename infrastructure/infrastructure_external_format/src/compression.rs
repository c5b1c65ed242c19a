//! Compression Module
//!
//! Zlib support for compressed terms (tag 80), using the `flate2` crate.
//!
//! A compressed term is `131, 80, <u32 uncompressed size>, <zlib stream>`.
//! Inflation never writes more than one byte past the declared uncompressed
//! size, so a stream that inflates to more than it declared is stopped as soon
//! as it overruns. The declared size alone does not size the buffer: it starts
//! at what the input could possibly inflate to and grows as output arrives.

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

use crate::config::MAX_COMPRESSION_LEVEL;
use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use std::io::Write;
use thiserror::Error;

/// Compression error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompressionError {
    /// Deflate failed
    #[error("deflate failed: {0}")]
    Deflate(String),
    /// Corrupt zlib stream
    #[error("inflate failed: {0}")]
    Inflate(String),
    /// Input ended before the zlib stream did
    #[error("zlib stream is incomplete")]
    Incomplete,
    /// Stream inflated to a different size than declared
    #[error("zlib stream does not inflate to the declared {declared} bytes")]
    SizeMismatch { declared: usize },
}

/// Upper bound on the deflate expansion ratio
const MAX_DEFLATE_RATIO: usize = 1032;

/// Smallest step when the output buffer grows
const MIN_GROWTH: usize = 64;

/// Result type for compression operations
pub type CompressionResult<T> = Result<T, CompressionError>;

/// Zlib-compress `data` at `level` (clamped to 9)
pub fn compress(data: &[u8], level: u32) -> CompressionResult<Vec<u8>> {
    let level = Compression::new(level.min(MAX_COMPRESSION_LEVEL));
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2 + 16), level);
    encoder
        .write_all(data)
        .map_err(|e| CompressionError::Deflate(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| CompressionError::Deflate(e.to_string()))
}

/// Inflate one zlib stream from the start of `input` into exactly `declared`
/// bytes
///
/// Returns the inflated bytes and the number of input bytes the stream
/// occupied; input after the stream is left alone.
pub fn decompress(input: &[u8], declared: usize) -> CompressionResult<(Vec<u8>, usize)> {
    let mut inflater = Decompress::new(true);
    // One byte past the declared size so an overlong stream shows itself
    let limit = declared.saturating_add(1);
    let mut out = Vec::with_capacity(initial_capacity(input.len(), declared));

    loop {
        // decompress_vec only fills spare capacity
        if out.len() == out.capacity() {
            let grow = out.len().max(MIN_GROWTH).min(limit - out.len());
            out.reserve_exact(grow);
        }
        let before_in = inflater.total_in();
        let before_out = inflater.total_out();
        let consumed = before_in as usize;
        let status = inflater
            .decompress_vec(&input[consumed..], &mut out, FlushDecompress::None)
            .map_err(|e| CompressionError::Inflate(e.to_string()))?;

        if out.len() > declared {
            return Err(CompressionError::SizeMismatch { declared });
        }
        if matches!(status, Status::StreamEnd) {
            break;
        }
        if inflater.total_in() == before_in && inflater.total_out() == before_out {
            return Err(CompressionError::Incomplete);
        }
    }

    if out.len() != declared {
        return Err(CompressionError::SizeMismatch { declared });
    }
    Ok((out, inflater.total_in() as usize))
}

/// Output buffer size to start inflating `input_len` bytes with
///
/// A hostile header can declare up to 4 GiB; the first allocation never
/// exceeds what the input could inflate to.
fn initial_capacity(input_len: usize, declared: usize) -> usize {
    declared
        .saturating_add(1)
        .min(input_len.saturating_mul(MAX_DEFLATE_RATIO))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<u8> {
        b"abcabcabcabcabcabcabcabcabcabcabcabcabcabc".repeat(20)
    }

    #[test]
    fn test_round_trip() {
        let data = sample();
        let compressed = compress(&data, 6).unwrap();
        assert!(compressed.len() < data.len());
        let (inflated, consumed) = decompress(&compressed, data.len()).unwrap();
        assert_eq!(inflated, data);
        assert_eq!(consumed, compressed.len());
    }

    #[test]
    fn test_initial_capacity_follows_input() {
        assert_eq!(initial_capacity(10, 100), 101);
        assert_eq!(initial_capacity(10, u32::MAX as usize), 10 * MAX_DEFLATE_RATIO);
        assert_eq!(initial_capacity(0, 1 << 20), 0);
    }

    #[test]
    fn test_huge_declared_size_is_not_allocated() {
        let compressed = compress(b"tiny", 6).unwrap();
        assert_eq!(
            decompress(&compressed, u32::MAX as usize),
            Err(CompressionError::SizeMismatch { declared: u32::MAX as usize })
        );
    }

    #[test]
    fn test_highly_compressible_round_trip() {
        let data = vec![0u8; 1 << 20];
        let compressed = compress(&data, 9).unwrap();
        assert!(compressed.len() * 100 < data.len());
        let (inflated, consumed) = decompress(&compressed, data.len()).unwrap();
        assert_eq!(inflated.len(), data.len());
        assert!(inflated.iter().all(|&b| b == 0));
        assert_eq!(consumed, compressed.len());
    }

    #[test]
    fn test_trailing_input_is_not_consumed() {
        let data = sample();
        let mut input = compress(&data, 9).unwrap();
        let stream_len = input.len();
        input.extend_from_slice(&[131, 106]);
        let (_, consumed) = decompress(&input, data.len()).unwrap();
        assert_eq!(consumed, stream_len);
    }

    #[test]
    fn test_declared_size_mismatch() {
        let data = sample();
        let compressed = compress(&data, 6).unwrap();
        assert_eq!(
            decompress(&compressed, data.len() - 1),
            Err(CompressionError::SizeMismatch { declared: data.len() - 1 })
        );
        assert_eq!(
            decompress(&compressed, data.len() + 1),
            Err(CompressionError::SizeMismatch { declared: data.len() + 1 })
        );
    }

    #[test]
    fn test_cut_stream_is_incomplete() {
        let data = sample();
        let compressed = compress(&data, 6).unwrap();
        let cut = &compressed[..compressed.len() / 2];
        assert_eq!(decompress(cut, data.len()), Err(CompressionError::Incomplete));
    }

    #[test]
    fn test_corrupt_stream() {
        let result = decompress(&[0xFF, 0xFF, 0xFF, 0xFF], 10);
        assert!(matches!(result, Err(CompressionError::Inflate(_))));
    }
}
