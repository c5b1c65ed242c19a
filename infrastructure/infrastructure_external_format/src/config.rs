//! Codec Options
//!
//! Options for the encoder and the decoder. Both implement `Default` with the
//! values `term_to_binary/1` and `binary_to_term/1` behave with, and offer
//! `with_*` builders. With the `serde` feature they can be loaded from the
//! configuration of whatever transport carries the terms.

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

use crate::constants::MAX_STRING_LENGTH;

/// Default bound on decoder nesting
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Default bound on the bytes a single decoded term may span (256 MiB)
pub const DEFAULT_MAX_SIZE: usize = 256 * 1024 * 1024;

/// Highest zlib level
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Encoder options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncodeOptions {
    /// Emit proper lists of bytes as STRING_EXT
    pub string_optimization: bool,
    /// Longest list emitted as STRING_EXT, at most 65535
    pub max_string_length: usize,
    /// Zlib level 0..=9; `None` disables compression
    pub compression: Option<u32>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            string_optimization: true,
            max_string_length: MAX_STRING_LENGTH,
            compression: None,
        }
    }
}

impl EncodeOptions {
    pub fn with_string_optimization(mut self, enabled: bool) -> Self {
        self.string_optimization = enabled;
        self
    }

    /// Values above 65535 are clamped
    pub fn with_max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = max.min(MAX_STRING_LENGTH);
        self
    }

    /// Compress with the given zlib level; levels above 9 are clamped
    pub fn with_compression(mut self, level: u32) -> Self {
        self.compression = Some(level.min(MAX_COMPRESSION_LEVEL));
        self
    }

    pub fn without_compression(mut self) -> Self {
        self.compression = None;
        self
    }

    /// Effective STRING_EXT bound, whatever was deserialized
    pub(crate) fn string_limit(&self) -> usize {
        if self.string_optimization {
            self.max_string_length.min(MAX_STRING_LENGTH)
        } else {
            0
        }
    }
}

/// Decoder options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeOptions {
    /// Deepest nesting accepted; the outermost term is at depth 0
    pub max_depth: usize,
    /// Most bytes a single term may span, version byte included; for a
    /// compressed term, its inflated size
    pub max_size: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let enc = EncodeOptions::default();
        assert!(enc.string_optimization);
        assert_eq!(enc.max_string_length, 65535);
        assert_eq!(enc.compression, None);

        let dec = DecodeOptions::default();
        assert_eq!(dec.max_depth, 512);
        assert_eq!(dec.max_size, 256 * 1024 * 1024);
    }

    #[test]
    fn test_builders_clamp() {
        let enc = EncodeOptions::default()
            .with_max_string_length(1 << 20)
            .with_compression(12);
        assert_eq!(enc.max_string_length, 65535);
        assert_eq!(enc.compression, Some(9));
        assert_eq!(enc.without_compression().compression, None);
        assert_eq!(enc.with_string_optimization(false).string_limit(), 0);
    }

    #[test]
    fn test_string_limit_clamps_deserialized_values() {
        let enc = EncodeOptions {
            max_string_length: usize::MAX,
            ..EncodeOptions::default()
        };
        assert_eq!(enc.string_limit(), 65535);
    }
}
