//! Infrastructure Layer: External Term Format
//!
//! Encodes terms into, and decodes terms from, the Erlang External Term
//! Format (ETF), the byte layout behind `term_to_binary/1`,
//! `binary_to_term/1` and the distribution protocol.
//!
//! ## Overview
//!
//! Every encoded term starts with the version byte 131, followed by one
//! tagged term body. Each tag byte selects a term kind and the width of its
//! length field; the [`TagTable`] holds that mapping for both directions.
//!
//! ## Modules
//!
//! - **[`encoding`](encoding/index.html)**: Term to bytes
//!   (enc_term_int, enc_atom, erts_encode_ext)
//!
//! - **[`decoding`](decoding/index.html)**: Bytes to term, with admission
//!   limits (dec_term, dec_atom, erts_decode_ext)
//!
//! - **[`size_calculation`](size_calculation/index.html)**: Exact encoded size
//!   (erts_encode_ext_size, encode_size_struct_int)
//!
//! - **[`tag_table`](tag_table/index.html)**: Tag byte to shape, length width
//!   and element rule
//!
//! - **[`compression`](compression/index.html)**: Zlib envelope (tag 80)
//!
//! - **[`config`](config/index.html)**: `EncodeOptions` and `DecodeOptions`
//!
//! ## Architecture
//!
//! This crate is based on the C implementation in `external.c`. It depends on:
//! - `entities_data_handling` for term types
//! - `infrastructure_bignum_encoding` for SMALL_BIG_EXT/LARGE_BIG_EXT magnitudes
//! - `flate2` for the compressed envelope
//!
//! ## See Also
//!
//! - [`erlterms`](../erlterms/index.html): `term_to_binary` / `binary_to_term`

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

pub mod compression;
pub mod config;
pub mod constants;
pub mod decoding;
pub mod encoding;
pub mod size_calculation;
pub mod tag_table;

pub use config::{DecodeOptions, EncodeOptions, DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE};
pub use constants::VERSION_MAGIC;
pub use decoding::{decode, decode_iter, decode_with, DecodeError, DecodeIter};
pub use encoding::{encode, encode_value, encode_with, EncodeError};
pub use size_calculation::{encode_size_struct_int, encoded_size};
pub use tag_table::{TagInfo, TagTable};
