//! API Facades Layer
//!
//! Public entry point for encoding and decoding Erlang terms in the External
//! Term Format. Re-exports the term model, the codec options and errors, and
//! offers the BIF-style functions `term_to_binary` and `binary_to_term`.
//!
//! ```
//! use erlterms::{binary_to_term, term_to_binary, Term};
//!
//! let term = Term::tuple(vec![Term::atom("ok").unwrap(), Term::integer(42)]).unwrap();
//! let bytes = term_to_binary(&term).unwrap();
//! assert_eq!(bytes, vec![131, 104, 2, 119, 2, b'o', b'k', 97, 42]);
//! assert_eq!(binary_to_term(&bytes).unwrap(), term);
//! ```
//!
//! For framed streams use [`decode`] or [`decode_iter`], which return the
//! bytes after each term, and retry on [`DecodeError::is_truncated`].

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

pub mod bif_facades;

pub use bif_facades::*;

pub use entities_data_handling::{
    Atom, AtomEncoding, BigNumber, Binary, BitBinary, Float, IntoTerm, List, Map, Opaque,
    OpaqueKind, Term, TermError, TermKind, Tuple, MAX_ARITY, MAX_ATOM_LENGTH,
};
pub use infrastructure_external_format::{
    decode, decode_iter, decode_with, encode, encode_value, encode_with, encoded_size,
    DecodeError, DecodeIter, DecodeOptions, EncodeError, EncodeOptions, TagInfo, TagTable,
    VERSION_MAGIC,
};
