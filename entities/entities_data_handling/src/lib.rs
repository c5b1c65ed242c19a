//! Entities Layer: Data Handling
//!
//! This crate provides the term model for the Erlang external term format codec.
//! It defines the closed set of values that can cross the wire, each built
//! through a validating constructor so that an invalid value never reaches the
//! encoder.
//!
//! ## Overview
//!
//! The `entities_data_handling` crate is part of the entities layer in the CLEAN architecture
//! layout of the codec. It depends only on `entities_utilities` for arbitrary
//! precision integers, and has no knowledge of the wire format itself.
//!
//! ## Modules
//!
//! - **[`term`](term/index.html)**: The `Term` enum together with `Float`, `Tuple`, `List`,
//!   `Opaque` and `TermKind`. Lists are stored flattened and `[]` is its own variant.
//!
//! - **[`atom`](atom/index.html)**: Atoms of at most 255 bytes, with encoding classification
//!   (7-bit ASCII, Latin1, UTF-8) and Erlang quoting on display.
//!
//! - **[`bits`](bits/index.html)**: Bitstrings whose final byte is partially significant, and
//!   the bit arithmetic helpers they rely on.
//!
//! - **[`binary`](binary/index.html)**: Byte-aligned binaries.
//!
//! - **[`map`](map/index.html)**: Maps with unique keys and stable pair order.
//!
//! - **[`into_term`](into_term/index.html)**: The `IntoTerm` conversion from Rust host values.
//!
//! - **[`print_term`](print_term/index.html)**: `Display` in Erlang source syntax.
//!
//! - **[`error`](error/index.html)**: `TermError`, returned by every constructor.
//!
//! ## Usage
//!
//! ```rust
//! use entities_data_handling::{IntoTerm, Term};
//!
//! let reply = Term::tuple(vec![
//!     Term::atom("ok").unwrap(),
//!     vec![1, 2, 3].into_term().unwrap(),
//! ])
//! .unwrap();
//! assert_eq!(reply.to_string(), "{ok,[1,2,3]}");
//!
//! let improper = Term::improper_list(vec![Term::integer(1)], Term::integer(2)).unwrap();
//! assert_eq!(improper.to_string(), "[1|2]");
//! ```
//!
//! ## See Also
//!
//! - [`entities_utilities`](../entities_utilities/index.html): `BigNumber`, the integer
//!   representation used by `Term::Integer`
//! - [`infrastructure_external_format`](../infrastructure_external_format/index.html): the
//!   encoder and decoder for these terms

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

pub mod atom;
pub mod binary;
pub mod bits;
pub mod error;
pub mod into_term;
pub mod map;
pub mod print_term;
pub mod term;

// Re-export main types for convenience
pub use atom::{Atom, AtomEncoding, MAX_ATOM_LENGTH};
pub use binary::Binary;
pub use bits::BitBinary;
pub use error::TermError;
pub use entities_utilities::BigNumber;
pub use into_term::IntoTerm;
pub use map::Map;
pub use term::{Float, List, Opaque, OpaqueKind, Term, TermKind, Tuple, MAX_ARITY};
