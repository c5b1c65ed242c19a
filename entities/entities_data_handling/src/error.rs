//! Term Construction Errors
//!
//! Every term value is built through a validating constructor. `TermError`
//! is what those constructors return when a value would not be encodable.

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

use thiserror::Error;

/// Term construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermError {
    /// Atom text longer than 255 bytes
    #[error("atom is {len} bytes long, the limit is 255")]
    AtomTooLong { len: usize },
    /// Bit count outside 1..=7, or a bit count without a final byte
    #[error("invalid bit count {bits} for a bitstring of {len} bytes")]
    InvalidBitCount { bits: u8, len: usize },
    /// Element or byte count does not fit the 32-bit length field
    #[error("{len} elements exceed the maximum arity of 4294967295")]
    ArityOverflow { len: usize },
    /// NaN or infinity
    #[error("NaN and infinite floats have no external representation")]
    NonFiniteFloat,
    /// Captured bytes do not start with a pid, port, reference or fun tag
    #[error("opaque term must start with a pid, port, reference or fun tag, found {tag:?}")]
    InvalidOpaque { tag: Option<u8> },
    /// Host value with no term representation
    #[error("unsupported host type: {0}")]
    UnsupportedType(String),
}
