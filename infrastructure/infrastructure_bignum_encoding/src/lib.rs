//! Infrastructure Layer: Bignum Encoding
//!
//! Provides big integer encoding and decoding for the external term format.
//!
//! ## Overview
//!
//! The `infrastructure_bignum_encoding` crate is part of the infrastructure layer in
//! the CLEAN architecture layout of the codec. It owns the sign byte and the
//! little-endian magnitude of SMALL_BIG_EXT (110) and LARGE_BIG_EXT (111), so
//! that the term encoder and decoder never touch byte order directly.
//!
//! ## Modules
//!
//! - **[`common`](common/index.html)**: Sign and magnitude conversion helpers for malachite
//!   `Integer` values.
//!
//! ## See Also
//!
//! - [`entities_utilities`](../../entities/entities_utilities/index.html): BigNumber type
//! - [`infrastructure_external_format`](../infrastructure_external_format/index.html): Term encoder and decoder

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

pub mod common;

pub use common::{bytes_to_integer, integer_to_bytes, magnitude_len};
