//! Entities Layer: Utilities
//!
//! Provides the arbitrary precision integer type used by the term model.
//!
//! ## Modules
//!
//! - **[`big`](big/index.html)**: `BigNumber`, a thin value wrapper around
//!   `malachite::Integer` with the conversions the codec needs when choosing
//!   between the small, 32-bit and bignum integer encodings.

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

pub mod big;

pub use big::{BigNumber, ParseBigNumberError};
