//! Big Number Operations
//!
//! Provides the arbitrary precision integer carried by `Term::Integer`.
//!
//! This module uses the `malachite` crate for arbitrary-precision arithmetic.
//! Every integer in the term model is a `BigNumber`, whatever tag it arrived
//! with on the wire, so `97`, `98`, `110` and `111` encodings of the same value
//! compare equal once decoded.

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

use malachite::Integer;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Big number representation using malachite's Integer
///
/// Immutable value type. Ordering is numeric ordering.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BigNumber {
    value: Integer,
}

impl BigNumber {
    /// Create a new big number from i64
    pub fn from_i64(value: i64) -> Self {
        Self {
            value: Integer::from(value),
        }
    }

    /// Create a new big number from u64
    pub fn from_u64(value: u64) -> Self {
        Self {
            value: Integer::from(value),
        }
    }

    /// Create a new big number from i128
    pub fn from_i128(value: i128) -> Self {
        Self {
            value: Integer::from(value),
        }
    }

    /// Create a new big number from u128
    pub fn from_u128(value: u128) -> Self {
        Self {
            value: Integer::from(value),
        }
    }

    /// Create from Integer
    pub fn from_integer(value: Integer) -> Self {
        Self { value }
    }

    /// Get the internal Integer value
    pub fn as_integer(&self) -> &Integer {
        &self.value
    }

    /// Consume the wrapper, returning the Integer
    pub fn into_integer(self) -> Integer {
        self.value
    }

    /// Convert to u8, if the value lies in `0..=255`
    pub fn to_u8(&self) -> Option<u8> {
        u8::try_from(&self.value).ok()
    }

    /// Convert to i32, if the value lies in the 32-bit signed range
    pub fn to_i32(&self) -> Option<i32> {
        i32::try_from(&self.value).ok()
    }

    /// Convert to i64
    ///
    /// Returns None if the value is out of range
    pub fn to_i64(&self) -> Option<i64> {
        i64::try_from(&self.value).ok()
    }

    /// Check if the number is strictly negative
    pub fn is_negative(&self) -> bool {
        self.value < 0i32
    }

    /// Check if the number is zero
    pub fn is_zero(&self) -> bool {
        self.value == 0i32
    }

    /// Left shift: x << y
    ///
    /// y can be negative for right shift
    pub fn lshift(&self, shift: i32) -> Self {
        if shift >= 0 {
            Self {
                value: &self.value << shift as u64,
            }
        } else {
            Self {
                value: &self.value >> (-shift) as u64,
            }
        }
    }
}

impl Default for BigNumber {
    fn default() -> Self {
        Self::from_i64(0)
    }
}

impl fmt::Display for BigNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

/// Error returned when a decimal string is not a valid integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid decimal integer literal")]
pub struct ParseBigNumberError;

impl FromStr for BigNumber {
    type Err = ParseBigNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Integer>()
            .map(Self::from_integer)
            .map_err(|_| ParseBigNumberError)
    }
}

impl From<Integer> for BigNumber {
    fn from(value: Integer) -> Self {
        Self::from_integer(value)
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigNumber {
                fn from(value: $t) -> Self {
                    Self {
                        value: Integer::from(value),
                    }
                }
            }
        )*
    };
}

impl_from_primitive!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_number_creation() {
        let big = BigNumber::from_i64(12345);
        assert!(!big.is_negative());
        assert!(!big.is_zero());

        let big_neg = BigNumber::from_i64(-12345);
        assert!(big_neg.is_negative());
        assert!(BigNumber::default().is_zero());
    }

    #[test]
    fn test_narrowing_conversions() {
        assert_eq!(BigNumber::from_i64(255).to_u8(), Some(255));
        assert_eq!(BigNumber::from_i64(256).to_u8(), None);
        assert_eq!(BigNumber::from_i64(-1).to_u8(), None);

        assert_eq!(BigNumber::from_i64(i32::MAX as i64).to_i32(), Some(i32::MAX));
        assert_eq!(BigNumber::from_i64(i32::MAX as i64 + 1).to_i32(), None);
        assert_eq!(BigNumber::from_i64(i32::MIN as i64).to_i32(), Some(i32::MIN));

        assert_eq!(BigNumber::from_i64(i64::MIN).to_i64(), Some(i64::MIN));
        assert_eq!(BigNumber::from_u64(u64::MAX).to_i64(), None);
    }

    #[test]
    fn test_shift_operations() {
        let a = BigNumber::from_i64(10);

        assert_eq!(a.lshift(2).to_i64(), Some(40));
        assert_eq!(a.lshift(-1).to_i64(), Some(5));
        assert_eq!(BigNumber::from_i64(1).lshift(63).to_string(), "9223372036854775808");
    }

    #[test]
    fn test_parse_and_display() {
        let n: BigNumber = "-123456789012345678901234567890".parse().unwrap();
        assert!(n.is_negative());
        assert_eq!(n.to_string(), "-123456789012345678901234567890");
        assert_eq!("12x".parse::<BigNumber>(), Err(ParseBigNumberError));
        assert_eq!(ParseBigNumberError.to_string(), "invalid decimal integer literal");
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(BigNumber::from(7u8), BigNumber::from_i64(7));
        assert_eq!(BigNumber::from(-7i16), BigNumber::from_i64(-7));
        assert_eq!(BigNumber::from(u128::MAX), BigNumber::from_u128(u128::MAX));
        assert!(BigNumber::from(-1i64) < BigNumber::from(0u64));
    }
}
