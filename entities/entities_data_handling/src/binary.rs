//! Binary Operations Module
//!
//! Provides the byte-aligned binary value for Erlang terms.

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

use crate::error::TermError;
use std::fmt;

/// Binary data structure
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Binary {
    data: Vec<u8>,
}

impl Binary {
    /// Create a new binary
    ///
    /// Fails with `ArityOverflow` when the data does not fit a 32-bit length.
    pub fn new(data: impl Into<Vec<u8>>) -> Result<Self, TermError> {
        let data = data.into();
        if data.len() > u32::MAX as usize {
            return Err(TermError::ArityOverflow { len: data.len() });
        }
        Ok(Self { data })
    }

    /// Get binary data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for `<<>>`
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume the binary, returning its bytes
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    fn is_printable(&self) -> bool {
        !self.data.is_empty()
            && std::str::from_utf8(&self.data)
                .map(|s| s.chars().all(|c| !c.is_control() || c == '\n' || c == '\t'))
                .unwrap_or(false)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_printable() {
            // Validity was checked by is_printable
            let text = String::from_utf8_lossy(&self.data);
            return write!(f, "<<{:?}/utf8>>", text);
        }
        write!(f, "<<")?;
        for (i, byte) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", byte)?;
        }
        write!(f, ">>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_creation() {
        let data = vec![1, 2, 3, 4];
        let binary = Binary::new(data.clone()).unwrap();
        assert_eq!(binary.data(), &data[..]);
        assert_eq!(binary.len(), 4);
        assert!(Binary::default().is_empty());
    }

    #[test]
    fn test_binary_display() {
        assert_eq!(Binary::new(vec![1, 2, 255]).unwrap().to_string(), "<<1,2,255>>");
        assert_eq!(Binary::new("hi").unwrap().to_string(), "<<\"hi\"/utf8>>");
        assert_eq!(Binary::default().to_string(), "<<>>");
    }
}
