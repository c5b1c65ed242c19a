//! BIF (Built-In Function) Facades
//!
//! `term_to_binary`, `binary_to_term` and `external_size`, with the
//! semantics of the Erlang BIFs of the same names.

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

use entities_data_handling::Term;
use infrastructure_external_format::{
    decode_with, encode_with, encoded_size, DecodeError, DecodeOptions, EncodeError,
    EncodeOptions,
};
use log::debug;

/// `term_to_binary/1`
pub fn term_to_binary(term: &Term) -> Result<Vec<u8>, EncodeError> {
    encode_with(term, &EncodeOptions::default())
}

/// `term_to_binary/2`
pub fn term_to_binary_with(term: &Term, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    encode_with(term, options)
}

/// `binary_to_term/1`: `data` must hold exactly one term
pub fn binary_to_term(data: &[u8]) -> Result<Term, DecodeError> {
    binary_to_term_with(data, &DecodeOptions::default())
}

/// `binary_to_term/2` with decoder limits
pub fn binary_to_term_with(data: &[u8], options: &DecodeOptions) -> Result<Term, DecodeError> {
    let (term, rest) = decode_with(data, options)?;
    if !rest.is_empty() {
        debug!(
            "[etf::decode] {} bytes follow a complete term",
            rest.len()
        );
        return Err(DecodeError::TrailingBytes {
            remaining: rest.len(),
        });
    }
    Ok(term)
}

/// `binary_to_term(Bin, [used])`: the term and the number of bytes it
/// occupied; trailing bytes are allowed
pub fn binary_to_term_used(data: &[u8]) -> Result<(Term, usize), DecodeError> {
    let (term, rest) = decode_with(data, &DecodeOptions::default())?;
    Ok((term, data.len() - rest.len()))
}

/// `erlang:external_size/1`: an upper bound on `term_to_binary/1` output,
/// exact when no compression is requested
pub fn external_size(term: &Term) -> usize {
    encoded_size(term, &EncodeOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_to_binary_nil() {
        assert_eq!(term_to_binary(&Term::Nil).unwrap(), vec![131, 106]);
    }

    #[test]
    fn test_binary_to_term_rejects_trailing_bytes() {
        assert_eq!(
            binary_to_term(&[131, 106, 0, 0]),
            Err(DecodeError::TrailingBytes { remaining: 2 })
        );
        assert_eq!(binary_to_term(&[131, 106]), Ok(Term::Nil));
    }

    #[test]
    fn test_binary_to_term_used() {
        let (term, used) = binary_to_term_used(&[131, 97, 5, 131, 106]).unwrap();
        assert_eq!(term, Term::integer(5));
        assert_eq!(used, 3);
    }

    #[test]
    fn test_external_size() {
        let term = Term::atom("hello").unwrap();
        assert_eq!(external_size(&term), term_to_binary(&term).unwrap().len());
    }

    #[test]
    fn test_term_to_binary_with_compression() {
        let term = Term::binary(vec![7u8; 1000]).unwrap();
        let options = EncodeOptions::default().with_compression(9);
        let encoded = term_to_binary_with(&term, &options).unwrap();
        assert_eq!(encoded[1], 80);
        assert!(encoded.len() < external_size(&term));
        assert_eq!(binary_to_term(&encoded).unwrap(), term);
    }
}
