//! Size Calculation Module
//!
//! Provides size calculation functions for external term format encoding.
//! Based on erts_encode_ext_size() and encode_size_struct_int() from external.c
//!
//! The size is exact for the uncompressed encoding, so the encoder can size
//! its output buffer with a single allocation.

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

use crate::config::EncodeOptions;
use crate::encoding::{atom_shape, is_string};
use crate::tag_table::{Shape, TagTable};
use entities_data_handling::Term;
use infrastructure_bignum_encoding::magnitude_len;

/// Calculate the size needed to encode a term in external format
///
/// Based on `erts_encode_ext_size()` from external.c. Includes the version
/// magic byte; ignores `options.compression`, giving the uncompressed size.
pub fn encoded_size(term: &Term, options: &EncodeOptions) -> usize {
    1 + encode_size_struct_int(term, options)
}

/// Calculate the size needed to encode a term without the version byte
///
/// Based on `encode_size_struct_int()` from external.c.
pub fn encode_size_struct_int(term: &Term, options: &EncodeOptions) -> usize {
    match term {
        Term::Integer(n) => {
            if n.to_u8().is_some() {
                2
            } else if n.to_i32().is_some() {
                5
            } else {
                let len = magnitude_len(n.as_integer());
                header_len(Shape::Bignum, len) + 1 + len
            }
        }
        Term::Float(_) => 9,
        Term::Atom(atom) => header_len(atom_shape(atom), atom.len()) + atom.len(),
        Term::Tuple(tuple) => {
            header_len(Shape::Tuple, tuple.arity())
                + tuple
                    .elements()
                    .iter()
                    .map(|e| encode_size_struct_int(e, options))
                    .sum::<usize>()
        }
        Term::Nil => 1,
        Term::List(list) => {
            if is_string(list, options) {
                header_len(Shape::String, list.len()) + list.len()
            } else {
                header_len(Shape::List, list.len())
                    + list
                        .elements()
                        .iter()
                        .map(|e| encode_size_struct_int(e, options))
                        .sum::<usize>()
                    + encode_size_struct_int(list.tail(), options)
            }
        }
        Term::Binary(binary) => header_len(Shape::Binary, binary.len()) + binary.len(),
        Term::BitBinary(bits) => {
            header_len(Shape::BitBinary, bits.data().len()) + 1 + bits.data().len()
        }
        Term::Map(map) => {
            header_len(Shape::Map, map.size())
                + map
                    .iter()
                    .map(|(k, v)| encode_size_struct_int(k, options) + encode_size_struct_int(v, options))
                    .sum::<usize>()
        }
        Term::Opaque(opaque) => opaque.bytes().len(),
    }
}

/// Tag plus length field of the tag the encoder picks
fn header_len(shape: Shape, len: usize) -> usize {
    TagTable::select(shape, len).map_or(5, |info| info.header_len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode_with;

    fn check(term: &Term, options: &EncodeOptions) {
        let encoded = encode_with(term, options).unwrap();
        assert_eq!(encoded_size(term, options), encoded.len(), "size of {}", term);
    }

    #[test]
    fn test_size_matches_encoding() {
        let options = EncodeOptions::default();
        let terms = vec![
            Term::Nil,
            Term::integer(7),
            Term::integer(-7),
            Term::integer(1u64 << 40),
            Term::float(0.5).unwrap(),
            Term::atom("hello").unwrap(),
            Term::atom(vec![0xE9]).unwrap(),
            Term::binary(vec![1, 2, 3]).unwrap(),
            Term::bit_binary(vec![1, 2, 3], 5).unwrap(),
            Term::list(vec![Term::integer(1), Term::integer(2)]).unwrap(),
            Term::improper_list(vec![Term::integer(300)], Term::atom("t").unwrap()).unwrap(),
            Term::tuple((0..300).map(Term::integer).collect()).unwrap(),
            Term::map(vec![(Term::integer(1), Term::Nil)]).unwrap(),
            Term::opaque(vec![103, 119, 1, b'n', 0, 0, 0, 1, 0, 0, 0, 0, 0]).unwrap(),
        ];
        for term in &terms {
            check(term, &options);
        }
    }

    #[test]
    fn test_size_follows_string_option() {
        let bytes = Term::list(vec![Term::integer(1), Term::integer(2)]).unwrap();
        check(&bytes, &EncodeOptions::default());
        check(&bytes, &EncodeOptions::default().with_string_optimization(false));
        assert_eq!(encoded_size(&bytes, &EncodeOptions::default()), 1 + 3 + 2);
    }
}
