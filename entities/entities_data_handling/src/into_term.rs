//! Host Value Conversion
//!
//! `IntoTerm` converts Rust values into the closed `Term` model. It is the
//! only way host data enters the codec, so every conversion either yields an
//! encodable term or fails with a `TermError`.
//!
//! | Host value | Term |
//! |---|---|
//! | integers of every width, `char` | Integer |
//! | `bool` | atom `true` / `false` |
//! | `f32`, `f64` | Float (NaN and infinities rejected) |
//! | `&str`, `String` | Binary holding the UTF-8 bytes |
//! | `Option<T>` | the value, or atom `undefined` |
//! | `Vec<T>`, `&[T]` | proper List |
//! | tuples up to arity 4, `()` | Tuple |
//! | `HashMap`, `BTreeMap` | Map |

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

use crate::atom::Atom;
use crate::binary::Binary;
use crate::bits::BitBinary;
use crate::error::TermError;
use crate::map::Map;
use crate::term::{Float, Term, Tuple};
use entities_utilities::BigNumber;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Conversion of a host value into a term
pub trait IntoTerm {
    fn into_term(self) -> Result<Term, TermError>;
}

macro_rules! impl_into_term_integer {
    ($($t:ty),*) => {
        $(
            impl IntoTerm for $t {
                fn into_term(self) -> Result<Term, TermError> {
                    Ok(Term::Integer(BigNumber::from(self)))
                }
            }
        )*
    };
}

impl_into_term_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl IntoTerm for char {
    fn into_term(self) -> Result<Term, TermError> {
        Ok(Term::Integer(BigNumber::from(self as u32)))
    }
}

impl IntoTerm for bool {
    fn into_term(self) -> Result<Term, TermError> {
        Ok(Term::boolean(self))
    }
}

impl IntoTerm for f64 {
    fn into_term(self) -> Result<Term, TermError> {
        Float::new(self)
            .map(Term::Float)
            .map_err(|_| TermError::UnsupportedType(format!("non-finite float {}", self)))
    }
}

impl IntoTerm for f32 {
    fn into_term(self) -> Result<Term, TermError> {
        f64::from(self).into_term()
    }
}

impl IntoTerm for &str {
    fn into_term(self) -> Result<Term, TermError> {
        Binary::new(self.as_bytes()).map(Term::Binary)
    }
}

impl IntoTerm for String {
    fn into_term(self) -> Result<Term, TermError> {
        Binary::new(self.into_bytes()).map(Term::Binary)
    }
}

impl IntoTerm for () {
    fn into_term(self) -> Result<Term, TermError> {
        Ok(Term::Tuple(Tuple::default()))
    }
}

impl<T: IntoTerm> IntoTerm for Option<T> {
    fn into_term(self) -> Result<Term, TermError> {
        match self {
            Some(value) => value.into_term(),
            None => Ok(Term::Atom(Atom::undefined())),
        }
    }
}

impl<T: IntoTerm> IntoTerm for Vec<T> {
    fn into_term(self) -> Result<Term, TermError> {
        let elements = self
            .into_iter()
            .map(IntoTerm::into_term)
            .collect::<Result<Vec<_>, _>>()?;
        Term::list(elements)
    }
}

impl<T: IntoTerm + Clone> IntoTerm for &[T] {
    fn into_term(self) -> Result<Term, TermError> {
        self.to_vec().into_term()
    }
}

impl<K: IntoTerm, V: IntoTerm, S: BuildHasher> IntoTerm for HashMap<K, V, S> {
    fn into_term(self) -> Result<Term, TermError> {
        let pairs = self
            .into_iter()
            .map(|(k, v)| Ok((k.into_term()?, v.into_term()?)))
            .collect::<Result<Vec<_>, TermError>>()?;
        Term::map(pairs)
    }
}

impl<K: IntoTerm, V: IntoTerm> IntoTerm for BTreeMap<K, V> {
    fn into_term(self) -> Result<Term, TermError> {
        let pairs = self
            .into_iter()
            .map(|(k, v)| Ok((k.into_term()?, v.into_term()?)))
            .collect::<Result<Vec<_>, TermError>>()?;
        Term::map(pairs)
    }
}

macro_rules! impl_into_term_tuple {
    ($($name:ident $var:ident),+) => {
        impl<$($name: IntoTerm),+> IntoTerm for ($($name,)+) {
            fn into_term(self) -> Result<Term, TermError> {
                let ($($var,)+) = self;
                Term::tuple(vec![$($var.into_term()?),+])
            }
        }
    };
}

impl_into_term_tuple!(A a);
impl_into_term_tuple!(A a, B b);
impl_into_term_tuple!(A a, B b, C c);
impl_into_term_tuple!(A a, B b, C c, D d);

macro_rules! impl_into_term_passthrough {
    ($($t:ty),*) => {
        $(
            impl IntoTerm for $t {
                fn into_term(self) -> Result<Term, TermError> {
                    Ok(Term::from(self))
                }
            }
        )*
    };
}

impl_into_term_passthrough!(Atom, Binary, BitBinary, Map, BigNumber);

impl IntoTerm for Term {
    fn into_term(self) -> Result<Term, TermError> {
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(7u8.into_term().unwrap(), Term::integer(7));
        assert_eq!(i64::MIN.into_term().unwrap(), Term::integer(i64::MIN));
        assert_eq!('a'.into_term().unwrap(), Term::integer(97));
        assert_eq!(true.into_term().unwrap(), Term::atom("true").unwrap());
        assert_eq!(2.5f32.into_term().unwrap(), Term::float(2.5).unwrap());
        assert_eq!("hi".into_term().unwrap(), Term::binary(b"hi".to_vec()).unwrap());
    }

    #[test]
    fn test_non_finite_float_is_unsupported() {
        assert!(matches!(f64::NAN.into_term(), Err(TermError::UnsupportedType(_))));
        assert!(matches!(f32::INFINITY.into_term(), Err(TermError::UnsupportedType(_))));
    }

    #[test]
    fn test_option_and_unit() {
        assert_eq!(None::<i32>.into_term().unwrap(), Term::atom("undefined").unwrap());
        assert_eq!(Some(3).into_term().unwrap(), Term::integer(3));
        assert_eq!(().into_term().unwrap(), Term::tuple(vec![]).unwrap());
    }

    #[test]
    fn test_collections() {
        assert_eq!(Vec::<i32>::new().into_term().unwrap(), Term::Nil);
        assert_eq!(
            vec![1, 2].into_term().unwrap(),
            Term::list(vec![Term::integer(1), Term::integer(2)]).unwrap()
        );
        let slice: &[u8] = &[9];
        assert_eq!(slice.into_term().unwrap(), Term::list(vec![Term::integer(9)]).unwrap());

        let tuple = ("ok", 1, false).into_term().unwrap();
        assert_eq!(tuple.to_string(), "{<<\"ok\"/utf8>>,1,false}");

        let mut btree = BTreeMap::new();
        btree.insert(1, "one");
        btree.insert(2, "two");
        let map = btree.into_term().unwrap();
        assert_eq!(map.to_string(), "#{1 => <<\"one\"/utf8>>,2 => <<\"two\"/utf8>>}");

        let mut hash = HashMap::new();
        hash.insert("k", 1);
        assert!(hash.into_term().unwrap().is_map());
    }
}
