//! Print Term Module
//!
//! Erlang source syntax for terms: `{ok,[1,2|3]}`, `#{a => 1}`, `<<1,2:3>>`.
//! Opaque terms print as `#Pid<...>`, `#Port<...>`, `#Ref<...>` or `#Fun<...>`
//! with their captured bytes in hex, since their contents are not interpreted.

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

use crate::map::Map;
use crate::term::{Float, List, Opaque, Term, Tuple};
use std::fmt;

fn write_separated<'a, I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator<Item = &'a Term>,
{
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Integer(n) => write!(f, "{}", n),
            Term::Float(x) => write!(f, "{}", x),
            Term::Atom(a) => write!(f, "{}", a),
            Term::Tuple(t) => write!(f, "{}", t),
            Term::Nil => write!(f, "[]"),
            Term::List(l) => write!(f, "{}", l),
            Term::Binary(b) => write!(f, "{}", b),
            Term::BitBinary(b) => write!(f, "{}", b),
            Term::Map(m) => write!(f, "{}", m),
            Term::Opaque(o) => write!(f, "{}", o),
        }
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Erlang always shows a fractional part: 1.0, 1.0e100
        let text = format!("{:?}", self.value());
        match text.find('e') {
            Some(pos) if !text[..pos].contains('.') => {
                write!(f, "{}.0{}", &text[..pos], &text[pos..])
            }
            _ => write!(f, "{}", text),
        }
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        write_separated(f, self.elements())?;
        write!(f, "}}")
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        write_separated(f, self.elements())?;
        if !self.is_proper() {
            write!(f, "|{}", self.tail())?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{} => {}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}<", self.kind().name())?;
        for byte in self.bytes() {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> Term {
        Term::integer(v)
    }

    #[test]
    fn test_print_scalars() {
        assert_eq!(int(-42).to_string(), "-42");
        assert_eq!(Term::float(1.5).unwrap().to_string(), "1.5");
        assert_eq!(Term::float(1.0).unwrap().to_string(), "1.0");
        assert_eq!(Term::float(1e100).unwrap().to_string(), "1.0e100");
        assert_eq!(Term::atom("ok").unwrap().to_string(), "ok");
        assert_eq!(Term::Nil.to_string(), "[]");
    }

    #[test]
    fn test_print_containers() {
        let list = Term::list(vec![int(1), int(2)]).unwrap();
        let tuple = Term::tuple(vec![Term::atom("ok").unwrap(), list]).unwrap();
        assert_eq!(tuple.to_string(), "{ok,[1,2]}");
        assert_eq!(Term::tuple(vec![]).unwrap().to_string(), "{}");

        let improper = Term::improper_list(vec![int(1), int(2)], int(3)).unwrap();
        assert_eq!(improper.to_string(), "[1,2|3]");

        let map = Term::map(vec![(Term::atom("a").unwrap(), int(1))]).unwrap();
        assert_eq!(map.to_string(), "#{a => 1}");
    }

    #[test]
    fn test_print_bitstrings() {
        assert_eq!(Term::bit_binary(vec![1, 0b0100_0000], 3).unwrap().to_string(), "<<1,2:3>>");
        assert_eq!(Term::binary(vec![0, 7]).unwrap().to_string(), "<<0,7>>");
    }

    #[test]
    fn test_print_opaque() {
        let port = Term::opaque(vec![102, 0xAB]).unwrap();
        assert_eq!(port.to_string(), "#Port<66ab>");
    }
}
