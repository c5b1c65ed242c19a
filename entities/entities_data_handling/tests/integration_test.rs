//! Integration tests for entities_data_handling crate
//!
//! These tests verify that the term model types work together correctly
//! through the public API.

use entities_data_handling::*;
use std::collections::HashSet;

fn int(v: i64) -> Term {
    Term::integer(v)
}

#[test]
fn test_terms_as_hash_keys() {
    let mut seen = HashSet::new();
    seen.insert(int(1));
    seen.insert(Term::atom("a").unwrap());
    seen.insert(Term::float(0.0).unwrap());
    seen.insert(Term::float(-0.0).unwrap());
    seen.insert(Term::list(vec![int(1)]).unwrap());
    seen.insert(Term::list(vec![int(1)]).unwrap());
    assert_eq!(seen.len(), 5);

    let map_a = Term::map(vec![(int(1), int(2)), (int(3), int(4))]).unwrap();
    let map_b = Term::map(vec![(int(3), int(4)), (int(1), int(2))]).unwrap();
    seen.insert(map_a);
    assert!(seen.contains(&map_b));
}

#[test]
fn test_atom_binary_and_list_are_distinct() {
    let atom = Term::atom("abc").unwrap();
    let binary = Term::binary(b"abc".to_vec()).unwrap();
    let chars = Term::list(b"abc".iter().map(|&b| Term::integer(b)).collect()).unwrap();
    assert_ne!(atom, binary);
    assert_ne!(binary, chars);
    assert_ne!(atom, chars);
}

#[test]
fn test_term_error_surfaces_from_nested_construction() {
    let too_long = vec![b'a'; MAX_ATOM_LENGTH + 1];
    let result = vec![Term::integer(1)]
        .into_iter()
        .map(Ok)
        .chain(std::iter::once(Term::atom(too_long)))
        .collect::<Result<Vec<_>, _>>()
        .and_then(Term::tuple);
    assert_eq!(result, Err(TermError::AtomTooLong { len: 256 }));
}

#[test]
fn test_host_values_build_nested_terms() {
    let value = (
        "user",
        vec![Some(1u32), None],
        (true, 'x', 1.25f64),
    )
        .into_term()
        .unwrap();
    assert_eq!(
        value.to_string(),
        "{<<\"user\"/utf8>>,[1,undefined],{true,120,1.25}}"
    );
}

#[test]
fn test_list_normalisation_and_parts() {
    let tail_list = Term::improper_list(vec![int(2), int(3)], Term::atom("end").unwrap()).unwrap();
    let list = Term::improper_list(vec![int(1)], tail_list).unwrap();
    let Term::List(list) = list else {
        panic!("expected a list");
    };
    assert_eq!(list.len(), 3);
    assert!(!list.is_proper());
    let (elements, tail) = list.into_parts();
    assert_eq!(elements, vec![int(1), int(2), int(3)]);
    assert_eq!(tail, Term::atom("end").unwrap());
}

#[test]
fn test_bitstring_and_opaque_kinds() {
    let bits = Term::bit_binary(vec![0xFF, 0xFF], 1).unwrap();
    match &bits {
        Term::BitBinary(b) => {
            assert_eq!(b.data(), &[0xFF, 0x80]);
            assert_eq!(b.bits(), 1);
        }
        other => panic!("Expected BitBinary, got {:?}", other),
    }

    let reference = Term::opaque(vec![90, 0, 1]).unwrap();
    assert_eq!(reference.kind(), TermKind::Opaque(OpaqueKind::Reference));
    assert!(reference.to_string().starts_with("#Ref<"));
}
