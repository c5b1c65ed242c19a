//! Concurrency tests for erlterms
//!
//! Encoding and decoding share no mutable state, so threads working on their
//! own term sets must get exactly the single-threaded results. The generated
//! terms include captured pids and references and UTF-8 atoms, so the opaque
//! check and the atom tag choice run under contention too.

use erlterms::{binary_to_term, term_to_binary, BigNumber, Term};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const TERMS_PER_THREAD: usize = 200;

/// Non-ASCII characters for UTF-8 atoms
const WIDE_CHARS: &[char] = &['é', 'ß', 'λ', 'ж', '€', '漢'];

fn random_node(rng: &mut fastrand::Rng) -> Vec<u8> {
    let mut node = vec![119];
    let name = format!("n{}@host", rng.u16(..));
    node.push(name.len() as u8);
    node.extend_from_slice(name.as_bytes());
    node
}

/// A NEW_PID_EXT as a remote node would send it
fn random_pid(rng: &mut fastrand::Rng) -> Term {
    let mut bytes = vec![88];
    bytes.extend(random_node(rng));
    for _ in 0..3 {
        bytes.extend_from_slice(&rng.u32(..).to_be_bytes());
    }
    Term::opaque(bytes).unwrap()
}

/// A NEWER_REFERENCE_EXT with one to five id words
fn random_reference(rng: &mut fastrand::Rng) -> Term {
    let words = rng.u16(1..=5);
    let mut bytes = vec![90];
    bytes.extend_from_slice(&words.to_be_bytes());
    bytes.extend(random_node(rng));
    bytes.extend_from_slice(&rng.u32(..).to_be_bytes());
    for _ in 0..words {
        bytes.extend_from_slice(&rng.u32(..).to_be_bytes());
    }
    Term::opaque(bytes).unwrap()
}

fn random_utf8_atom(rng: &mut fastrand::Rng) -> Term {
    let name: String = (0..rng.usize(1..20))
        .map(|_| {
            if rng.bool() {
                WIDE_CHARS[rng.usize(..WIDE_CHARS.len())]
            } else {
                rng.lowercase()
            }
        })
        .collect();
    Term::atom(name).unwrap()
}

fn random_term(rng: &mut fastrand::Rng, depth: usize) -> Term {
    let leaf_only = depth == 0;
    match rng.u8(0..if leaf_only { 10 } else { 14 }) {
        0 => Term::integer(rng.i64(..)),
        1 => Term::integer(BigNumber::from(rng.i32(..)).lshift(rng.i32(0..300))),
        2 => Term::float(rng.f64() * 1e6 - 5e5).unwrap(),
        3 => {
            let len = rng.usize(0..12);
            Term::atom((0..len).map(|_| rng.lowercase() as u8).collect::<Vec<u8>>()).unwrap()
        }
        4 => Term::binary((0..rng.usize(0..40)).map(|_| rng.u8(..)).collect::<Vec<u8>>()).unwrap(),
        5 => {
            let data: Vec<u8> = (0..rng.usize(1..6)).map(|_| rng.u8(..)).collect();
            Term::bit_binary(data, rng.u8(1..8)).unwrap()
        }
        6 => Term::Nil,
        7 => random_pid(rng),
        8 => random_reference(rng),
        9 => random_utf8_atom(rng),
        10 => {
            let elements = (0..rng.usize(0..5)).map(|_| random_term(rng, depth - 1)).collect();
            Term::tuple(elements).unwrap()
        }
        11 => {
            let elements = (0..rng.usize(0..5)).map(|_| random_term(rng, depth - 1)).collect();
            Term::list(elements).unwrap()
        }
        12 => {
            let elements = (0..rng.usize(1..4)).map(|_| random_term(rng, depth - 1)).collect();
            Term::improper_list(elements, Term::integer(rng.u8(..))).unwrap()
        }
        _ => {
            let pairs = (0..rng.usize(0..4))
                .map(|_| (random_term(rng, depth - 1), random_term(rng, depth - 1)))
                .collect();
            Term::map(pairs).unwrap()
        }
    }
}

fn term_set(seed: u64) -> Vec<Term> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..TERMS_PER_THREAD).map(|_| random_term(&mut rng, 4)).collect()
}

fn encode_all(terms: &[Term]) -> Vec<Vec<u8>> {
    terms.iter().map(|t| term_to_binary(t).unwrap()).collect()
}

#[test]
fn test_parallel_encoding_matches_sequential() {
    let sets: Vec<Arc<Vec<Term>>> = (0..THREADS as u64)
        .map(|seed| Arc::new(term_set(seed)))
        .collect();
    let expected: Vec<Vec<Vec<u8>>> = sets.iter().map(|set| encode_all(set)).collect();

    let handles: Vec<_> = sets
        .iter()
        .cloned()
        .map(|set| thread::spawn(move || encode_all(&set)))
        .collect();

    for (handle, expected) in handles.into_iter().zip(expected) {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_parallel_round_trip() {
    let handles: Vec<_> = (0..THREADS as u64)
        .map(|seed| {
            thread::spawn(move || {
                let terms = term_set(seed + 100);
                for term in &terms {
                    let bytes = term_to_binary(term).unwrap();
                    let decoded = binary_to_term(&bytes).unwrap();
                    assert_eq!(&decoded, term, "round trip of {}", term);
                }
                terms.len()
            })
        })
        .collect();

    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, THREADS * TERMS_PER_THREAD);
}

#[test]
fn test_shared_bytes_decoded_from_many_threads() {
    let terms = term_set(42);
    let encoded = Arc::new(encode_all(&terms));
    let terms = Arc::new(terms);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let encoded = Arc::clone(&encoded);
            let terms = Arc::clone(&terms);
            thread::spawn(move || {
                for (bytes, term) in encoded.iter().zip(terms.iter()) {
                    assert_eq!(&binary_to_term(bytes).unwrap(), term);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
