//! Random array item keys.

use std::collections::HashSet;

use rand::Rng;

/// Characters allowed after the first position of a key.
const KEY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789-_";

/// The first character is restricted to lowercase alphanumerics.
const KEY_LEAD_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated keys.
pub const KEY_LENGTH: usize = 12;

/// Issues `_key` values that are unique among everything it has seen.
#[derive(Debug, Default)]
pub struct KeyGenerator {
    issued: HashSet<String>,
}

impl KeyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key already present in the tree as taken.
    pub fn reserve(&mut self, key: &str) {
        self.issued.insert(key.to_string());
    }

    /// Produce a fresh key.
    pub fn next_key(&mut self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let key = random_key(&mut rng);
            if self.issued.insert(key.clone()) {
                return key;
            }
        }
    }

    /// Number of keys issued or reserved so far.
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}

fn random_key<R: Rng>(rng: &mut R) -> String {
    let mut key = String::with_capacity(KEY_LENGTH);
    key.push(KEY_LEAD_ALPHABET[rng.gen_range(0..KEY_LEAD_ALPHABET.len())] as char);
    for _ in 1..KEY_LENGTH {
        key.push(KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())] as char);
    }
    key
}

/// Whether `key` looks like a generated key.
pub fn is_valid_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    (9..=31).contains(&bytes.len())
        && KEY_LEAD_ALPHABET.contains(&bytes[0])
        && bytes[1..].iter().all(|b| KEY_ALPHABET.contains(b))
}
