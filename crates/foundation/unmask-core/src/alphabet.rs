//! Shift alphabets and keys
//!
//! Two fixed alphabets: Russian (32 symbols, no `ё`) for addresses and English
//! (26 symbols) for emails. Symbols are stored lowercase; case is handled by the
//! transform, not the alphabet.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An ordered cyclic alphabet
#[derive(Debug, PartialEq, Eq)]
pub struct Alphabet {
    name: &'static str,
    symbols: &'static [char],
}

pub static RUSSIAN: Alphabet = Alphabet {
    name: "russian",
    symbols: &[
        'а', 'б', 'в', 'г', 'д', 'е', 'ж', 'з', 'и', 'й', 'к', 'л', 'м', 'н', 'о', 'п',
        'р', 'с', 'т', 'у', 'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ъ', 'ы', 'ь', 'э', 'ю', 'я',
    ],
};

pub static ENGLISH: Alphabet = Alphabet {
    name: "english",
    symbols: &[
        'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p',
        'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    ],
};

impl Alphabet {
    /// Look up one of the built-in alphabets by name
    pub fn by_name(name: &str) -> Result<&'static Alphabet> {
        match name.to_lowercase().as_str() {
            "russian" | "ru" | "cyrillic" => Ok(&RUSSIAN),
            "english" | "en" | "latin" => Ok(&ENGLISH),
            _ => Err(Error::UnknownAlphabet(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn symbols(&self) -> &'static [char] {
        self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Position of a lowercase symbol, `None` when it is not a member
    pub fn position(&self, c: char) -> Option<usize> {
        self.symbols.iter().position(|&s| s == c)
    }

    /// Symbol at a cyclic position
    pub fn at(&self, index: usize) -> char {
        self.symbols[index % self.symbols.len()]
    }

    /// Every key this alphabet admits, ascending from zero
    pub fn keys(&self) -> impl Iterator<Item = ShiftKey> {
        (0..self.symbols.len() as u32).map(ShiftKey::new)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} symbols)", self.name, self.symbols.len())
    }
}

/// Cyclic offset applied when a field was encoded
///
/// A key is not bound to an alphabet: the one recovered from an email over
/// [`ENGLISH`] is reused as-is over [`RUSSIAN`] for the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftKey(u32);

impl ShiftKey {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Offset reduced into `[0, alphabet.len())`
    pub fn reduced(&self, alphabet: &Alphabet) -> usize {
        self.0 as usize % alphabet.len()
    }
}

impl fmt::Display for ShiftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(RUSSIAN.len(), 32);
        assert_eq!(ENGLISH.len(), 26);
        assert!(RUSSIAN.position('ё').is_none());
    }

    #[test]
    fn test_alphabets_are_disjoint() {
        assert!(ENGLISH.symbols().iter().all(|&c| RUSSIAN.position(c).is_none()));
    }

    #[test]
    fn test_position_and_wraparound() {
        assert_eq!(ENGLISH.position('a'), Some(0));
        assert_eq!(ENGLISH.position('z'), Some(25));
        assert_eq!(ENGLISH.position('A'), None);
        assert_eq!(RUSSIAN.position('я'), Some(31));
        assert_eq!(ENGLISH.at(26), 'a');
    }

    #[test]
    fn test_by_name() {
        assert_eq!(Alphabet::by_name("Russian").unwrap(), &RUSSIAN);
        assert_eq!(Alphabet::by_name("en").unwrap(), &ENGLISH);
        assert!(matches!(Alphabet::by_name("greek"), Err(Error::UnknownAlphabet(_))));
    }

    #[test]
    fn test_keys_cover_alphabet() {
        let keys: Vec<u32> = ENGLISH.keys().map(|k| k.value()).collect();
        assert_eq!(keys.len(), 26);
        assert_eq!(keys.first(), Some(&0));
        assert_eq!(keys.last(), Some(&25));
    }

    #[test]
    fn test_key_reduced() {
        assert_eq!(ShiftKey::new(27).reduced(&ENGLISH), 1);
        assert_eq!(ShiftKey::new(27).reduced(&RUSSIAN), 27);
    }
}
