//! Shift cipher
//!
//! Caesar generalized to any [`Alphabet`]. Characters outside the alphabet
//! (digits, `@`, `.`, spaces, punctuation) pass through untouched; letter case
//! survives the round trip.

use unmask_core::{Alphabet, ShiftKey};

pub struct Cipher;

impl Cipher {
    /// Undo an encoding shift: each member moves `key` places back
    pub fn shift_decode(input: &str, alphabet: &Alphabet, key: ShiftKey) -> String {
        let back = alphabet.len() - key.reduced(alphabet);
        shift(input, alphabet, back)
    }

    /// Apply an encoding shift: each member moves `key` places forward
    pub fn shift_encode(input: &str, alphabet: &Alphabet, key: ShiftKey) -> String {
        shift(input, alphabet, key.reduced(alphabet))
    }

    /// Decode under every key of the alphabet
    pub fn shift_bruteforce(input: &str, alphabet: &Alphabet) -> Vec<(ShiftKey, String)> {
        alphabet
            .keys()
            .map(|key| (key, Self::shift_decode(input, alphabet, key)))
            .collect()
    }
}

fn shift(input: &str, alphabet: &Alphabet, forward: usize) -> String {
    let mut out = String::with_capacity(input.len());

    for c in input.chars() {
        let upper = c.is_uppercase();
        let mut lower = c.to_lowercase();

        let shifted = match (lower.next(), lower.next()) {
            (Some(l), None) => alphabet.position(l).map(|i| alphabet.at(i + forward)),
            _ => None,
        };

        match shifted {
            Some(s) if upper => out.extend(s.to_uppercase()),
            Some(s) => out.push(s),
            None => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use unmask_core::{ENGLISH, RUSSIAN};

    #[test]
    fn test_shift_english() {
        assert_eq!(Cipher::shift_encode("HELLO", &ENGLISH, ShiftKey::new(3)), "KHOOR");
        assert_eq!(Cipher::shift_decode("KHOOR", &ENGLISH, ShiftKey::new(3)), "HELLO");
    }

    #[test]
    fn test_email_shift() {
        let encoded = Cipher::shift_encode("test@test.ru", &ENGLISH, ShiftKey::new(1));
        assert_eq!(encoded, "uftu@uftu.sv");
    }

    #[test]
    fn test_decode_wraps_backwards() {
        assert_eq!(Cipher::shift_decode("a", &ENGLISH, ShiftKey::new(1)), "z");
        assert_eq!(Cipher::shift_decode("а", &RUSSIAN, ShiftKey::new(1)), "я");
    }

    #[test]
    fn test_roundtrip_every_key() {
        let plain = "Москва, ул. Ленина, д. 5";
        for key in RUSSIAN.keys() {
            let encoded = Cipher::shift_encode(plain, &RUSSIAN, key);
            assert_eq!(Cipher::shift_decode(&encoded, &RUSSIAN, key), plain);
        }
    }

    #[test]
    fn test_case_is_preserved() {
        let key = ShiftKey::new(5);
        let lower = Cipher::shift_decode("abc", &ENGLISH, key);
        let upper = Cipher::shift_decode("ABC", &ENGLISH, key);
        assert_eq!(upper, lower.to_uppercase());
        assert_eq!(Cipher::shift_decode("Жук", &RUSSIAN, ShiftKey::new(2)), "Дси");
    }

    #[test]
    fn test_foreign_chars_pass_through() {
        let text = "0123456789 @.,-_!";
        for key in ENGLISH.keys() {
            assert_eq!(Cipher::shift_decode(text, &ENGLISH, key), text);
        }
        // the other alphabet's letters are foreign too
        assert_eq!(Cipher::shift_decode("Улица", &ENGLISH, ShiftKey::new(7)), "Улица");
        assert_eq!(Cipher::shift_decode("Street", &RUSSIAN, ShiftKey::new(7)), "Street");
    }

    #[test]
    fn test_bruteforce_lists_every_key() {
        let all = Cipher::shift_bruteforce("b", &ENGLISH);
        assert_eq!(all.len(), 26);
        assert_eq!(all[0], (ShiftKey::new(0), "b".to_string()));
        assert_eq!(all[1], (ShiftKey::new(1), "a".to_string()));
        assert_eq!(all[2], (ShiftKey::new(2), "z".to_string()));
    }
}
