//! Shift key recovery
//!
//! Tries every key of an alphabet in ascending order and keeps the first
//! decoding a predicate accepts. For emails the predicate is a TLD allow-list:
//! only the right key turns the ciphertext's last label into something like
//! `ru` or `com`.

use unmask_core::{Alphabet, Error, Result, ShiftKey, COMMON_DOMAINS};

use crate::Cipher;

/// Decides whether a candidate plaintext looks right
pub trait CandidatePredicate {
    fn accepts(&self, candidate: &str) -> bool;
}

impl<F> CandidatePredicate for F
where
    F: Fn(&str) -> bool,
{
    fn accepts(&self, candidate: &str) -> bool {
        self(candidate)
    }
}

/// Accepts emails whose top-level label is on a fixed list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainAllowList {
    labels: Vec<String>,
}

impl DomainAllowList {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in list (`ru`, `com`, `org`, ...)
    pub fn common() -> Self {
        Self::new(COMMON_DOMAINS.iter().copied())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Text after the last `.` of the part following the first `@`.
    ///
    /// Only the segment between the first and second `@` counts as the domain.
    pub fn top_level_label(candidate: &str) -> Result<&str> {
        let domain = candidate
            .split('@')
            .nth(1)
            .ok_or_else(|| Error::MalformedCandidate(format!("no '@' in {candidate:?}")))?;

        domain
            .rsplit_once('.')
            .map(|(_, label)| label)
            .ok_or_else(|| Error::MalformedCandidate(format!("no '.' in domain {domain:?}")))
    }
}

impl Default for DomainAllowList {
    fn default() -> Self {
        Self::common()
    }
}

impl CandidatePredicate for DomainAllowList {
    fn accepts(&self, candidate: &str) -> bool {
        match Self::top_level_label(candidate) {
            Ok(label) => self.contains(label),
            Err(e) => {
                // a structurally broken candidate is just a wrong key
                tracing::trace!(error = %e, "candidate rejected");
                false
            }
        }
    }
}

/// A recovered plaintext and the key that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub plaintext: String,
    pub key: ShiftKey,
}

/// First-match key search over one alphabet
pub struct ShiftCipherSolver<'a, P> {
    alphabet: &'a Alphabet,
    predicate: P,
}

impl<'a, P: CandidatePredicate> ShiftCipherSolver<'a, P> {
    pub fn new(alphabet: &'a Alphabet, predicate: P) -> Self {
        Self { alphabet, predicate }
    }

    pub fn alphabet(&self) -> &'a Alphabet {
        self.alphabet
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    /// `None` when no key in `[0, |alphabet|)` yields an accepted plaintext
    pub fn solve(&self, ciphertext: &str) -> Option<Solution> {
        let solution = self.alphabet.keys().find_map(|key| {
            let plaintext = Cipher::shift_decode(ciphertext, self.alphabet, key);
            self.predicate
                .accepts(&plaintext)
                .then_some(Solution { plaintext, key })
        });

        if solution.is_none() {
            tracing::debug!(alphabet = self.alphabet.name(), ciphertext, "no key accepted");
        }
        solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unmask_core::{ENGLISH, RUSSIAN};

    fn email_solver() -> ShiftCipherSolver<'static, DomainAllowList> {
        ShiftCipherSolver::new(&ENGLISH, DomainAllowList::common())
    }

    #[test]
    fn test_top_level_label() {
        assert_eq!(DomainAllowList::top_level_label("a@b.mail.ru").unwrap(), "ru");
        assert_eq!(DomainAllowList::top_level_label("a@b.c@d.e").unwrap(), "c");
        assert!(matches!(
            DomainAllowList::top_level_label("nobody"),
            Err(Error::MalformedCandidate(_))
        ));
        assert!(DomainAllowList::top_level_label("user@localhost").is_err());
    }

    #[test]
    fn test_allow_list_is_exact() {
        let list = DomainAllowList::common();
        assert!(list.accepts("x@y.ru"));
        assert!(list.accepts("x@y.info"));
        assert!(!list.accepts("x@y.RU"));
        assert!(!list.accepts("x@y.rus"));
        assert!(!list.accepts("x@ru"));
    }

    #[test]
    fn test_solves_shifted_email() {
        let encoded = Cipher::shift_encode("test@test.ru", &ENGLISH, ShiftKey::new(1));
        let solution = email_solver().solve(&encoded).unwrap();
        assert_eq!(solution.key, ShiftKey::new(1));
        assert_eq!(solution.plaintext, "test@test.ru");
    }

    #[test]
    fn test_key_zero_accepted_first() {
        let solution = email_solver().solve("ivan.petrov@mail.com").unwrap();
        assert_eq!(solution.key, ShiftKey::new(0));
    }

    #[test]
    fn test_recovers_every_key() {
        for key in ENGLISH.keys() {
            let encoded = Cipher::shift_encode("Ivan.Petrov@yandex.ru", &ENGLISH, key);
            let solution = email_solver().solve(&encoded).unwrap();
            assert_eq!(solution.plaintext, "Ivan.Petrov@yandex.ru");
            assert_eq!(solution.key, key);
        }
    }

    #[test]
    fn test_missing_at_is_not_fatal() {
        assert_eq!(email_solver().solve("no-at-sign-here.ru"), None);
    }

    #[test]
    fn test_missing_dot_is_not_fatal() {
        assert_eq!(email_solver().solve("user@localhost"), None);
    }

    #[test]
    fn test_unlisted_tld() {
        // "xyzq" shifts to no listed label under any key
        let encoded = Cipher::shift_encode("a@b.xyzq", &ENGLISH, ShiftKey::new(4));
        assert_eq!(email_solver().solve(&encoded), None);
    }

    #[test]
    fn test_closure_predicate() {
        let solver = ShiftCipherSolver::new(&RUSSIAN, |s: &str| s.starts_with("привет"));
        let encoded = Cipher::shift_encode("привет мир", &RUSSIAN, ShiftKey::new(30));
        let solution = solver.solve(&encoded).unwrap();
        assert_eq!(solution.key, ShiftKey::new(30));
        assert_eq!(solution.plaintext, "привет мир");
    }
}
