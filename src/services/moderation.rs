/*
 * Responsibility
 * - Chirp body rules: length limit + denylist masking
 * - Pure string handling; handlers call validate() then redact()
 */
use std::collections::HashSet;

use thiserror::Error;

/// Inclusive upper bound, counted in Unicode scalar values.
pub const MAX_CHIRP_LENGTH: usize = 140;

pub const DEFAULT_DENYLIST: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

const MASK: &str = "****";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModerationError {
    #[error("chirp is too long ({length} > {max})")]
    TooLong { length: usize, max: usize },
}

#[derive(Debug, Clone)]
pub struct Moderator {
    // lowercased
    denylist: HashSet<String>,
}

impl Default for Moderator {
    fn default() -> Self {
        Self::new(DEFAULT_DENYLIST)
    }
}

impl Moderator {
    pub fn new<I, S>(denylist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            denylist: denylist
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn validate(&self, body: &str) -> Result<(), ModerationError> {
        let length = body.chars().count();
        if length > MAX_CHIRP_LENGTH {
            return Err(ModerationError::TooLong {
                length,
                max: MAX_CHIRP_LENGTH,
            });
        }
        Ok(())
    }

    /// Mask whole denylisted words, case-insensitively.
    ///
    /// Splits on single ASCII spaces only, so runs of spaces survive as empty
    /// tokens and the output keeps the input's spacing.
    pub fn redact(&self, body: &str) -> String {
        body.split(' ')
            .map(|word| {
                if self.denylist.contains(&word.to_lowercase()) {
                    MASK
                } else {
                    word
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// validate() then redact().
    pub fn clean(&self, body: &str) -> Result<String, ModerationError> {
        self.validate(body)?;
        Ok(self.redact(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_whole_words_case_insensitively() {
        let m = Moderator::default();
        assert_eq!(m.redact("I hate Fornax"), "I hate ****");
        assert_eq!(
            m.redact("This is a kerfuffle opinion I need to share with the world"),
            "This is a **** opinion I need to share with the world"
        );
        assert_eq!(m.redact("SHARBERT sharbert ShArBeRt"), "**** **** ****");
    }

    #[test]
    fn partial_words_are_left_alone() {
        let m = Moderator::default();
        assert_eq!(m.redact("Fornaxx"), "Fornaxx");
        assert_eq!(m.redact("Sharbert!"), "Sharbert!");
        assert_eq!(m.redact("kerfuffles"), "kerfuffles");
    }

    #[test]
    fn spacing_is_preserved() {
        let m = Moderator::default();
        assert_eq!(m.redact("a  fornax   b"), "a  ****   b");
        assert_eq!(m.redact(" fornax "), " **** ");
        assert_eq!(m.redact(""), "");
        // tabs are not separators
        assert_eq!(m.redact("fornax\tfornax"), "fornax\tfornax");
    }

    #[test]
    fn custom_denylist() {
        let m = Moderator::new(["Heck"]);
        assert_eq!(m.redact("what the heck fornax"), "what the **** fornax");
    }

    #[test]
    fn length_boundary() {
        let m = Moderator::default();
        assert!(m.validate(&"a".repeat(140)).is_ok());
        assert_eq!(
            m.validate(&"a".repeat(141)),
            Err(ModerationError::TooLong {
                length: 141,
                max: 140
            })
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let m = Moderator::default();
        let body = "é".repeat(140);
        assert_eq!(body.len(), 280);
        assert!(m.validate(&body).is_ok());
        assert!(m.validate(&"é".repeat(141)).is_err());
    }

    #[test]
    fn clean_rejects_before_masking() {
        let m = Moderator::default();
        assert_eq!(m.clean("kerfuffle!").unwrap(), "kerfuffle!");
        assert!(m.clean(&"fornax ".repeat(30)).is_err());
    }
}
