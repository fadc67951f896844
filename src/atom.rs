//! The coding alphabet: single codepoints and dictionary words.

use std::collections::HashMap;

/// A dictionary word is a run of 2..=9 Unicode scalars.
pub const MIN_WORD_LEN: usize = 2;
pub const MAX_WORD_LEN: usize = 9;

/// First in-band codepoint reserved for dictionary word slots.
pub const WORD_START: u32 = 0x80;

/// The unit of coding: either a raw codepoint or a dictionary word.
///
/// Only at the serialized-table boundary (`tables::emit_companion_header`,
/// `codec`) is a `Word` re-encoded as an in-band codepoint in
/// `[WORD_START, word_end]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Atom {
    Char(char),
    Word(u16),
}

/// An ordered, deduplicated set of dictionary words, built by
/// [`crate::dictionary::build_dictionary`].
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary { words: Vec::new() }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Sum over words of `len(word) - 2`, the quantity capped by
    /// `max_words_len`.
    pub fn total_extra_len(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.chars().count() - MIN_WORD_LEN)
            .sum()
    }

    pub fn push(&mut self, word: String) {
        debug_assert!((MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.chars().count()));
        self.words.push(word);
    }

    /// Index of `word` in the dictionary, if present.
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.words.iter().position(|w| w == word)
    }

    /// Inclusive range of in-band codepoints reserved for word slots.
    pub fn word_start(&self) -> u32 {
        WORD_START
    }

    pub fn word_end(&self) -> u32 {
        WORD_START + self.words.len() as u32 - 1
    }

    /// `true` if `cp` falls in `[word_start, word_end]`, i.e. denotes a word
    /// slot rather than a literal codepoint.
    pub fn is_word_slot(&self, cp: u32) -> bool {
        !self.is_empty() && cp >= self.word_start() && cp <= self.word_end()
    }

    pub fn word_at_slot(&self, cp: u32) -> &str {
        &self.words[(cp - self.word_start()) as usize]
    }

    /// Words sorted longest-first, for longest-match tokenization, paired
    /// with their dictionary index.
    pub fn by_length_desc(&self) -> Vec<(usize, &str)> {
        let mut v: Vec<(usize, &str)> = self.words.iter().enumerate().map(|(i, w)| (i, w.as_str())).collect();
        v.sort_by_key(|(_, w)| std::cmp::Reverse(w.chars().count()));
        v
    }

    /// `max_words`: the number of in-band codepoints in `[0x80, 0xff)` not
    /// already used literally by any translation.
    pub fn max_words(texts: &[&str]) -> usize {
        let mut end_unused: u32 = 0xff;
        for text in texts {
            for c in text.chars() {
                let ord = c as u32;
                if (0x80..0xff).contains(&ord) {
                    end_unused = end_unused.min(ord);
                }
            }
        }
        (end_unused - WORD_START) as usize
    }

    /// `true` if any translation contains a codepoint above U+00FF.
    pub fn values_type_is_wide(texts: &[&str]) -> bool {
        texts
            .iter()
            .flat_map(|t| t.chars())
            .any(|c| (c as u32) > 0xff)
    }

    /// `max_words_len`: 160 if the alphabet is wide, else 255.
    pub fn max_words_len(wide: bool) -> usize {
        if wide {
            160
        } else {
            255
        }
    }
}

/// Counts of atom occurrences across a tokenized corpus.
pub type AtomCounts = HashMap<Atom, usize>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_words_defaults_to_0xff_boundary() {
        let texts = ["hello world"];
        assert_eq!(Dictionary::max_words(&texts), 0x7f);
    }

    #[test]
    fn max_words_shrinks_on_reserved_codepoint() {
        let s = format!("hi {}", char::from_u32(0x90).unwrap());
        let texts = [s.as_str()];
        assert_eq!(Dictionary::max_words(&texts), 0x10);
    }

    #[test]
    fn wide_flag_follows_max_codepoint() {
        assert!(!Dictionary::values_type_is_wide(&["plain ascii"]));
        let s = format!("has {}", char::from_u32(0x100).unwrap());
        assert!(Dictionary::values_type_is_wide(&[s.as_str()]));
    }

    #[test]
    fn word_slot_lookup_roundtrips() {
        let mut dict = Dictionary::new();
        dict.push("the ".to_string());
        dict.push("and ".to_string());
        assert_eq!(dict.word_start(), 0x80);
        assert_eq!(dict.word_end(), 0x81);
        assert!(dict.is_word_slot(0x80));
        assert!(dict.is_word_slot(0x81));
        assert!(!dict.is_word_slot(0x82));
        assert_eq!(dict.word_at_slot(0x81), "and ");
    }
}
