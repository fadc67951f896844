//! The greedy multi-gram dictionary builder (spec.md §4.2).
//!
//! Mines the corpus for 2..=9 character substrings, scores them with an
//! empirical formula, and greedily appends the highest-scoring candidate
//! until capacity is exhausted or no candidate clears the thresholds. The
//! scoring formula, thresholds and ordering are all load-bearing: changing
//! any of them changes the emitted dictionary.

use std::collections::HashMap;

use crate::atom::{Dictionary, MAX_WORD_LEN, MIN_WORD_LEN};
use crate::tokenizer::Tokenizer;

const MIN_OCCURRENCES: usize = 5;
const MIN_SCORE: f64 = 5.0;

fn iter_substrings(chars: &[char], minlen: usize, maxlen: usize) -> Vec<String> {
    let maxlen = maxlen.min(chars.len());
    let mut out = Vec::new();
    for n in minlen..=maxlen {
        if n > chars.len() {
            break;
        }
        for begin in 0..=(chars.len() - n) {
            out.push(chars[begin..begin + n].iter().collect());
        }
    }
    out
}

fn score(len: usize, occurrences: usize) -> f64 {
    let base = (len as f64) - 1.0;
    let exponent = ((occurrences as i64 - 2).max(1) as f64).ln();
    base.powf(exponent)
}

/// Build the word dictionary for `texts` (already-translated message
/// bodies), respecting `max_words` and `max_words_len` as derived from the
/// same corpus (spec.md §3's `Dictionary` invariants).
pub fn build_dictionary(texts: &[&str]) -> Dictionary {
    let max_words = Dictionary::max_words(texts);
    let wide = Dictionary::values_type_is_wide(texts);
    let max_words_len = Dictionary::max_words_len(wide);

    let mut dict = Dictionary::new();
    let mut sum_len = 0usize;

    loop {
        let tokenizer = Tokenizer::new(&dict);
        let mut counter: HashMap<String, usize> = HashMap::new();
        for text in texts {
            for (is_word, segment) in tokenizer.iter_words(text) {
                if is_word {
                    continue;
                }
                let chars: Vec<char> = segment.chars().collect();
                for substr in iter_substrings(&chars, MIN_WORD_LEN, MAX_WORD_LEN) {
                    *counter.entry(substr).or_insert(0) += 1;
                }
            }
        }

        let mut candidates: Vec<(String, f64, usize)> = counter
            .into_iter()
            .map(|(s, occ)| {
                let sc = score(s.chars().count(), occ);
                (s, sc, occ)
            })
            .collect();
        candidates.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        let chosen = candidates
            .into_iter()
            .find(|(_, _, occ)| *occ >= MIN_OCCURRENCES)
            .filter(|(_, sc, _)| *sc >= MIN_SCORE);

        let word = match chosen {
            Some((s, sc, _)) if sc >= MIN_SCORE => s,
            _ => break,
        };

        let extra = word.chars().count() - MIN_WORD_LEN;
        if sum_len + extra > max_words_len {
            break;
        }
        if dict.len() == max_words {
            break;
        }
        dict.push(word);
        sum_len += extra;
    }

    dict
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_corpus_yields_empty_dictionary() {
        let dict = build_dictionary(&[]);
        assert!(dict.is_empty());
    }

    #[test]
    fn single_short_translation_has_no_dictionary() {
        let dict = build_dictionary(&["hello"]);
        assert!(dict.is_empty());
    }

    #[test]
    fn repetition_drives_a_word_into_the_dictionary() {
        let texts: Vec<&str> = vec!["the the the the the the"; 6];
        let dict = build_dictionary(&texts);
        assert!(!dict.is_empty());
        assert!(dict.words().iter().any(|w| w.starts_with("the")));
    }

    #[test]
    fn dictionary_bounds_are_respected() {
        let texts: Vec<&str> = vec!["abcdefghij abcdefghij abcdefghij abcdefghij abcdefghij abcdefghij"; 10];
        let dict = build_dictionary(&texts);
        for w in dict.words() {
            let len = w.chars().count();
            assert!((MIN_WORD_LEN..=MAX_WORD_LEN).contains(&len));
        }
        let max_words = Dictionary::max_words(&texts);
        assert!(dict.len() <= max_words);
        let wide = Dictionary::values_type_is_wide(&texts);
        assert!(dict.total_extra_len() <= Dictionary::max_words_len(wide));
    }

    #[test]
    fn reserved_range_caps_dictionary_growth() {
        let marker = char::from_u32(0x90).unwrap();
        let text = format!("abcdefghij abcdefghij abcdefghij abcdefghij abcdefghij {}", marker);
        let texts: Vec<&str> = vec![text.as_str(); 10];
        let dict = build_dictionary(&texts);
        assert!(dict.len() <= 0x10);
    }
}
