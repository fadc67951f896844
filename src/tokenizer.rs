//! Longest-match-first splitting of text into dictionary words and single
//! codepoints.
//!
//! The source (`makeqstrdata.py`'s `TextSplitter`) builds an alternation
//! regex over the escaped words plus a wildcard. A direct precedence scan
//! over a small, longest-first-sorted word list has identical semantics and
//! is what spec.md's design notes (§9) call out as an acceptable substitute.

use crate::atom::{Atom, Dictionary};

pub struct Tokenizer<'d> {
    dict: &'d Dictionary,
    // words as char vectors, longest first; ties keep dictionary order.
    by_length_desc: Vec<(usize, Vec<char>)>,
}

impl<'d> Tokenizer<'d> {
    pub fn new(dict: &'d Dictionary) -> Self {
        let by_length_desc = dict
            .by_length_desc()
            .into_iter()
            .map(|(idx, w)| (idx, w.chars().collect()))
            .collect();
        Tokenizer { dict, by_length_desc }
    }

    /// Find the longest dictionary word matching at `chars[pos..]`. Returns
    /// `(dictionary_index, word_char_len)`.
    fn match_at(&self, chars: &[char], pos: usize) -> Option<(usize, usize)> {
        for (idx, word) in &self.by_length_desc {
            let len = word.len();
            if pos + len <= chars.len() && &chars[pos..pos + len] == word.as_slice() {
                return Some((*idx, len));
            }
        }
        None
    }

    /// `(is_word, segment)` pairs: word segments are single dictionary
    /// words; non-word segments are maximal runs of unmatched characters.
    pub fn iter_words(&self, text: &str) -> Vec<(bool, String)> {
        let chars: Vec<char> = text.chars().collect();
        let mut out = Vec::new();
        let mut buf = String::new();
        let mut pos = 0;
        while pos < chars.len() {
            if let Some((idx, len)) = self.match_at(&chars, pos) {
                if !buf.is_empty() {
                    out.push((false, std::mem::take(&mut buf)));
                }
                out.push((true, self.dict.words()[idx].clone()));
                pos += len;
            } else {
                buf.push(chars[pos]);
                pos += 1;
            }
        }
        if !buf.is_empty() {
            out.push((false, buf));
        }
        out
    }

    /// The flattened atom stream: one atom per dictionary word or per
    /// unmatched codepoint.
    pub fn iter(&self, text: &str) -> Vec<Atom> {
        let chars: Vec<char> = text.chars().collect();
        let mut out = Vec::with_capacity(chars.len());
        let mut pos = 0;
        while pos < chars.len() {
            if let Some((idx, len)) = self.match_at(&chars, pos) {
                out.push(Atom::Word(idx as u16));
                pos += len;
            } else {
                out.push(Atom::Char(chars[pos]));
                pos += 1;
            }
        }
        out
    }
}
