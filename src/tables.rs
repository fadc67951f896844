//! Companion-header table emission (spec.md §4.6, §6).

use std::fmt::Write as _;

use crate::atom::{Atom, Dictionary};
use crate::huffman::CodeBook;

/// `<T>` in the companion header: the unsigned integer type used for the
/// `values[]` and `words[]` arrays.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValuesType {
    U8,
    U16,
}

impl ValuesType {
    pub fn for_corpus(texts: &[&str]) -> Self {
        if Dictionary::values_type_is_wide(texts) {
            ValuesType::U16
        } else {
            ValuesType::U8
        }
    }

    pub fn c_name(self) -> &'static str {
        match self {
            ValuesType::U8 => "uint8_t",
            ValuesType::U16 => "uint16_t",
        }
    }
}

/// Prefix sums of `len(word) - 2` over the dictionary (spec.md §3's
/// `wends[]`).
pub fn word_ends(dict: &Dictionary) -> Vec<u32> {
    let mut wends = Vec::with_capacity(dict.len());
    let mut acc = 0u32;
    for word in dict.words() {
        acc += (word.chars().count() - 2) as u32;
        wends.push(acc);
    }
    wends
}

/// Render the `values[]` table: each atom reduced to its in-band codepoint
/// (a literal codepoint, or `0x80 + word_index` for a dictionary word).
fn values_as_codepoints(codebook: &CodeBook, dict: &Dictionary) -> Vec<u32> {
    codebook
        .values
        .iter()
        .map(|atom| match atom {
            Atom::Char(c) => *c as u32,
            Atom::Word(idx) => dict.word_start() + *idx as u32,
        })
        .collect()
}

/// Emit the companion header text: `lengths`, `values`,
/// `compress_max_length_bits`, `words`, `wends`, `word_start`, `word_end`,
/// in exactly that order (spec.md §6).
pub fn emit_companion_header(
    dict: &Dictionary,
    codebook: &CodeBook,
    values_type: ValuesType,
    encoded_length_bits: u32,
) -> String {
    let mut out = String::new();

    let lengths_str: Vec<String> = codebook.lengths.iter().map(|n| n.to_string()).collect();
    writeln!(out, "const uint8_t lengths[] = {{ {} }};", lengths_str.join(", ")).unwrap();

    let values = values_as_codepoints(codebook, dict);
    let values_str: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    writeln!(out, "const {} values[] = {{ {} }};", values_type.c_name(), values_str.join(", ")).unwrap();

    writeln!(out, "#define compress_max_length_bits ({})", encoded_length_bits).unwrap();

    let word_codepoints: Vec<String> = dict
        .words()
        .iter()
        .flat_map(|w| w.chars().map(|c| (c as u32).to_string()))
        .collect();
    writeln!(out, "const {} words[] = {{ {} }};", values_type.c_name(), word_codepoints.join(", ")).unwrap();

    let wends = word_ends(dict);
    let wends_str: Vec<String> = wends.iter().map(|v| v.to_string()).collect();
    writeln!(out, "const uint8_t wends[] = {{ {} }};", wends_str.join(", ")).unwrap();

    writeln!(out, "#define word_start {}", dict.word_start()).unwrap();
    writeln!(out, "#define word_end   {}", if dict.is_empty() { dict.word_start().wrapping_sub(1) } else { dict.word_end() }).unwrap();

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::build_dictionary;
    use crate::huffman::{build_codebook, count_atoms};
    use crate::tokenizer::Tokenizer;

    #[test]
    fn wends_are_prefix_sums_of_len_minus_two() {
        let mut dict = Dictionary::new();
        dict.push("the ".to_string());
        dict.push("and".to_string());
        let wends = word_ends(&dict);
        assert_eq!(wends, vec![2, 3]);
    }

    #[test]
    fn empty_corpus_emits_well_formed_empty_header() {
        let texts: Vec<&str> = vec![];
        let dict = build_dictionary(&texts);
        let tokenizer = Tokenizer::new(&dict);
        let counts = count_atoms(&tokenizer, &texts);
        let codebook = build_codebook(&counts);
        let values_type = ValuesType::for_corpus(&texts);
        let header = emit_companion_header(&dict, &codebook, values_type, 0);
        assert!(header.contains("const uint8_t lengths[] = {  };"));
        assert!(header.contains("const uint8_t values[] = {  };"));
        assert!(header.contains("#define compress_max_length_bits (0)"));
    }

    #[test]
    fn wide_corpus_selects_u16_values_type() {
        let s = format!("has {}", char::from_u32(0x100).unwrap());
        let texts = [s.as_str()];
        assert_eq!(ValuesType::for_corpus(&texts), ValuesType::U16);
    }
}
