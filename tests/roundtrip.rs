//! Integration-level round-trip fuzz test over a large synthetic corpus
//! (the 200-translation scenario from spec.md §8), grounded in the shape of
//! the teacher's deleted `tests/output_equivalence.rs` (an external-corpus
//! round-trip check), but driven internally with `rand` instead of an
//! external CLI tool, since this codec has no external reference decoder to
//! compare against.

use rand::Rng;

use qstr_compress::codec::{decode_message, encode_message};
use qstr_compress::dictionary::build_dictionary;
use qstr_compress::huffman::{build_codebook, count_atoms};
use qstr_compress::tokenizer::Tokenizer;

const VOCAB: &[&str] = &[
    "memory", "allocation", "failed", "invalid", "argument", "syntax", "error", "stack",
    "overflow", "unsupported", "operand", "type", "object", "has", "no", "attribute",
    "index", "out", "of", "range", "division", "by", "zero", "cannot", "convert",
    "list", "dict", "tuple", "string", "float", "integer", "expected", "got",
];

fn random_message(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(1..12);
    (0..len).map(|_| VOCAB[rng.gen_range(0..VOCAB.len())]).collect::<Vec<_>>().join(" ")
}

#[test]
fn two_hundred_translation_corpus_roundtrips_every_member() {
    let mut rng = rand::thread_rng();
    let corpus: Vec<String> = (0..200).map(|_| random_message(&mut rng)).collect();
    let texts: Vec<&str> = corpus.iter().map(|s| s.as_str()).collect();

    let dict = build_dictionary(&texts);
    let tokenizer = Tokenizer::new(&dict);
    let counts = count_atoms(&tokenizer, &texts);
    let codebook = build_codebook(&counts);

    let max_len = texts.iter().map(|t| t.len()).max().unwrap_or(0) as u64;
    let encoded_length_bits = if max_len == 0 { 0 } else { 64 - max_len.leading_zeros() };

    for text in &texts {
        let encoded = encode_message(&tokenizer, &codebook, encoded_length_bits, text);
        let decoded = decode_message(&encoded, &dict, &codebook, encoded_length_bits);
        assert_eq!(&decoded, text, "round-trip failed for {text:?}");
    }
}

#[test]
fn max_ordinal_switch_forces_wide_values_and_still_roundtrips() {
    use qstr_compress::atom::Dictionary;
    use qstr_compress::tables::ValuesType;

    let wide_char = char::from_u32(0x1f600).unwrap();
    let corpus = vec![
        format!("plain ascii message one"),
        format!("plain ascii message two"),
        format!("has a wide glyph {wide_char} in it"),
    ];
    let texts: Vec<&str> = corpus.iter().map(|s| s.as_str()).collect();

    assert!(Dictionary::values_type_is_wide(&texts));
    assert_eq!(ValuesType::for_corpus(&texts), ValuesType::U16);

    let dict = build_dictionary(&texts);
    let tokenizer = Tokenizer::new(&dict);
    let counts = count_atoms(&tokenizer, &texts);
    let codebook = build_codebook(&counts);
    let max_len = texts.iter().map(|t| t.len()).max().unwrap_or(0) as u64;
    let encoded_length_bits = 64 - max_len.leading_zeros();

    for text in &texts {
        let encoded = encode_message(&tokenizer, &codebook, encoded_length_bits, text);
        let decoded = decode_message(&encoded, &dict, &codebook, encoded_length_bits);
        assert_eq!(&decoded, text);
    }
}
