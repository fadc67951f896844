//! Minimal end-to-end usage demo: build a dictionary and codebook over a
//! small corpus, encode every message, and print the companion header
//! alongside each message's compressed size. Shape grounded in the
//! teacher's `examples/dolz4.rs` (a tiny, argument-free driver script).

use qstr_compress::codec::{decode_message, encode_message};
use qstr_compress::dictionary::build_dictionary;
use qstr_compress::huffman::{build_codebook, count_atoms};
use qstr_compress::tables::{emit_companion_header, ValuesType};
use qstr_compress::tokenizer::Tokenizer;

fn main() {
    let corpus = [
        "memory allocation failed",
        "invalid argument for operator",
        "unsupported type for operator",
        "object has no attribute",
        "index out of range",
        "division by zero",
    ];

    let dict = build_dictionary(&corpus);
    let tokenizer = Tokenizer::new(&dict);
    let counts = count_atoms(&tokenizer, &corpus);
    let codebook = build_codebook(&counts);

    let max_len = corpus.iter().map(|t| t.len()).max().unwrap_or(0) as u64;
    let encoded_length_bits = if max_len == 0 { 0 } else { 64 - max_len.leading_zeros() };
    let values_type = ValuesType::for_corpus(&corpus);

    println!("dictionary: {:?}", dict.words());
    for message in &corpus {
        let encoded = encode_message(&tokenizer, &codebook, encoded_length_bits, message);
        let decoded = decode_message(&encoded, &dict, &codebook, encoded_length_bits);
        assert_eq!(&decoded, message);
        println!("{:>3} bytes <- {:?}", encoded.len(), message);
    }

    println!("\n{}", emit_companion_header(&dict, &codebook, values_type, encoded_length_bits));
}
