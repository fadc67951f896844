//! Dictionary-augmented canonical-Huffman string compression for embedded
//! qstr/translation headers (SPEC_FULL.md).

pub mod atom;
pub mod catalog;
pub mod codec;
pub mod dictionary;
pub mod error;
pub mod generator;
pub mod huffman;
pub mod qstr;
pub mod tables;
pub mod tokenizer;
