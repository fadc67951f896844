//! Criterion benchmark over dictionary building and message encoding,
//! grounded in the teacher's `benches/my_benchmark.rs` (criterion + a small
//! synthetic corpus, rather than an external fixture file).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;

use qstr_compress::codec::encode_message;
use qstr_compress::dictionary::build_dictionary;
use qstr_compress::huffman::{build_codebook, count_atoms};
use qstr_compress::tokenizer::Tokenizer;

fn synthetic_corpus(n: usize) -> Vec<String> {
    const WORDS: &[&str] = &[
        "memory", "allocation", "failed", "invalid", "argument", "syntax", "error",
        "stack", "overflow", "unsupported", "type", "for", "operator", "object",
        "has", "no", "attribute", "index", "out", "of", "range",
    ];
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|_| {
            let len = rng.gen_range(3..10);
            (0..len).map(|_| WORDS[rng.gen_range(0..WORDS.len())]).collect::<Vec<_>>().join(" ")
        })
        .collect()
}

fn bench_build_dictionary(c: &mut Criterion) {
    let corpus = synthetic_corpus(300);
    let texts: Vec<&str> = corpus.iter().map(|s| s.as_str()).collect();
    c.bench_function("build_dictionary/300 messages", |b| {
        b.iter(|| build_dictionary(black_box(&texts)))
    });
}

fn bench_encode_message(c: &mut Criterion) {
    let corpus = synthetic_corpus(300);
    let texts: Vec<&str> = corpus.iter().map(|s| s.as_str()).collect();
    let dict = build_dictionary(&texts);
    let tokenizer = Tokenizer::new(&dict);
    let counts = count_atoms(&tokenizer, &texts);
    let codebook = build_codebook(&counts);
    let max_len = texts.iter().map(|t| t.len()).max().unwrap_or(0) as u64;
    let encoded_length_bits = 64 - max_len.leading_zeros();

    c.bench_function("encode_message/300 messages", |b| {
        b.iter(|| {
            for text in &texts {
                black_box(encode_message(&tokenizer, &codebook, encoded_length_bits, text));
            }
        })
    });
}

criterion_group!(benches, bench_build_dictionary, bench_encode_message);
criterion_main!(benches);
