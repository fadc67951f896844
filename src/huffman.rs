//! Frequency counting, Huffman code-length assignment and canonicalization
//! (spec.md §4.3).

use std::collections::{BinaryHeap, HashMap};
use std::cmp::Reverse;

use crate::atom::{Atom, AtomCounts};
use crate::tokenizer::Tokenizer;

/// Count atom occurrences across the full tokenized corpus, using the
/// finalized dictionary's tokenizer.
pub fn count_atoms(tokenizer: &Tokenizer, texts: &[&str]) -> AtomCounts {
    let mut counts = AtomCounts::new();
    for text in texts {
        for atom in tokenizer.iter(text) {
            *counts.entry(atom).or_insert(0) += 1;
        }
    }
    counts
}

struct HuffNode {
    leaf: Option<Atom>,
    children: Option<(usize, usize)>,
}

/// Standard binary-heap Huffman construction, returning a code length per
/// atom. `counts` is a `HashMap`, whose iteration order is randomized per
/// process, so leaves are first sorted by `Atom` into a `Vec` and that
/// position is used as the heap tie-breaker instead of insertion order. Merge
/// order then depends only on the data (frequency, then atom value), keeping
/// the whole pipeline deterministic across runs (spec.md §5, §8).
fn build_lengths(counts: &AtomCounts) -> HashMap<Atom, u32> {
    let mut lengths = HashMap::new();
    if counts.is_empty() {
        return lengths;
    }
    if counts.len() == 1 {
        let atom = counts.keys().next().unwrap().clone();
        lengths.insert(atom, 1);
        return lengths;
    }

    let mut sorted: Vec<(&Atom, &usize)> = counts.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let mut nodes: Vec<HuffNode> = Vec::new();
    let mut heap: BinaryHeap<Reverse<(usize, u64, usize)>> = BinaryHeap::new();
    for (atom, &freq) in sorted {
        let idx = nodes.len();
        nodes.push(HuffNode { leaf: Some(atom.clone()), children: None });
        heap.push(Reverse((freq, idx as u64, idx)));
    }
    let mut next_seq = nodes.len() as u64;

    while heap.len() > 1 {
        let Reverse((f1, _, i1)) = heap.pop().unwrap();
        let Reverse((f2, _, i2)) = heap.pop().unwrap();
        let idx = nodes.len();
        nodes.push(HuffNode { leaf: None, children: Some((i1, i2)) });
        heap.push(Reverse((f1 + f2, next_seq, idx)));
        next_seq += 1;
    }

    let Reverse((_, _, root)) = heap.pop().unwrap();
    let mut stack = vec![(root, 0u32)];
    while let Some((idx, depth)) = stack.pop() {
        let node = &nodes[idx];
        if let Some(atom) = &node.leaf {
            lengths.insert(atom.clone(), depth.max(1));
        } else if let Some((l, r)) = node.children {
            stack.push((l, depth + 1));
            stack.push((r, depth + 1));
        }
    }
    lengths
}

/// A canonical Huffman codebook: per-atom `(code_value, code_length)`, the
/// `values[]` array (atoms in assignment order) and the `lengths[]`
/// histogram (with its trailing zero sentinel, spec.md §9).
pub struct CodeBook {
    pub codes: HashMap<Atom, (u64, u8)>,
    pub values: Vec<Atom>,
    pub lengths: Vec<u32>,
    pub max_length: u8,
}

impl CodeBook {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Build the canonical codebook from raw Huffman code lengths (spec.md
/// §4.3, steps 1-3).
pub fn build_codebook(counts: &AtomCounts) -> CodeBook {
    if counts.is_empty() {
        return CodeBook { codes: HashMap::new(), values: Vec::new(), lengths: Vec::new(), max_length: 0 };
    }

    let lengths_map = build_lengths(counts);
    let mut atoms: Vec<Atom> = lengths_map.keys().cloned().collect();
    atoms.sort_by(|a, b| lengths_map[a].cmp(&lengths_map[b]).then_with(|| a.cmp(b)));

    let mut codes = HashMap::new();
    let mut length_count: HashMap<u32, u32> = HashMap::new();
    let mut renumbered: u64 = 0;
    let mut last_length: Option<u32> = None;

    for atom in &atoms {
        let length = lengths_map[atom];
        assert!(length >= 1, "huffman produced a zero-length code");
        if let Some(prev) = last_length {
            if length > prev {
                renumbered <<= length - prev;
            }
        }
        codes.insert(atom.clone(), (renumbered, length as u8));
        *length_count.entry(length).or_insert(0) += 1;
        renumbered += 1;
        last_length = Some(length);
    }

    let max_length = *length_count.keys().max().unwrap();
    let mut lengths = Vec::with_capacity((max_length + 1) as usize);
    for i in 1..=(max_length + 1) {
        lengths.push(*length_count.get(&i).unwrap_or(&0));
    }

    CodeBook { codes, values: atoms, lengths, max_length: max_length as u8 }
}
