//! End-to-end orchestration: parse qstr input, build the dictionary and
//! codebook, encode and self-verify every translation, and render both
//! generated headers (SPEC_FULL.md §2, §6). Grounded on
//! `makeqstrdata.py`'s `print_qstr_data`/`print_qstr_enums` driving loop.

use std::path::Path;

use fehler::throws;
use log::info;

use crate::catalog::Catalog;
use crate::codec::{decode_message, encode_message};
use crate::dictionary::build_dictionary;
use crate::error::GeneratorError;
use crate::huffman::{build_codebook, count_atoms};
use crate::qstr::{self, parse_input_headers, QstrEntry};
use crate::tables::{emit_companion_header, ValuesType};
use crate::tokenizer::Tokenizer;

pub struct GeneratedOutput {
    pub main_header: String,
    pub companion_header: Option<String>,
}

/// Run the full pipeline over a set of preprocessed qstr intermediate files.
///
/// When `translation` is `None`, only the `QENUM` identifier header is
/// produced (mirroring the original's fallback when no `.mo` catalog was
/// supplied); otherwise both the compressed main header and the companion
/// decode-table header are produced.
#[throws(GeneratorError)]
pub fn generate(infiles: &[impl AsRef<Path>], translation: Option<&Path>) -> GeneratedOutput {
    let (qcfg, qstrs, i18n_keys) = parse_input_headers(infiles)?;
    let bytes_in_len = qcfg.bytes_in_len().unwrap_or(1);
    let bytes_in_hash = qcfg.bytes_in_hash().unwrap_or(1);
    info!("parsed {} qstrs and {} translation keys from {} file(s)", qstrs.len(), i18n_keys.len(), infiles.len());

    for entry in &qstrs {
        let limit = 1usize << (8 * bytes_in_len);
        if entry.text.len() >= limit {
            return_oversized(entry, limit)?;
        }
    }

    let (main_header, companion_header) = match translation {
        None => (render_qenum_header(&qstrs), None),
        Some(path) => {
            let catalog = Catalog::load(path)?;
            let translated = translate_all(&catalog, &i18n_keys);
            let dict = build_dictionary(&as_str_slice(&translated));
            let tokenizer = Tokenizer::new(&dict);
            let counts = count_atoms(&tokenizer, &as_str_slice(&translated));
            let codebook = build_codebook(&counts);
            let encoded_length_bits = max_encoded_length_bits(&translated);
            let values_type = ValuesType::for_corpus(&as_str_slice(&translated));

            let mut header = render_qdef_header(&qstrs, bytes_in_len, bytes_in_hash);
            for (key, text) in i18n_keys.iter().zip(translated.iter()) {
                let encoded = encode_message(&tokenizer, &codebook, encoded_length_bits, text);
                let decoded = decode_message(&encoded, &dict, &codebook, encoded_length_bits);
                if &decoded != text {
                    return_self_verify_mismatch(text)?;
                }
                let bytes: Vec<String> = encoded.iter().map(|b| b.to_string()).collect();
                header.push_str(&format!(
                    "TRANSLATION({}, {}) // {}\n",
                    c_string_literal(key.as_bytes()),
                    bytes.join(", "),
                    reapply_c_escapes(&decoded)
                ));
            }

            let companion = emit_companion_header(&dict, &codebook, values_type, encoded_length_bits);
            (header, Some(companion))
        }
    };

    GeneratedOutput { main_header, companion_header }
}

fn return_oversized(entry: &QstrEntry, limit: usize) -> Result<(), GeneratorError> {
    Err(GeneratorError::OversizedQstr { ident: entry.ident.clone(), len: entry.text.len(), limit })
}

fn return_self_verify_mismatch(original: &str) -> Result<(), GeneratorError> {
    Err(GeneratorError::SelfVerifyMismatch { original: original.to_string() })
}

fn as_str_slice(owned: &[String]) -> Vec<&str> {
    owned.iter().map(|s| s.as_str()).collect()
}

fn translate_all(catalog: &Catalog, keys: &[String]) -> Vec<String> {
    keys.iter().map(|k| catalog.translate(&qstr_unescape(k))).collect()
}

fn qstr_unescape(s: &str) -> String {
    // Reuse the same literal-escape normalization the catalog applies to its
    // own msgid table, so a `TRANSLATE("a\nb")` key matches a catalog entry
    // that was compiled from the same literal source text.
    crate::catalog::unescape_key(s)
}

fn max_encoded_length_bits(texts: &[String]) -> u32 {
    let max_len = texts.iter().map(|t| t.len()).max().unwrap_or(0) as u64;
    if max_len == 0 {
        0
    } else {
        64 - max_len.leading_zeros()
    }
}

fn le_bytes(value: u32, nbytes: usize) -> Vec<u8> {
    (0..nbytes).map(|i| ((value >> (8 * i)) & 0xff) as u8).collect()
}

/// Re-apply the nine `C_ESCAPES` the original prints a round-tripped
/// translation through (makeqstrdata.py:482-484) so the `// ...` comment
/// after a `TRANSLATION(...)` line reads as bare C source text rather than a
/// Rust debug-formatted string.
fn reapply_c_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0b}' => out.push_str("\\v"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out
}

/// Render an arbitrary byte string as a C string literal, using octal
/// escapes (fixed at three digits, so adjacent literal digits can't extend
/// the escape) for anything outside printable ASCII.
fn c_string_literal(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() + 2);
    s.push('"');
    for &b in bytes {
        match b {
            b'"' => s.push_str("\\\""),
            b'\\' => s.push_str("\\\\"),
            0x20..=0x7e => s.push(b as char),
            _ => s.push_str(&format!("\\{:03o}", b)),
        }
    }
    s.push('"');
    s
}

fn render_qdef_header(qstrs: &[QstrEntry], bytes_in_len: usize, bytes_in_hash: usize) -> String {
    let mut out = String::new();
    out.push_str("// This file was automatically generated by qstrgen\n");

    let null_prefix = [le_bytes(0, bytes_in_hash), le_bytes(0, bytes_in_len)].concat();
    out.push_str(&format!("QDEF(MP_QSTR_NULL, (const byte*){} {})\n", c_string_literal(&null_prefix), c_string_literal(b"")));

    for entry in qstrs {
        let hash = qstr::compute_hash(entry.text.as_bytes(), bytes_in_hash);
        let prefix = [le_bytes(hash, bytes_in_hash), le_bytes(entry.text.len() as u32, bytes_in_len)].concat();
        out.push_str(&format!(
            "QDEF(MP_QSTR_{}, (const byte*){} {})\n",
            entry.ident,
            c_string_literal(&prefix),
            c_string_literal(entry.text.as_bytes())
        ));
    }
    out
}

/// The no-catalog fallback: an enum of qstr identifiers only, mirroring the
/// original's `print_qstr_enums`.
fn render_qenum_header(qstrs: &[QstrEntry]) -> String {
    let mut out = String::new();
    out.push_str("// This file was automatically generated by qstrgen\n");
    out.push_str("enum {\n");
    out.push_str("    MP_QSTR_NULL,\n");
    for entry in qstrs {
        out.push_str(&format!("    MP_QSTR_{},\n", entry.ident));
    }
    out.push_str("};\n");
    out
}
