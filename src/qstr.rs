//! qstr intermediate-file parsing (SPEC_FULL.md §4.7), grounded in
//! `makeqstrdata.py`'s `parse_input_headers`, `qstr_escape` and
//! `compute_hash`.

use std::collections::HashMap;
use std::path::Path;

use fehler::throws;

use crate::error::GeneratorError;

/// A parsed `Q(...)` directive, with the original's sort-order bias applied.
#[derive(Debug, Clone)]
pub struct QstrEntry {
    pub order: i64,
    pub ident: String,
    pub text: String,
}

/// `QCFG(...)` directives collected from the input files.
#[derive(Debug, Clone, Default)]
pub struct QstrConfig {
    values: HashMap<String, String>,
}

impl QstrConfig {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn bytes_in_len(&self) -> Option<usize> {
        self.get("BYTES_IN_LEN").and_then(|v| v.parse().ok())
    }

    pub fn bytes_in_hash(&self) -> Option<usize> {
        self.get("BYTES_IN_HASH").and_then(|v| v.parse().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn parse_qcfg(line: &str) -> Option<(String, String)> {
    let inner = line.strip_prefix("QCFG(")?.strip_suffix(')')?;
    let comma = inner.find(", ")?;
    let name = inner[..comma].to_string();
    let mut value = inner[comma + 2..].to_string();
    if value.starts_with('(') && value.ends_with(')') {
        value = value[1..value.len() - 1].to_string();
    }
    Some((name, value))
}

fn parse_q(line: &str) -> Option<String> {
    let inner = line.strip_prefix("Q(")?.strip_suffix(')')?;
    Some(inner.to_string())
}

fn parse_translate(line: &str) -> Option<String> {
    let inner = line.strip_prefix("TRANSLATE(\"")?.strip_suffix("\")")?;
    Some(inner.to_string())
}

fn ident_order(ident: &str, insertion_index: usize) -> i64 {
    if ident.is_empty() {
        -200000
    } else if ident == "__dir__" {
        -190000
    } else if ident.starts_with("__") {
        insertion_index as i64 - 100000
    } else {
        insertion_index as i64
    }
}

/// Read `Q(...)`, `QCFG(...)` and `TRANSLATE("...")` lines out of a set of
/// preprocessed qstr intermediate files.
#[throws(GeneratorError)]
pub fn parse_input_headers(infiles: &[impl AsRef<Path>]) -> (QstrConfig, Vec<QstrEntry>, Vec<String>) {
    let mut qcfgs = HashMap::new();
    let mut qstrs: HashMap<String, QstrEntry> = HashMap::new();
    let mut qstr_order: Vec<String> = Vec::new();
    let mut i18ns_seen: HashMap<String, ()> = HashMap::new();
    let mut i18ns: Vec<String> = Vec::new();

    for infile in infiles {
        let contents = std::fs::read_to_string(infile)?;
        for raw_line in contents.lines() {
            let line = raw_line.trim();

            if let Some((name, value)) = parse_qcfg(line) {
                qcfgs.insert(name, value);
                continue;
            }

            if let Some(text) = parse_translate(line) {
                if !i18ns_seen.contains_key(&text) {
                    i18ns_seen.insert(text.clone(), ());
                    i18ns.push(text);
                }
                continue;
            }

            if let Some(mut qstr) = parse_q(line) {
                if qstr == "\\n" {
                    qstr = "\n".to_string();
                }
                let ident = qstr_escape(&qstr);
                if qstrs.contains_key(&ident) {
                    continue;
                }
                let order = ident_order(&ident, qstrs.len());
                qstrs.insert(ident.clone(), QstrEntry { order, ident: ident.clone(), text: qstr });
                qstr_order.push(ident);
            }
        }
    }

    if qcfgs.is_empty() && !qstrs.is_empty() {
        throw_empty_config(qstrs.len())?;
    }

    let mut entries: Vec<QstrEntry> = qstr_order.into_iter().map(|ident| qstrs.remove(&ident).unwrap()).collect();
    entries.sort_by_key(|e| e.order);

    (QstrConfig { values: qcfgs }, entries, i18ns)
}

// `#[throws]` only supports a single fallible tail expression, so the empty
// preprocessor-output check is split into its own helper to keep
// `parse_input_headers`'s control flow linear.
fn throw_empty_config(count: usize) -> Result<(), GeneratorError> {
    Err(GeneratorError::EmptyConfig(count))
}

/// Escape a qstr's text into a valid C identifier fragment, replacing every
/// character outside `[A-Za-z0-9_]` with `_<name>_`.
pub fn qstr_escape(qstr: &str) -> String {
    let mut out = String::with_capacity(qstr.len());
    for c in qstr.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push('_');
            out.push_str(codepoint_name(c));
            out.push('_');
        }
    }
    out
}

/// The subset of `html.entities.codepoint2name` plus the original's custom
/// additions that qstr text actually exercises (operators and punctuation);
/// anything else falls back to a `0xNN` hex label exactly as the original
/// does for unnamed codepoints.
fn codepoint_name(c: char) -> String {
    match c {
        '-' => "hyphen".to_string(),
        ' ' => "space".to_string(),
        '\'' => "squot".to_string(),
        ',' => "comma".to_string(),
        '.' => "dot".to_string(),
        ':' => "colon".to_string(),
        ';' => "semicolon".to_string(),
        '/' => "slash".to_string(),
        '%' => "percent".to_string(),
        '#' => "hash".to_string(),
        '(' => "paren_open".to_string(),
        ')' => "paren_close".to_string(),
        '[' => "bracket_open".to_string(),
        ']' => "bracket_close".to_string(),
        '{' => "brace_open".to_string(),
        '}' => "brace_close".to_string(),
        '*' => "star".to_string(),
        '!' => "bang".to_string(),
        '\\' => "backslash".to_string(),
        '+' => "plus".to_string(),
        '$' => "dollar".to_string(),
        '=' => "equals".to_string(),
        '?' => "question".to_string(),
        '@' => "at_sign".to_string(),
        '^' => "caret".to_string(),
        '|' => "pipe".to_string(),
        '~' => "tilde".to_string(),
        '&' => "amp".to_string(),
        '<' => "lt".to_string(),
        '>' => "gt".to_string(),
        '"' => "quot".to_string(),
        other => format!("0x{:02x}", other as u32),
    }
}

/// The qstr hash function (must match the runtime's `qstr.c` implementation
/// bit-for-bit).
pub fn compute_hash(bytes: &[u8], bytes_hash: usize) -> u32 {
    let mut hash: u32 = 5381;
    for &b in bytes {
        hash = hash.wrapping_mul(33) ^ (b as u32);
    }
    let mask = if bytes_hash >= 4 { u32::MAX } else { (1u32 << (8 * bytes_hash)) - 1 };
    let masked = hash & mask;
    if masked == 0 {
        1
    } else {
        masked
    }
}
