//! Error kinds for the generator (spec.md §7).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("empty preprocessor output: {0} qstr entries but no QCFG lines")]
    EmptyConfig(usize),

    #[error("qstr '{ident}' is {len} bytes, too long for a {limit}-byte length field")]
    OversizedQstr { ident: String, len: usize, limit: usize },

    #[error("self-verification failed: decode(encode({original:?})) did not round-trip")]
    SelfVerifyMismatch { original: String },

    #[error("malformed translation catalog: {0}")]
    Catalog(String),

    #[error("--translation was given without --compression-filename")]
    MissingCompressionFilename,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
