//! Error types for the marshalling wrapper.

use keyfit_kernel::KernelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    /// Encoding or decoding JSON failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// `flatten` was asked for an envelope type it cannot produce.
    #[error("cannot flatten an envelope of `{from}` into an envelope of `{to}`")]
    Flattening {
        from: &'static str,
        to: &'static str,
    },

    /// Interpretation or coding-key inference failed.
    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error("failed to read options file: {path}: {source}")]
    ReadOptions {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseOptions {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
