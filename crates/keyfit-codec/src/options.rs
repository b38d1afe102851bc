//! Marshalling options.
//!
//! Options travel with each [`Envelope`](crate::Envelope) instead of
//! living in process-wide state. They can be written in TOML:
//!
//! ```toml
//! pretty = true
//! verbose = false
//! ```

use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarshalOptions {
    /// Encode with indentation.
    pub pretty: bool,

    /// Log every conversion between content and data.
    pub verbose: bool,
}

impl MarshalOptions {
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Parse options from TOML text. `origin` names the source in errors.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, CodecError> {
        toml::from_str(text).map_err(|source| CodecError::ParseOptions {
            path: origin.to_string(),
            source,
        })
    }

    /// Load options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CodecError::ReadOptions {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }
}
