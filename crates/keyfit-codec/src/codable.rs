//! `JsonCodable`: envelope access and decoding constructors for any
//! coding-keyed type.

use crate::envelope::Envelope;
use crate::error::CodecError;
use keyfit_kernel::{CodingKeyed, DynamicMap, DynamicValue};
use serde::de::DeserializeOwned;

pub trait JsonCodable: CodingKeyed + DeserializeOwned + Clone + 'static {
    fn json(&self) -> Envelope<Self> {
        Envelope::new(self.clone())
    }

    fn from_data(data: &[u8]) -> Result<Self, CodecError> {
        Envelope::<Self>::from_data(data).into_content()
    }

    fn from_json_str(text: &str) -> Result<Self, CodecError> {
        Envelope::<Self>::from_json_str(text).into_content()
    }

    /// Decode from an already parsed JSON value.
    fn from_json(value: serde_json::Value) -> Result<Self, CodecError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Decode from a keyed dictionary. Keys must be external keys, as
    /// produced by [`Envelope::keyed_dictionary`].
    fn from_dictionary(dictionary: &DynamicMap) -> Result<Self, CodecError> {
        Self::from_json(DynamicValue::Map(dictionary.clone()).to_json())
    }
}

impl<T> JsonCodable for T where T: CodingKeyed + DeserializeOwned + Clone + 'static {}
