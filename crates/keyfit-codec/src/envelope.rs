//! `Envelope<C>`: a value that is either decoded content or encoded JSON.
//!
//! Conversions happen lazily. An envelope built from content encodes on
//! `data()`; one built from bytes decodes on `content()`, so invalid JSON
//! only surfaces when the content is asked for.

use crate::error::CodecError;
use crate::options::MarshalOptions;
use keyfit_kernel::{
    Bindings, CodingKeyed, DynamicMap, Reflect, apply_multi_level_coding_keys, coding_keys_labels,
    interpret_object,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::any::{Any, type_name};

#[derive(Debug, Clone)]
enum Repr<C> {
    Content(C),
    Data(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct Envelope<C> {
    repr: Repr<C>,
    options: MarshalOptions,
}

impl<C> Envelope<C> {
    pub fn new(content: C) -> Self {
        Self {
            repr: Repr::Content(content),
            options: MarshalOptions::default(),
        }
    }

    pub fn from_data(data: impl Into<Vec<u8>>) -> Self {
        Self {
            repr: Repr::Data(data.into()),
            options: MarshalOptions::default(),
        }
    }

    /// Wrap JSON text. The text is not validated until content is requested.
    pub fn from_json_str(text: &str) -> Self {
        Self::from_data(text.as_bytes())
    }

    pub fn with_options(mut self, options: MarshalOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> MarshalOptions {
        self.options
    }

    /// True when the envelope currently holds encoded bytes.
    pub fn is_encoded(&self) -> bool {
        matches!(self.repr, Repr::Data(_))
    }
}

fn decode<C: DeserializeOwned>(bytes: &[u8], options: MarshalOptions) -> Result<C, CodecError> {
    let content = serde_json::from_slice(bytes)?;
    if options.verbose {
        tracing::debug!(
            content_type = type_name::<C>(),
            bytes = bytes.len(),
            "decoded content"
        );
    }
    Ok(content)
}

impl<C: DeserializeOwned> Envelope<C> {
    fn with_content<R>(&self, f: impl FnOnce(&C) -> Result<R, CodecError>) -> Result<R, CodecError> {
        match &self.repr {
            Repr::Content(content) => f(content),
            Repr::Data(bytes) => f(&decode(bytes, self.options)?),
        }
    }

    /// The content, decoded from the stored bytes when needed.
    pub fn content(&self) -> Result<C, CodecError>
    where
        C: Clone,
    {
        self.with_content(|content| Ok(content.clone()))
    }

    pub fn into_content(self) -> Result<C, CodecError> {
        match self.repr {
            Repr::Content(content) => Ok(content),
            Repr::Data(bytes) => decode(&bytes, self.options),
        }
    }

    /// Naive structural view of the content: declared field names to values.
    pub fn dictionary(&self) -> Result<DynamicMap, CodecError>
    where
        C: Reflect,
    {
        self.with_content(|content| Ok(interpret_object(&content.reflect())?))
    }

    /// The content's fields under their inferred external keys, with
    /// declared nested objects re-keyed one level down.
    pub fn keyed_dictionary(&self) -> Result<DynamicMap, CodecError>
    where
        C: CodingKeyed,
    {
        self.with_content(|content| Ok(apply_multi_level_coding_keys(content)?))
    }

    /// Inferred field label to external key bindings for the content.
    pub fn coding_keys(&self) -> Result<Bindings, CodecError>
    where
        C: Serialize + Reflect,
    {
        self.with_content(|content| Ok(coding_keys_labels(content)?))
    }

    pub fn map_content<X>(
        &self,
        f: impl FnOnce(C) -> Result<X, CodecError>,
    ) -> Result<Envelope<X>, CodecError>
    where
        C: Clone,
    {
        Ok(Envelope::new(f(self.content()?)?).with_options(self.options))
    }

    pub fn flat_map_content<X>(
        &self,
        f: impl FnOnce(C) -> Result<Envelope<X>, CodecError>,
    ) -> Result<Envelope<X>, CodecError>
    where
        C: Clone,
        X: DeserializeOwned + 'static,
    {
        self.map_content(f)?.flatten()
    }

    pub fn apply_content(&self, f: impl FnOnce(C) -> Result<(), CodecError>) -> Result<(), CodecError>
    where
        C: Clone,
    {
        f(self.content()?)
    }

    /// Remove one level of wrapping.
    ///
    /// An `Envelope<Envelope<X>>` yields the inner envelope, and an
    /// `Envelope<X>` yields itself. Any other pairing fails with
    /// [`CodecError::Flattening`].
    pub fn flatten<X>(self) -> Result<Envelope<X>, CodecError>
    where
        C: 'static,
        X: 'static,
    {
        let options = self.options;
        let content: Box<dyn Any> = Box::new(self.into_content()?);
        match content.downcast::<Envelope<X>>() {
            Ok(inner) => Ok(*inner),
            Err(content) => match content.downcast::<X>() {
                Ok(same) => Ok(Envelope::new(*same).with_options(options)),
                Err(_) => Err(CodecError::Flattening {
                    from: type_name::<C>(),
                    to: type_name::<X>(),
                }),
            },
        }
    }
}

impl<C: Serialize> Envelope<C> {
    /// The encoded JSON, pretty-printed when the options ask for it.
    pub fn data(&self) -> Result<Vec<u8>, CodecError> {
        let content = match &self.repr {
            Repr::Data(bytes) => return Ok(bytes.clone()),
            Repr::Content(content) => content,
        };
        let bytes = if self.options.pretty {
            serde_json::to_vec_pretty(content)?
        } else {
            serde_json::to_vec(content)?
        };
        if self.options.verbose {
            tracing::debug!(
                content_type = type_name::<C>(),
                bytes = bytes.len(),
                pretty = self.options.pretty,
                "encoded content"
            );
        }
        Ok(bytes)
    }

    pub fn map_data<X>(
        &self,
        f: impl FnOnce(Vec<u8>) -> Result<X, CodecError>,
    ) -> Result<Envelope<X>, CodecError> {
        Ok(Envelope::new(f(self.data()?)?).with_options(self.options))
    }

    pub fn flat_map_data<X>(
        &self,
        f: impl FnOnce(Vec<u8>) -> Result<Envelope<X>, CodecError>,
    ) -> Result<Envelope<X>, CodecError>
    where
        X: DeserializeOwned + 'static,
    {
        self.map_data(f)?.flatten()
    }

    pub fn apply_data(&self, f: impl FnOnce(Vec<u8>) -> Result<(), CodecError>) -> Result<(), CodecError> {
        f(self.data()?)
    }
}

impl<Z> Envelope<Z> {
    /// Combine the contents of two envelopes into a new one. The result
    /// carries the options of `x`.
    pub fn zip<X, Y>(
        x: &Envelope<X>,
        y: &Envelope<Y>,
        f: impl FnOnce(X, Y) -> Result<Z, CodecError>,
    ) -> Result<Self, CodecError>
    where
        X: DeserializeOwned + Clone,
        Y: DeserializeOwned + Clone,
    {
        let z = f(x.content()?, y.content()?)?;
        Ok(Envelope::new(z).with_options(x.options))
    }
}

impl<C> From<C> for Envelope<C> {
    fn from(content: C) -> Self {
        Self::new(content)
    }
}

impl<C: Serialize> Serialize for Envelope<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.repr {
            Repr::Content(content) => content.serialize(serializer),
            Repr::Data(bytes) => serde_json::from_slice::<serde_json::Value>(bytes)
                .map_err(serde::ser::Error::custom)?
                .serialize(serializer),
        }
    }
}

impl<'de, C: Deserialize<'de>> Deserialize<'de> for Envelope<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        C::deserialize(deserializer).map(Envelope::new)
    }
}
