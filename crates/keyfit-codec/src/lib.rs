//! # Keyfit Codec
//!
//! A thin marshalling layer over `serde_json`. [`Envelope`] holds either a
//! value or its encoded bytes and converts between them on demand;
//! [`JsonCodable`] gives every coding-keyed type an envelope and decoding
//! constructors.
//!
//! Options are explicit per envelope ([`MarshalOptions`]); there is no
//! global coder configuration.

pub mod codable;
pub mod envelope;
pub mod error;
pub mod options;

pub use codable::JsonCodable;
pub use envelope::Envelope;
pub use error::CodecError;
pub use options::MarshalOptions;
