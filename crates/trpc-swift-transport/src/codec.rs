//! Codec trait and JSON implementation

use crate::envelope::{BatchRequest, BatchResponse};
use crate::error::TrpcError;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Errors that can occur during encoding/decoding
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// The call itself failed; the server or runtime sent an error.
    #[error(transparent)]
    Remote(#[from] TrpcError),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            CodecError::Deserialization(err.to_string())
        } else {
            CodecError::Serialization(err.to_string())
        }
    }
}

/// Trait for message encoding and decoding
pub trait Codec: Send + Sync {
    /// Encode a value to bytes
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Decode bytes to a value
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError>;

    /// Value of the `Content-Type` header the runtime sends
    fn content_type(&self) -> &'static str;

    /// Encode the batch body of one call; `None` for procedures without input.
    fn encode_call<T: Serialize>(&self, input: Option<&T>) -> Result<Vec<u8>, CodecError> {
        let request = match input {
            Some(input) => BatchRequest::new(input),
            None => BatchRequest::without_input(),
        };
        self.encode(&request)
    }

    /// Decode the batch reply of one call, surfacing a returned error as
    /// [`CodecError::Remote`].
    fn decode_reply<T: DeserializeOwned>(
        &self,
        data: &[u8],
        expects_payload: bool,
    ) -> Result<Option<T>, CodecError> {
        let response: BatchResponse<T> = self.decode(data)?;
        Ok(response.into_result(expects_payload)?)
    }
}

/// JSON codec implementation using serde_json
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        Self
    }

    /// The `input` query parameter a query call carries, before URL encoding.
    pub fn query_parameter<T: Serialize>(&self, input: Option<&T>) -> Result<String, CodecError> {
        let request = match input {
            Some(input) => BatchRequest::new(input),
            None => BatchRequest::without_input(),
        };
        serde_json::to_string(&request).map_err(Into::into)
    }
}

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(Into::into)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(data).map_err(Into::into)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}

#[cfg(test)]
#[path = "codec/codec_tests.rs"]
mod codec_tests;
