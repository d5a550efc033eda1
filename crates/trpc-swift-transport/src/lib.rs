//! trpc-swift-transport - the wire contract of generated Swift clients
//!
//! Generated clients call into a runtime template that speaks the tRPC batch
//! protocol. This crate models that protocol in Rust:
//! - [`BatchRequest`] and [`BatchResponse`] for the `{"0": {"json": ...}}` framing
//! - [`TrpcError`] and [`TrpcErrorCode`], the runtime's error taxonomy
//! - [`date_format`] for the fixed millisecond date format
//! - [`Codec`] and [`JsonCodec`] for encoding and decoding whole calls

pub mod date_format;

mod codec;
mod envelope;
mod error;

pub use codec::{Codec, CodecError, JsonCodec};
pub use envelope::{
    BatchRequest, BatchResponse, DataContainer, EmptyObject, ErrorContainer, RequestData,
    ResponseEntry, ResultContainer,
};
pub use error::{InvalidErrorCode, TrpcError, TrpcErrorCode};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BatchRequest, BatchResponse, Codec, CodecError, EmptyObject, JsonCodec, TrpcError,
        TrpcErrorCode,
    };
}
