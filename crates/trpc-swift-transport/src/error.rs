//! Runtime error taxonomy shared with the Swift template

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes a generated client can surface.
///
/// The negative JSON-RPC style codes are sent by tRPC servers; `Unknown` and
/// `MissingOutputPayload` are raised by the client itself. Serialized as the
/// bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum TrpcErrorCode {
    ParseError = -32700,
    BadRequest = -32600,
    InternalServerError = -32603,
    Unauthorized = -32001,
    Forbidden = -32003,
    NotFound = -32004,
    MethodNotSupported = -32005,
    Timeout = -32008,
    Conflict = -32009,
    PreconditionFailed = -32012,
    PayloadTooLarge = -32013,
    UnprocessableContent = -32022,
    TooManyRequests = -32029,
    ClientClosedRequest = -32099,

    Unknown = -1,
    MissingOutputPayload = -2,
}

impl TrpcErrorCode {
    /// Every code, in template declaration order.
    pub const ALL: [TrpcErrorCode; 16] = [
        TrpcErrorCode::ParseError,
        TrpcErrorCode::BadRequest,
        TrpcErrorCode::InternalServerError,
        TrpcErrorCode::Unauthorized,
        TrpcErrorCode::Forbidden,
        TrpcErrorCode::NotFound,
        TrpcErrorCode::MethodNotSupported,
        TrpcErrorCode::Timeout,
        TrpcErrorCode::Conflict,
        TrpcErrorCode::PreconditionFailed,
        TrpcErrorCode::PayloadTooLarge,
        TrpcErrorCode::UnprocessableContent,
        TrpcErrorCode::TooManyRequests,
        TrpcErrorCode::ClientClosedRequest,
        TrpcErrorCode::Unknown,
        TrpcErrorCode::MissingOutputPayload,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    /// Case name of the Swift `TRPCErrorCode` enum.
    pub fn swift_case(self) -> &'static str {
        match self {
            TrpcErrorCode::ParseError => "parseError",
            TrpcErrorCode::BadRequest => "badRequest",
            TrpcErrorCode::InternalServerError => "internalServerError",
            TrpcErrorCode::Unauthorized => "unauthorized",
            TrpcErrorCode::Forbidden => "forbidden",
            TrpcErrorCode::NotFound => "notFound",
            TrpcErrorCode::MethodNotSupported => "methodNotSupported",
            TrpcErrorCode::Timeout => "timeout",
            TrpcErrorCode::Conflict => "conflict",
            TrpcErrorCode::PreconditionFailed => "preconditionFailed",
            TrpcErrorCode::PayloadTooLarge => "payloadTooLarge",
            TrpcErrorCode::UnprocessableContent => "unprocessableContent",
            TrpcErrorCode::TooManyRequests => "tooManyRequests",
            TrpcErrorCode::ClientClosedRequest => "clientClosedRequest",
            TrpcErrorCode::Unknown => "unknown",
            TrpcErrorCode::MissingOutputPayload => "missingOutputPayload",
        }
    }

    /// Whether the code originates on the client rather than the server.
    pub fn is_client_side(self) -> bool {
        self.code() > -32000
    }
}

impl fmt::Display for TrpcErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.swift_case(), self.code())
    }
}

/// An integer that names no [`TrpcErrorCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown tRPC error code {0}")]
pub struct InvalidErrorCode(pub i32);

impl TryFrom<i32> for TrpcErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.code() == code)
            .ok_or(InvalidErrorCode(code))
    }
}

impl From<TrpcErrorCode> for i32 {
    fn from(code: TrpcErrorCode) -> Self {
        code.code()
    }
}

/// Error returned by a procedure call, as carried in a batch response.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("tRPC error {code}: {}", .message.as_deref().unwrap_or("no message"))]
pub struct TrpcError {
    pub code: TrpcErrorCode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Server-specific details, kept untyped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl TrpcError {
    pub fn new(code: TrpcErrorCode) -> Self {
        Self {
            code,
            message: None,
            data: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// The error the runtime raises when a response has neither data nor error.
    pub fn missing_output_payload() -> Self {
        Self::new(TrpcErrorCode::MissingOutputPayload).with_message("Missing output payload.")
    }
}
