//! Batch request and response envelopes of the tRPC HTTP protocol
//!
//! Generated clients always send a batch of one call. The input travels as
//! `{"0": {"json": input}}` (in the query string for queries, in the body for
//! mutations) and the reply is a one-element array.

use crate::error::TrpcError;
use serde::{Deserialize, Serialize};

/// The "no payload" marker of the runtime, encoded as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyObject {}

/// Input wrapper of a single call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestData<T> {
    /// Absent when the procedure takes no input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<T>,
}

/// Batch of exactly one call, keyed by its index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest<T> {
    #[serde(rename = "0")]
    pub zero: RequestData<T>,
}

impl<T> BatchRequest<T> {
    /// Request carrying `input`
    pub fn new(input: T) -> Self {
        Self {
            zero: RequestData { json: Some(input) },
        }
    }

    /// Request for a procedure without input; serializes as `{"0":{}}`
    pub fn without_input() -> Self {
        Self {
            zero: RequestData { json: None },
        }
    }

    pub fn input(&self) -> Option<&T> {
        self.zero.json.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataContainer<T> {
    pub json: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultContainer<T> {
    pub data: DataContainer<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorContainer {
    pub json: TrpcError,
}

/// Outcome of one call: a result, an error, or (for procedures without
/// output) neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEntry<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultContainer<T>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorContainer>,
}

impl<T> ResponseEntry<T> {
    pub fn success(data: T) -> Self {
        Self {
            result: Some(ResultContainer {
                data: DataContainer { json: data },
            }),
            error: None,
        }
    }

    pub fn failure(error: TrpcError) -> Self {
        Self {
            result: None,
            error: Some(ErrorContainer { json: error }),
        }
    }

    /// Neither result nor error.
    pub fn empty() -> Self {
        Self {
            result: None,
            error: None,
        }
    }

    /// Resolve the entry the way the runtime does: an error wins, then the
    /// data, then an empty success for procedures with no output.
    pub fn into_result(self, expects_payload: bool) -> Result<Option<T>, TrpcError> {
        if let Some(error) = self.error {
            return Err(error.json);
        }
        match self.result {
            Some(result) => Ok(Some(result.data.json)),
            None if !expects_payload => Ok(None),
            None => Err(TrpcError::missing_output_payload()),
        }
    }
}

/// Reply to a [`BatchRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchResponse<T> {
    pub entries: Vec<ResponseEntry<T>>,
}

impl<T> BatchResponse<T> {
    pub fn single(entry: ResponseEntry<T>) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    /// Resolve the first entry; later entries are ignored.
    ///
    /// An empty batch yields an [`TrpcErrorCode::Unknown`](crate::TrpcErrorCode::Unknown)
    /// error.
    pub fn into_result(self, expects_payload: bool) -> Result<Option<T>, TrpcError> {
        match self.entries.into_iter().next() {
            Some(entry) => entry.into_result(expects_payload),
            None => Err(TrpcError::new(crate::TrpcErrorCode::Unknown)
                .with_message("Empty batch response.")),
        }
    }
}
