//! Versioned wire protocol — JSON serialization with forward compatibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use praxis_core::traits::RowPayload;

/// Current protocol version.
pub const PROTOCOL_VERSION: &str = "1.0";

/// Envelope for all gateway requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayRequest<T: Serialize> {
    /// Protocol version for forward compatibility.
    pub version: String,
    /// Unique request ID for tracing.
    pub request_id: String,
    /// Timestamp of the request.
    pub timestamp: DateTime<Utc>,
    /// The actual payload.
    pub payload: T,
}

/// Envelope for all gateway responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayResponse<T> {
    /// Protocol version.
    pub version: String,
    /// Echoed request ID.
    pub request_id: String,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Error message if `success` is false.
    pub error: Option<String>,
    /// The response payload.
    pub data: Option<T>,
}

/// Body of an upsert request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertRequest {
    pub rows: Vec<RowPayload>,
}

/// Body of a select request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectRequest {
    /// `(column, value)` equality filters, all of which must match.
    pub filters: Vec<(String, String)>,
}

/// Body of an upsert response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertResponseBody {
    /// Ids newly inserted by this call.
    pub acked: Vec<String>,
    /// Ids the remote already held.
    pub already_exists: Vec<String>,
}

/// Body of a select response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectResponseBody {
    pub rows: Vec<RowPayload>,
}

impl<T: Serialize> GatewayRequest<T> {
    /// Create a new request envelope.
    pub fn new(payload: T) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            request_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            payload,
        }
    }
}

impl<T> GatewayResponse<T> {
    /// Create a success response.
    pub fn ok(request_id: String, data: T) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            request_id,
            success: true,
            error: None,
            data: Some(data),
        }
    }

    /// Create an error response.
    pub fn err(request_id: String, error: String) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            request_id,
            success: false,
            error: Some(error),
            data: None,
        }
    }
}
