//! HTTP implementation of the remote gateway contract.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use praxis_core::config::SyncConfig;
use praxis_core::errors::{PraxisError, PraxisResult, SyncError};
use praxis_core::traits::{
    ChangeCallback, IRemoteGateway, RowPayload, SubscriptionHandle, UpsertAck,
};

use super::protocol::{
    GatewayRequest, GatewayResponse, SelectRequest, SelectResponseBody, UpsertRequest,
    UpsertResponseBody,
};

/// Blocking HTTP client against the tenant's gateway endpoint.
///
/// The endpoint is tenant-scoped; tables map to `/v1/{table}/{op}` paths.
pub struct HttpGateway {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &SyncConfig) -> PraxisResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SyncError::NetworkError {
                reason: format!("building http client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        payload: Req,
    ) -> PraxisResult<Resp> {
        let request = GatewayRequest::new(payload);
        let url = format!("{}/{path}", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| SyncError::NetworkError {
                reason: format!("POST {url}: {e}"),
            })?;

        let envelope: GatewayResponse<Resp> =
            response.json().map_err(|e| SyncError::NetworkError {
                reason: format!("decoding response from {url}: {e}"),
            })?;

        if !envelope.success {
            return Err(SyncError::RemoteRejected {
                reason: envelope
                    .error
                    .unwrap_or_else(|| "unspecified remote error".to_string()),
            }
            .into());
        }
        envelope.data.ok_or_else(|| {
            PraxisError::from(SyncError::RemoteRejected {
                reason: format!("success response from {url} carried no data"),
            })
        })
    }
}

impl IRemoteGateway for HttpGateway {
    fn upsert(&self, table: &str, rows: &[RowPayload]) -> PraxisResult<UpsertAck> {
        let body: UpsertResponseBody = self.post(
            &format!("v1/{table}/upsert"),
            UpsertRequest {
                rows: rows.to_vec(),
            },
        )?;
        Ok(UpsertAck {
            acked: body.acked,
            already_exists: body.already_exists,
        })
    }

    fn select(&self, table: &str, filters: &[(String, String)]) -> PraxisResult<Vec<RowPayload>> {
        let body: SelectResponseBody = self.post(
            &format!("v1/{table}/select"),
            SelectRequest {
                filters: filters.to_vec(),
            },
        )?;
        Ok(body.rows)
    }

    // No push channel over plain HTTP; callers fall back to edge-driven
    // refresh.
    fn subscribe(
        &self,
        _table: &str,
        _filter: Option<(String, String)>,
        _on_change: ChangeCallback,
    ) -> Option<SubscriptionHandle> {
        None
    }
}
