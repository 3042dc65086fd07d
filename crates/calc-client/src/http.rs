//! Shared JSON request helpers for the flows.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

pub async fn get_json<T, R>(transport: &T, path: &str) -> Result<R, ClientError>
where
    T: Transport + ?Sized,
    R: DeserializeOwned,
{
    let response = transport.send(ApiRequest::get(path)).await?;
    decode(path, &response)
}

pub async fn post_json_body<T, B, R>(transport: &T, path: &str, body: &B) -> Result<R, ClientError>
where
    T: Transport + ?Sized,
    B: Serialize,
    R: DeserializeOwned,
{
    let body = serde_json::to_value(body).map_err(ClientError::Encode)?;
    let response = transport.send(ApiRequest::post(path, body)).await?;
    decode(path, &response)
}

/// Non-2xx is a failure regardless of body; otherwise parse as `R`.
fn decode<R: DeserializeOwned>(path: &str, response: &ApiResponse) -> Result<R, ClientError> {
    if !response.is_success() {
        return Err(ClientError::Status {
            path: path.to_string(),
            status: response.status,
            detail: response.error_detail(),
        });
    }
    response.json().map_err(|source| ClientError::Decode {
        path: path.to_string(),
        source,
    })
}
