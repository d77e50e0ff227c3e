//! Stateless HTTP request builder and response parser for the device API.
//!
//! # Design
//! `DeviceClient` holds only the parsed base URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies — and free to issue
//! independent operations concurrently through a shared client.
//!
//! Error policy is uniform across operations: any non-2xx status becomes
//! `ApiError::ServerCommunication` carrying the status code and, when the
//! body decodes as one, the server's `ErrorInfo` payload. The client never
//! retries and never interprets status codes beyond success vs. failure.

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Device, DeviceDetails, DeviceQuota, ErrorInfo, PagedResult, Quota};

const ACCEPT: (&str, &str) = ("accept", "application/json");
const CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

/// Stateless client for the device-management API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    base: Url,
}

impl DeviceClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(format!(
                "{base_url} cannot carry path segments"
            )));
        }
        Ok(Self { base })
    }

    /// Join percent-escaped path segments onto the base URL. Every endpoint
    /// of this API ends in a trailing slash; the final empty segment puts it
    /// there.
    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
            path.push("");
        }
        url.into()
    }

    pub fn build_register_device(&self, device: &Device) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(device).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.endpoint(&["devices"]),
            query: Vec::new(),
            headers: vec![header(ACCEPT), header(CONTENT_TYPE)],
            body: Some(body),
        })
    }

    /// `limit` and `offset` are passed through verbatim as decimal strings.
    pub fn build_get_devices(&self, limit: u32, offset: u32) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.endpoint(&["devices"]),
            query: vec![
                ("limit".to_string(), limit.to_string()),
                ("offset".to_string(), offset.to_string()),
            ],
            headers: vec![header(ACCEPT)],
            body: None,
        }
    }

    pub fn build_get_device(&self, device_id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.endpoint(&["devices", device_id]),
            query: Vec::new(),
            headers: vec![header(ACCEPT)],
            body: None,
        }
    }

    pub fn build_get_quota(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.endpoint(&["quota", "all"]),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_device_quota(&self, device_id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.endpoint(&["quota", device_id]),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_register_device(&self, response: HttpResponse) -> Result<DeviceDetails, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_get_devices(
        &self,
        response: HttpResponse,
    ) -> Result<PagedResult<DeviceDetails>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_get_device(&self, response: HttpResponse) -> Result<DeviceDetails, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_get_quota(&self, response: HttpResponse) -> Result<Quota, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_get_device_quota(&self, response: HttpResponse) -> Result<DeviceQuota, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }
}

fn header((name, value): (&str, &str)) -> (String, String) {
    (name.to_string(), value.to_string())
}

/// Map any non-2xx response to `ServerCommunication`. The body is decoded as
/// `ErrorInfo` on a best-effort basis; a body that is not one leaves the
/// payload empty rather than failing.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    let error_info: Option<ErrorInfo> = serde_json::from_str(&response.body).ok();
    Err(ApiError::ServerCommunication {
        status: response.status,
        error_info,
    })
}

/// Decode a success body, reporting schema mismatches distinctly from the
/// communication-error taxonomy.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
