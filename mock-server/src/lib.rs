//! In-memory implementation of the device-management API for tests.
//!
//! Implements the same wire contract the client core targets: registration,
//! paginated listing, device lookup, and the two quota endpoints, with
//! `ErrorInfo` JSON bodies on failures. Paths keep their trailing slashes;
//! the contract treats `/devices/` and `/devices` as different paths.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

pub const ERROR_CODE_UNKNOWN_DEVICE: u32 = 8001;
pub const ERROR_CODE_NAME_REQUIRED: u32 = 8002;
pub const ERROR_CODE_MANUFACTURER_REQUIRED: u32 = 8003;

const MORE_INFO_URL: &str = "/errorcodes/";
const API_VERSION: u32 = 1;

const MAX_DEVICE_COUNT: u64 = 100;
const MAX_DATA_NODE_COUNT_PER_DEVICE: u64 = 500;
const MAX_READ_REQUEST_COUNT_PER_DAY: u64 = 86_400;
const MAX_STORAGE_BYTES: u64 = 1024 * 1024 * 1024;
// Flat per-device charge; the mock does not track real payloads.
const STORAGE_BYTES_PER_DEVICE: u64 = 4096;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceAttribute {
    pub key: String,
    pub value: String,
}

/// Registration request body. Required fields are optional here so the
/// handler can answer with the contract's `ErrorInfo` payload instead of a
/// bare extractor rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDevice {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub attributes: Vec<DeviceAttribute>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetails {
    pub device_id: String,
    pub href: String,
    pub created_at: DateTime<Utc>,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub manufacturer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<DeviceAttribute>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub requested_count: u32,
    pub skip: u32,
    pub total_count: u64,
    pub result: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quota {
    pub total_device_count: u64,
    pub max_device_count: u64,
    pub max_data_node_count_per_device: u64,
    pub used_storage_bytes: u64,
    pub max_storage_bytes: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceQuota {
    pub device_id: String,
    pub request_count_today: u64,
    pub max_read_request_count_per_day: u64,
    pub data_node_count: u64,
    pub used_storage_bytes: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    pub description: String,
    pub code: u32,
    pub more_info_url: String,
    pub api_version: u32,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u32 {
    10
}

/// Registered devices in insertion order, so pagination is stable.
pub type Db = Arc<RwLock<Vec<DeviceDetails>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/devices/", get(list_devices).post(register_device))
        .route("/devices/{id}/", get(get_device))
        .route("/quota/all/", get(get_quota))
        .route("/quota/{id}/", get(get_device_quota))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn bad_request(description: &str, code: u32) -> (StatusCode, Json<ErrorInfo>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorInfo {
            description: description.to_string(),
            code,
            more_info_url: MORE_INFO_URL.to_string(),
            api_version: API_VERSION,
        }),
    )
}

fn unknown_device() -> (StatusCode, Json<ErrorInfo>) {
    (
        StatusCode::FORBIDDEN,
        Json(ErrorInfo {
            description: "Re-check device id and ensure device access is valid".to_string(),
            code: ERROR_CODE_UNKNOWN_DEVICE,
            more_info_url: MORE_INFO_URL.to_string(),
            api_version: API_VERSION,
        }),
    )
}

async fn register_device(
    State(db): State<Db>,
    Json(input): Json<RegisterDevice>,
) -> Result<(StatusCode, Json<DeviceDetails>), (StatusCode, Json<ErrorInfo>)> {
    let name = match input.name.filter(|n| !n.is_empty()) {
        Some(name) => name,
        None => return Err(bad_request("Device name is needed", ERROR_CODE_NAME_REQUIRED)),
    };
    let manufacturer = match input.manufacturer.filter(|m| !m.is_empty()) {
        Some(manufacturer) => manufacturer,
        None => {
            return Err(bad_request(
                "Device manufacturer is needed",
                ERROR_CODE_MANUFACTURER_REQUIRED,
            ))
        }
    };

    let id = Uuid::new_v4().simple().to_string();
    let details = DeviceDetails {
        href: format!("/devices/{id}/"),
        device_id: id,
        created_at: Utc::now(),
        name,
        device_type: input.device_type,
        description: input.description,
        manufacturer,
        attributes: input.attributes,
    };
    debug!(device_id = %details.device_id, "registered device");
    db.write().await.push(details.clone());
    Ok((StatusCode::CREATED, Json(details)))
}

async fn list_devices(
    State(db): State<Db>,
    Query(params): Query<PageParams>,
) -> Json<PagedResult<DeviceDetails>> {
    let devices = db.read().await;
    let page: Vec<DeviceDetails> = devices
        .iter()
        .skip(params.offset as usize)
        .take(params.limit as usize)
        .cloned()
        .collect();
    debug!(limit = params.limit, offset = params.offset, returned = page.len(), "listed devices");
    Json(PagedResult {
        requested_count: params.limit,
        skip: params.offset,
        total_count: devices.len() as u64,
        result: page,
    })
}

async fn get_device(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<DeviceDetails>, (StatusCode, Json<ErrorInfo>)> {
    let devices = db.read().await;
    devices
        .iter()
        .find(|d| d.device_id == id)
        .cloned()
        .map(Json)
        .ok_or_else(unknown_device)
}

async fn get_quota(State(db): State<Db>) -> Json<Quota> {
    let devices = db.read().await;
    let total = devices.len() as u64;
    Json(Quota {
        total_device_count: total,
        max_device_count: MAX_DEVICE_COUNT,
        max_data_node_count_per_device: MAX_DATA_NODE_COUNT_PER_DEVICE,
        used_storage_bytes: total * STORAGE_BYTES_PER_DEVICE,
        max_storage_bytes: MAX_STORAGE_BYTES,
    })
}

async fn get_device_quota(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<DeviceQuota>, (StatusCode, Json<ErrorInfo>)> {
    let devices = db.read().await;
    if !devices.iter().any(|d| d.device_id == id) {
        return Err(unknown_device());
    }
    Ok(Json(DeviceQuota {
        device_id: id,
        request_count_today: 0,
        max_read_request_count_per_day: MAX_READ_REQUEST_COUNT_PER_DAY,
        data_node_count: 0,
        used_storage_bytes: STORAGE_BYTES_PER_DEVICE,
    }))
}
