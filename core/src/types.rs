//! Domain DTOs for the device-management API.
//!
//! # Design
//! Field names follow the server's camelCase wire contract exactly; the
//! contract is case-sensitive. Read-side types tolerate absent fields by
//! defaulting them — a response missing an optional property must never fail
//! deserialization. These types mirror the mock-server's schema but are
//! defined independently; integration tests catch any drift between the two
//! crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single key/value attribute attached to a device. Keys need not be
/// unique within a device's attribute list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceAttribute {
    pub key: String,
    pub value: String,
}

impl DeviceAttribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Write-side device entity, sent as the registration request body.
///
/// `name` and `manufacturer` are required by the server; the other fields are
/// optional and omitted from the JSON when empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub manufacturer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<DeviceAttribute>,
}

/// Read-side device entity returned by the server: the registered fields
/// plus the server-assigned id, canonical resource URL, and creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetails {
    #[serde(rename = "deviceId", default)]
    pub id: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<DeviceAttribute>,
}

/// Pagination envelope around a partial list of entities.
///
/// `result.len() <= requested_count` is expected but not enforced here; the
/// server owns that invariant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    #[serde(default)]
    pub requested_count: u32,
    #[serde(default)]
    pub skip: u32,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,
}

/// Server-reported global usage snapshot, read-only and point-in-time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Quota {
    #[serde(default)]
    pub total_device_count: u64,
    #[serde(default)]
    pub max_device_count: u64,
    #[serde(default)]
    pub max_data_node_count_per_device: u64,
    #[serde(default)]
    pub used_storage_bytes: u64,
    #[serde(default)]
    pub max_storage_bytes: u64,
}

/// Per-device usage snapshot, read-only and point-in-time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceQuota {
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub request_count_today: u64,
    #[serde(default)]
    pub max_read_request_count_per_day: u64,
    #[serde(default)]
    pub data_node_count: u64,
    #[serde(default)]
    pub used_storage_bytes: u64,
}

/// Structured error payload the server attaches to failure responses.
///
/// Every field defaults when absent; a partially populated payload is still
/// more useful to the caller than none at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub more_info_url: String,
    #[serde(default)]
    pub api_version: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_serializes_with_wire_field_names() {
        let device = Device {
            name: "sensor-1".to_string(),
            device_type: Some("thermometer".to_string()),
            description: Some("hall sensor".to_string()),
            manufacturer: "acme".to_string(),
            attributes: vec![DeviceAttribute::new("room", "hall")],
        };
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json["name"], "sensor-1");
        assert_eq!(json["type"], "thermometer");
        assert_eq!(json["description"], "hall sensor");
        assert_eq!(json["manufacturer"], "acme");
        assert_eq!(json["attributes"][0]["key"], "room");
        assert_eq!(json["attributes"][0]["value"], "hall");
    }

    #[test]
    fn device_omits_absent_optional_fields() {
        let device = Device {
            name: "sensor-1".to_string(),
            device_type: None,
            description: None,
            manufacturer: "acme".to_string(),
            attributes: Vec::new(),
        };
        let json = serde_json::to_value(&device).unwrap();
        assert!(json.get("type").is_none());
        assert!(json.get("description").is_none());
        assert!(json.get("attributes").is_none());
    }

    #[test]
    fn device_details_tolerates_missing_fields() {
        let details: DeviceDetails = serde_json::from_str(r#"{"deviceId":"abc"}"#).unwrap();
        assert_eq!(details.id, "abc");
        assert_eq!(details.href, "");
        assert!(details.created_at.is_none());
        assert!(details.attributes.is_empty());
    }

    #[test]
    fn device_details_reads_wire_field_names() {
        let details: DeviceDetails = serde_json::from_str(
            r#"{
                "deviceId": "153ffceb982745e8b1e8abacf9c217f3",
                "href": "/devices/153ffceb982745e8b1e8abacf9c217f3/",
                "createdAt": "2019-01-01T00:00:00Z",
                "name": "sensor-1",
                "type": "thermometer",
                "manufacturer": "acme",
                "attributes": [{"key": "room", "value": "hall"}]
            }"#,
        )
        .unwrap();
        assert_eq!(details.id, "153ffceb982745e8b1e8abacf9c217f3");
        assert_eq!(details.created_at.unwrap().to_rfc3339(), "2019-01-01T00:00:00+00:00");
        assert_eq!(details.device_type.as_deref(), Some("thermometer"));
        assert_eq!(details.attributes.len(), 1);
    }

    #[test]
    fn paged_result_reads_envelope() {
        let page: PagedResult<DeviceDetails> = serde_json::from_str(
            r#"{"requestedCount":2,"skip":1,"totalCount":7,"result":[{"deviceId":"a"}]}"#,
        )
        .unwrap();
        assert_eq!(page.requested_count, 2);
        assert_eq!(page.skip, 1);
        assert_eq!(page.total_count, 7);
        assert_eq!(page.result.len(), 1);
    }

    #[test]
    fn error_info_defaults_absent_fields() {
        let info: ErrorInfo = serde_json::from_str(r#"{"code":8001}"#).unwrap();
        assert_eq!(info.code, 8001);
        assert_eq!(info.description, "");
        assert_eq!(info.more_info_url, "");
        assert_eq!(info.api_version, 0);
    }

    #[test]
    fn attribute_keys_need_not_be_unique() {
        let device: Device = serde_json::from_str(
            r#"{"name":"n","manufacturer":"m","attributes":[
                {"key":"tag","value":"a"},{"key":"tag","value":"b"}]}"#,
        )
        .unwrap();
        assert_eq!(device.attributes.len(), 2);
        assert_eq!(device.attributes[0].key, device.attributes[1].key);
    }
}
