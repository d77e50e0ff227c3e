//! Typed client core for the device-management REST API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `DeviceClient` is stateless — it holds only the parsed base URL.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Every non-2xx response maps to one error kind, `ServerCommunication`,
//!   carrying the status code and the server's `ErrorInfo` payload when the
//!   body decodes as one.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::DeviceClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    Device, DeviceAttribute, DeviceDetails, DeviceQuota, ErrorInfo, PagedResult, Quota,
};
