//! /register, /lookup, /devices handlers.

use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, MALFORMED_BODY};

use super::ApiState;

// ── /register/{device_id} (POST) ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub ip: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub status: &'static str,
    pub device_id: String,
    pub ip: String,
}

/// Decode a register body.
///
/// Bytes that are not JSON at all are a malformed body. JSON that does not
/// carry a non-empty string `ip` is a validation failure.
pub fn parse_register_body(body: &[u8], expose_internal_errors: bool) -> Result<String, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "malformed register body");
        if expose_internal_errors {
            ApiError::MalformedBody(e.to_string())
        } else {
            ApiError::MalformedBody(MALFORMED_BODY.to_string())
        }
    })?;

    let req: RegisterRequest =
        serde_json::from_value(value).map_err(|_| ApiError::AddressRequired)?;
    if req.ip.is_empty() {
        return Err(ApiError::AddressRequired);
    }
    Ok(req.ip)
}

pub async fn handle_register(
    State(state): State<ApiState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let Path(device_id) = path?;
    let body = body.map_err(|e| {
        tracing::warn!(device_id = %device_id, error = %e, "register body rejected");
        ApiError::from(e)
    })?;
    let ip = parse_register_body(&body, state.expose_internal_errors)?;

    let record = state.registry.register(&device_id, &ip);
    tracing::info!(
        device_id = %record.device_id,
        ip = %record.address,
        last_seen = record.last_seen,
        "device registered"
    );

    Ok(Json(RegisterResponse {
        status: "success",
        device_id: record.device_id,
        ip: record.address,
    }))
}

// ── /lookup/{device_id} (GET) ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LookupResponse {
    pub status: &'static str,
    pub device_id: String,
    pub ip: String,
    pub last_seen: u64,
}

pub async fn handle_lookup(
    State(state): State<ApiState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<LookupResponse>, ApiError> {
    let Path(device_id) = path?;
    let record = state.registry.lookup(&device_id).ok_or_else(|| {
        tracing::debug!(device_id = %device_id, "lookup miss");
        ApiError::DeviceNotFound
    })?;

    Ok(Json(LookupResponse {
        status: "success",
        device_id: record.device_id,
        ip: record.address,
        last_seen: record.last_seen,
    }))
}

// ── /devices (GET) ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DevicesResponse {
    pub total: usize,
    pub devices: Vec<DeviceInfo>,
}

#[derive(Serialize)]
pub struct DeviceInfo {
    pub id: String,
    pub ip: String,
    pub last_seen: u64,
}

pub async fn handle_devices(State(state): State<ApiState>) -> Json<DevicesResponse> {
    let devices: Vec<DeviceInfo> = state
        .registry
        .snapshot()
        .into_iter()
        .map(|r| DeviceInfo {
            id: r.device_id,
            ip: r.address,
            last_seen: r.last_seen,
        })
        .collect();

    Json(DevicesResponse {
        total: devices.len(),
        devices,
    })
}
