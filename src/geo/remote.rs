//! Distance-matrix HTTP client.
//!
//! Queries a Google-style distance matrix endpoint for road distance
//! between two points. Uses the blocking `reqwest` client, so it must not
//! be called from inside an async runtime worker thread.

use super::types::DistanceSource;
use crate::error::DistanceError;
use crate::models::Coordinates;
use serde::Deserialize;
use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// Default distance-matrix endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    distance: Option<MatrixValue>,
}

#[derive(Debug, Deserialize)]
struct MatrixValue {
    value: f64,
}

/// Limits the number of requests in flight at once.
#[derive(Debug)]
struct Gate {
    limit: usize,
    in_flight: Mutex<usize>,
    released: Condvar,
}

impl Gate {
    fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            in_flight: Mutex::new(0),
            released: Condvar::new(),
        }
    }

    fn acquire(&self) -> Result<GatePermit<'_>, DistanceError> {
        let mut count = self
            .in_flight
            .lock()
            .map_err(|_| DistanceError::Unavailable("request gate poisoned".into()))?;
        while *count >= self.limit {
            count = self
                .released
                .wait(count)
                .map_err(|_| DistanceError::Unavailable("request gate poisoned".into()))?;
        }
        *count += 1;
        Ok(GatePermit { gate: self })
    }
}

struct GatePermit<'a> {
    gate: &'a Gate,
}

impl Drop for GatePermit<'_> {
    fn drop(&mut self) {
        if let Ok(mut count) = self.gate.in_flight.lock() {
            *count = count.saturating_sub(1);
        }
        self.gate.released.notify_one();
    }
}

/// Remote [`DistanceSource`] over HTTP.
#[derive(Debug)]
pub struct RemoteDistance {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    gate: Gate,
}

impl RemoteDistance {
    /// Creates a client with a 5 s timeout and at most 8 concurrent requests.
    pub fn new(api_key: impl Into<String>) -> Result<Self, DistanceError> {
        Self::with_options(api_key, DEFAULT_ENDPOINT, Duration::from_secs(5), 8)
    }

    pub fn with_options(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
        max_in_flight: usize,
    ) -> Result<Self, DistanceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DistanceError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            gate: Gate::new(max_in_flight),
        })
    }
}

impl DistanceSource for RemoteDistance {
    fn distance(&self, a: Coordinates, b: Coordinates) -> Result<f64, DistanceError> {
        let _permit = self.gate.acquire()?;
        let origins = format!("{},{}", a.lat, a.lng);
        let destinations = format!("{},{}", b.lat, b.lng);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("origins", origins.as_str()),
                ("destinations", destinations.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .map_err(|e| DistanceError::Unavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(DistanceError::Status(response.status().as_u16()));
        }
        let body = response
            .text()
            .map_err(|e| DistanceError::Unavailable(e.to_string()))?;
        parse_response(&body)
    }
}

/// Extracts the first element's distance in meters.
fn parse_response(body: &str) -> Result<f64, DistanceError> {
    let parsed: MatrixResponse =
        serde_json::from_str(body).map_err(|e| DistanceError::Malformed(e.to_string()))?;
    if parsed.status != "OK" {
        return Err(DistanceError::Malformed(format!("status {}", parsed.status)));
    }
    let element = parsed
        .rows
        .first()
        .and_then(|row| row.elements.first())
        .ok_or_else(|| DistanceError::Malformed("empty matrix".into()))?;
    if element.status != "OK" {
        return Err(DistanceError::Malformed(format!(
            "element status {}",
            element.status
        )));
    }
    element
        .distance
        .as_ref()
        .map(|d| d.value)
        .ok_or_else(|| DistanceError::Malformed("element has no distance".into()))
}
