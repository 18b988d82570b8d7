//! Response bodies shared across resources

use serde::Serialize;

/// `{"id": ...}` returned by create endpoints
#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: i32,
}

/// `{"status": "ok"}` returned by update/delete endpoints
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}
