// handlers/public/info.rs - GET /public handler

use serde::Serialize;

use crate::middleware::ApiResponse;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

pub async fn info_get() -> ApiResponse<ServiceInfo> {
    ApiResponse::success(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        description: env!("CARGO_PKG_DESCRIPTION"),
    })
}
