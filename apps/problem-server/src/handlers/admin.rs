//! Admin handlers and API key checks.

use actix_web::{HttpRequest, HttpResponse, web};
use lathos_core::ErrClient;
use lathos_shared::ApiResponse;
use serde::Deserialize;

use super::API_KEY_HEADER;
use crate::middleware::error::{AppResult, RequestResultExt};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MaintenanceRequest {
    pub enabled: bool,
}

/// Require the admin API key on `req`.
pub(crate) fn authorise(req: &HttpRequest, expected: &str) -> Result<(), ErrClient> {
    let key = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ErrClient::not_authenticated("AUTH401", "missing x-api-key header"))?;

    if key != expected {
        return Err(ErrClient::not_authorised(
            "AUTH403",
            "api key is not allowed to modify the catalog",
        ));
    }
    Ok(())
}

/// PUT /api/admin/maintenance
pub async fn set_maintenance(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<MaintenanceRequest>,
) -> AppResult<HttpResponse> {
    authorise(&req, &state.admin_api_key).with_request(&req)?;

    state.catalog.set_maintenance(body.enabled);

    Ok(HttpResponse::Ok().json(ApiResponse::ok(body.enabled)))
}
