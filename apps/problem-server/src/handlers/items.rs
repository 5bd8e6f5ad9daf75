//! Item catalog handlers.

use actix_web::{HttpRequest, HttpResponse, web};
use anyhow::Context;
use lathos_shared::ApiResponse;
use lathos_shared::dto::{CreateItemRequest, ItemResponse};

use super::admin::authorise;
use crate::middleware::error::{AppResult, RequestResultExt};
use crate::state::AppState;

/// GET /api/items
pub async fn list_items(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    let items = state
        .catalog
        .list()
        .context("listing items")
        .with_request(&req)?;

    let items: Vec<ItemResponse> = items.into_iter().map(ItemResponse::from).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(items)))
}

/// GET /api/items/{id}
pub async fn get_item(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<u64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let item = state
        .catalog
        .get(id)
        .with_context(|| format!("loading item {id}"))
        .with_request(&req)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ItemResponse::from(item))))
}

/// POST /api/items
pub async fn create_item(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateItemRequest>,
) -> AppResult<HttpResponse> {
    let item = state
        .catalog
        .create(&body.name)
        .context("creating item")
        .with_request(&req)?;

    tracing::info!(id = item.id, name = %item.name, "Item created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(ItemResponse::from(item))))
}

/// DELETE /api/items/{id}
pub async fn delete_item(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<u64>,
) -> AppResult<HttpResponse> {
    authorise(&req, &state.admin_api_key).with_request(&req)?;

    let id = path.into_inner();
    let item = state
        .catalog
        .remove(id)
        .with_context(|| format!("removing item {id}"))
        .with_request(&req)?;

    tracing::info!(id = item.id, "Item removed");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        ItemResponse::from(item),
        "removed",
    )))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use lathos_shared::ErrorResponse;
    use serde_json::json;

    use crate::config::AppConfig;
    use crate::handlers::{API_KEY_HEADER, configure_routes};
    use crate::state::AppState;

    fn test_state(capacity: usize) -> AppState {
        AppState::new(&AppConfig {
            catalog_capacity: capacity,
            admin_api_key: "secret".to_string(),
            ..AppConfig::default()
        })
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_create_then_get() {
        let app = test_app!(test_state(10));

        let req = test::TestRequest::post()
            .uri("/api/items")
            .set_json(json!({ "name": "widget" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::get().uri("/api/items/1").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"], json!({ "id": 1, "name": "widget" }));
    }

    #[actix_web::test]
    async fn test_missing_item_is_problem_404() {
        let app = test_app!(test_state(10));

        let req = test::TestRequest::get()
            .uri("/api/items/99")
            .insert_header(("x-request-id", "req-1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let problem: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(problem.title, "Not found");
        assert_eq!(problem.code.as_deref(), Some("ITEM404"));
        assert_eq!(problem.detail.as_deref(), Some("item 99 does not exist"));
        assert_eq!(problem.request_id.as_deref(), Some("req-1"));
    }

    #[actix_web::test]
    async fn test_create_rejections_map_to_statuses() {
        let app = test_app!(test_state(1));

        let cases = [
            ("", StatusCode::BAD_REQUEST, "ITEM400"),
            ("widget", StatusCode::CREATED, ""),
            ("widget", StatusCode::CONFLICT, "ITEM409"),
            ("gadget", StatusCode::UNPROCESSABLE_ENTITY, "ITEM422"),
        ];

        for (name, status, code) in cases {
            let req = test::TestRequest::post()
                .uri("/api/items")
                .set_json(json!({ "name": name }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), status, "creating {name:?}");

            if status != StatusCode::CREATED {
                let problem: ErrorResponse = test::read_body_json(resp).await;
                assert_eq!(problem.code.as_deref(), Some(code));
            }
        }
    }

    #[actix_web::test]
    async fn test_delete_requires_api_key() {
        let app = test_app!(test_state(10));

        let req = test::TestRequest::post()
            .uri("/api/items")
            .set_json(json!({ "name": "widget" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::delete().uri("/api/items/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::delete()
            .uri("/api/items/1")
            .insert_header((API_KEY_HEADER, "wrong"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri("/api/items/1")
            .insert_header((API_KEY_HEADER, "secret"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::delete()
            .uri("/api/items/1")
            .insert_header((API_KEY_HEADER, "secret"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_maintenance_mode_is_unavailable() {
        let app = test_app!(test_state(10));

        let req = test::TestRequest::put()
            .uri("/api/admin/maintenance")
            .insert_header((API_KEY_HEADER, "secret"))
            .set_json(json!({ "enabled": true }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/items")
            .set_json(json!({ "name": "widget" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let problem: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(problem.title, "Not available");
        assert_eq!(problem.code.as_deref(), Some("CAT503"));

        let req = test::TestRequest::get().uri("/api/items").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
