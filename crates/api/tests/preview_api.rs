//! HTTP-level integration tests for the storefront preview.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_category, create_vendor, get, put_json};
use serde_json::json;
use sqlx::PgPool;

async fn vendor(pool: &PgPool) -> i64 {
    create_vendor(
        pool,
        json!({ "contact_name": "Ravi", "business_name": "Ravi Tutors", "phone": "0201234567" }),
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_returns_top_level_tree_and_path(pool: PgPool) {
    let vendor = vendor(&pool).await;
    let tutor = create_category(&pool, json!({ "name": "Tutor" })).await;
    let online = create_category(&pool, json!({ "name": "Online", "parent_id": tutor })).await;
    let chem = create_category(
        &pool,
        json!({ "name": "Chemistry", "parent_id": online, "price": 500, "visible_to_user": false }),
    )
    .await;
    create_category(&pool, json!({ "name": "Plumbing" })).await;

    put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/vendors/{vendor}/prices"),
        json!({ "category_id": chem, "price": 450 }),
    )
    .await;

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/vendors/{vendor}/preview/{chem}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["vendor"]["id"], vendor);
    assert_eq!(data["selected_category_id"], chem);
    assert_eq!(data["path"], json!(["Tutor", "Online", "Chemistry"]));

    let root = &data["categories"];
    assert_eq!(root["id"], tutor);
    let chem_node = &root["children"][0]["children"][0];
    assert_eq!(chem_node["id"], chem);
    assert_eq!(chem_node["vendor_price"], 450.0);
    assert_eq!(chem_node["default_price"], 500.0);
    // Hidden nodes are still returned, flagged.
    assert_eq!(chem_node["visible_to_user"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_of_top_level_category(pool: PgPool) {
    let vendor = vendor(&pool).await;
    let tutor = create_category(&pool, json!({ "name": "Tutor" })).await;

    let json = body_json(
        get(
            build_test_app(pool),
            &format!("/api/v1/vendors/{vendor}/preview/{tutor}"),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["path"], json!(["Tutor"]));
    assert_eq!(json["data"]["categories"]["id"], tutor);
    assert_eq!(json["data"]["categories"]["children"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_unknown_category_is_404(pool: PgPool) {
    let vendor = vendor(&pool).await;
    let response = get(
        build_test_app(pool),
        &format!("/api/v1/vendors/{vendor}/preview/9999"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_unknown_vendor_is_404(pool: PgPool) {
    let tutor = create_category(&pool, json!({ "name": "Tutor" })).await;
    let response = get(
        build_test_app(pool),
        &format!("/api/v1/vendors/4040/preview/{tutor}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
