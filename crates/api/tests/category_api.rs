//! HTTP-level integration tests for the `/categories` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_category, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_get_category(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/categories",
        json!({ "name": "  Tutor  ", "price": "49.50", "terms": "Cash only, No refunds" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["name"], "Tutor");
    assert_eq!(json["data"]["price"], 49.5);
    assert_eq!(json["data"]["parent_id"], serde_json::Value::Null);
    assert_eq!(json["data"]["visible_to_user"], true);

    let response = get(build_test_app(pool), &format!("/api/v1/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["terms"], "Cash only, No refunds");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_requires_name(pool: PgPool) {
    for body in [json!({}), json!({ "name": "   " })] {
        let response = post_json(build_test_app(pool.clone()), "/api/v1/categories", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"], "Name required");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_invalid_price(pool: PgPool) {
    for price in [json!("abc"), json!(-1), json!("1.234")] {
        let response = post_json(
            build_test_app(pool.clone()),
            "/api/v1/categories",
            json!({ "name": "Bad", "price": price }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "price {price}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_under_missing_parent_is_404(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/categories",
        json!({ "name": "Orphan", "parent_id": 999999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_sibling_name_is_409(pool: PgPool) {
    let root = create_category(&pool, json!({ "name": "Tutor" })).await;
    create_category(&pool, json!({ "name": "Online", "parent_id": root })).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/categories",
        json!({ "name": "Online", "parent_id": root }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "DUPLICATE_NAME");

    // Roots are siblings of each other too.
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/categories",
        json!({ "name": "Tutor" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The failed attempts left exactly one of each.
    let response = get(
        build_test_app(pool),
        &format!("/api/v1/categories?parent_id={root}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_root_seeds_children(pool: PgPool) {
    let status = create_category(&pool, json!({ "name": "Status" })).await;

    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/categories?parent_id={status}"),
    )
    .await;
    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Accepted", "Pending", "Rejected"]);

    // A nested "Status" seeds nothing.
    let nested = create_category(&pool, json!({ "name": "Status", "parent_id": status })).await;
    let response = get(
        build_test_app(pool),
        &format!("/api/v1/categories?parent_id={nested}"),
    )
    .await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_orders_by_sequence_then_newest(pool: PgPool) {
    let root = create_category(&pool, json!({ "name": "Root" })).await;
    let a = create_category(&pool, json!({ "name": "A", "parent_id": root, "sequence": 1 })).await;
    let b = create_category(&pool, json!({ "name": "B", "parent_id": root, "sequence": 0 })).await;
    let c = create_category(&pool, json!({ "name": "C", "parent_id": root, "sequence": 1 })).await;

    let uri = format!("/api/v1/categories?parent_id={root}");
    let first = body_json(get(build_test_app(pool.clone()), &uri).await).await;
    let second = body_json(get(build_test_app(pool.clone()), &uri).await).await;
    let ids: Vec<i64> = first["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![b, c, a]);
    assert_eq!(first, second);

    let roots = body_json(get(build_test_app(pool), "/api/v1/categories").await).await;
    assert_eq!(roots["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update(pool: PgPool) {
    let id = create_category(
        &pool,
        json!({ "name": "A", "price": 100, "image_url": "https://cdn.example/a.png" }),
    )
    .await;
    let uri = format!("/api/v1/categories/{id}");

    // Absent fields are kept.
    let response = put_json(build_test_app(pool.clone()), &uri, json!({ "sequence": 4 })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["sequence"], 4);
    assert_eq!(json["data"]["price"], 100.0);
    assert_eq!(json["data"]["image_url"], "https://cdn.example/a.png");

    // Explicit null clears; empty string clears too.
    let response = put_json(
        build_test_app(pool.clone()),
        &uri,
        json!({ "price": null, "image_url": "" }),
    )
    .await;
    let json = body_json(response).await;
    assert!(json["data"]["price"].is_null());
    assert!(json["data"]["image_url"].is_null());

    // Zero is a real price.
    let response = put_json(build_test_app(pool.clone()), &uri, json!({ "price": "0" })).await;
    assert_eq!(body_json(response).await["data"]["price"], 0.0);

    // parent_id is immutable and ignored.
    let other = create_category(&pool, json!({ "name": "Other" })).await;
    let response = put_json(build_test_app(pool), &uri, json!({ "parent_id": other })).await;
    assert!(body_json(response).await["data"]["parent_id"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rename_to_sibling_name_is_409(pool: PgPool) {
    let root = create_category(&pool, json!({ "name": "Root" })).await;
    create_category(&pool, json!({ "name": "A", "parent_id": root })).await;
    let b = create_category(&pool, json!({ "name": "B", "parent_id": root })).await;

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/categories/{b}"),
        json!({ "name": "A" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "DUPLICATE_NAME");

    // Renaming to its own name is a no-op, not a conflict.
    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/categories/{b}"),
        json!({ "name": "B" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_category_is_404(pool: PgPool) {
    let response = put_json(
        build_test_app(pool),
        "/api/v1/categories/424242",
        json!({ "name": "X" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_leaf_and_refuse_parent(pool: PgPool) {
    let root = create_category(&pool, json!({ "name": "Root" })).await;
    let leaf = create_category(&pool, json!({ "name": "Leaf", "parent_id": root })).await;

    let response = delete(build_test_app(pool.clone()), &format!("/api/v1/categories/{root}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let response = delete(build_test_app(pool.clone()), &format!("/api/v1/categories/{leaf}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(build_test_app(pool.clone()), &format!("/api/v1/categories/{root}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool), &format!("/api/v1/categories/{root}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_racing_child_create_never_orphans(pool: PgPool) {
    for round in 0..50 {
        let parent = create_category(&pool, json!({ "name": format!("P{round}") })).await;

        let delete_url = format!("/api/v1/categories/{parent}");
        let (deleted, created) = tokio::join!(
            delete(build_test_app(pool.clone()), &delete_url),
            post_json(
                build_test_app(pool.clone()),
                "/api/v1/categories",
                json!({ "name": "Child", "parent_id": parent }),
            ),
        );

        match (deleted.status(), created.status()) {
            (StatusCode::NO_CONTENT, StatusCode::NOT_FOUND)
            | (StatusCode::CONFLICT, StatusCode::CREATED) => {}
            other => panic!("round {round}: unexpected statuses {other:?}"),
        }
    }

    let (dangling,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM categories c \
         WHERE c.parent_id IS NOT NULL \
         AND NOT EXISTS (SELECT 1 FROM categories p WHERE p.id = c.parent_id)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(dangling, 0);
}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_path_is_root_first(pool: PgPool) {
    let tutor = create_category(&pool, json!({ "name": "Tutor" })).await;
    let online = create_category(&pool, json!({ "name": "Online", "parent_id": tutor })).await;
    let neet = create_category(&pool, json!({ "name": "NEET", "parent_id": online })).await;
    let chem = create_category(&pool, json!({ "name": "Chemistry", "parent_id": neet })).await;

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/categories/{chem}/path"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"],
        json!(["Tutor", "Online", "NEET", "Chemistry"])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_path_stops_at_missing_parent(pool: PgPool) {
    let gone = create_category(&pool, json!({ "name": "Gone" })).await;
    let x = create_category(&pool, json!({ "name": "X", "parent_id": gone })).await;
    // Remove the parent behind the API's back to leave X dangling.
    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(gone)
        .execute(&pool)
        .await
        .unwrap();

    let response = get(build_test_app(pool), &format!("/api/v1/categories/{x}/path")).await;
    assert_eq!(body_json(response).await["data"], json!(["X"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_path_reports_cycles(pool: PgPool) {
    let a = create_category(&pool, json!({ "name": "A" })).await;
    let b = create_category(&pool, json!({ "name": "B", "parent_id": a })).await;
    sqlx::query("UPDATE categories SET parent_id = $1 WHERE id = $2")
        .bind(b)
        .bind(a)
        .execute(&pool)
        .await
        .unwrap();

    let response = get(build_test_app(pool), &format!("/api/v1/categories/{b}/path")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "CYCLE_DETECTED");
}
