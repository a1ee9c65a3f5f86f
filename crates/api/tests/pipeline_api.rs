//! End-to-end generation tests: HTTP request in, vendor call against a
//! wiremock server, rows out.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_as, post_as, post_json_as};
use serde_json::json;
use sqlx::PgPool;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEMINI_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

fn gemini_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]
    }))
}

/// Org admin `user_id` with one project holding one initial data item.
async fn project_with_material(pool: &PgPool, user_id: i64) -> i64 {
    common::seed_org_admin(pool, user_id).await;

    let app = common::build_offline_app(pool.clone());
    let json = body_json(
        post_json_as(app, user_id, "/api/projects/create", json!({ "name": "サプリ" })).await,
    )
    .await;
    let id = json["data"]["id"].as_i64().unwrap();

    let app = common::build_offline_app(pool.clone());
    let response = post_json_as(
        app,
        user_id,
        &format!("/api/projects/{id}/initial-data"),
        json!({ "title": "商品説明", "content": "美容サプリ" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    id
}

async fn contents(pool: &PgPool, user_id: i64, project_id: i64, stage_type: &str) -> Vec<serde_json::Value> {
    let app = common::build_offline_app(pool.clone());
    let json = body_json(
        get_as(
            app,
            user_id,
            &format!("/api/projects/{project_id}/contents?stage_type={stage_type}"),
        )
        .await,
    )
    .await;
    json["data"].as_array().unwrap().clone()
}

async fn insert_manual(pool: &PgPool, user_id: i64, project_id: i64, stage_type: &str, text: &str) {
    let app = common::build_offline_app(pool.clone());
    let response = post_json_as(
        app,
        user_id,
        &format!("/api/projects/{project_id}/contents"),
        json!({ "stage_type": stage_type, "content": text }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn education_without_summary_is_rejected(pool: PgPool) {
    let id = project_with_material(&pool, 100).await;
    common::seed_gemini_key(&pool).await;
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(gemini_reply("x")).expect(0).mount(&server).await;

    let app = common::build_test_app(pool.clone(), &server.uri());
    let response = post_as(app, 100, &format!("/api/projects/{id}/education-content")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_PREREQUISITE");
    assert!(json["error"].as_str().unwrap().contains("商品情報サマリー"));
    assert!(contents(&pool, 100, id, "education_content").await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_gemini_key_makes_no_network_call(pool: PgPool) {
    let id = project_with_material(&pool, 101).await;
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(gemini_reply("x")).expect(0).mount(&server).await;

    let app = common::build_test_app(pool.clone(), &server.uri());
    let response = post_as(app, 101, &format!("/api/projects/{id}/summary")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "APIキーが設定されていません");
    assert_eq!(json["details"]["provider"], "gemini");
    assert!(contents(&pool, 101, id, "product_summary").await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn summary_generation_stores_row_and_advances(pool: PgPool) {
    let id = project_with_material(&pool, 102).await;
    common::seed_gemini_key(&pool).await;
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(query_param("key", "test-gemini-key"))
        .respond_with(gemini_reply("商品名: 美容サプリ"))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::build_test_app(pool.clone(), &server.uri());
    let response = post_as(app, 102, &format!("/api/projects/{id}/summary")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"]["content"], "商品名: 美容サプリ");
    assert_eq!(json["data"]["content"]["stage_type"], "product_summary");
    assert_eq!(json["data"]["content"]["is_ai_generated"], true);
    assert_eq!(json["data"]["project"]["stage"], 3);
    assert_eq!(json["data"]["provider"], "gemini");
    assert_eq!(json["data"]["model"], "gemini-1.5-flash");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn vendor_error_surfaces_status_and_writes_nothing(pool: PgPool) {
    let id = project_with_material(&pool, 103).await;
    common::seed_gemini_key(&pool).await;
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "message": "Resource has been exhausted"}
        })))
        .mount(&server)
        .await;

    let app = common::build_test_app(pool.clone(), &server.uri());
    let response = post_as(app, 103, &format!("/api/projects/{id}/summary")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PROVIDER_ERROR");
    assert_eq!(json["details"]["status"], 429);
    assert!(json["error"].as_str().unwrap().contains("Resource has been exhausted"));
    assert!(contents(&pool, 103, id, "product_summary").await.is_empty());

    let app = common::build_offline_app(pool);
    let project = body_json(get_as(app, 103, &format!("/api/projects/{id}")).await).await;
    assert_eq!(project["data"]["stage"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn request_model_overrides_default(pool: PgPool) {
    let id = project_with_material(&pool, 104).await;
    common::seed_openai_key(&pool).await;
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "OpenAIの要約"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::build_test_app(pool, &server.uri());
    let response = post_json_as(
        app,
        104,
        &format!("/api/projects/{id}/summary"),
        json!({ "model": "gpt-4o-mini" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["provider"], "openai");
    assert_eq!(json["data"]["content"]["content"], "OpenAIの要約");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unsupported_model_is_rejected(pool: PgPool) {
    let id = project_with_material(&pool, 105).await;
    common::seed_gemini_key(&pool).await;

    let app = common::build_offline_app(pool);
    let response = post_json_as(
        app,
        105,
        &format!("/api/projects/{id}/summary"),
        json!({ "model": "llama-3" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].as_str().unwrap().contains("llama-3"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn model_override_cannot_rewrite_vendor_url(pool: PgPool) {
    let id = project_with_material(&pool, 111).await;
    common::seed_gemini_key(&pool).await;
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(gemini_reply("unused"))
        .expect(0)
        .mount(&server)
        .await;

    let app = common::build_test_app(pool, &server.uri());
    let response = post_json_as(
        app,
        111,
        &format!("/api/projects/{id}/summary"),
        json!({ "model": "gemini-1.5-flash:streamGenerateContent?alt=sse" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "UNSUPPORTED_MODEL");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn script_variation_leaves_original_untouched(pool: PgPool) {
    let id = project_with_material(&pool, 106).await;
    common::seed_gemini_key(&pool).await;
    insert_manual(&pool, 106, id, "product_summary", "サマリー").await;
    insert_manual(&pool, 106, id, "education_content", "教育").await;
    insert_manual(&pool, 106, id, "creative_parts", "パーツ").await;

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(gemini_reply("台本その1"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(gemini_reply("台本その2"))
        .mount(&server)
        .await;

    let app = common::build_test_app(pool.clone(), &server.uri());
    let response = post_as(app, 106, &format!("/api/projects/{id}/script-generation")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let original = body_json(response).await["data"]["content"].clone();
    assert_eq!(original["is_selected"], true);

    let app = common::build_test_app(pool.clone(), &server.uri());
    let response =
        post_as(app, 106, &format!("/api/projects/{id}/script-generation/variation")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let variation = body_json(response).await["data"]["content"].clone();
    assert_ne!(variation["id"], original["id"]);
    assert_eq!(variation["content"], "台本その2");
    assert_eq!(variation["is_selected"], false);

    let scripts = contents(&pool, 106, id, "script").await;
    assert_eq!(scripts.len(), 2);
    let stored_original = scripts.iter().find(|r| r["id"] == original["id"]).unwrap();
    assert_eq!(stored_original, &original);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn variation_without_script_is_rejected(pool: PgPool) {
    let id = project_with_material(&pool, 107).await;
    common::seed_gemini_key(&pool).await;
    insert_manual(&pool, 107, id, "product_summary", "サマリー").await;
    insert_manual(&pool, 107, id, "education_content", "教育").await;
    insert_manual(&pool, 107, id, "creative_parts", "パーツ").await;

    let app = common::build_offline_app(pool);
    let response =
        post_as(app, 107, &format!("/api/projects/{id}/script-generation/variation")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["details"]["stage_type"], "script");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stage_completion_walks_to_done(pool: PgPool) {
    let id = project_with_material(&pool, 108).await;
    let complete = format!("/api/projects/{id}/stage/complete");

    // Stage 1 has its material, so it completes.
    let app = common::build_offline_app(pool.clone());
    let json = body_json(post_as(app, 108, &complete).await).await;
    assert_eq!(json["data"]["stage"], 2);

    // Stage 2 has no summary yet.
    let app = common::build_offline_app(pool.clone());
    let response = post_as(app, 108, &complete).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_TRANSITION");

    insert_manual(&pool, 108, id, "product_summary", "サマリー").await;
    let app = common::build_offline_app(pool.clone());
    let json = body_json(post_as(app, 108, &complete).await).await;
    assert_eq!(json["data"]["stage"], 3);

    let summaries = contents(&pool, 108, id, "product_summary").await;
    assert_eq!(summaries[0]["status"], "completed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn selected_script_is_the_one_completed(pool: PgPool) {
    let id = project_with_material(&pool, 110).await;
    insert_manual(&pool, 110, id, "product_summary", "サマリー").await;
    insert_manual(&pool, 110, id, "education_content", "教育").await;
    insert_manual(&pool, 110, id, "creative_parts", "パーツ").await;
    // The first script is auto-selected; the newer one is a plain variant.
    insert_manual(&pool, 110, id, "script", "採用台本").await;
    insert_manual(&pool, 110, id, "script", "別案").await;

    let app = common::build_offline_app(pool.clone());
    let json = body_json(get_as(app, 110, &format!("/api/projects/{id}/contents/latest")).await).await;
    let effective = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["stage_type"] == "script")
        .unwrap()
        .clone();
    assert_eq!(effective["content"], "採用台本");

    let complete = format!("/api/projects/{id}/stage/complete");
    for expected in 2..=6 {
        let app = common::build_offline_app(pool.clone());
        let json = body_json(post_as(app, 110, &complete).await).await;
        assert_eq!(json["data"]["stage"], expected);
    }

    let scripts = contents(&pool, 110, id, "script").await;
    let chosen = scripts.iter().find(|c| c["content"] == "採用台本").unwrap();
    let other = scripts.iter().find(|c| c["content"] == "別案").unwrap();
    assert_eq!(chosen["is_selected"], true);
    assert_eq!(chosen["status"], "completed");
    assert_eq!(other["status"], "draft");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn text_edit_uses_the_instruction(pool: PgPool) {
    common::seed_user(&pool, 109, "writer@example.com").await;
    common::seed_gemini_key(&pool).await;
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(gemini_reply("やさしい文章"))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::build_test_app(pool.clone(), &server.uri());
    let response = post_json_as(
        app,
        109,
        "/api/text-edit",
        json!({ "text": "硬い文章", "instruction": "やわらかく" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["text"], "やさしい文章");

    let app = common::build_offline_app(pool);
    let response = post_json_as(app, 109, "/api/ai/generate", json!({ "prompt": "  " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
