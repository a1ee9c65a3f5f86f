//! Handlers for the four stage generators and script variation.
//!
//! Each handler is a thin wrapper over [`Orchestrator::run`]; the request
//! body is optional and only carries a model override.
//!
//! [`Orchestrator::run`]: adscript_pipeline::Orchestrator::run

use axum::extract::State;
use axum::http::StatusCode;
use adscript_core::stage::GenerationKind;
use adscript_core::types::DbId;
use adscript_pipeline::GenerationOutcome;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{Json, Path};
use crate::middleware::rbac::OrgMember;
use crate::response::DataResponse;
use crate::state::AppState;

/// Optional body of every generation request.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    /// Model override; falls back to the stored default.
    pub model: Option<String>,
}

type GenerationResponse = (StatusCode, Json<DataResponse<GenerationOutcome>>);

async fn run(
    state: AppState,
    member: OrgMember,
    project_id: DbId,
    kind: GenerationKind,
    body: Option<Json<GenerateRequest>>,
) -> AppResult<GenerationResponse> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let outcome = state
        .orchestrator()
        .run(
            member.organization_id,
            project_id,
            kind,
            member.user_id,
            request.model.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}

/// POST /api/projects/{id}/summary
pub async fn product_summary(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<GenerateRequest>>,
) -> AppResult<GenerationResponse> {
    run(state, member, id, GenerationKind::ProductSummary, body).await
}

/// POST /api/projects/{id}/education-content
pub async fn education_content(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<GenerateRequest>>,
) -> AppResult<GenerationResponse> {
    run(state, member, id, GenerationKind::EducationContent, body).await
}

/// POST /api/projects/{id}/creative-parts
pub async fn creative_parts(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<GenerateRequest>>,
) -> AppResult<GenerationResponse> {
    run(state, member, id, GenerationKind::CreativeParts, body).await
}

/// POST /api/projects/{id}/script-generation
pub async fn script(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<GenerateRequest>>,
) -> AppResult<GenerationResponse> {
    run(state, member, id, GenerationKind::Script, body).await
}

/// POST /api/projects/{id}/script-generation/variation
pub async fn script_variation(
    member: OrgMember,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<GenerateRequest>>,
) -> AppResult<GenerationResponse> {
    run(state, member, id, GenerationKind::ScriptVariation, body).await
}
