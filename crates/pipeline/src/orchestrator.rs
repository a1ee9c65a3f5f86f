//! Pipeline orchestrator.
//!
//! Coordinates a single generation request from project lookup to stage
//! advancement. Built per request from the shared pool and generator; it
//! holds no state of its own beyond those handles.

use std::sync::Arc;

use adscript_core::content::{DataType, STATUS_DRAFT};
use adscript_core::prompts::{self, ScriptInputs, SourceMaterial};
use adscript_core::provider::Provider;
use adscript_core::error::CoreError;
use adscript_core::stage::{
    check_prerequisites, is_meaningful_content, plan_completion, ArtifactSet, GenerationKind,
    Stage, StageType,
};
use adscript_core::types::DbId;
use adscript_db::models::initial_data::InitialData;
use adscript_db::models::project::Project;
use adscript_db::models::project_content::{NewProjectContent, ProjectContent};
use adscript_db::repositories::{ApiSettingsRepo, InitialDataRepo, ProjectContentRepo, ProjectRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::credentials::Credentials;
use crate::error::PipelineError;
use crate::generator::TextGenerator;

/// Result of a successful stage generation.
#[derive(Debug, Serialize)]
pub struct GenerationOutcome {
    /// The newly inserted artifact row.
    pub content: ProjectContent,
    /// The project after any stage advancement.
    pub project: Project,
    pub provider: Provider,
    pub model: String,
}

/// Result of a free-form generation or text edit.
#[derive(Debug, Serialize)]
pub struct AdHocOutcome {
    pub text: String,
    pub provider: Provider,
    pub model: String,
}

/// Everything a generator may interpolate, loaded once per run.
struct StageInputs {
    project_id: DbId,
    items: Vec<InitialData>,
    /// Effective row per stage type (the selected script, else the newest).
    latest: Vec<ProjectContent>,
}

impl StageInputs {
    async fn load(pool: &PgPool, project_id: DbId) -> Result<Self, sqlx::Error> {
        Ok(Self {
            project_id,
            items: InitialDataRepo::list_for_project(pool, project_id).await?,
            latest: ProjectContentRepo::latest_per_stage(pool, project_id).await?,
        })
    }

    fn latest(&self, stage_type: StageType) -> Option<&ProjectContent> {
        self.latest
            .iter()
            .find(|c| c.stage_type == stage_type.as_str())
    }

    /// Content of the effective row, or `""` when there is none.
    fn text(&self, stage_type: StageType) -> &str {
        self.latest(stage_type).map(|c| c.content.as_str()).unwrap_or("")
    }

    /// Artifact kinds that count as present for gating.
    fn artifacts(&self) -> ArtifactSet {
        let mut set: ArtifactSet = StageType::ALL
            .into_iter()
            .filter(|t| is_meaningful_content(self.text(*t)))
            .collect();
        if self.items.iter().any(|i| is_meaningful_content(&i.content)) {
            set.insert(StageType::InitialData);
        }
        set
    }

    /// Stage-1 material as prompt input: non-blank items, then a manually
    /// written `initial_data` artifact if there is one.
    fn materials(&self) -> Vec<SourceMaterial<'_>> {
        let mut materials: Vec<SourceMaterial<'_>> = self
            .items
            .iter()
            .filter(|i| is_meaningful_content(&i.content))
            .map(|i| SourceMaterial {
                title: &i.title,
                content: &i.content,
                data_type: DataType::from_str_value(&i.data_type).unwrap_or(DataType::Text),
                source_url: i.source_url.as_deref(),
                tags: &i.tags,
            })
            .collect();

        let manual = self.text(StageType::InitialData);
        if is_meaningful_content(manual) {
            materials.push(SourceMaterial {
                title: StageType::InitialData.label(),
                content: manual,
                data_type: DataType::Text,
                source_url: None,
                tags: &[],
            });
        }
        materials
    }

    fn prompt(&self, kind: GenerationKind) -> String {
        let summary = self.text(StageType::ProductSummary);
        let education = self.text(StageType::EducationContent);
        let script_inputs = ScriptInputs {
            product_summary: summary,
            education_content: education,
            creative_parts: self.text(StageType::CreativeParts),
        };

        match kind {
            GenerationKind::ProductSummary => prompts::product_summary_prompt(&self.materials()),
            GenerationKind::EducationContent => {
                prompts::education_content_prompt(summary, &self.materials())
            }
            GenerationKind::CreativeParts => prompts::creative_parts_prompt(summary, education),
            GenerationKind::Script => prompts::script_prompt(&script_inputs, None),
            GenerationKind::ScriptVariation => {
                prompts::script_prompt(&script_inputs, Some(self.text(StageType::Script)))
            }
        }
    }
}

/// Runs stage generations, explicit completions and ad-hoc text calls.
///
/// A generation run:
/// 1. Look up the project within the caller's organization.
/// 2. Check the predecessor artifacts of the generation kind.
/// 3. Resolve the model and its vendor key.
/// 4. Build the prompt from the effective predecessor rows.
/// 5. Call the vendor once.
/// 6. Insert the result as a new draft row.
/// 7. Advance the project stage (never backwards).
///
/// Nothing is written before step 6, so any failure up to and including the
/// vendor call leaves the project untouched.
#[derive(Clone)]
pub struct Orchestrator {
    pool: PgPool,
    generator: Arc<dyn TextGenerator>,
    fallback_model: String,
}

impl Orchestrator {
    pub fn new(pool: PgPool, generator: Arc<dyn TextGenerator>, fallback_model: String) -> Self {
        Self {
            pool,
            generator,
            fallback_model,
        }
    }

    async fn credentials(
        &self,
        requested_model: Option<&str>,
    ) -> Result<Credentials, PipelineError> {
        let settings = ApiSettingsRepo::get(&self.pool).await?;
        Credentials::resolve(settings.as_ref(), requested_model, &self.fallback_model)
    }

    async fn find_project(
        &self,
        organization_id: DbId,
        project_id: DbId,
    ) -> Result<Project, PipelineError> {
        ProjectRepo::find_by_id(&self.pool, organization_id, project_id)
            .await?
            .ok_or(PipelineError::ProjectNotFound(project_id))
    }

    /// Run one stage generation for a project.
    #[tracing::instrument(skip(self), fields(stage_type = kind.target().as_str()))]
    pub async fn run(
        &self,
        organization_id: DbId,
        project_id: DbId,
        kind: GenerationKind,
        actor: DbId,
        requested_model: Option<&str>,
    ) -> Result<GenerationOutcome, PipelineError> {
        // 1. Project lookup.
        let project = self.find_project(organization_id, project_id).await?;

        // 2. Prerequisites.
        let inputs = StageInputs::load(&self.pool, project.id).await?;
        check_prerequisites(kind, &inputs.artifacts()).inspect_err(|e| {
            tracing::info!(
                missing = e.missing.as_str(),
                "Generation blocked by missing prerequisite"
            );
        })?;

        // 3. Credentials.
        let credentials = self.credentials(requested_model).await?;

        // 4. Prompt.
        let prompt = inputs.prompt(kind);

        // 5. Vendor call.
        let text = self
            .generator
            .generate(&credentials.model, &credentials.api_key, &prompt)
            .await?;

        // 6. Persist. Only the first primary script becomes the selected one.
        let is_selected = kind == GenerationKind::Script
            && !ProjectContentRepo::has_selected(&self.pool, inputs.project_id).await?;
        let content = ProjectContentRepo::insert(
            &self.pool,
            &NewProjectContent {
                project_id: project.id,
                stage_type: kind.target().as_str().to_string(),
                content: text,
                status: STATUS_DRAFT.to_string(),
                is_ai_generated: true,
                is_selected,
                created_by: Some(actor),
            },
        )
        .await?;

        // 7. Advance.
        let project = match kind.advances_to() {
            Some(next) => ProjectRepo::advance_stage(&self.pool, project.id, next.number())
                .await?
                .unwrap_or(project),
            None => project,
        };

        tracing::info!(
            project_id = project.id,
            content_id = content.id,
            provider = %credentials.model.provider,
            model = %credentials.model.name,
            stage = project.stage,
            "Stage generation stored",
        );

        Ok(GenerationOutcome {
            content,
            project,
            provider: credentials.model.provider,
            model: credentials.model.name,
        })
    }

    /// Explicitly complete the project's current stage.
    ///
    /// The current stage's artifact must be present. Its effective row (if
    /// the artifact is stored as a content row) is marked `completed`, then
    /// the project moves to the next stage.
    #[tracing::instrument(skip(self))]
    pub async fn complete_stage(
        &self,
        organization_id: DbId,
        project_id: DbId,
        actor: DbId,
    ) -> Result<Project, PipelineError> {
        let project = self.find_project(organization_id, project_id).await?;
        let current = Stage::from_number(project.stage)
            .map_err(|e| PipelineError::InvalidTransition(e.to_string()))?;

        let inputs = StageInputs::load(&self.pool, project.id).await?;
        let completion = plan_completion(current, &inputs.artifacts()).map_err(|e| match e {
            CoreError::Validation(msg) => PipelineError::InvalidTransition(msg),
            other => PipelineError::InvalidTransition(other.to_string()),
        })?;

        if let Some(row) = inputs.latest(completion.artifact) {
            ProjectContentRepo::mark_completed(&self.pool, row.id, actor).await?;
        }

        let project = ProjectRepo::advance_stage(&self.pool, project.id, completion.next.number())
            .await?
            .ok_or(PipelineError::ProjectNotFound(project_id))?;

        tracing::info!(project_id = project.id, stage = project.stage, "Stage completed");
        Ok(project)
    }

    /// Free-form generation, not tied to any project.
    pub async fn generate_text(
        &self,
        prompt: &str,
        requested_model: Option<&str>,
    ) -> Result<AdHocOutcome, PipelineError> {
        let credentials = self.credentials(requested_model).await?;
        let text = self
            .generator
            .generate(&credentials.model, &credentials.api_key, prompt)
            .await?;
        Ok(AdHocOutcome {
            text,
            provider: credentials.model.provider,
            model: credentials.model.name,
        })
    }

    /// Rewrite `text` according to `instruction`.
    pub async fn edit_text(
        &self,
        text: &str,
        instruction: &str,
        requested_model: Option<&str>,
    ) -> Result<AdHocOutcome, PipelineError> {
        let prompt = prompts::text_edit_prompt(text, instruction);
        self.generate_text(&prompt, requested_model).await
    }
}
