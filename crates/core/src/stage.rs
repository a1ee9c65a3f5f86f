//! Pipeline stages and the stage-gating state machine.
//!
//! A project moves through five production stages. Each generation kind
//! declares which predecessor artifacts must already exist; the table lives
//! in [`GenerationKind::prerequisites`] and nowhere else. Callers load the
//! set of artifacts a project has ([`ArtifactSet`]) and ask
//! [`check_prerequisites`] before calling a provider.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Stage types (artifact kinds)
// ---------------------------------------------------------------------------

pub const STAGE_TYPE_INITIAL_DATA: &str = "initial_data";
pub const STAGE_TYPE_PRODUCT_SUMMARY: &str = "product_summary";
pub const STAGE_TYPE_EDUCATION_CONTENT: &str = "education_content";
pub const STAGE_TYPE_CREATIVE_PARTS: &str = "creative_parts";
pub const STAGE_TYPE_SCRIPT: &str = "script";

/// All valid `project_contents.stage_type` values, in pipeline order.
pub const VALID_STAGE_TYPES: &[&str] = &[
    STAGE_TYPE_INITIAL_DATA,
    STAGE_TYPE_PRODUCT_SUMMARY,
    STAGE_TYPE_EDUCATION_CONTENT,
    STAGE_TYPE_CREATIVE_PARTS,
    STAGE_TYPE_SCRIPT,
];

/// The kind of artifact produced or edited within a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageType {
    InitialData,
    ProductSummary,
    EducationContent,
    CreativeParts,
    Script,
}

impl StageType {
    /// Every stage type in pipeline order.
    pub const ALL: [StageType; 5] = [
        Self::InitialData,
        Self::ProductSummary,
        Self::EducationContent,
        Self::CreativeParts,
        Self::Script,
    ];

    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STAGE_TYPE_INITIAL_DATA => Ok(Self::InitialData),
            STAGE_TYPE_PRODUCT_SUMMARY => Ok(Self::ProductSummary),
            STAGE_TYPE_EDUCATION_CONTENT => Ok(Self::EducationContent),
            STAGE_TYPE_CREATIVE_PARTS => Ok(Self::CreativeParts),
            STAGE_TYPE_SCRIPT => Ok(Self::Script),
            _ => Err(CoreError::Validation(format!(
                "Invalid stage type '{s}'. Must be one of: {}",
                VALID_STAGE_TYPES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InitialData => STAGE_TYPE_INITIAL_DATA,
            Self::ProductSummary => STAGE_TYPE_PRODUCT_SUMMARY,
            Self::EducationContent => STAGE_TYPE_EDUCATION_CONTENT,
            Self::CreativeParts => STAGE_TYPE_CREATIVE_PARTS,
            Self::Script => STAGE_TYPE_SCRIPT,
        }
    }

    /// User-facing Japanese name of the stage.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InitialData => "初期データ",
            Self::ProductSummary => "商品情報サマリー",
            Self::EducationContent => "教育コンテンツ",
            Self::CreativeParts => "クリエイティブパーツ",
            Self::Script => "台本",
        }
    }

    /// The pipeline stage in which this artifact is produced.
    pub fn stage(&self) -> Stage {
        match self {
            Self::InitialData => Stage::InitialData,
            Self::ProductSummary => Stage::ProductSummary,
            Self::EducationContent => Stage::EducationContent,
            Self::CreativeParts => Stage::CreativeParts,
            Self::Script => Stage::ScriptGeneration,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// Stages (project.stage counter)
// ---------------------------------------------------------------------------

/// First stage of every new project.
pub const INITIAL_STAGE: i16 = 1;
/// Stage number meaning "all done".
pub const COMPLETE_STAGE: i16 = 6;

/// Value of the `projects.stage` counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(i16)]
pub enum Stage {
    InitialData = 1,
    ProductSummary = 2,
    EducationContent = 3,
    CreativeParts = 4,
    ScriptGeneration = 5,
    Complete = 6,
}

impl Stage {
    pub fn from_number(n: i16) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::InitialData),
            2 => Ok(Self::ProductSummary),
            3 => Ok(Self::EducationContent),
            4 => Ok(Self::CreativeParts),
            5 => Ok(Self::ScriptGeneration),
            6 => Ok(Self::Complete),
            _ => Err(CoreError::Validation(format!(
                "Invalid stage {n}. Must be between {INITIAL_STAGE} and {COMPLETE_STAGE}"
            ))),
        }
    }

    pub fn number(self) -> i16 {
        self as i16
    }

    /// The following stage, or `None` from [`Stage::Complete`].
    pub fn next(self) -> Option<Stage> {
        match self {
            Self::InitialData => Some(Self::ProductSummary),
            Self::ProductSummary => Some(Self::EducationContent),
            Self::EducationContent => Some(Self::CreativeParts),
            Self::CreativeParts => Some(Self::ScriptGeneration),
            Self::ScriptGeneration => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    /// The artifact this stage is about, or `None` for [`Stage::Complete`].
    pub fn artifact(self) -> Option<StageType> {
        match self {
            Self::InitialData => Some(StageType::InitialData),
            Self::ProductSummary => Some(StageType::ProductSummary),
            Self::EducationContent => Some(StageType::EducationContent),
            Self::CreativeParts => Some(StageType::CreativeParts),
            Self::ScriptGeneration => Some(StageType::Script),
            Self::Complete => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Generation kinds and the transition table
// ---------------------------------------------------------------------------

/// One of the AI generation actions a user can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationKind {
    ProductSummary,
    EducationContent,
    CreativeParts,
    Script,
    ScriptVariation,
}

impl GenerationKind {
    /// Artifact kind written by this generation.
    pub fn target(self) -> StageType {
        match self {
            Self::ProductSummary => StageType::ProductSummary,
            Self::EducationContent => StageType::EducationContent,
            Self::CreativeParts => StageType::CreativeParts,
            Self::Script | Self::ScriptVariation => StageType::Script,
        }
    }

    /// Predecessor artifacts that must exist with non-empty content, in
    /// pipeline order.
    pub fn prerequisites(self) -> &'static [StageType] {
        match self {
            Self::ProductSummary => &[StageType::InitialData],
            Self::EducationContent => &[StageType::ProductSummary],
            Self::CreativeParts => &[StageType::ProductSummary, StageType::EducationContent],
            Self::Script => &[
                StageType::ProductSummary,
                StageType::EducationContent,
                StageType::CreativeParts,
            ],
            Self::ScriptVariation => &[
                StageType::ProductSummary,
                StageType::EducationContent,
                StageType::CreativeParts,
                StageType::Script,
            ],
        }
    }

    /// Stage the project moves to after a successful run.
    ///
    /// Script generation is terminal for automatic transitions; reaching
    /// [`Stage::Complete`] requires an explicit completion action.
    pub fn advances_to(self) -> Option<Stage> {
        match self {
            Self::Script | Self::ScriptVariation => None,
            other => other.target().stage().next(),
        }
    }

    pub fn is_variation(self) -> bool {
        matches!(self, Self::ScriptVariation)
    }
}

// ---------------------------------------------------------------------------
// Prerequisite checking
// ---------------------------------------------------------------------------

/// Set of artifact kinds a project currently has with non-empty content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    present: [bool; 5],
}

impl ArtifactSet {
    pub fn insert(&mut self, stage_type: StageType) {
        self.present[stage_type.index()] = true;
    }

    pub fn contains(&self, stage_type: StageType) -> bool {
        self.present[stage_type.index()]
    }
}

impl FromIterator<StageType> for ArtifactSet {
    fn from_iter<I: IntoIterator<Item = StageType>>(iter: I) -> Self {
        let mut set = Self::default();
        for stage_type in iter {
            set.insert(stage_type);
        }
        set
    }
}

/// A generation was requested before one of its predecessors existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingPrerequisite {
    pub kind: GenerationKind,
    pub missing: StageType,
}

impl MissingPrerequisite {
    /// Localized guidance shown to the user, e.g.
    /// `ステージ2（商品情報サマリー）を先に完了してください`.
    pub fn message(&self) -> String {
        format!(
            "ステージ{}（{}）を先に完了してください",
            self.missing.stage().number(),
            self.missing.label()
        )
    }
}

impl std::fmt::Display for MissingPrerequisite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for MissingPrerequisite {}

/// Verify that every predecessor of `kind` is present.
///
/// Reports the first missing artifact in pipeline order.
pub fn check_prerequisites(
    kind: GenerationKind,
    present: &ArtifactSet,
) -> Result<(), MissingPrerequisite> {
    match kind
        .prerequisites()
        .iter()
        .find(|stage_type| !present.contains(**stage_type))
    {
        Some(missing) => Err(MissingPrerequisite {
            kind,
            missing: *missing,
        }),
        None => Ok(()),
    }
}

/// Returns `true` when stored content counts as "present" for gating.
pub fn is_meaningful_content(content: &str) -> bool {
    !content.trim().is_empty()
}

// ---------------------------------------------------------------------------
// Explicit stage completion
// ---------------------------------------------------------------------------

/// Result of a permitted explicit completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Artifact that had to exist for the current stage.
    pub artifact: StageType,
    /// Stage the project moves to.
    pub next: Stage,
}

/// Validate an explicit "complete current stage" action.
///
/// The current stage's own artifact must be present. There is no transition
/// out of [`Stage::Complete`].
pub fn plan_completion(current: Stage, present: &ArtifactSet) -> Result<Completion, CoreError> {
    let (Some(artifact), Some(next)) = (current.artifact(), current.next()) else {
        return Err(CoreError::Validation(
            "このプロジェクトはすでに完了しています".into(),
        ));
    };

    if !present.contains(artifact) {
        return Err(CoreError::Validation(format!(
            "ステージ{}（{}）のコンテンツがまだありません",
            current.number(),
            artifact.label()
        )));
    }

    Ok(Completion { artifact, next })
}
