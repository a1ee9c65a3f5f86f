//! Repository for the singleton `api_settings` row.

use sqlx::PgPool;

use crate::models::api_settings::{ApiSettings, UpdateApiSettings};

const COLUMNS: &str = "gemini_api_key, openai_api_key, claude_api_key, deepseek_api_key, \
                       default_model, updated_at";

/// Reads and writes vendor credentials.
pub struct ApiSettingsRepo;

impl ApiSettingsRepo {
    /// Load the settings row, or `None` if it was removed by hand.
    pub async fn get(pool: &PgPool) -> Result<Option<ApiSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM api_settings WHERE id = 1");
        sqlx::query_as::<_, ApiSettings>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Apply an update, creating the row if it is missing.
    ///
    /// An absent key leaves the stored value; an empty string clears it.
    /// A blank `default_model` is ignored.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateApiSettings,
    ) -> Result<ApiSettings, sqlx::Error> {
        sqlx::query("INSERT INTO api_settings (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(pool)
            .await?;

        let query = format!(
            "UPDATE api_settings SET
                gemini_api_key = CASE WHEN $1::TEXT IS NULL THEN gemini_api_key ELSE NULLIF(btrim($1), '') END,
                openai_api_key = CASE WHEN $2::TEXT IS NULL THEN openai_api_key ELSE NULLIF(btrim($2), '') END,
                claude_api_key = CASE WHEN $3::TEXT IS NULL THEN claude_api_key ELSE NULLIF(btrim($3), '') END,
                deepseek_api_key = CASE WHEN $4::TEXT IS NULL THEN deepseek_api_key ELSE NULLIF(btrim($4), '') END,
                default_model = COALESCE(NULLIF(btrim($5), ''), default_model)
             WHERE id = 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiSettings>(&query)
            .bind(&input.gemini_api_key)
            .bind(&input.openai_api_key)
            .bind(&input.claude_api_key)
            .bind(&input.deepseek_api_key)
            .bind(&input.default_model)
            .fetch_one(pool)
            .await
    }
}
