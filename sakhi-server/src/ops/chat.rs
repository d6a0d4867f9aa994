//! Chat pipeline operations: context loading and history persistence.
//!
//! The conversation log is append-only. Within one conversation the only
//! ordering that matters is that the user's turn is written before the
//! reply is requested and the assistant's turn after generation; the two
//! inserts are independent and individually best-effort.

use sakhi_core::locale::Language;
use sakhi_core::models::{ChatRole, ChatTurn, FactCategory, ReferenceFact};
use sakhi_core::prompt::PromptTurn;
use sqlx::PgPool;
use uuid::Uuid;

/// Rows feeding one prompt build.
#[derive(Debug, Default)]
pub struct ChatContext {
    /// Chronological, most recent last, capped at the history limit.
    pub turns: Vec<PromptTurn>,
    pub facts: Vec<ReferenceFact>,
}

/// Load the most recent turns and the reference facts for one user.
/// History is capped here; the prompt builder assumes the cap is already
/// applied. Fact order is whatever the backing queries return.
pub async fn load_context(
    pool: &PgPool,
    user_id: Uuid,
    history_limit: i64,
    facts_limit: i64,
) -> Result<ChatContext, sqlx::Error> {
    let mut rows: Vec<ChatTurn> = sqlx::query_as(
        "SELECT * FROM chat_history \
         WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(user_id)
    .bind(history_limit)
    .fetch_all(pool)
    .await?;
    // Fetched newest-first; the prompt wants chronological order
    rows.reverse();

    let turns = rows
        .into_iter()
        .map(|t| PromptTurn::new(ChatRole::from_code(&t.role), t.content))
        .collect();

    let mut facts = Vec::new();

    let schemes: Vec<(String, String)> = sqlx::query_as(
        "SELECT scheme_name, description FROM government_schemes \
         WHERE active = TRUE LIMIT $1",
    )
    .bind(facts_limit)
    .fetch_all(pool)
    .await?;
    facts.extend(schemes.into_iter().map(|(name, description)| ReferenceFact {
        name,
        description,
        category: FactCategory::Scheme,
    }));

    let remedies: Vec<(String, String)> = sqlx::query_as(
        "SELECT condition_name, remedy_description FROM home_remedies LIMIT $1",
    )
    .bind(facts_limit)
    .fetch_all(pool)
    .await?;
    facts.extend(remedies.into_iter().map(|(name, description)| ReferenceFact {
        name,
        description,
        category: FactCategory::Remedy,
    }));

    Ok(ChatContext { turns, facts })
}

/// Append one turn to the conversation log.
pub async fn record_turn(
    pool: &PgPool,
    user_id: Uuid,
    role: ChatRole,
    content: &str,
    language: Language,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO chat_history (user_id, role, content, language, context_type) \
         VALUES ($1, $2, $3, $4, 'health')",
    )
    .bind(user_id)
    .bind(role.code())
    .bind(content)
    .bind(language.code())
    .execute(pool)
    .await?;
    Ok(())
}
