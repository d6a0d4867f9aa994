//! Profile reads and the sign-up companion insert.

use sakhi_core::locale::Language;
use sakhi_core::models::Profile;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn fetch_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_profile(
    pool: &PgPool,
    user_id: Uuid,
    full_name: Option<&str>,
    preferred_language: Language,
) -> Result<Profile, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "INSERT INTO profiles (id, full_name, preferred_language) \
         VALUES ($1, $2, $3) \
         RETURNING *",
    )
    .bind(user_id)
    .bind(full_name)
    .bind(preferred_language.code())
    .fetch_one(pool)
    .await
}
