use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::locale::Language;

/// Per-user profile written once at sign-up. `preferred_language` drives
/// localization of every page view.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub preferred_language: String,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn language(&self) -> Language {
        Language::from_code(&self.preferred_language)
    }
}
