use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use crate::locale::{resolve, Language};

/// A WHO-reviewed home remedy row. English fields are authoritative; the
/// `_hi` / `_mr` columns are optional overrides.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HomeRemedy {
    pub id: Uuid,
    pub condition_name: String,
    pub condition_name_hi: Option<String>,
    pub condition_name_mr: Option<String>,
    pub symptoms: String,
    pub symptoms_hi: Option<String>,
    pub symptoms_mr: Option<String>,
    pub remedy_description: String,
    pub remedy_description_hi: Option<String>,
    pub remedy_description_mr: Option<String>,
    pub ingredients: Json<Vec<String>>,
    pub preparation_steps: String,
    pub preparation_steps_hi: Option<String>,
    pub preparation_steps_mr: Option<String>,
    pub precautions: Option<String>,
    pub precautions_hi: Option<String>,
    pub precautions_mr: Option<String>,
    pub who_approved: bool,
    pub age_group: Option<String>,
    pub category: String,
}

/// Fully localized remedy view. Produced by [`HomeRemedy::localize`] so
/// every text field goes through the same resolution and a card is never
/// shown half-translated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedRemedy {
    pub id: Uuid,
    pub condition_name: String,
    pub symptoms: String,
    pub remedy_description: String,
    pub ingredients: Vec<String>,
    pub preparation_steps: String,
    pub precautions: Option<String>,
    pub who_approved: bool,
    pub age_group: Option<String>,
    pub category: String,
}

impl HomeRemedy {
    pub fn localize(&self, lang: Language) -> LocalizedRemedy {
        LocalizedRemedy {
            id: self.id,
            condition_name: resolve(
                &self.condition_name,
                self.condition_name_hi.as_deref(),
                self.condition_name_mr.as_deref(),
                lang,
            )
            .to_string(),
            symptoms: resolve(
                &self.symptoms,
                self.symptoms_hi.as_deref(),
                self.symptoms_mr.as_deref(),
                lang,
            )
            .to_string(),
            remedy_description: resolve(
                &self.remedy_description,
                self.remedy_description_hi.as_deref(),
                self.remedy_description_mr.as_deref(),
                lang,
            )
            .to_string(),
            ingredients: self.ingredients.0.clone(),
            preparation_steps: resolve(
                &self.preparation_steps,
                self.preparation_steps_hi.as_deref(),
                self.preparation_steps_mr.as_deref(),
                lang,
            )
            .to_string(),
            precautions: self.precautions.as_ref().map(|p| {
                resolve(
                    p,
                    self.precautions_hi.as_deref(),
                    self.precautions_mr.as_deref(),
                    lang,
                )
                .to_string()
            }),
            who_approved: self.who_approved,
            age_group: self.age_group.clone(),
            category: self.category.clone(),
        }
    }

    /// Case-insensitive match over the default-language searchable fields,
    /// used by the in-memory search filter.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.condition_name.to_lowercase().contains(&q)
            || self.symptoms.to_lowercase().contains(&q)
            || self.category.to_lowercase().contains(&q)
    }
}
